use crate::error::BoxError;

/// Block compressor plugged into the encoder.
///
/// The output carries no contract: it may be larger than the input, in which
/// case the encoder stores the raw block instead. Calls are sequential, one
/// per nonempty block, in payload order.
pub trait Compressor {
    fn compress(&mut self, block: &[u8]) -> Result<Vec<u8>, BoxError>;
}

/// Any infallible `&[u8] -> Vec<u8>` function, e.g. an LZO1X-1 binding.
impl<F> Compressor for F
where
    F: FnMut(&[u8]) -> Vec<u8>,
{
    fn compress(&mut self, block: &[u8]) -> Result<Vec<u8>, BoxError> {
        Ok(self(block))
    }
}

/// Adapter for compressors that can fail.
pub struct TryCompressor<F>(pub F);

impl<F, E> Compressor for TryCompressor<F>
where
    F: FnMut(&[u8]) -> Result<Vec<u8>, E>,
    E: Into<BoxError>,
{
    fn compress(&mut self, block: &[u8]) -> Result<Vec<u8>, BoxError> {
        (self.0)(block).map_err(Into::into)
    }
}

/// Hands every block back unchanged, so every block is stored raw.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stored;

impl Compressor for Stored {
    fn compress(&mut self, block: &[u8]) -> Result<Vec<u8>, BoxError> {
        Ok(block.to_vec())
    }
}
