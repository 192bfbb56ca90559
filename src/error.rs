use std::collections::TryReserveError;

/// Error type the injected compressor may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid file name: {len} bytes, the header can hold at most {max}")]
    InvalidFileName { len: usize, max: usize },

    #[error("Write failure: {0}")]
    WriteFailure(#[from] TryReserveError),

    #[error("Write failure, compressor failed: {0}")]
    Compressor(#[source] BoxError),

    #[error("Invalid block size: {size}, expected 1..={max}")]
    InvalidBlockSize { size: usize, max: usize },
}

impl Error {
    /// The sink or the compressor gave up while the stream was being written.
    pub fn is_write_failure(&self) -> bool {
        matches!(self, Error::WriteFailure(_) | Error::Compressor(_))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
