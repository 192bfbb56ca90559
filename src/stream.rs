use std::sync::Arc;

use bytes::{BufMut, Bytes};
use scopeguard::ScopeGuard;

use crate::{
    compressor::Compressor,
    config::{Config, MAGIC, TERMINATOR},
    error::Result,
    format::{
        block::{block_count, encode_blocks, BlockStats, BLOCK_HEADER_SIZE},
        header::Header,
        reserve,
    },
    scratch::ScratchBuffer,
};

/// Bytes every stream carries besides the header and the blocks.
pub const fn fixed_overhead() -> usize {
    MAGIC.len() + TERMINATOR.len()
}

/// Writes complete lzop streams: magic, header, blocks, terminator.
///
/// An `Encoder` holds no per-call state and can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: Arc<Config>,
}

impl Encoder {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Upper bound of the stream size, reached when every block is stored raw.
    pub fn max_encoded_len(&self, file_name_len: usize, data_len: usize) -> usize {
        fixed_overhead()
            + Header::encoded_len_for(file_name_len)
            + block_count(&self.config, data_len) * BLOCK_HEADER_SIZE
            + data_len
    }

    /// Encodes into a new buffer.
    pub fn encode<C>(
        &self,
        file_time: i64,
        file_name: &str,
        data: &[u8],
        mut compressor: C,
    ) -> Result<Bytes>
    where
        C: Compressor,
    {
        let header = Header::new(&self.config, file_time, file_name)?;
        let mut buf = Vec::new();
        self.write_stream(&header, data, &mut compressor, &mut buf)?;
        Ok(buf.into())
    }

    /// Encodes into `scratch`, reusing its allocation.
    ///
    /// The scratch buffer is reset before anything is written. On error it is
    /// left empty.
    pub fn encode_into<'s, C>(
        &self,
        scratch: &'s mut ScratchBuffer,
        file_time: i64,
        file_name: &str,
        data: &[u8],
        mut compressor: C,
    ) -> Result<&'s [u8]>
    where
        C: Compressor,
    {
        let mut lease = scopeguard::guard(scratch.lease(), |mut lease| lease.discard());

        let header = Header::new(&self.config, file_time, file_name)?;
        self.write_stream(&header, data, &mut compressor, lease.sink())?;

        Ok(ScopeGuard::into_inner(lease).into_slice())
    }

    fn write_stream<C>(
        &self,
        header: &Header<'_>,
        data: &[u8],
        compressor: &mut C,
        buf: &mut Vec<u8>,
    ) -> Result<BlockStats>
    where
        C: Compressor + ?Sized,
    {
        let start = buf.len();
        reserve(buf, self.max_encoded_len(header.file_name_len(), data.len()))?;

        buf.put_slice(&MAGIC);
        header.encode_to(buf)?;
        let stats = encode_blocks(&self.config, data, compressor, buf)?;
        reserve(buf, TERMINATOR.len())?;
        buf.put_slice(&TERMINATOR);

        tracing::debug!(
            "encode lzop stream, payload len: {}, blocks: {}, fallbacks: {}, output len: {}",
            data.len(),
            stats.blocks,
            stats.fallbacks,
            buf.len() - start
        );

        Ok(stats)
    }
}

/// [`Encoder::encode`] with the default configuration.
pub fn encode<C>(file_time: i64, file_name: &str, data: &[u8], compressor: C) -> Result<Bytes>
where
    C: Compressor,
{
    Encoder::default().encode(file_time, file_name, data, compressor)
}

/// [`Encoder::encode_into`] with the default configuration.
pub fn encode_into<'s, C>(
    scratch: &'s mut ScratchBuffer,
    file_time: i64,
    file_name: &str,
    data: &[u8],
    compressor: C,
) -> Result<&'s [u8]>
where
    C: Compressor,
{
    Encoder::default().encode_into(scratch, file_time, file_name, data, compressor)
}
