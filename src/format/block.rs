//! Block format:
//!
//! ```text
//!     +--------------------------------------------------------+
//!     | raw len: 4b | stored len: 4b | raw data checksum: 4b   |
//!     +--------------------------------------------------------+
//!     | stored data: stored len bytes                          |
//!     +--------------------------------------------------------+
//! ```
//!
//! `stored len < raw len` means the data is compressed. Otherwise the raw
//! bytes follow, so `stored len <= raw len` always holds. A block never has
//! `raw len == 0`, that value is the end of stream marker.

use bytes::BufMut;

use crate::{
    compressor::Compressor,
    config::Config,
    error::{Error, Result},
};

use super::{reserve, SIZE_U32};

/// `raw len + stored len + checksum`.
pub const BLOCK_HEADER_SIZE: usize = 3 * SIZE_U32;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BlockStats {
    pub blocks: usize,
    /// Blocks written raw because compression did not shrink them.
    pub fallbacks: usize,
    pub stored_bytes: usize,
}

/// Splits `data` into `config.block_size` chunks, compresses each one and
/// appends the framed blocks to `buf` in payload order.
///
/// Empty input appends nothing.
pub fn encode_blocks<C>(
    config: &Config,
    data: &[u8],
    compressor: &mut C,
    buf: &mut Vec<u8>,
) -> Result<BlockStats>
where
    C: Compressor + ?Sized,
{
    let mut stats = BlockStats::default();

    for raw in data.chunks(config.block_size) {
        let compressed = compressor.compress(raw).map_err(Error::Compressor)?;

        // lzop reads `stored == raw` as uncompressed, so an equal sized
        // output must not be written either.
        let stored = if compressed.len() < raw.len() {
            &compressed[..]
        } else {
            stats.fallbacks += 1;
            raw
        };

        reserve(buf, BLOCK_HEADER_SIZE + stored.len())?;
        buf.put_u32(raw.len() as u32);
        buf.put_u32(stored.len() as u32);
        buf.put_u32(config.checksum.checksum(raw));
        buf.put_slice(stored);

        tracing::trace!(
            "block: {}, raw len: {}, stored len: {}",
            stats.blocks,
            raw.len(),
            stored.len()
        );

        stats.blocks += 1;
        stats.stored_bytes += stored.len();
    }

    Ok(stats)
}

/// Number of blocks `data_len` bytes are split into.
pub fn block_count(config: &Config, data_len: usize) -> usize {
    data_len.div_ceil(config.block_size)
}
