//! lzop file format (all integers big-endian):
//!
//! ```text
//!     +-------------------------------+
//!     | magic: 9 bytes                |
//!     +-------------------------------+
//!     | header                        |
//!     +-------------------------------+
//!     | block 1 | block 2 | block n   |
//!     +-------------------------------+
//!     | terminator: 4 zero bytes      |
//!     +-------------------------------+
//! ```
//!
//! See [`header`] and [`block`] for the layout of each part.

pub mod block;
pub mod header;

use crate::error::Result;

pub(crate) const SIZE_U32: usize = std::mem::size_of::<u32>();

/// Grow `buf` for the next append, reporting allocation failure instead of
/// aborting.
#[inline]
pub(crate) fn reserve(buf: &mut Vec<u8>, additional: usize) -> Result<()> {
    buf.try_reserve(additional)?;
    Ok(())
}
