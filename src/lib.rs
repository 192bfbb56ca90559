//! Writes payloads as lzop files: magic, header, checksummed blocks and the
//! end of stream marker, readable by `lzop -d`.
//!
//! The LZO compressor itself is not part of this crate. Pass any
//! `FnMut(&[u8]) -> Vec<u8>` (or a [`Compressor`]) and the encoder takes care
//! of framing, checksums and storing blocks raw when compression does not pay.

pub mod checksum;
pub mod compressor;
pub mod config;
pub mod error;
pub mod format;
pub mod scratch;
pub mod stream;

#[cfg(test)]
mod testing;

pub use checksum::ChecksumKind;
pub use compressor::{Compressor, Stored, TryCompressor};
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use scratch::{PooledScratch, ScratchBuffer, ScratchPool};
pub use stream::{encode, encode_into, fixed_overhead, Encoder};

#[cfg(test)]
#[ctor::ctor]
fn init() {
    color_backtrace::install();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(true)
        .with_file(true)
        .with_level(true)
        .without_time()
        .with_thread_ids(true)
        .with_test_writer()
        .init();
}
