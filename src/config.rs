use std::sync::Arc;

use crate::{
    checksum::ChecksumKind,
    error::{Error, Result},
};

/// File signature, written before the header and never covered by its checksum.
pub const MAGIC: [u8; 9] = [0x89, 0x4c, 0x5a, 0x4f, 0x00, 0x0d, 0x0a, 0x1a, 0x0a];

/// End of blocks: an uncompressed length of zero.
pub const TERMINATOR: [u8; 4] = [0; 4];

pub const FORMAT_VERSION: u16 = 0x1030;
pub const LIB_VERSION: u16 = 0x2080;
pub const VERSION_NEEDED_TO_EXTRACT: u16 = 0x0940;

/// LZO1X_1.
pub const METHOD_LZO1X_1: u8 = 2;
pub const LEVEL: u8 = 1;

/// `-rw-rw-r--` regular file.
pub const DEFAULT_FILE_MODE: u32 = 0o100664;

pub const DEFAULT_BLOCK_SIZE: usize = 256 * 1024;

/// Largest block lzop is willing to decode.
pub const MAX_BLOCK_SIZE: usize = 64 * 1024 * 1024;

/// The name length is stored in a single byte.
pub const MAX_FILE_NAME_LEN: usize = u8::MAX as usize;

pub mod flags {
    pub const F_ADLER32_D: u32 = 0x0000_0001;
    pub const F_CRC32_D: u32 = 0x0000_0100;
    pub const F_H_CRC32: u32 = 0x0000_1000;
    pub const F_OS_UNIX: u32 = 0x0300_0000;
}

/// Every fixed value that ends up in the header, in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub(crate) version: u16,
    pub(crate) lib_version: u16,
    pub(crate) version_needed_to_extract: u16,
    pub(crate) method: u8,
    pub(crate) level: u8,
    pub(crate) file_mode: u32,

    pub(crate) block_size: usize,
    pub(crate) checksum: ChecksumKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            lib_version: LIB_VERSION,
            version_needed_to_extract: VERSION_NEEDED_TO_EXTRACT,
            method: METHOD_LZO1X_1,
            level: LEVEL,
            file_mode: DEFAULT_FILE_MODE,
            block_size: DEFAULT_BLOCK_SIZE,
            checksum: ChecksumKind::Adler32,
        }
    }
}

impl Config {
    /// Flag word derived from the checksum selection.
    ///
    /// With adler32 this is `0x0300_0001`.
    pub fn flags(&self) -> u32 {
        flags::F_OS_UNIX
            | match self.checksum {
                ChecksumKind::Adler32 => flags::F_ADLER32_D,
                ChecksumKind::Crc32 => flags::F_CRC32_D | flags::F_H_CRC32,
            }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn checksum(&self) -> ChecksumKind {
        self.checksum
    }

    pub fn file_mode(&self) -> u32 {
        self.file_mode
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.config.block_size = block_size;
        self
    }

    pub fn file_mode(mut self, file_mode: u32) -> Self {
        self.config.file_mode = file_mode;
        self
    }

    pub fn checksum(mut self, checksum: ChecksumKind) -> Self {
        self.config.checksum = checksum;
        self
    }

    pub fn try_build(self) -> Result<Arc<Config>> {
        let size = self.config.block_size;
        if size == 0 || size > MAX_BLOCK_SIZE {
            return Err(Error::InvalidBlockSize {
                size,
                max: MAX_BLOCK_SIZE,
            });
        }
        Ok(Arc::new(self.config))
    }

    /// # Panics
    ///
    /// If the block size is zero or larger than [`MAX_BLOCK_SIZE`].
    pub fn build(self) -> Arc<Config> {
        let size = self.config.block_size;
        assert!(
            size > 0 && size <= MAX_BLOCK_SIZE,
            "required 0 < block_size <= {}, found: {}",
            MAX_BLOCK_SIZE,
            size
        );
        Arc::new(self.config)
    }
}
