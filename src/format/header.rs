use bytes::{BufMut, Bytes};

use crate::{
    config::{Config, MAX_FILE_NAME_LEN},
    error::{Error, Result},
};

use super::{reserve, SIZE_U32};

/// Bytes from `version` through `file name len`, the name excluded.
pub const FIXED_HEADER_SIZE: usize = 25;

/// The header that follows the magic:
///
/// ```text
///     +------------------------------------------------------------+
///     | version: 2b | lib version: 2b | version needed: 2b         |
///     +------------------------------------------------------------+
///     | method: 1b | level: 1b | flags: 4b | mode: 4b              |
///     +------------------------------------------------------------+
///     | mtime low: 4b | mtime high: 4b (always 0) | name len: 1b   |
///     +------------------------------------------------------------+
///     | name: name len bytes                                       |
///     +------------------------------------------------------------+
///     | checksum: 4b                                               |
///     +------------------------------------------------------------+
/// ```
///
/// The checksum covers everything from `version` through `name`. The magic
/// is never part of it, lzop rejects the file otherwise.
#[derive(Debug, Clone)]
pub struct Header<'a> {
    config: &'a Config,
    mtime: u32,
    file_name: &'a [u8],
}

impl<'a> Header<'a> {
    /// `file_time` is a Unix time, only its low 32 bits are kept.
    pub fn new(config: &'a Config, file_time: i64, file_name: &'a str) -> Result<Self> {
        let file_name = file_name.as_bytes();
        if file_name.len() > MAX_FILE_NAME_LEN {
            return Err(Error::InvalidFileName {
                len: file_name.len(),
                max: MAX_FILE_NAME_LEN,
            });
        }

        Ok(Self {
            config,
            mtime: file_time as u32,
            file_name,
        })
    }

    pub fn encoded_len(&self) -> usize {
        Self::encoded_len_for(self.file_name.len())
    }

    pub fn encoded_len_for(file_name_len: usize) -> usize {
        FIXED_HEADER_SIZE + file_name_len + SIZE_U32
    }

    pub fn file_name_len(&self) -> usize {
        self.file_name.len()
    }

    /// Appends the header and its checksum to `buf`.
    pub fn encode_to(&self, buf: &mut Vec<u8>) -> Result<()> {
        reserve(buf, self.encoded_len())?;
        let start = buf.len();

        let config = self.config;
        buf.put_u16(config.version);
        buf.put_u16(config.lib_version);
        buf.put_u16(config.version_needed_to_extract);
        buf.put_u8(config.method);
        buf.put_u8(config.level);
        buf.put_u32(config.flags());
        buf.put_u32(config.file_mode);
        buf.put_u32(self.mtime);
        buf.put_u32(0);
        buf.put_u8(self.file_name.len() as u8);
        buf.put_slice(self.file_name);

        let checksum = config.checksum.checksum(&buf[start..]);
        buf.put_u32(checksum);

        debug_assert_eq!(buf.len() - start, self.encoded_len());
        Ok(())
    }

    pub fn encode(&self) -> Result<Bytes> {
        let mut buf = Vec::new();
        self.encode_to(&mut buf)?;
        Ok(buf.into())
    }
}

/// Serializes the header for `file_name`, without the magic.
pub fn build_header(config: &Config, file_time: i64, file_name: &str) -> Result<Bytes> {
    Header::new(config, file_time, file_name)?.encode()
}
