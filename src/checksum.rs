/// Checksum used for the header and for every block's uncompressed data.
///
/// lzop's CRC-32 is the zlib one (IEEE polynomial, initial value 0), which is
/// what `crc32fast` computes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChecksumKind {
    #[default]
    Adler32,
    Crc32,
}

impl ChecksumKind {
    pub fn checksum(&self, data: &[u8]) -> u32 {
        match self {
            ChecksumKind::Adler32 => adler2::adler32_slice(data),
            ChecksumKind::Crc32 => crc32fast::hash(data),
        }
    }
}
