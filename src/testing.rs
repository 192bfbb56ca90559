//! Minimal lzop reader, only used to check what the encoder writes.

use anyhow::{bail, ensure};
use bytes::Buf;

use crate::{
    checksum::ChecksumKind,
    config::{flags, MAGIC},
};

#[derive(Debug)]
pub(crate) struct BlockInfo {
    pub raw_len: u32,
    pub stored_len: u32,
    pub checksum: u32,
}

#[derive(Debug)]
pub(crate) struct DecodedStream {
    pub checksum: ChecksumKind,
    pub mtime: u32,
    pub file_name: Vec<u8>,
    pub blocks: Vec<BlockInfo>,
    pub payload: Vec<u8>,
}

/// Parses a whole stream, verifying every checksum. `decompress` gets the
/// stored bytes and the expected raw length of compressed blocks.
pub(crate) fn read_stream<D>(stream: &[u8], mut decompress: D) -> anyhow::Result<DecodedStream>
where
    D: FnMut(&[u8], usize) -> anyhow::Result<Vec<u8>>,
{
    ensure!(stream.starts_with(&MAGIC), "bad magic");
    let header = &stream[MAGIC.len()..];
    let mut ptr = header;

    ensure!(ptr.remaining() >= 25, "header too short");
    ensure!(ptr.get_u16() == 0x1030, "bad version");
    ptr.advance(4);
    ensure!(ptr.get_u8() == 2, "bad method");
    ptr.advance(1);
    let header_flags = ptr.get_u32();
    let checksum = if header_flags & flags::F_H_CRC32 != 0 {
        ChecksumKind::Crc32
    } else {
        ChecksumKind::Adler32
    };
    ptr.advance(4);
    let mtime = ptr.get_u32();
    ensure!(ptr.get_u32() == 0, "high time must be zero");
    let name_len = ptr.get_u8() as usize;
    ensure!(ptr.remaining() >= name_len + 4, "header too short");
    let file_name = ptr[..name_len].to_vec();
    ptr.advance(name_len);

    let covered = header.len() - ptr.remaining();
    let stored_checksum = ptr.get_u32();
    ensure!(
        stored_checksum == checksum.checksum(&header[..covered]),
        "header checksum mismatch"
    );

    let mut blocks = vec![];
    let mut payload = vec![];
    loop {
        ensure!(ptr.remaining() >= 4, "missing terminator");
        let raw_len = ptr.get_u32();
        if raw_len == 0 {
            break;
        }
        ensure!(ptr.remaining() >= 8, "block header too short");
        let stored_len = ptr.get_u32();
        let block_checksum = ptr.get_u32();
        ensure!(ptr.remaining() >= stored_len as usize, "block data too short");

        let stored = &ptr[..stored_len as usize];
        let raw = if stored_len < raw_len {
            decompress(stored, raw_len as usize)?
        } else if stored_len == raw_len {
            stored.to_vec()
        } else {
            bail!("stored len {} > raw len {}", stored_len, raw_len);
        };
        ptr.advance(stored_len as usize);

        ensure!(raw.len() == raw_len as usize, "raw len mismatch");
        ensure!(
            block_checksum == checksum.checksum(&raw),
            "block checksum mismatch"
        );

        payload.extend_from_slice(&raw);
        blocks.push(BlockInfo {
            raw_len,
            stored_len,
            checksum: block_checksum,
        });
    }
    ensure!(ptr.is_empty(), "trailing bytes after terminator");

    Ok(DecodedStream {
        checksum,
        mtime,
        file_name,
        blocks,
        payload,
    })
}

/// For streams where every block is expected to be raw.
pub(crate) fn stored_only(_: &[u8], _: usize) -> anyhow::Result<Vec<u8>> {
    bail!("unexpected compressed block")
}

/// Run-length code of `(count, byte)` pairs. Shrinks runs, doubles noise.
pub(crate) fn rle_compress(data: &[u8]) -> Vec<u8> {
    let mut out = vec![];
    let mut i = 0;
    while i < data.len() {
        let byte = data[i];
        let mut run = 1;
        while run < u8::MAX as usize && i + run < data.len() && data[i + run] == byte {
            run += 1;
        }
        out.push(run as u8);
        out.push(byte);
        i += run;
    }
    out
}

pub(crate) fn rle_decompress(data: &[u8], raw_len: usize) -> anyhow::Result<Vec<u8>> {
    ensure!(data.len() % 2 == 0, "odd rle length");
    let mut out = Vec::with_capacity(raw_len);
    for pair in data.chunks_exact(2) {
        out.extend(std::iter::repeat(pair[1]).take(pair[0] as usize));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{rle_compress, rle_decompress};

    #[test]
    fn rle_round_trip() -> anyhow::Result<()> {
        let data = b"aaaabccddddddde";
        let packed = rle_compress(data);
        assert_eq!(packed, [4, b'a', 1, b'b', 2, b'c', 7, b'd', 1, b'e']);
        assert_eq!(rle_decompress(&packed, data.len())?, data);

        let long = vec![9u8; 600];
        let packed = rle_compress(&long);
        assert_eq!(packed, [255, 9, 255, 9, 90, 9]);
        assert_eq!(rle_decompress(&packed, long.len())?, long);
        Ok(())
    }
}
