//! Binary encode/decode for solution files and save records.
//!
//! All integers are little-endian. Save-record strings are length-prefixed
//! with a `u32`; solution names are fixed-width and NUL-padded.

use std::io::{Read, Write};

use crate::error::CodecError;
use crate::types::{ReplayEntry, Solution, SolutionHeader};
use crate::{HEADER_LEN, NAME_LEN};

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), CodecError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u16.
pub fn write_u16_le(w: &mut dyn Write, v: u16) -> Result<(), CodecError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), CodecError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u64.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), CodecError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a length-prefixed UTF-8 string (u32 length + bytes).
pub fn write_length_prefixed_str(w: &mut dyn Write, s: &str) -> Result<(), CodecError> {
    write_u32_le(w, s.len() as u32)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

/// Write `s` into a fixed-width NUL-padded field, truncating on a UTF-8
/// boundary when it does not fit.
pub fn write_fixed_str(w: &mut dyn Write, s: &str, width: usize) -> Result<(), CodecError> {
    let mut end = s.len().min(width);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    if end < s.len() {
        log::warn!("truncating {s:?} to {end} bytes");
    }
    let mut field = vec![0u8; width];
    field[..end].copy_from_slice(&s.as_bytes()[..end]);
    w.write_all(&field)?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, CodecError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, CodecError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, CodecError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Read a length-prefixed UTF-8 string.
pub fn read_length_prefixed_str(r: &mut dyn Read) -> Result<String, CodecError> {
    let len = read_u32_le(r)? as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|e| CodecError::InvalidString {
        detail: e.to_string(),
    })
}

/// Decode a fixed-width text field, dropping trailing NUL and space
/// padding. Invalid UTF-8 is replaced rather than rejected.
pub fn read_fixed_str(field: &[u8]) -> String {
    let end = field
        .iter()
        .rposition(|&b| b != 0 && b != b' ')
        .map_or(0, |i| i + 1);
    String::from_utf8_lossy(&field[..end]).into_owned()
}

// ── Solution encode/decode ──────────────────────────────────────

/// Write a solution file to `w`.
pub fn write_solution(
    w: &mut dyn Write,
    header: &SolutionHeader,
    entries: &[ReplayEntry],
) -> Result<(), CodecError> {
    let count = u16::try_from(entries.len()).map_err(|_| CodecError::TooManyEntries {
        count: entries.len(),
    })?;
    write_fixed_str(w, &header.level_name, NAME_LEN)?;
    write_fixed_str(w, &header.author, NAME_LEN)?;
    write_u16_le(w, header.level_number)?;
    write_u16_le(w, count)?;
    for entry in entries {
        write_u8(w, entry.code())?;
    }
    Ok(())
}

/// Encode a solution file into a fresh buffer.
pub fn encode_solution(
    header: &SolutionHeader,
    entries: &[ReplayEntry],
) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::with_capacity(HEADER_LEN + entries.len());
    write_solution(&mut buf, header, entries)?;
    Ok(buf)
}

/// Decode a solution file.
///
/// Fails when the buffer is shorter than the header or the declared entry
/// count, or when an entry byte is outside the code table. Bytes past the
/// declared entries are ignored.
pub fn decode_solution(bytes: &[u8]) -> Result<Solution, CodecError> {
    if bytes.len() < HEADER_LEN {
        return Err(CodecError::Truncated {
            needed: HEADER_LEN,
            available: bytes.len(),
        });
    }
    let level_name = read_fixed_str(&bytes[..NAME_LEN]);
    let author = read_fixed_str(&bytes[NAME_LEN..NAME_LEN * 2]);
    let level_number = u16::from_le_bytes([bytes[62], bytes[63]]);
    let count = u16::from_le_bytes([bytes[64], bytes[65]]) as usize;

    let needed = HEADER_LEN + count;
    if bytes.len() < needed {
        return Err(CodecError::Truncated {
            needed,
            available: bytes.len(),
        });
    }
    if bytes.len() > needed {
        log::warn!(
            "ignoring {} trailing bytes after {count} solution entries",
            bytes.len() - needed
        );
    }

    let entries = bytes[HEADER_LEN..needed]
        .iter()
        .enumerate()
        .map(|(i, &byte)| {
            ReplayEntry::from_code(byte).ok_or(CodecError::UnknownEntry {
                offset: HEADER_LEN + i,
                byte,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Solution {
        header: SolutionHeader {
            level_name,
            author,
            level_number,
        },
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(name: &str) -> SolutionHeader {
        SolutionHeader {
            level_name: name.to_string(),
            author: "Eric".to_string(),
            level_number: 3,
        }
    }

    #[test]
    fn reference_layout() {
        let entries = [ReplayEntry::MoveUp, ReplayEntry::MoveUp, ReplayEntry::Shoot];
        let bytes = encode_solution(&header("Test"), &entries).unwrap();
        assert_eq!(bytes.len(), 69);
        assert_eq!(&bytes[..4], b"Test");
        assert!(bytes[4..31].iter().all(|&b| b == 0));
        assert_eq!(&bytes[31..35], b"Eric");
        assert_eq!(&bytes[62..66], &[3, 0, 3, 0]);
        assert_eq!(&bytes[66..], &[0x28, 0x28, 0x20]);
    }

    #[test]
    fn long_names_truncate_on_char_boundary() {
        // 30 ASCII bytes then a two-byte character straddling the limit.
        let name = format!("{}é", "a".repeat(30));
        let bytes = encode_solution(&header(&name), &[]).unwrap();
        let decoded = decode_solution(&bytes).unwrap();
        assert_eq!(decoded.header.level_name, "a".repeat(30));
    }

    #[test]
    fn space_padding_is_trimmed() {
        let mut bytes = encode_solution(&header("Pad"), &[]).unwrap();
        bytes[3..31].fill(b' ');
        assert_eq!(decode_solution(&bytes).unwrap().header.level_name, "Pad");
    }

    #[test]
    fn short_header_is_truncated() {
        let err = decode_solution(&[0u8; 10]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Truncated {
                needed: 66,
                available: 10
            }
        ));
    }

    #[test]
    fn short_entries_are_truncated() {
        let mut bytes = encode_solution(&header("T"), &[ReplayEntry::Shoot]).unwrap();
        bytes[64] = 5;
        let err = decode_solution(&bytes).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Truncated {
                needed: 71,
                available: 67
            }
        ));
    }

    #[test]
    fn unknown_entry_is_reported_with_offset() {
        let mut bytes = encode_solution(&header("T"), &[ReplayEntry::Shoot; 2]).unwrap();
        bytes[67] = 0x99;
        let err = decode_solution(&bytes).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnknownEntry {
                offset: 67,
                byte: 0x99
            }
        ));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut bytes = encode_solution(&header("T"), &[ReplayEntry::MoveLeft]).unwrap();
        bytes.extend_from_slice(&[0xff, 0xff]);
        let decoded = decode_solution(&bytes).unwrap();
        assert_eq!(decoded.entries, vec![ReplayEntry::MoveLeft]);
    }

    #[test]
    fn too_many_entries_rejected() {
        let entries = vec![ReplayEntry::Shoot; u16::MAX as usize + 1];
        assert!(matches!(
            encode_solution(&header("T"), &entries),
            Err(CodecError::TooManyEntries { count: 65536 })
        ));
    }
}
