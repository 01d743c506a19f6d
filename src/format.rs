//! On-disk format
//!
//! Encoding and decoding of the whole-table file image.
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Header (8 bytes)                             │
//! │   FieldWidth: u32 (4) | RowCount: u32 (4)    │
//! ├──────────────────────────────────────────────┤
//! │ Row 0 .. Row N-1 (8 + 2 * FieldWidth each)   │
//! │ ┌────────┬─────────────┬────────┬─────────┐  │
//! │ │ Id (4) │ Present (4) │  Name  │  Email  │  │
//! │ └────────┴─────────────┴────────┴─────────┘  │
//! │   Name and Email are FieldWidth bytes each   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! All integers are little-endian. There is no magic, version or checksum, so
//! a file is only meaningful to a reader that agrees on this exact layout.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{DbError, Result};
use crate::record::{FixedText, Record};
use crate::table::Table;

/// Header size: FieldWidth (4) + RowCount (4) = 8 bytes
pub const HEADER_SIZE: usize = 8;

/// Fixed part of every row: Id (4) + Present (4) = 8 bytes
pub const ROW_PREFIX_SIZE: usize = 8;

/// Size of one serialized row for the given field width
pub fn row_size(field_width: u32) -> usize {
    ROW_PREFIX_SIZE + 2 * field_width as usize
}

/// Size of the full file image, or None if it cannot be addressed
pub fn image_size(field_width: u32, row_count: u32) -> Option<usize> {
    let row = ROW_PREFIX_SIZE as u64 + 2 * u64::from(field_width);
    let total = (HEADER_SIZE as u64).checked_add(row.checked_mul(u64::from(row_count))?)?;
    usize::try_from(total).ok()
}

/// Table header as stored at offset 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub field_width: u32,
    pub row_count: u32,
}

impl Header {
    /// Parse and sanity-check the first `HEADER_SIZE` bytes
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(DbError::ShortRead {
                expected: HEADER_SIZE,
                actual: bytes.len(),
            });
        }

        let mut buf = &bytes[..HEADER_SIZE];
        let header = Self {
            field_width: buf.get_u32_le(),
            row_count: buf.get_u32_le(),
        };

        if header.field_width == 0 || header.row_count == 0 {
            return Err(DbError::Corrupt(format!(
                "header declares field width {} and row count {}",
                header.field_width, header.row_count
            )));
        }

        Ok(header)
    }

    /// Bytes the complete image occupies, header included
    pub fn image_size(&self) -> Result<usize> {
        image_size(self.field_width, self.row_count).ok_or_else(|| {
            DbError::Corrupt(format!(
                "table of {} rows x {} bytes is too large",
                self.row_count, self.field_width
            ))
        })
    }
}

/// Serialize the header and every row, unset rows included
pub fn encode(table: &Table) -> Bytes {
    let size = HEADER_SIZE + table.row_count() as usize * row_size(table.field_width());
    let mut buf = BytesMut::with_capacity(size);

    buf.put_u32_le(table.field_width());
    buf.put_u32_le(table.row_count());

    for row in table.rows() {
        buf.put_u32_le(row.id);
        buf.put_u32_le(u32::from(row.present));
        buf.put_slice(row.name.raw());
        buf.put_slice(row.email.raw());
    }

    debug_assert_eq!(buf.len(), size);
    buf.freeze()
}

/// Parse the rows that follow `header`
///
/// `body` must hold at least `row_count` rows; anything past them is ignored.
pub fn decode_rows(header: &Header, body: &[u8]) -> Result<Table> {
    let expected = header.image_size()?;
    let rows_len = expected - HEADER_SIZE;
    if body.len() < rows_len {
        return Err(DbError::ShortRead {
            expected,
            actual: HEADER_SIZE + body.len(),
        });
    }

    let width = header.field_width as usize;
    let mut buf = &body[..rows_len];
    let mut rows = Vec::with_capacity(header.row_count as usize);

    for index in 0..header.row_count {
        let id = buf.get_u32_le();
        if id != index {
            return Err(DbError::Corrupt(format!("row {} carries id {}", index, id)));
        }
        let present = buf.get_u32_le() != 0;
        let name = FixedText::from_raw(&buf[..width]);
        buf.advance(width);
        let email = FixedText::from_raw(&buf[..width]);
        buf.advance(width);

        rows.push(Record {
            id,
            present,
            name,
            email,
        });
    }

    Ok(Table::from_rows(header.field_width, rows))
}

/// Decode a complete in-memory image
pub fn decode(bytes: &[u8]) -> Result<Table> {
    let header = Header::decode(bytes)?;
    decode_rows(&header, &bytes[HEADER_SIZE..])
}
