//! Record definitions
//!
//! A record is one address entry: a row id, a presence flag and two
//! fixed-capacity text fields sized by the table's field width.

use std::borrow::Cow;
use std::fmt;

/// Fixed-capacity, NUL-terminated text buffer
///
/// The buffer is always exactly `capacity` bytes. Assigned text is truncated
/// to `capacity - 1` bytes so the last byte stays a terminator.
#[derive(Clone, PartialEq, Eq)]
pub struct FixedText {
    buf: Box<[u8]>,
}

impl FixedText {
    /// Create a zeroed buffer of `capacity` bytes
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity].into_boxed_slice(),
        }
    }

    /// Wrap raw bytes read from disk, keeping them verbatim
    pub fn from_raw(raw: &[u8]) -> Self {
        Self { buf: raw.into() }
    }

    /// Replace the contents, truncating silently to `capacity - 1` bytes
    pub fn assign(&mut self, input: &[u8]) {
        self.buf.fill(0);
        let len = input.len().min(self.buf.len().saturating_sub(1));
        self.buf[..len].copy_from_slice(&input[..len]);
    }

    /// Zero the whole buffer
    pub fn clear(&mut self) {
        self.buf.fill(0);
    }

    /// Total size of the buffer in bytes
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Text bytes up to (not including) the first NUL
    pub fn as_bytes(&self) -> &[u8] {
        let end = self
            .buf
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.buf.len());
        &self.buf[..end]
    }

    /// Whole buffer, terminator and padding included
    pub fn raw(&self) -> &[u8] {
        &self.buf
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

impl fmt::Debug for FixedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{}", self.to_string_lossy(), self.capacity())
    }
}

/// A single address row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub(crate) id: u32,
    pub(crate) present: bool,
    pub(crate) name: FixedText,
    pub(crate) email: FixedText,
}

impl Record {
    /// An unset row with zeroed text buffers
    pub fn empty(id: u32, field_width: u32) -> Self {
        Self {
            id,
            present: false,
            name: FixedText::new(field_width as usize),
            email: FixedText::new(field_width as usize),
        }
    }

    /// Row index of this record
    pub fn id(&self) -> u32 {
        self.id
    }

    /// True if the row holds live data
    pub fn is_present(&self) -> bool {
        self.present
    }

    pub fn name(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    pub fn email(&self) -> Cow<'_, str> {
        self.email.to_string_lossy()
    }

    pub fn name_bytes(&self) -> &[u8] {
        self.name.as_bytes()
    }

    pub fn email_bytes(&self) -> &[u8] {
        self.email.as_bytes()
    }

    /// Fill the row and mark it present. Caller checks occupancy.
    pub(crate) fn fill(&mut self, name: &[u8], email: &[u8]) {
        self.name.assign(name);
        self.email.assign(email);
        self.present = true;
    }

    /// Reset to an unset row, discarding previous contents
    pub(crate) fn reset(&mut self) {
        self.present = false;
        self.name.clear();
        self.email.clear();
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id, self.name(), self.email())
    }
}
