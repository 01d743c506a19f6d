//! Table implementation
//!
//! A fixed set of preallocated rows addressed by row index. The row count and
//! field width are chosen once at creation and never change.

use crate::config::Config;
use crate::error::{DbError, Result};
use crate::record::Record;

/// In-memory working copy of the database
///
/// ## Invariants
/// - `rows.len() == row_count`
/// - `rows[i].id == i` for every row
/// - every text buffer is exactly `field_width` bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    field_width: u32,
    row_count: u32,
    rows: Vec<Record>,
}

impl Table {
    /// Allocate `row_count` unset rows with `field_width`-byte text fields
    pub fn create(field_width: u32, row_count: u32) -> Result<Self> {
        Config {
            field_width,
            row_count,
        }
        .validate()?;

        let rows = (0..row_count)
            .map(|id| Record::empty(id, field_width))
            .collect();

        Ok(Self {
            field_width,
            row_count,
            rows,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::create(config.field_width, config.row_count)
    }

    /// Assemble a table from decoded rows. Only the format layer calls this.
    pub(crate) fn from_rows(field_width: u32, rows: Vec<Record>) -> Self {
        debug_assert!(rows.iter().enumerate().all(|(i, r)| r.id as usize == i));
        Self {
            field_width,
            row_count: rows.len() as u32,
            rows,
        }
    }

    pub fn field_width(&self) -> u32 {
        self.field_width
    }

    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Map an externally supplied id to a row index
    pub fn row_index(&self, id: i64) -> Result<u32> {
        u32::try_from(id)
            .ok()
            .filter(|&idx| idx < self.row_count)
            .ok_or(DbError::IndexOutOfRange {
                id,
                row_count: self.row_count,
            })
    }

    /// Fill an unset row. Fails without touching the row if it is occupied.
    pub fn set(&mut self, id: u32, name: &str, email: &str) -> Result<()> {
        let row = self.row_mut(id)?;
        if row.present {
            return Err(DbError::AlreadySet { id });
        }

        row.fill(name.as_bytes(), email.as_bytes());
        tracing::debug!(id, "row set");
        Ok(())
    }

    /// Fetch a present row
    pub fn get(&self, id: u32) -> Result<&Record> {
        let row = self.row(id)?;
        if !row.present {
            return Err(DbError::NotSet { id });
        }
        Ok(row)
    }

    /// Clear a row. Clearing an unset row succeeds.
    pub fn delete(&mut self, id: u32) -> Result<()> {
        self.row_mut(id)?.reset();
        tracing::debug!(id, "row deleted");
        Ok(())
    }

    /// Iterate over present rows in ascending id order
    pub fn list(&self) -> Records<'_> {
        Records {
            inner: self.rows.iter(),
        }
    }

    /// Every row, set or not, in id order
    pub(crate) fn rows(&self) -> &[Record] {
        &self.rows
    }

    fn row(&self, id: u32) -> Result<&Record> {
        self.rows.get(id as usize).ok_or(DbError::IndexOutOfRange {
            id: id.into(),
            row_count: self.row_count,
        })
    }

    fn row_mut(&mut self, id: u32) -> Result<&mut Record> {
        let row_count = self.row_count;
        self.rows
            .get_mut(id as usize)
            .ok_or(DbError::IndexOutOfRange {
                id: id.into(),
                row_count,
            })
    }
}

/// Iterator over the present rows of a table
#[derive(Clone)]
pub struct Records<'a> {
    inner: std::slice::Iter<'a, Record>,
}

impl<'a> Iterator for Records<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find(|r| r.present)
    }
}
