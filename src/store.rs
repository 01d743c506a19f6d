//! Store Module
//!
//! Binds a table to its backing file.
//!
//! ## Responsibilities
//! - Open the file in create or read/update mode
//! - Load the whole table image into memory
//! - Rewrite the whole image from offset 0 and sync it
//! - Route actions to table operations
//!
//! Opening the same file from two stores at once is not supported and is not
//! guarded against.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::action::{Action, Outcome};
use crate::error::{DbError, Result};
use crate::format::{self, Header, HEADER_SIZE};
use crate::record::Record;
use crate::table::{Records, Table};

/// How `Store::open` treats the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Create or truncate the file; the table is empty until `create`
    CreateNew,

    /// Open an existing file and load its table immediately
    ReadUpdate,
}

/// A table plus the open file it persists to
///
/// The file handle and table are owned for the store's whole lifetime and
/// released when it is dropped, including on every error path.
pub struct Store {
    path: PathBuf,
    file: File,
    table: Option<Table>,
}

impl Store {
    /// Open the database file
    ///
    /// In `ReadUpdate` mode a missing, short or malformed file is an error and
    /// no store is returned.
    pub fn open(path: impl AsRef<Path>, mode: OpenMode) -> Result<Self> {
        let path = path.as_ref();

        let mut options = OpenOptions::new();
        match mode {
            OpenMode::CreateNew => options.write(true).create(true).truncate(true),
            OpenMode::ReadUpdate => options.read(true).write(true),
        };

        let file = options.open(path).map_err(|source| DbError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let mut store = Self {
            path: path.to_path_buf(),
            file,
            table: None,
        };

        if mode == OpenMode::ReadUpdate {
            store.load()?;
        }

        tracing::info!(path = %store.path.display(), ?mode, "database opened");
        Ok(store)
    }

    /// Install a fresh table, replacing any loaded one. Nothing is written.
    pub fn create(&mut self, field_width: u32, row_count: u32) -> Result<&Table> {
        let table = Table::create(field_width, row_count)?;
        tracing::info!(field_width, row_count, "table created");
        Ok(&*self.table.insert(table))
    }

    /// Read the full table image from the start of the file
    pub fn load(&mut self) -> Result<&Table> {
        self.file.seek(SeekFrom::Start(0)).map_err(DbError::Load)?;

        let mut header = [0u8; HEADER_SIZE];
        let read = read_full(&mut self.file, &mut header).map_err(DbError::Load)?;
        let header = Header::decode(&header[..read])?;
        let expected = header.image_size()?;

        // Refuse before allocating for a header that overstates the file.
        let file_len = self.file.metadata().map_err(DbError::Load)?.len();
        if file_len < expected as u64 {
            return Err(DbError::ShortRead {
                expected,
                actual: file_len as usize,
            });
        }
        if file_len > expected as u64 {
            tracing::warn!(expected, file_len, "ignoring trailing bytes after table");
        }

        let mut body = vec![0u8; expected - HEADER_SIZE];
        let read = read_full(&mut self.file, &mut body).map_err(DbError::Load)?;
        let table = format::decode_rows(&header, &body[..read])?;

        tracing::debug!(
            bytes = expected,
            field_width = header.field_width,
            row_count = header.row_count,
            "table loaded"
        );
        Ok(&*self.table.insert(table))
    }

    /// Rewrite the whole table from offset 0, cut the file to the image and sync it
    pub fn write(&mut self) -> Result<()> {
        let table = self.table.as_ref().ok_or(DbError::Uninitialized)?;
        let image = format::encode(table);

        let written = write_image(&mut self.file, &image)?;
        self.file.set_len(written as u64).map_err(DbError::Write)?;
        self.file.sync_all().map_err(DbError::Flush)?;

        tracing::debug!(bytes = written, "table written");
        Ok(())
    }

    pub fn set(&mut self, id: u32, name: &str, email: &str) -> Result<()> {
        self.table_mut()?.set(id, name, email)
    }

    pub fn get(&self, id: u32) -> Result<&Record> {
        self.table()?.get(id)
    }

    pub fn delete(&mut self, id: u32) -> Result<()> {
        self.table_mut()?.delete(id)
    }

    pub fn list(&self) -> Result<Records<'_>> {
        Ok(self.table()?.list())
    }

    /// Run one action, writing the table back after any mutation
    pub fn execute(&mut self, action: Action) -> Result<Outcome> {
        let mutates = action.is_mutation();

        let outcome = match action {
            Action::Create {
                field_width,
                row_count,
            } => {
                self.create(field_width, row_count)?;
                Outcome::Done
            }
            Action::Get { id } => {
                let table = self.table()?;
                let record = table.get(table.row_index(id)?)?;
                Outcome::Record(record.clone())
            }
            Action::Set { id, name, email } => {
                let table = self.table_mut()?;
                let id = table.row_index(id)?;
                table.set(id, &name, &email)?;
                Outcome::Done
            }
            Action::Delete { id } => {
                let table = self.table_mut()?;
                let id = table.row_index(id)?;
                table.delete(id)?;
                Outcome::Done
            }
            Action::List => Outcome::Records(self.list()?.cloned().collect()),
        };

        if mutates {
            self.write()?;
        }
        Ok(outcome)
    }

    /// Release the file handle and table
    ///
    /// Valid whether or not a table was ever created.
    pub fn close(self) -> Result<()> {
        self.file.sync_all().map_err(DbError::Flush)?;
        tracing::info!(path = %self.path.display(), "database closed");
        Ok(())
    }

    /// The loaded or created table
    pub fn table(&self) -> Result<&Table> {
        self.table.as_ref().ok_or(DbError::Uninitialized)
    }

    fn table_mut(&mut self) -> Result<&mut Table> {
        self.table.as_mut().ok_or(DbError::Uninitialized)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read until `buf` is full or EOF; returns the bytes read
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Write `image` from offset 0 in one transfer and flush it
fn write_image<W: Write + Seek>(writer: &mut W, image: &[u8]) -> Result<usize> {
    writer.seek(SeekFrom::Start(0)).map_err(DbError::Write)?;
    let written = write_full(writer, image).map_err(DbError::Write)?;
    if written != image.len() {
        return Err(DbError::ShortWrite {
            expected: image.len(),
            actual: written,
        });
    }

    writer.flush().map_err(DbError::Flush)?;
    Ok(written)
}

/// Write until `buf` is drained or the writer stops accepting bytes
fn write_full<W: Write>(writer: &mut W, buf: &[u8]) -> io::Result<usize> {
    let mut written = 0;
    while written < buf.len() {
        match writer.write(&buf[written..]) {
            Ok(0) => break,
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(written)
}
