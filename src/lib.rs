//! # addressdb
//!
//! A fixed-record flat-file database:
//! - One binary file holds a header plus a preallocated array of rows
//! - Rows are addressed directly by row number
//! - The whole table is loaded into memory and rewritten in one piece
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 CLI (bin)                   │
//! │          parses args into an Action         │
//! └─────────────────────┬───────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────┐
//! │                   Store                     │
//! │     owns the file handle and the Table      │
//! └──────────┬──────────────────────┬───────────┘
//!            │                      │
//!            ▼                      ▼
//!   ┌────────────────┐     ┌────────────────┐
//!   │     Table      │     │     Format     │
//!   │ Records by id  │     │  file image    │
//!   └────────────────┘     └────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod table;
pub mod format;
pub mod action;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DbError, Result};
pub use config::Config;
pub use record::{FixedText, Record};
pub use table::{Records, Table};
pub use action::{Action, Outcome};
pub use store::{OpenMode, Store};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of addressdb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
