//! Key/value document codec for the scanner configuration and preset files.
//!
//! Both files use the sectioned `key=value` layout understood by the scanner
//! driver. This module provides:
//! - Parsing into an order-preserving document ([`IniDocument`])
//! - Case-insensitive key lookup with `DEFAULT` section fallback
//! - In-place updates that leave every untouched line byte-for-byte intact
//!
//! # Accepted Syntax
//!
//! | Line | Meaning |
//! |------|---------|
//! | `[Name]` | Section header (name is case-sensitive) |
//! | `Key=Value` / `Key: Value` | Entry (key is case-insensitive) |
//! | `# ...` / `; ...` | Comment |
//! | indented text after an entry | Continuation of the previous value |
//!
//! Repeated sections, repeated keys within a section, and entries before the
//! first header are rejected as [`IniError`]s.

mod document;


pub use document::{DEFAULT_SECTION, IniDocument, LineEnding};

use thiserror::Error;

/// Error type for document parsing.
///
/// Line numbers are 1-based and refer to the input after BOM removal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IniError {
    /// An entry appeared before any section header.
    #[error("line {line}: entry appears before any [section] header")]
    MissingSectionHeader {
        /// Offending line number
        line: usize,
    },

    /// The same section header appeared twice.
    #[error("line {line}: section [{name}] is already defined")]
    DuplicateSection {
        /// Section name
        name: String,
        /// Line of the second header
        line: usize,
    },

    /// The same key appeared twice within one section.
    #[error("line {line}: key '{key}' is repeated in section [{section}]")]
    DuplicateKey {
        /// Section containing the duplicate
        section: String,
        /// The repeated key
        key: String,
        /// Line of the second occurrence
        line: usize,
    },

    /// A line that is neither a header, an entry, nor a comment.
    #[error("line {line}: expected '[section]' or 'key=value', found '{content}'")]
    Malformed {
        /// Offending line number
        line: usize,
        /// The trimmed line content
        content: String,
    },
}
