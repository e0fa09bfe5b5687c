//! Common utilities module
//!
//! Error types and the bounded byte reader shared by every decoding stage.

pub mod byte_reader;
pub mod error;

pub use byte_reader::{ByteReader, SavedPosition};
pub use error::{Result, X3fError};
