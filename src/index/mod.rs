//! In-memory inverted index.

pub mod memory;
pub mod posting;
pub mod reader;

pub use self::memory::MemoryIndex;
pub use self::posting::{Posting, TermInfo};
pub use self::reader::IndexReader;
