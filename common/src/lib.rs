pub mod config;
pub mod highlight;
pub mod memory;

pub use highlight::{Highlighter, NavDocument, Outcome};
pub use memory::MemoryDocument;
