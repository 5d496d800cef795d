pub mod collection;
pub mod snippet;
pub mod storage;

pub use collection::SnippetSet;
pub use snippet::{Snippet, parse_tags};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SnippetRepository};
