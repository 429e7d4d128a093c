//! Session store implementations - JSON file and in-memory fallback.

mod memory;

#[cfg(feature = "file-session")]
mod file;

pub use memory::InMemorySessionStore;

#[cfg(feature = "file-session")]
pub use file::FileSessionStore;
