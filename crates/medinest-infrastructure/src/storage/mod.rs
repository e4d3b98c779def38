//! Storage layer: atomic file operations and the file-backed key-value store.

mod atomic_file;
mod file_storage;

pub use atomic_file::{AtomicFile, AtomicFileError, FileFormat};
pub use file_storage::FileKeyValueStorage;
