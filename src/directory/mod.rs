//! Contact directory access.

mod memory;
mod traits;

pub use memory::InMemoryDirectory;
pub use traits::{ContactDirectory, ContactDirectoryEntry, DirectoryError, OfficeContact};
