// Fri Oct 16 2026 - Alex

pub mod binary;
pub mod error;
pub mod mmap;
pub mod view;

pub use binary::{find_section, section_view, sections, BinarySection};
pub use error::MemoryError;
pub use mmap::MappedFile;
pub use view::BufferView;
