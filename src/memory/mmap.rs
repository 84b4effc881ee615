// Fri Oct 16 2026 - Alex

use crate::memory::{BufferView, MemoryError};
use log::debug;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Read-only mapping of a file on disk.
pub struct MappedFile {
    mmap: Option<Mmap>,
    path: PathBuf,
}

impl MappedFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MemoryError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let len = file.metadata()?.len();

        // Mapping an empty file fails on some platforms.
        let mmap = if len == 0 {
            None
        } else {
            Some(unsafe { Mmap::map(&file) }?)
        };

        debug!("Mapped {} ({} bytes)", path.display(), len);
        Ok(Self { mmap, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        match &self.mmap {
            Some(mmap) => mmap.as_ref(),
            None => &[],
        }
    }

    pub fn view(&self) -> BufferView<'_> {
        BufferView::new(self.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("sigscan-{}-{}", std::process::id(), name));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    #[test]
    fn test_map_file() {
        let path = temp_file("map", &[0x10, 0x20, 0x30]);
        let mapped = MappedFile::open(&path).unwrap();
        assert_eq!(mapped.as_slice(), &[0x10, 0x20, 0x30]);
        assert_eq!(mapped.len(), 3);
        assert_eq!(mapped.path(), path.as_path());
        drop(mapped);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_map_empty_file() {
        let path = temp_file("empty", &[]);
        let mapped = MappedFile::open(&path).unwrap();
        assert!(mapped.is_empty());
        assert_eq!(mapped.view().len(), 0);
        drop(mapped);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file() {
        let result = MappedFile::open("/nonexistent/sigscan/input.bin");
        assert!(matches!(result, Err(MemoryError::Io(_))));
    }
}
