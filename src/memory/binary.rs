// Fri Oct 16 2026 - Alex

use crate::memory::{BufferView, MemoryError};
use goblin::elf::section_header::SHT_NOBITS;
use goblin::mach::Mach;
use goblin::Object;
use log::debug;

/// A section of an executable image, located by its file offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarySection {
    pub name: String,
    /// Owning segment, for Mach-O images.
    pub segment: Option<String>,
    pub offset: usize,
    pub size: usize,
}

impl BinarySection {
    fn matches(&self, name: &str) -> bool {
        if self.name == name {
            return true;
        }
        match &self.segment {
            Some(seg) => name
                .split_once(',')
                .map_or(false, |(s, n)| s == seg && n == self.name),
            None => false,
        }
    }
}

/// Lists the file-backed sections of an ELF, PE or Mach-O image.
pub fn sections(data: &[u8]) -> Result<Vec<BinarySection>, MemoryError> {
    let object = Object::parse(data)
        .map_err(|e| MemoryError::BinaryParseError(format!("Failed to parse binary: {}", e)))?;

    let mut result = Vec::new();

    match object {
        Object::Elf(elf) => {
            for header in &elf.section_headers {
                if header.sh_type == SHT_NOBITS {
                    continue;
                }
                let name = elf.shdr_strtab.get_at(header.sh_name).unwrap_or("");
                if name.is_empty() {
                    continue;
                }
                result.push(BinarySection {
                    name: name.to_string(),
                    segment: None,
                    offset: header.sh_offset as usize,
                    size: header.sh_size as usize,
                });
            }
        }
        Object::PE(pe) => {
            for section in &pe.sections {
                let name = section.name().unwrap_or("");
                result.push(BinarySection {
                    name: name.to_string(),
                    segment: None,
                    offset: section.pointer_to_raw_data as usize,
                    size: section.size_of_raw_data as usize,
                });
            }
        }
        Object::Mach(Mach::Binary(macho)) => {
            for segment in &macho.segments {
                let segname = std::str::from_utf8(&segment.segname)
                    .unwrap_or("")
                    .trim_end_matches('\0');

                for section_result in segment.into_iter() {
                    if let Ok((section, _data)) = section_result {
                        let sectname = std::str::from_utf8(&section.sectname)
                            .unwrap_or("")
                            .trim_end_matches('\0');
                        result.push(BinarySection {
                            name: sectname.to_string(),
                            segment: Some(segname.to_string()),
                            offset: section.offset as usize,
                            size: section.size as usize,
                        });
                    }
                }
            }
        }
        Object::Mach(Mach::Fat(_)) => {
            return Err(MemoryError::NotSupported(
                "Fat binaries not supported".to_string(),
            ))
        }
        _ => {
            return Err(MemoryError::NotSupported(
                "Input is not an ELF, PE or Mach-O image".to_string(),
            ))
        }
    }

    Ok(result)
}

/// Finds a section by name. Mach-O sections may also be given as
/// `SEGMENT,section`, e.g. `__TEXT,__text`.
pub fn find_section(data: &[u8], name: &str) -> Result<BinarySection, MemoryError> {
    sections(data)?
        .into_iter()
        .find(|s| s.matches(name))
        .ok_or_else(|| MemoryError::SectionNotFound(name.to_string()))
}

/// Narrows `view` to the bytes of section `name`.
pub fn section_view<'a>(view: BufferView<'a>, name: &str) -> Result<BufferView<'a>, MemoryError> {
    let section = find_section(view.data(), name)?;
    debug!(
        "Section {} at file offset 0x{:x} ({} bytes)",
        name, section.offset, section.size
    );
    let end = section
        .offset
        .checked_add(section.size)
        .ok_or(MemoryError::OutOfBounds {
            start: section.offset,
            end: usize::MAX,
            len: view.len(),
        })?;
    view.slice(section.offset..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: [u8; 8] = [0x55, 0x48, 0x89, 0xE5, 0x90, 0x90, 0x5D, 0xC3];

    fn section_header(out: &mut Vec<u8>, name: u32, kind: u32, flags: u64, offset: u64, size: u64) {
        out.extend_from_slice(&name.to_le_bytes());
        out.extend_from_slice(&kind.to_le_bytes());
        out.extend_from_slice(&flags.to_le_bytes());
        out.extend_from_slice(&0u64.to_le_bytes()); // sh_addr
        out.extend_from_slice(&offset.to_le_bytes());
        out.extend_from_slice(&size.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // sh_link
        out.extend_from_slice(&0u32.to_le_bytes()); // sh_info
        out.extend_from_slice(&1u64.to_le_bytes()); // sh_addralign
        out.extend_from_slice(&0u64.to_le_bytes()); // sh_entsize
    }

    /// Smallest ELF64 relocatable object with a `.text` and a `.shstrtab`.
    fn tiny_elf() -> Vec<u8> {
        let strtab = b"\0.text\0.shstrtab\0";
        let text_offset = 64u64;
        let strtab_offset = text_offset + TEXT.len() as u64;
        let shoff = 96u64;

        let mut out = Vec::new();
        out.extend_from_slice(&[0x7F, b'E', b'L', b'F', 2, 1, 1, 0]);
        out.extend_from_slice(&[0u8; 8]);
        out.extend_from_slice(&1u16.to_le_bytes()); // ET_REL
        out.extend_from_slice(&0x3Eu16.to_le_bytes()); // x86-64
        out.extend_from_slice(&1u32.to_le_bytes());
        out.extend_from_slice(&0u64.to_le_bytes()); // e_entry
        out.extend_from_slice(&0u64.to_le_bytes()); // e_phoff
        out.extend_from_slice(&shoff.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // e_flags
        out.extend_from_slice(&64u16.to_le_bytes()); // e_ehsize
        out.extend_from_slice(&56u16.to_le_bytes()); // e_phentsize
        out.extend_from_slice(&0u16.to_le_bytes()); // e_phnum
        out.extend_from_slice(&64u16.to_le_bytes()); // e_shentsize
        out.extend_from_slice(&3u16.to_le_bytes()); // e_shnum
        out.extend_from_slice(&2u16.to_le_bytes()); // e_shstrndx
        assert_eq!(out.len(), 64);

        out.extend_from_slice(&TEXT);
        out.extend_from_slice(strtab);
        out.resize(shoff as usize, 0);

        section_header(&mut out, 0, 0, 0, 0, 0);
        section_header(&mut out, 1, 1, 6, text_offset, TEXT.len() as u64);
        section_header(&mut out, 7, 3, 0, strtab_offset, strtab.len() as u64);
        out
    }

    #[test]
    fn test_elf_sections() {
        let elf = tiny_elf();
        let all = sections(&elf).unwrap();
        let names: Vec<_> = all.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![".text", ".shstrtab"]);

        let text = find_section(&elf, ".text").unwrap();
        assert_eq!(text.offset, 64);
        assert_eq!(text.size, TEXT.len());
    }

    #[test]
    fn test_section_view_translates_offsets() {
        let elf = tiny_elf();
        let view = section_view(BufferView::new(&elf), ".text").unwrap();
        assert_eq!(view.data(), &TEXT);
        assert_eq!(view.base_offset(), 64);

        let found = crate::pattern::find("90 ?? 5D C3", view.data()).unwrap().unwrap();
        assert_eq!(view.absolute(found), 64 + 4);
    }

    #[test]
    fn test_missing_section() {
        let elf = tiny_elf();
        assert!(matches!(
            find_section(&elf, ".data"),
            Err(MemoryError::SectionNotFound(_))
        ));
    }

    #[test]
    fn test_not_an_image() {
        assert!(sections(&[0u8; 64]).is_err());
    }

    #[test]
    fn test_macho_qualified_name() {
        let section = BinarySection {
            name: "__text".to_string(),
            segment: Some("__TEXT".to_string()),
            offset: 0,
            size: 0,
        };
        assert!(section.matches("__text"));
        assert!(section.matches("__TEXT,__text"));
        assert!(!section.matches("__DATA,__text"));
    }
}
