//! Container header and directory entry codec

use crate::{LOGO_HEADER_FIXED, LOGO_MAGIC, LogoError};

/// One 32-byte directory entry
///
/// `offset` is absolute from the start of the container; `size` is the
/// byte length of the entry's MotoRun blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub offset: u32,
    pub size: u32,
}

impl DirEntry {
    /// Serialized entry size
    pub const SIZE: usize = 32;

    /// Name field size, including the implicit NUL terminator
    pub const NAME_FIELD: usize = 24;

    /// Longest storable name
    pub const MAX_NAME_LEN: usize = 23;

    /// Read an entry from the front of `bytes`
    ///
    /// The name is trimmed at the first NUL. Returns `None` if fewer than
    /// 32 bytes remain.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        let name_field = &bytes[..Self::NAME_FIELD];
        let name_len = name_field
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(Self::NAME_FIELD);
        let name = String::from_utf8_lossy(&name_field[..name_len]).into_owned();
        let offset = u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]);
        let size = u32::from_le_bytes([bytes[28], bytes[29], bytes[30], bytes[31]]);
        Some(Self { name, offset, size })
    }

    /// Serialize the entry to its 32-byte directory slot
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        let name = self.name.as_bytes();
        let name_len = name.len().min(Self::MAX_NAME_LEN);
        bytes[..name_len].copy_from_slice(&name[..name_len]);
        bytes[24..28].copy_from_slice(&self.offset.to_le_bytes());
        bytes[28..32].copy_from_slice(&self.size.to_le_bytes());
        bytes
    }
}

/// Parse and validate the container directory
///
/// Checks the magic, reads `header_size`, and reads every entry in order.
/// Each entry's byte range is validated against the container before any
/// image data is touched. The entry count uses truncating division; a
/// `header_size` below the fixed header wraps (unsigned) and fails here
/// with [`LogoError::UnexpectedEof`].
///
/// # Errors
/// Returns `LogoError` on a bad magic, a truncated header or directory,
/// or an entry whose range falls outside the container.
pub fn parse_directory(data: &[u8]) -> Result<Vec<DirEntry>, LogoError> {
    if data.len() < LOGO_MAGIC.len() {
        return Err(LogoError::UnexpectedEof);
    }
    if &data[..LOGO_MAGIC.len()] != LOGO_MAGIC {
        return Err(LogoError::NotALogoFile);
    }

    let mut pos = LOGO_MAGIC.len();
    if pos + 4 > data.len() {
        return Err(LogoError::UnexpectedEof);
    }
    let header_size = u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]]);
    pos += 4;

    let num_entries = header_size.wrapping_sub(LOGO_HEADER_FIXED as u32) / DirEntry::SIZE as u32;

    let mut entries = Vec::new();
    for _ in 0..num_entries {
        let Some(entry) = DirEntry::from_bytes(&data[pos..]) else {
            return Err(LogoError::UnexpectedEof);
        };
        pos += DirEntry::SIZE;

        let end = u64::from(entry.offset) + u64::from(entry.size);
        if u64::from(entry.offset) < u64::from(header_size) || end > data.len() as u64 {
            return Err(LogoError::BadOffsetOrSize { name: entry.name });
        }
        entries.push(entry);
    }

    Ok(entries)
}

/// Derive the stored entry name from a source image path
///
/// Strips everything up to the last `/` or `\` and the extension after
/// the last `.`, matching how packed names are chosen from input files.
///
/// # Errors
/// Returns [`LogoError::NameTooLong`] if the remaining name exceeds
/// 23 bytes.
pub fn entry_name(source_path: &str) -> Result<String, LogoError> {
    let file = match source_path.rfind(['/', '\\']) {
        Some(i) => &source_path[i + 1..],
        None => source_path,
    };
    let stem = match file.rfind('.') {
        Some(i) => &file[..i],
        None => file,
    };
    if stem.len() > DirEntry::MAX_NAME_LEN {
        return Err(LogoError::NameTooLong {
            name: stem.to_string(),
        });
    }
    Ok(stem.to_string())
}
