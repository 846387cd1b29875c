//! Whole-container unpack and pack

use moto_run::Raster;

use crate::directory::{DirEntry, parse_directory};
use crate::{BLOB_ALIGN, LOGO_HEADER_FIXED, LOGO_MAGIC, LogoError, PAD_BYTE};

/// Decode every image in a logo container
///
/// The whole directory is parsed and validated before the first blob is
/// decoded, so a bad entry aborts the operation without touching any
/// image data. Results keep directory order.
///
/// # Errors
/// Returns `LogoError` on a malformed directory or if any embedded image
/// fails to decode; codec failures carry the entry name.
pub fn unpack(data: &[u8]) -> Result<Vec<(String, Raster)>, LogoError> {
    let entries = parse_directory(data)?;

    let mut images = Vec::with_capacity(entries.len());
    for entry in entries {
        let start = entry.offset as usize;
        let end = start + entry.size as usize;
        let raster = moto_run::decode(&data[start..end]).map_err(|source| LogoError::Decode {
            name: entry.name.clone(),
            source,
        })?;
        images.push((entry.name, raster));
    }

    Ok(images)
}

/// Build a logo container from named rasters
///
/// Images are encoded and laid out in input order, each blob starting on
/// a 512-byte boundary with `0xFF` filling the gaps. Directory slots are
/// serialized in one pass at the end, once every blob offset is known.
///
/// # Errors
/// Returns `LogoError` if a name exceeds 23 bytes, an image fails to
/// encode, or a blob or the container leaves the u32 size domain.
pub fn pack(images: &[(String, Raster)]) -> Result<Vec<u8>, LogoError> {
    for (name, _) in images {
        if name.len() > DirEntry::MAX_NAME_LEN {
            return Err(LogoError::NameTooLong { name: name.clone() });
        }
    }

    let header_size = images.len() * DirEntry::SIZE + LOGO_HEADER_FIXED;
    let mut out = vec![PAD_BYTE; header_size];
    out[..LOGO_MAGIC.len()].copy_from_slice(LOGO_MAGIC);
    out[LOGO_MAGIC.len()..LOGO_HEADER_FIXED].copy_from_slice(&(header_size as u32).to_le_bytes());

    let mut entries = Vec::with_capacity(images.len());
    for (name, raster) in images {
        let blob = moto_run::encode(raster).map_err(|source| LogoError::Encode {
            name: name.clone(),
            source,
        })?;

        // Blobs start on the next 512-byte boundary
        out.resize(out.len().div_ceil(BLOB_ALIGN) * BLOB_ALIGN, PAD_BYTE);

        let too_large = || LogoError::BlobTooLarge { name: name.clone() };
        let offset = u32::try_from(out.len()).map_err(|_| too_large())?;
        let size = u32::try_from(blob.len()).map_err(|_| too_large())?;
        out.extend_from_slice(&blob);
        u32::try_from(out.len()).map_err(|_| too_large())?;

        entries.push(DirEntry {
            name: name.clone(),
            offset,
            size,
        });
    }

    for (i, entry) in entries.iter().enumerate() {
        let slot = LOGO_HEADER_FIXED + i * DirEntry::SIZE;
        out[slot..slot + DirEntry::SIZE].copy_from_slice(&entry.to_bytes());
    }

    Ok(out)
}
