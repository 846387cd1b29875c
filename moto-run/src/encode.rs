//! MotoRun encoder implementation
//!
//! Runs never cross a row boundary. Within a row, a stretch of 3 or more
//! identical pixels becomes a repeat run; everything else accumulates in
//! a literal buffer that is flushed before each repeat run, when it
//! reaches 4095 pixels, and at the end of the row. A pair of identical
//! pixels is always encoded literally.

use crate::{
    MOTORUN_HEADER_SIZE, MOTORUN_MAGIC, MotoRunError, PIXEL_SIZE, RUN_MAX_PIXELS, RUN_REPEAT_BIT,
    Raster,
};

/// Flush the pending literal buffer as one literal run
///
/// The buffer holds file-order (B,G,R) triples. Flushing an empty buffer
/// is a no-op; a buffer past the count-field limit is an encoder bug and
/// reported as `RunTooLarge`.
fn flush_literal(out: &mut Vec<u8>, literal: &mut Vec<u8>) -> Result<(), MotoRunError> {
    let count = literal.len() / PIXEL_SIZE;
    if count == 0 {
        return Ok(());
    }
    if count > RUN_MAX_PIXELS {
        return Err(MotoRunError::RunTooLarge(count));
    }
    out.extend_from_slice(&(count as u16).to_be_bytes());
    out.append(literal);
    Ok(())
}

fn emit_repeat(out: &mut Vec<u8>, count: usize, pixel: &[u8]) -> Result<(), MotoRunError> {
    if count > RUN_MAX_PIXELS {
        return Err(MotoRunError::RunTooLarge(count));
    }
    out.extend_from_slice(&(count as u16 | RUN_REPEAT_BIT).to_be_bytes());
    out.extend_from_slice(&[pixel[2], pixel[1], pixel[0]]);
    Ok(())
}

/// Encode a raster to a MotoRun blob
///
/// # Errors
/// Returns `DimensionsTooLarge` if the raster does not fit the blob's
/// 16-bit dimension fields, or `RunTooLarge` if the encoder violates its
/// own run-length invariant.
pub fn encode(raster: &Raster) -> Result<Vec<u8>, MotoRunError> {
    let width = raster.width();
    let height = raster.height();
    if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
        return Err(MotoRunError::DimensionsTooLarge { width, height });
    }

    let mut out = Vec::with_capacity(MOTORUN_HEADER_SIZE + raster.pixels().len());
    out.extend_from_slice(MOTORUN_MAGIC);
    out.extend_from_slice(&(width as u16).to_be_bytes());
    out.extend_from_slice(&(height as u16).to_be_bytes());

    if raster.pixels().is_empty() {
        return Ok(out);
    }

    let row_pixels = width as usize;
    let mut literal: Vec<u8> = Vec::new();

    for row in raster.pixels().chunks_exact(raster.row_size()) {
        let mut x = 0;
        while x < row_pixels {
            let pixel = &row[x * PIXEL_SIZE..(x + 1) * PIXEL_SIZE];

            // Maximal run of identical pixels starting here, capped at 4095
            let mut run = 1;
            while run < RUN_MAX_PIXELS
                && x + run < row_pixels
                && &row[(x + run) * PIXEL_SIZE..(x + run + 1) * PIXEL_SIZE] == pixel
            {
                run += 1;
            }

            if run > 2 {
                flush_literal(&mut out, &mut literal)?;
                emit_repeat(&mut out, run, pixel)?;
                x += run;
            } else {
                // Pairs stay literal; repeat runs start at 3 pixels
                literal.extend_from_slice(&[pixel[2], pixel[1], pixel[0]]);
                x += 1;
                if literal.len() == RUN_MAX_PIXELS * PIXEL_SIZE {
                    flush_literal(&mut out, &mut literal)?;
                }
            }
        }
        flush_literal(&mut out, &mut literal)?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster(width: u32, height: u32, pixels: &[(u8, u8, u8)]) -> Raster {
        let bytes: Vec<u8> = pixels.iter().flat_map(|&(r, g, b)| [r, g, b]).collect();
        Raster::from_raw(width, height, bytes).unwrap()
    }

    /// Run bytes after the 12-byte header
    fn runs(blob: &[u8]) -> &[u8] {
        &blob[MOTORUN_HEADER_SIZE..]
    }

    #[test]
    fn test_header_fields() {
        let blob = encode(&Raster::new(300, 2)).unwrap();
        assert_eq!(&blob[..8], MOTORUN_MAGIC);
        assert_eq!(&blob[8..10], &300u16.to_be_bytes());
        assert_eq!(&blob[10..12], &2u16.to_be_bytes());
    }

    #[test]
    fn test_three_identical_pixels_repeat() {
        let blob = encode(&raster(3, 1, &[(1, 2, 3); 3])).unwrap();
        assert_eq!(runs(&blob), &[0x80, 0x03, 3, 2, 1]);
    }

    #[test]
    fn test_pair_stays_literal() {
        // Two repeated pixels followed by a different one: all literal
        let blob = encode(&raster(3, 1, &[(1, 2, 3), (1, 2, 3), (7, 8, 9)])).unwrap();
        assert_eq!(runs(&blob), &[0x00, 0x03, 3, 2, 1, 3, 2, 1, 9, 8, 7]);
    }

    #[test]
    fn test_run_cap_splits_5000() {
        let blob = encode(&raster(5000, 1, &[(5, 6, 7); 5000])).unwrap();
        // 4095 + 905, never one run over 4095
        assert_eq!(
            runs(&blob),
            &[0x8F, 0xFF, 7, 6, 5, 0x83, 0x89, 7, 6, 5]
        );
    }

    #[test]
    fn test_literal_cap_splits() {
        // 5000 pixels with no two adjacent equal: literal runs of 4095 + 905
        let pixels: Vec<(u8, u8, u8)> = (0..5000u32)
            .map(|i| (i as u8, (i >> 8) as u8, 7))
            .collect();
        let blob = encode(&raster(5000, 1, &pixels)).unwrap();

        let data = runs(&blob);
        assert_eq!(&data[..2], &[0x0F, 0xFF]);
        let second = 2 + 4095 * PIXEL_SIZE;
        assert_eq!(&data[second..second + 2], &[0x03, 0x89]);
        assert_eq!(data.len(), 2 + 4095 * PIXEL_SIZE + 2 + 905 * PIXEL_SIZE);
    }

    #[test]
    fn test_runs_do_not_cross_rows() {
        // One color across two rows of 3: two repeat runs, not one of 6
        let blob = encode(&raster(3, 2, &[(9, 9, 9); 6])).unwrap();
        assert_eq!(runs(&blob), &[0x80, 0x03, 9, 9, 9, 0x80, 0x03, 9, 9, 9]);
    }

    #[test]
    fn test_literal_flushed_before_repeat() {
        // Literal pixel, then a run of 3
        let blob = encode(&raster(4, 1, &[(7, 8, 9), (1, 2, 3), (1, 2, 3), (1, 2, 3)])).unwrap();
        assert_eq!(runs(&blob), &[0x00, 0x01, 9, 8, 7, 0x80, 0x03, 3, 2, 1]);
    }

    #[test]
    fn test_literal_flushed_at_row_end() {
        let blob = encode(&raster(2, 1, &[(1, 2, 3), (4, 5, 6)])).unwrap();
        assert_eq!(runs(&blob), &[0x00, 0x02, 3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn test_empty_raster() {
        let blob = encode(&Raster::new(0, 0)).unwrap();
        assert_eq!(blob.len(), MOTORUN_HEADER_SIZE);
        let blob = encode(&Raster::new(16, 0)).unwrap();
        assert_eq!(blob.len(), MOTORUN_HEADER_SIZE);
    }

    #[test]
    fn test_dimensions_too_large() {
        let raster = Raster::new(65536, 1);
        assert_eq!(
            encode(&raster),
            Err(MotoRunError::DimensionsTooLarge {
                width: 65536,
                height: 1
            })
        );
    }
}
