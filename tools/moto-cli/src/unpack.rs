//! Unpack command - extract container images to numbered PNG files

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

/// Arguments for the unpack command
#[derive(Args)]
pub struct UnpackArgs {
    /// Path to the logo.bin file to read
    pub input: PathBuf,

    /// Directory for the extracted PNG files
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,
}

/// Execute the unpack command
///
/// Every image is decoded before the first file is written, so a bad
/// container produces no output files.
pub fn execute(args: UnpackArgs) -> Result<()> {
    let data = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let images = moto_logo::unpack(&data)
        .with_context(|| format!("Failed to unpack {}", args.input.display()))?;

    for (i, (name, raster)) in images.into_iter().enumerate() {
        let path = args.out_dir.join(format!("{i}.png"));
        let (width, height) = (raster.width(), raster.height());
        let img = image::RgbImage::from_raw(width, height, raster.into_pixels())
            .context("Raster buffer does not match its dimensions")?;
        img.save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        println!("Extracted: {} ({}, {}x{})", path.display(), name, width, height);
    }

    Ok(())
}
