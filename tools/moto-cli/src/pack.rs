//! Pack command - build a logo.bin from image files

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use moto_run::Raster;

/// Arguments for the pack command
#[derive(Args)]
pub struct PackArgs {
    /// Input image files, packed in argument order
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output logo.bin path
    #[arg(short, long, default_value = "logo.bin")]
    pub output: PathBuf,
}

/// Execute the pack command
///
/// The container is built fully in memory and written with a single
/// `fs::write`, so a failure never leaves a truncated logo.bin behind.
pub fn execute(args: PackArgs) -> Result<()> {
    let mut images = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        let name = moto_logo::entry_name(&path.to_string_lossy())
            .with_context(|| format!("Cannot derive an entry name from {}", path.display()))?;

        let img = image::open(path)
            .with_context(|| format!("Failed to load image: {}", path.display()))?;
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let raster = Raster::from_raw(width, height, rgb.into_raw())
            .context("Image buffer does not match its dimensions")?;

        println!("  Image: {} ({}x{})", name, width, height);
        images.push((name, raster));
    }

    let container = moto_logo::pack(&images)
        .with_context(|| format!("Failed to pack {}", args.output.display()))?;

    std::fs::write(&args.output, &container)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Created: {} ({} bytes, {} images)",
        args.output.display(),
        container.len(),
        images.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_png(path: &std::path::Path, width: u32, height: u32, color: [u8; 3]) {
        let img = image::RgbImage::from_fn(width, height, |_, _| image::Rgb(color));
        img.save(path).unwrap();
    }

    #[test]
    fn test_pack_roundtrip() {
        let dir = tempdir().unwrap();
        let boot = dir.path().join("logo_boot.png");
        let battery = dir.path().join("logo_battery.png");
        write_png(&boot, 8, 4, [200, 0, 50]);
        write_png(&battery, 3, 3, [0, 0, 255]);

        let output = dir.path().join("logo.bin");
        execute(PackArgs {
            inputs: vec![boot, battery],
            output: output.clone(),
        })
        .unwrap();

        let data = std::fs::read(&output).unwrap();
        let images = moto_logo::unpack(&data).unwrap();

        assert_eq!(images.len(), 2);
        assert_eq!(images[0].0, "logo_boot");
        assert_eq!(images[1].0, "logo_battery");
        assert_eq!(images[0].1.width(), 8);
        assert_eq!(images[0].1.pixels()[..3], [200, 0, 50]);
        assert_eq!(images[1].1.pixels()[..3], [0, 0, 255]);
    }

    #[test]
    fn test_pack_rejects_long_name() {
        let dir = tempdir().unwrap();
        let long = dir.path().join("this_name_is_far_too_long_to_store.png");
        write_png(&long, 2, 2, [1, 1, 1]);

        let result = execute(PackArgs {
            inputs: vec![long],
            output: dir.path().join("logo.bin"),
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_pack_missing_input_writes_no_output() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("logo.bin");

        let result = execute(PackArgs {
            inputs: vec![dir.path().join("missing.png")],
            output: output.clone(),
        });
        assert!(result.is_err());
        assert!(!output.exists());
    }
}
