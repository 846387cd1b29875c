//! MotoLogo CLI - convert Moto logo.bin files to and from images
//!
//! # Commands
//!
//! - `motologo unpack` - Extract every image in a logo.bin to numbered PNGs
//! - `motologo pack` - Pack image files into a new logo.bin
//!
//! # Usage
//!
//! ```bash
//! # Extract a container into 0.png, 1.png, ...
//! motologo unpack logo.bin
//!
//! # Build a container from images, in argument order
//! motologo pack boot.png battery.png -o logo.bin
//! ```

mod pack;
mod unpack;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// MotoLogo CLI - convert Moto logo.bin files to and from images
#[derive(Parser)]
#[command(name = "motologo")]
#[command(about = "Unpack and repack Moto logo.bin boot logo containers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every image in a logo.bin to numbered PNG files
    Unpack(unpack::UnpackArgs),

    /// Pack image files into a new logo.bin
    Pack(pack::PackArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Unpack(args) => unpack::execute(args),
        Commands::Pack(args) => pack::execute(args),
    }
}
