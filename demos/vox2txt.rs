//! Converts a MagicaVoxel `.vox` file to the plain-text voxel list format
//! also understood by Goxel.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use vox_scene::VoxScene;

/// Converts a MagicaVoxel vox file to text (in the format also supported by Goxel).
#[derive(Parser)]
struct Args {
    /// Input .vox file
    input: PathBuf,
    /// Output text file; writes to stdout if omitted
    output: Option<PathBuf>,
}

const BATCH: usize = 256;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut scene = VoxScene::open_path(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path).context("failed to create output file")?),
        None => Box::new(io::stdout()),
    };

    writeln!(out, "# X Y Z RRGGBB")?;

    let mut xyz = [[0i32; 3]; BATCH];
    let mut rgba = [[0u8; 4]; BATCH];
    loop {
        let count = scene.read_xyz_rgba(&mut xyz, &mut rgba)?;
        if count == 0 {
            break;
        }
        for i in 0..count {
            writeln!(
                out,
                "{} {} {} {:02x}{:02x}{:02x}",
                xyz[i][0], xyz[i][1], xyz[i][2], rgba[i][0], rgba[i][1], rgba[i][2]
            )?;
        }
    }

    Ok(())
}
