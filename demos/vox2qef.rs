//! Converts a MagicaVoxel `.vox` file to Qubicle Exchange Format.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use vox_scene::VoxScene;

/// Converts a MagicaVoxel vox file to Qubicle Exchange Format.
#[derive(Parser)]
struct Args {
    /// Input .vox file
    input: PathBuf,
    /// Output .qef file; writes to stdout if omitted
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

    writeln!(out, "Qubicle Exchange Format\nVersion 0.2\nwww.minddesk.com")?;

    let bounds = scene.calculate_bounds();
    let size = [
        bounds.max[0] - bounds.min[0] + 1,
        bounds.max[1] - bounds.min[1] + 1,
        bounds.max[2] - bounds.min[2] + 1,
    ];
    writeln!(out, "{} {} {}", size[0], size[1], size[2])?;

    let palette = scene.palette();
    writeln!(out, "255")?;
    for entry in &palette.entries()[1..256] {
        writeln!(
            out,
            "{:.6} {:.6} {:.6}",
            f64::from(entry[0]) / 255.0,
            f64::from(entry[1]) / 255.0,
            f64::from(entry[2]) / 255.0
        )?;
    }

    let mut xyz = [[0i32; 3]; BATCH];
    let mut coloridx = [0u8; BATCH];
    loop {
        let count = scene.read_xyz_coloridx(&mut xyz, &mut coloridx)?;
        if count == 0 {
            break;
        }
        for i in 0..count {
            if coloridx[i] == 0 {
                continue;
            }
            let pos = [
                xyz[i][0] - bounds.min[0],
                xyz[i][1] - bounds.min[1],
                xyz[i][2] - bounds.min[2],
            ];
            writeln!(
                out,
                "{} {} {} {} 126",
                pos[0],
                pos[1],
                pos[2],
                coloridx[i] - 1
            )?;
        }
    }

    Ok(())
}
