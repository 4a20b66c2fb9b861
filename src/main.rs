use std::num::NonZeroU32;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use grid_overlay::{cell_to_pixel, pixel_to_cell, render_grid, GridOverlayConfig};
use image::Rgba;
use tracing::*;
use tracing_subscriber::EnvFilter;

/// Overlay a numbered grid on an image, or convert between cells and pixels.
#[derive(Debug, Parser)]
#[command(name = "grid-overlay", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Draw the grid onto INPUT and write the result to OUTPUT as PNG.
    Render {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Print the pixel at the center of each CELL.
    CellToPixel {
        #[arg(required = true, allow_negative_numbers = true)]
        cells: Vec<i64>,
        #[arg(long)]
        width: u32,
        #[arg(long, default_value = "100")]
        cell_size: NonZeroU32,
    },
    /// Print the cell containing the pixel (X, Y).
    PixelToCell {
        #[arg(allow_negative_numbers = true)]
        x: i64,
        #[arg(allow_negative_numbers = true)]
        y: i64,
        #[arg(long)]
        width: u32,
        #[arg(long, default_value = "100")]
        cell_size: NonZeroU32,
    },
}

#[derive(Debug, clap::Args)]
struct StyleArgs {
    #[arg(long, default_value = "100")]
    cell_size: NonZeroU32,
    #[arg(long, default_value = "2")]
    line_width: u32,
    #[arg(long, default_value = "3")]
    number_scale: NonZeroU32,
    /// Grid line color as RRGGBB or RRGGBBAA hex
    #[arg(long, default_value = "00ffff64", value_parser = parse_rgba)]
    grid_color: Rgba<u8>,
    /// Label digit color as RRGGBB or RRGGBBAA hex
    #[arg(long, default_value = "ffffffff", value_parser = parse_rgba)]
    number_color: Rgba<u8>,
    /// Label background color as RRGGBB or RRGGBBAA hex
    #[arg(long, default_value = "000000c8", value_parser = parse_rgba)]
    number_background: Rgba<u8>,
}

impl From<&StyleArgs> for GridOverlayConfig {
    fn from(args: &StyleArgs) -> Self {
        GridOverlayConfig {
            cell_size: args.cell_size,
            grid_color: args.grid_color,
            number_color: args.number_color,
            number_background: args.number_background,
            line_width: args.line_width,
            number_scale: args.number_scale,
        }
    }
}

fn parse_rgba(hex: &str) -> Result<Rgba<u8>> {
    let hex = hex.trim_start_matches('#');
    if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
        bail!("expected RRGGBB or RRGGBBAA, got {hex:?}");
    }
    let mut channels = [255u8; 4];
    for (channel, i) in channels.iter_mut().zip((0..hex.len()).step_by(2)) {
        *channel = u8::from_str_radix(&hex[i..i + 2], 16)
            .with_context(|| format!("invalid hex byte {:?}", &hex[i..i + 2]))?;
    }
    Ok(Rgba(channels))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render {
            input,
            output,
            style,
        } => {
            let config = GridOverlayConfig::from(&style);
            let img = image::open(&input)
                .with_context(|| format!("Failed to open image {}", input.display()))?;
            info!(
                "Rendering grid with {}px cells onto {}",
                config.cell_size,
                input.display()
            );
            let png = render_grid(&img, &config).context("Failed to add grid")?;
            std::fs::write(&output, png)
                .with_context(|| format!("Failed to save image {}", output.display()))?;
            println!("Grid applied successfully! Check {}", output.display());
        }
        Command::CellToPixel {
            cells,
            width,
            cell_size,
        } => {
            for cell in cells {
                let (x, y) = cell_to_pixel(cell, width, cell_size)
                    .with_context(|| format!("Failed to convert cell {cell}"))?;
                println!("Cell {cell} -> Pixel ({x}, {y})");
            }
        }
        Command::PixelToCell {
            x,
            y,
            width,
            cell_size,
        } => {
            let cell = pixel_to_cell(x, y, width, cell_size);
            println!("Pixel ({x}, {y}) -> Cell {cell}");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}
