//! bimage CLI - Command-line tool for idTech BIM textures.
//!
//! This is the main entry point for the bimage command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use bimage::prelude::*;
use bimage::{default_dds_path, extract_file, repack_file};

/// bimage - idTech BIM texture extraction and repacking tool
#[derive(Parser)]
#[command(name = "bimage")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print header and primary mip information of a BIM file
    Info {
        /// Path to the BIM file
        #[arg(env = "BIM_INPUT")]
        input: PathBuf,
    },

    /// Convert BIM files to DDS
    Extract {
        /// BIM files to convert
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (defaults to each input's directory)
        #[arg(short, long, env = "BIM_OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Pack a DDS or raster image into a BIM file
    Repack {
        /// Replacement texture (.dds, .png, .jpg, .bmp)
        #[arg(short, long)]
        texture: PathBuf,

        /// Existing BIM file to take the header and remaining mips from
        #[arg(short, long, env = "BIM_INPUT")]
        input: Option<PathBuf>,

        /// Output BIM file
        #[arg(short, long, env = "BIM_OUTPUT")]
        output: PathBuf,

        /// Fail instead of zero-filling mips that have no pixel data
        #[arg(long)]
        strict: bool,

        /// Write each mip descriptor directly before its payload
        #[arg(long)]
        interleaved: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("Failed to initialise logging")?;

    match cli.command {
        Commands::Info { input } => {
            cmd_info(&input)?;
        }
        Commands::Extract { inputs, output } => {
            cmd_extract(&inputs, output.as_deref())?;
        }
        Commands::Repack {
            texture,
            input,
            output,
            strict,
            interleaved,
        } => {
            let options = WriteOptions {
                strict_payloads: strict,
                mip_layout: if interleaved {
                    MipLayout::Interleaved
                } else {
                    MipLayout::Grouped
                },
            };
            cmd_repack(&texture, input.as_deref(), &output, &options)?;
        }
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<()> {
    let image = BimImage::read_from(input)
        .with_context(|| format!("Failed to read BIM file {}", input.display()))?;
    print!("{}", describe(&image));
    Ok(())
}

fn cmd_extract(inputs: &[PathBuf], output: Option<&Path>) -> Result<()> {
    if let Some(dir) = output {
        fs::create_dir_all(dir).context("Failed to create output directory")?;
    }

    let pb = if inputs.len() > 1 {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let mut failed = 0usize;
    for input in inputs {
        let target = output.and_then(|dir| {
            default_dds_path(input)
                .file_name()
                .map(|name| dir.join(name))
        });

        match extract_file(input, target.as_deref()) {
            Ok(path) => {
                let line = format!("DDS file saved to: {}", path.display());
                match &pb {
                    Some(pb) => pb.println(line),
                    None => println!("{line}"),
                }
            }
            Err(err) => {
                failed += 1;
                let line = format!("Failed to extract {}: {err}", input.display());
                match &pb {
                    Some(pb) => pb.println(line),
                    None => eprintln!("{line}"),
                }
            }
        }

        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
        println!("Extraction completed in {:?}", start.elapsed());
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} file(s) failed to extract", inputs.len());
    }
    Ok(())
}

fn cmd_repack(texture: &Path, template: Option<&Path>, output: &Path, options: &WriteOptions) -> Result<()> {
    match template {
        Some(path) => println!("Repacking {} into {}", texture.display(), path.display()),
        None => println!("Packing {} into a new BIM file", texture.display()),
    }

    let image = repack_file(texture, template, output, options)
        .with_context(|| format!("Failed to repack {}", texture.display()))?;

    let format = image
        .format()
        .map_or_else(|| "unknown format".to_string(), |format| format.to_string());
    println!(
        "Wrote {} ({}x{}, {format})",
        output.display(),
        image.header.pixel_width,
        image.header.pixel_height
    );

    Ok(())
}
