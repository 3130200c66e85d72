use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use zenstego::pipeline::{self, PipelineConfig};

/// Hide a grayscale P2 image inside another with 4-bit LSB substitution.
///
/// With no arguments, reads `baboon.pgm` (cover) and `farm.pgm` (secret),
/// writes `stego.pgm` (P5) and `extracted.pgm` (P2). Both inputs must be
/// 512x512.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Cover image (P2)
    #[arg(default_value = "baboon.pgm")]
    cover: PathBuf,

    /// Secret image to hide (P2)
    #[arg(default_value = "farm.pgm")]
    secret: PathBuf,

    /// Stego output (P5)
    #[arg(default_value = "stego.pgm")]
    stego: PathBuf,

    /// Recovered secret output (P2)
    #[arg(default_value = "extracted.pgm")]
    recovered: PathBuf,
}

impl From<Args> for PipelineConfig {
    fn from(args: Args) -> Self {
        PipelineConfig {
            cover: args.cover,
            secret: args.secret,
            stego: args.stego,
            recovered: args.recovered,
            ..PipelineConfig::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = PipelineConfig::from(Args::parse());
    tracing::debug!(?config, "starting pipeline");

    let report = pipeline::run(&config).context("steganography pipeline failed")?;

    tracing::info!(
        stego_bytes = report.stego_bytes,
        recovered_bytes = report.recovered_bytes,
        "done"
    );
    println!("Steganography completed successfully.");
    Ok(())
}
