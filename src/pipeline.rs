//! File-level driver: decode cover and secret, embed, write the stego image,
//! then extract and write the recovered image.
//!
//! Every file is read or written with a single scoped `std::fs` call, so no
//! handle outlives the step that opened it. Rasters are dropped on every
//! return path.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use enough::Unstoppable;

use crate::error::StegoError;
use crate::lsb;
use crate::pgm;
use crate::raster::{Dimensions, Raster};

/// Where the pipeline reads and writes, and at what size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    pub dimensions: Dimensions,
    /// P2 image that carries the payload.
    pub cover: PathBuf,
    /// P2 image to hide.
    pub secret: PathBuf,
    /// P5 output.
    pub stego: PathBuf,
    /// P2 output.
    pub recovered: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::STANDARD,
            cover: PathBuf::from("baboon.pgm"),
            secret: PathBuf::from("farm.pgm"),
            stego: PathBuf::from("stego.pgm"),
            recovered: PathBuf::from("extracted.pgm"),
        }
    }
}

/// The four file roles the pipeline knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileRole {
    Cover,
    Secret,
    Stego,
    Recovered,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileRole::Cover => "cover",
            FileRole::Secret => "secret",
            FileRole::Stego => "stego",
            FileRole::Recovered => "recovered",
        })
    }
}

/// A pipeline failure, tagged with the file role and path involved.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PipelineError {
    #[error("failed to allocate {role} raster")]
    Allocation {
        role: FileRole,
        #[source]
        source: StegoError,
    },

    #[error("failed to read {role} image `{}`", .path.display())]
    Read {
        role: FileRole,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {role} image `{}`", .path.display())]
    Decode {
        role: FileRole,
        path: PathBuf,
        #[source]
        source: StegoError,
    },

    #[error("failed to embed secret into cover")]
    Embed(#[source] StegoError),

    #[error("failed to extract from stego raster")]
    Extract(#[source] StegoError),

    #[error("failed to encode {role} image `{}`", .path.display())]
    Encode {
        role: FileRole,
        path: PathBuf,
        #[source]
        source: StegoError,
    },

    #[error("failed to write {role} image `{}`", .path.display())]
    Write {
        role: FileRole,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// The file role the failure concerns, if any.
    pub fn role(&self) -> Option<FileRole> {
        match self {
            PipelineError::Allocation { role, .. }
            | PipelineError::Read { role, .. }
            | PipelineError::Decode { role, .. }
            | PipelineError::Encode { role, .. }
            | PipelineError::Write { role, .. } => Some(*role),
            PipelineError::Embed(_) | PipelineError::Extract(_) => None,
        }
    }
}

/// Bytes written by a successful run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineReport {
    pub stego_bytes: usize,
    pub recovered_bytes: usize,
}

fn allocate(role: FileRole, dims: Dimensions) -> Result<Raster, PipelineError> {
    Raster::try_new(dims).map_err(|source| PipelineError::Allocation { role, source })
}

fn read(role: FileRole, path: &Path) -> Result<Vec<u8>, PipelineError> {
    fs::read(path).map_err(|source| PipelineError::Read {
        role,
        path: path.to_path_buf(),
        source,
    })
}

fn load_text(role: FileRole, path: &Path, raster: &mut Raster) -> Result<(), PipelineError> {
    let data = read(role, path)?;
    pgm::decode_text_into(&data, raster, Unstoppable).map_err(|source| PipelineError::Decode {
        role,
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded {role} image {}", path.display());
    Ok(())
}

fn save(
    role: FileRole,
    path: &Path,
    raster: &Raster,
    variant: pgm::PgmVariant,
) -> Result<usize, PipelineError> {
    let encoded = pgm::encode(raster, variant, Unstoppable).map_err(|source| {
        PipelineError::Encode {
            role,
            path: path.to_path_buf(),
            source,
        }
    })?;
    fs::write(path, &encoded).map_err(|source| PipelineError::Write {
        role,
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("wrote {role} image {} ({} bytes)", path.display(), encoded.len());
    Ok(encoded.len())
}

/// Run the whole pipeline described by `config`.
///
/// Cover and secret must be P2 files of exactly `config.dimensions`. The
/// stego image is written as P5, the recovered image as P2. The first
/// failure aborts the run; an output written before it is left in place.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport, PipelineError> {
    let dims = config.dimensions;
    let mut cover = allocate(FileRole::Cover, dims)?;
    let mut secret = allocate(FileRole::Secret, dims)?;
    let mut recovered = allocate(FileRole::Recovered, dims)?;

    load_text(FileRole::Cover, &config.cover, &mut cover)?;
    load_text(FileRole::Secret, &config.secret, &mut secret)?;

    lsb::embed_in_place(&mut cover, &secret).map_err(PipelineError::Embed)?;
    drop(secret);
    let stego = cover;

    let stego_bytes = save(FileRole::Stego, &config.stego, &stego, pgm::PgmVariant::Binary)?;

    lsb::extract_into(&stego, &mut recovered).map_err(PipelineError::Extract)?;
    let recovered_bytes = save(
        FileRole::Recovered,
        &config.recovered,
        &recovered,
        pgm::PgmVariant::Text,
    )?;

    log::info!(
        "embedded {} into {}: stego {} ({stego_bytes} bytes), recovered {} ({recovered_bytes} bytes)",
        config.secret.display(),
        config.cover.display(),
        config.stego.display(),
        config.recovered.display(),
    );
    Ok(PipelineReport {
        stego_bytes,
        recovered_bytes,
    })
}

/// Recover the hidden image from an existing stego file (P2 or P5) and
/// write it to `recovered` as P2. Returns the number of bytes written.
pub fn recover(stego: &Path, recovered: &Path, dims: Dimensions) -> Result<usize, PipelineError> {
    let data = read(FileRole::Stego, stego)?;
    let stego_raster = pgm::decode(&data, dims, Unstoppable).map_err(|source| {
        PipelineError::Decode {
            role: FileRole::Stego,
            path: stego.to_path_buf(),
            source,
        }
    })?;
    let mut out = allocate(FileRole::Recovered, dims)?;
    lsb::extract_into(&stego_raster, &mut out).map_err(PipelineError::Extract)?;
    save(FileRole::Recovered, recovered, &out, pgm::PgmVariant::Text)
}
