//! # zenstego
//!
//! Hide one 8-bit grayscale PGM inside another with 4-bit LSB substitution,
//! and get it back out.
//!
//! ## Formats
//!
//! - **P2** (PGM ASCII): decode and encode
//! - **P5** (PGM raw): decode and encode, 8-bit samples only
//!
//! Both decoders check the header against the [`Dimensions`] you pass in and
//! fill a [`Raster`] of exactly that size. The pipeline runs at the fixed
//! [`Dimensions::STANDARD`] (512x512).
//!
//! ## Embedding
//!
//! [`lsb::embed`] keeps the cover's high nibble and stores the secret's high
//! nibble in the low one. [`lsb::extract`] moves it back up. Recovery is lossy
//! by design: you get the secret at 4 bits per pixel.
//!
//! ## Non-Goals
//!
//! - Color, 16-bit samples, or other PNM variants
//! - Resizing: a header that disagrees with the expected size is an error
//! - Capacity negotiation or variable bit depth
//!
//! ## Usage
//!
//! ```
//! use zenstego::{Dimensions, lsb, pgm};
//! use enough::Unstoppable;
//!
//! let dims = Dimensions::new(2, 1);
//! let cover = pgm::decode_text(b"P2\n2 1\n255\n200 17\n", dims, Unstoppable)?;
//! let secret = pgm::decode_text(b"P2\n2 1\n255\n255 64\n", dims, Unstoppable)?;
//!
//! let stego = lsb::embed(&cover, &secret)?;
//! let p5 = pgm::encode_binary(&stego, Unstoppable)?;
//! assert_eq!(&p5[..], b"P5\n2 1\n255\n\xcf\x14");
//!
//! let recovered = lsb::extract(&stego)?;
//! assert_eq!(recovered.pixels(), &[240, 64]);
//! # Ok::<(), zenstego::StegoError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod raster;

pub mod lsb;
pub mod pgm;

#[cfg(feature = "std")]
pub mod pipeline;

// Re-exports
pub use enough::{Stop, Unstoppable};
pub use error::{FormatError, StegoError};
pub use pgm::PgmVariant;
pub use raster::{Dimensions, HEIGHT, Raster, WIDTH};
