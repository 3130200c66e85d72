use alloc::vec::Vec;
use core::fmt;

use crate::error::StegoError;

/// Standard cover/secret width in pixels.
pub const WIDTH: u32 = 512;
/// Standard cover/secret height in pixels.
pub const HEIGHT: u32 = 512;

/// Width and height of a grayscale raster.
///
/// Every decoder, encoder and transform takes the expected size explicitly;
/// headers that disagree with it are rejected rather than resized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// 512x512, the size the pipeline runs at.
    pub const STANDARD: Self = Self::new(WIDTH, HEIGHT);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels (`width * height`), saturating on overflow.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    fn checked_pixel_count(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Owned 8-bit grayscale pixel grid, row-major, one byte per pixel.
///
/// The backing storage always holds exactly `width * height` bytes. Pixel
/// `(x, y)` lives at linear index `y * width + x`.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    dims: Dimensions,
    pixels: Vec<u8>,
}

impl Raster {
    /// Allocate a zero-filled raster.
    ///
    /// Returns [`StegoError::Allocation`] if the allocator refuses the
    /// request instead of aborting the process.
    pub fn try_new(dims: Dimensions) -> Result<Self, StegoError> {
        let len = dims
            .checked_pixel_count()
            .ok_or(StegoError::Allocation { bytes: usize::MAX })?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| StegoError::Allocation { bytes: len })?;
        pixels.resize(len, 0);
        Ok(Self { dims, pixels })
    }

    /// Wrap an existing pixel vector. Its length must equal `width * height`.
    pub fn from_pixels(dims: Dimensions, pixels: Vec<u8>) -> Result<Self, StegoError> {
        let needed = dims
            .checked_pixel_count()
            .ok_or(StegoError::Allocation { bytes: usize::MAX })?;
        if pixels.len() != needed {
            return Err(StegoError::BufferSize {
                needed,
                actual: pixels.len(),
            });
        }
        Ok(Self { dims, pixels })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn width(&self) -> u32 {
        self.dims.width
    }

    pub fn height(&self) -> u32 {
        self.dims.height
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access to all pixels. The length cannot change through this.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Take the pixel vector out of the raster.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set pixel `(x, y)`. Returns `false` (and writes nothing) when out of bounds.
    pub fn set(&mut self, x: u32, y: u32, value: u8) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = value;
                true
            }
            None => false,
        }
    }

    /// Row `y`, or `None` when out of bounds.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.dims.height {
            return None;
        }
        let w = self.dims.width as usize;
        let start = y as usize * w;
        self.pixels.get(start..start + w)
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact panics on 0; a zero-width raster has no pixels anyway
        self.pixels.chunks_exact(self.row_len())
    }

    pub(crate) fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        let w = self.row_len();
        self.pixels.chunks_exact_mut(w)
    }

    pub(crate) fn row_len(&self) -> usize {
        (self.dims.width as usize).max(1)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.dims.width || y >= self.dims.height {
            return None;
        }
        Some(y as usize * self.dims.width as usize + x as usize)
    }
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("dims", &self.dims)
            .field("len", &self.pixels.len())
            .finish()
    }
}
