//! Validated grid shapes.

use crate::{
    error::{Error, Result},
    ops,
};

/// A `size^dimension` grid whose point count fits a `u32` curve index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    /// Number of axes.
    dimension: u32,
    /// Side length along every axis.
    size: u32,
    /// Total number of cells.
    length: u32,
}

impl Grid {
    /// Validate an arbitrary grid shape.
    pub fn new(dimension: u32, size: u32) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::Shape("dimension must be >= 1".into()));
        }
        if size == 0 {
            return Err(Error::Size("size must be >= 1".into()));
        }
        let length = size.checked_pow(dimension).ok_or_else(|| {
            Error::Size(format!(
                "{size}^{dimension} points exceed the u32 index space"
            ))
        })?;
        Ok(Self {
            dimension,
            size,
            length,
        })
    }

    /// Validate a grid whose side must be a power of two.
    pub fn power_of_two(dimension: u32, size: u32) -> Result<Self> {
        if !size.is_power_of_two() {
            return Err(Error::Size(format!("size {size} is not a power of two")));
        }
        Self::new(dimension, size)
    }

    /// Number of axes.
    pub fn dimension(&self) -> u32 {
        self.dimension
    }

    /// Side length along every axis.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Total number of cells.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Bits per coordinate (`log2(size)`); only meaningful for power-of-two grids.
    pub fn order(&self) -> u32 {
        self.size.trailing_zeros()
    }
}

/// Recover the side length of a `dimension`-D grid holding `length` points.
pub fn side_for_length(dimension: u32, length: u64) -> Result<u32> {
    if length == 0 {
        return Err(Error::Size("point count must be >= 1".into()));
    }
    let side = ops::exact_root(length, dimension).ok_or_else(|| {
        Error::Size(format!(
            "{length} points do not form a {dimension}-dimensional grid"
        ))
    })?;
    u32::try_from(side).map_err(|_| Error::Size(format!("side {side} is too large")))
}
