use crate::{error::Result, grid::Grid, ops, point::Point, spacecurve::SpaceCurve};

/// Z-order (Morton) curve over a power-of-two grid.
#[derive(Debug)]
pub struct ZOrder {
    /// Validated grid shape.
    grid: Grid,
}

impl ZOrder {
    /// Construct a Z-order curve; `size` must be a power of two.
    pub fn from_dimensions(dimension: u32, size: u32) -> Result<Self> {
        Ok(Self {
            grid: Grid::power_of_two(dimension, size)?,
        })
    }
}

impl SpaceCurve for ZOrder {
    fn name(&self) -> &'static str {
        "Z-order"
    }

    fn length(&self) -> u32 {
        self.grid.length()
    }

    fn dimensions(&self) -> u32 {
        self.grid.dimension()
    }

    fn size(&self) -> u32 {
        self.grid.size()
    }

    fn point(&self, index: u32) -> Point {
        debug_assert!(index < self.length(), "index out of bounds");
        Point(ops::deinterleave(
            self.dimensions(),
            self.grid.order(),
            index,
        ))
    }

    fn index(&self, p: &Point) -> u32 {
        ops::interleave(self.grid.order(), p)
    }
}
