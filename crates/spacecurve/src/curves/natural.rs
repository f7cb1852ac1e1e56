use smallvec::smallvec;

use crate::{
    error::Result,
    grid::Grid,
    point::{Coords, Point},
    spacecurve::SpaceCurve,
};

/// Row-major scan: the first axis varies fastest.
#[derive(Debug)]
pub struct Natural {
    /// Validated grid shape.
    grid: Grid,
}

impl Natural {
    /// Construct a natural-order scan over a `size^dimension` grid of any size.
    pub fn from_dimensions(dimension: u32, size: u32) -> Result<Self> {
        Ok(Self {
            grid: Grid::new(dimension, size)?,
        })
    }
}

impl SpaceCurve for Natural {
    fn name(&self) -> &'static str {
        "Natural"
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
        let size = self.size();
        let mut rest = index;
        let mut coords: Coords = smallvec![0; self.dimensions() as usize];
        for c in coords.iter_mut() {
            *c = rest % size;
            rest /= size;
        }
        Point(coords)
    }

    fn index(&self, p: &Point) -> u32 {
        let size = self.size();
        p.iter().rev().fold(0, |acc, &c| acc * size + c)
    }
}
