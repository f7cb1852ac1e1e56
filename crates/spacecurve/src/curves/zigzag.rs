use smallvec::smallvec;

use crate::{
    error::Result,
    grid::Grid,
    point::{Coords, Point},
    spacecurve::SpaceCurve,
};

/// Boustrophedon scan: like [`Natural`](super::natural::Natural), but every
/// other row runs backwards so the traversal never jumps.
#[derive(Debug)]
pub struct Zigzag {
    /// Validated grid shape.
    grid: Grid,
}

impl Zigzag {
    /// Construct a zigzag scan over a `size^dimension` grid of any size.
    pub fn from_dimensions(dimension: u32, size: u32) -> Result<Self> {
        Ok(Self {
            grid: Grid::new(dimension, size)?,
        })
    }
}

impl SpaceCurve for Zigzag {
    fn name(&self) -> &'static str {
        "Zigzag"
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
        let mut digits: Coords = smallvec![0; self.dimensions() as usize];
        let mut rest = index;
        for d in digits.iter_mut() {
            *d = rest % size;
            rest /= size;
        }

        // An axis runs backwards whenever the coordinates above it sum to an
        // odd number.
        let mut coords = digits;
        let mut parity = 0;
        for c in coords.iter_mut().rev() {
            if parity % 2 == 1 {
                *c = size - 1 - *c;
            }
            parity += *c;
        }
        Point(coords)
    }

    fn index(&self, p: &Point) -> u32 {
        let size = self.size();
        let mut index = 0;
        let mut parity = 0;
        for &c in p.iter().rev() {
            let digit = if parity % 2 == 1 { size - 1 - c } else { c };
            index = index * size + digit;
            parity += c;
        }
        index
    }
}
