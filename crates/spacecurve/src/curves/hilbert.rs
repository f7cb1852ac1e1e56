use smallvec::smallvec;

use crate::{
    error::{Error, Result},
    grid::Grid,
    point::{Coords, Point},
    spacecurve::SpaceCurve,
};

// Hilbert mapping after J. Skilling, "Programming the Hilbert curve" (2004).
// The index is handled in its "transposed" form: the bits of the index are
// dealt round-robin across the axes, most significant first, and a pair of
// in-place transforms converts between that form and plain coordinates.

/// Spread the bits of `index` across `dimension` words, most significant first.
fn transpose_index(dimension: u32, order: u32, index: u32) -> Coords {
    let mut x: Coords = smallvec![0; dimension as usize];
    let width = order * dimension;
    for pos in 0..width {
        if (index >> (width - 1 - pos)) & 1 == 1 {
            let level = order - 1 - pos / dimension;
            x[(pos % dimension) as usize] |= 1 << level;
        }
    }
    x
}

/// Inverse of [`transpose_index`].
fn untranspose_index(order: u32, x: &[u32]) -> u32 {
    let mut index = 0;
    for level in (0..order).rev() {
        for word in x {
            index = (index << 1) | ((word >> level) & 1);
        }
    }
    index
}

/// Convert a transposed index into axis coordinates, in place.
fn transpose_to_axes(x: &mut [u32], order: u32) {
    let n = x.len();
    if order == 0 || n == 0 {
        return;
    }
    // Gray decode.
    let t = x[n - 1] >> 1;
    for i in (1..n).rev() {
        x[i] ^= x[i - 1];
    }
    x[0] ^= t;

    // Undo the rotations and reflections applied on the way in.
    let top = 1u32 << order;
    let mut q = 2;
    while q != top {
        let p = q - 1;
        for i in (0..n).rev() {
            if x[i] & q != 0 {
                x[0] ^= p;
            } else {
                let t = (x[0] ^ x[i]) & p;
                x[0] ^= t;
                x[i] ^= t;
            }
        }
        q <<= 1;
    }
}

/// Convert axis coordinates into a transposed index, in place.
fn axes_to_transpose(x: &mut [u32], order: u32) {
    let n = x.len();
    if order == 0 || n == 0 {
        return;
    }
    let top = 1u32 << (order - 1);

    let mut q = top;
    while q > 1 {
        let p = q - 1;
        for i in 0..n {
            if x[i] & q != 0 {
                x[0] ^= p;
            } else {
                let t = (x[0] ^ x[i]) & p;
                x[0] ^= t;
                x[i] ^= t;
            }
        }
        q >>= 1;
    }

    // Gray encode.
    for i in 1..n {
        x[i] ^= x[i - 1];
    }
    let mut t = 0;
    let mut q = top;
    while q > 1 {
        if x[n - 1] & q != 0 {
            t ^= q - 1;
        }
        q >>= 1;
    }
    for word in x.iter_mut() {
        *word ^= t;
    }
}

/// An N-dimensional Hilbert curve over a power-of-two grid.
#[derive(Debug)]
pub struct Hilbert {
    /// Validated grid shape.
    grid: Grid,
}

impl Hilbert {
    /// Construct a Hilbert curve filling a `size^dimension` hypercube.
    ///
    /// `dimension` must be at least 2 and `size` a power of two.
    pub fn from_dimensions(dimension: u32, size: u32) -> Result<Self> {
        if dimension < 2 {
            return Err(Error::Shape("hilbert requires dimension >= 2".into()));
        }
        Ok(Self {
            grid: Grid::power_of_two(dimension, size)?,
        })
    }

    /// Bits per coordinate.
    pub fn order(&self) -> u32 {
        self.grid.order()
    }
}

impl SpaceCurve for Hilbert {
    fn name(&self) -> &'static str {
        "Hilbert"
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
        let mut x = transpose_index(self.dimensions(), self.order(), index);
        transpose_to_axes(&mut x, self.order());
        Point(x)
    }

    fn index(&self, p: &Point) -> u32 {
        debug_assert_eq!(p.dimension(), self.dimensions(), "point dimension mismatch");
        let mut x: Coords = p.0.clone();
        axes_to_transpose(&mut x, self.order());
        untranspose_index(self.order(), &x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_dimensions() -> Result<()> {
        let h = Hilbert::from_dimensions(2, 2)?;
        assert_eq!(h.order(), 1);
        assert_eq!(h.length(), 4);

        let h = Hilbert::from_dimensions(3, 256)?;
        assert_eq!(h.order(), 8);
        assert_eq!(h.length(), 1 << 24);

        assert!(Hilbert::from_dimensions(2, 3).is_err());
        assert!(Hilbert::from_dimensions(1, 4).is_err());
        assert!(Hilbert::from_dimensions(2, 1 << 16).is_err());
        Ok(())
    }

    #[test]
    fn first_cells() -> Result<()> {
        let h = Hilbert::from_dimensions(2, 2)?;
        let cells: Vec<Vec<u32>> = (0..4).map(|i| h.point(i).to_vec()).collect();
        assert_eq!(cells, vec![vec![0, 0], vec![0, 1], vec![1, 1], vec![1, 0]]);
        Ok(())
    }

    #[test]
    fn transpose_round_trip() {
        for index in 0..512 {
            let x = transpose_index(3, 3, index);
            assert_eq!(untranspose_index(3, &x), index);
        }
    }

    #[test]
    fn symmetry() -> Result<()> {
        for (dimension, size) in [(2, 8), (2, 16), (3, 8), (4, 4)] {
            let h = Hilbert::from_dimensions(dimension, size)?;
            for i in 0..h.length() {
                assert_eq!(h.index(&h.point(i)), i);
            }
        }
        Ok(())
    }

    #[test]
    fn unit_grid() -> Result<()> {
        let h = Hilbert::from_dimensions(2, 1)?;
        assert_eq!(h.length(), 1);
        assert_eq!(h.point(0).as_slice(), &[0, 0]);
        assert_eq!(h.index(&Point::from([0, 0])), 0);
        Ok(())
    }
}
