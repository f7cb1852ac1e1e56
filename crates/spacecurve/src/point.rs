//! Lightweight N‑dimensional point type returned by curves.

use std::ops::Deref;

use smallvec::SmallVec;

/// Backing storage for point coordinates; curves here are 2D or 3D in practice.
pub type Coords = SmallVec<[u32; 4]>;

/// A grid coordinate with one entry per dimension.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point(pub Coords);

impl Point {
    /// Euclidean distance between two points of the same dimensionality.
    pub fn distance(&self, other: &Self) -> f64 {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Point::distance called with differing dimensions"
        );
        let total: u64 = self
            .0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| {
                let d = u64::from(a.abs_diff(*b));
                d * d
            })
            .sum();
        (total as f64).sqrt()
    }

    /// Return the point's coordinates as a slice.
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Dimensionality of the point.
    pub fn dimension(&self) -> u32 {
        self.0.len() as u32
    }
}

impl From<Vec<u32>> for Point {
    fn from(coords: Vec<u32>) -> Self {
        Self(coords.into())
    }
}

impl<const N: usize> From<[u32; N]> for Point {
    fn from(coords: [u32; N]) -> Self {
        Self(coords.iter().copied().collect())
    }
}

impl Deref for Point {
    type Target = [u32];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
