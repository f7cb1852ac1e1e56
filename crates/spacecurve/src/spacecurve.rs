use std::fmt::Debug;

use crate::point::Point;

/// An ordered traversal of every cell in a `size^dimensions` grid.
///
/// Indices run over `0..length()`. Implementations are immutable once built,
/// so a curve can be shared freely for the lifetime of a render.
pub trait SpaceCurve: Debug {
    /// Human-readable curve name.
    fn name(&self) -> &'static str;

    /// Total number of points on the curve.
    fn length(&self) -> u32;

    /// Number of dimensions of the grid.
    fn dimensions(&self) -> u32;

    /// Side length of the grid along every axis.
    fn size(&self) -> u32;

    /// Coordinates of the point at curve-order `index`.
    fn point(&self, index: u32) -> Point;

    /// Curve-order index of point `p`.
    fn index(&self, p: &Point) -> u32;
}
