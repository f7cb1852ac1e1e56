//! Space‑filling curve point sequences.
//!
//! Exposes the [`SpaceCurve`] trait and the curves used by `binvis` to lay
//! byte offsets out over an image plane (2D) or a colour cube (3D).
//!
//! # Supported Curves
//!
//! - Hilbert
//! - Natural (row‑major scan)
//! - Zigzag (boustrophedon scan)
//! - Z-order (Morton)

/// Implementations of specific space‑filling curves.
pub mod curves;
/// Error types used across the crate.
pub mod error;
/// Grid validation shared by all curves.
pub mod grid;
/// Internal bit operations shared by curve implementations.
#[doc(hidden)]
pub mod ops;
/// N‑dimensional points and helpers.
pub mod point;
/// Central registry of curve metadata and constructors.
pub mod registry;
/// The `SpaceCurve` trait.
mod spacecurve;

pub use crate::spacecurve::SpaceCurve;

/// Construct a curve by name with the requested dimensionality and side length.
///
/// Returns an error if the combination is invalid or the name is unknown.
pub fn curve_from_name(
    name: &str,
    dimension: u32,
    size: u32,
) -> error::Result<Box<dyn SpaceCurve + 'static>> {
    registry::construct(name, dimension, size)
}

/// Construct a curve by name from the total number of points it must contain.
///
/// `length` must be an exact `dimension`-th power, e.g. `size²` for a 2D curve.
pub fn curve_from_length(
    name: &str,
    dimension: u32,
    length: u64,
) -> error::Result<Box<dyn SpaceCurve + 'static>> {
    let size = grid::side_for_length(dimension, length)?;
    registry::construct(name, dimension, size)
}
