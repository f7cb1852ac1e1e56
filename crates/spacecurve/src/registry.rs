//! Curve metadata and name-based construction.

use crate::{
    SpaceCurve,
    curves::{hilbert::Hilbert, natural::Natural, zigzag::Zigzag, zorder::ZOrder},
    error::{Error, Result},
};

/// Constructor signature shared by every registered curve.
type Constructor = fn(u32, u32) -> Result<Box<dyn SpaceCurve + 'static>>;

/// Box a freshly built curve.
fn build_hilbert(dimension: u32, size: u32) -> Result<Box<dyn SpaceCurve + 'static>> {
    Ok(Box::new(Hilbert::from_dimensions(dimension, size)?))
}

/// Box a freshly built curve.
fn build_natural(dimension: u32, size: u32) -> Result<Box<dyn SpaceCurve + 'static>> {
    Ok(Box::new(Natural::from_dimensions(dimension, size)?))
}

/// Box a freshly built curve.
fn build_zigzag(dimension: u32, size: u32) -> Result<Box<dyn SpaceCurve + 'static>> {
    Ok(Box::new(Zigzag::from_dimensions(dimension, size)?))
}

/// Box a freshly built curve.
fn build_zorder(dimension: u32, size: u32) -> Result<Box<dyn SpaceCurve + 'static>> {
    Ok(Box::new(ZOrder::from_dimensions(dimension, size)?))
}

/// Registry entry describing one curve.
#[derive(Clone, Copy)]
pub struct CurveEntry {
    /// Lookup key used on the command line.
    pub key: &'static str,
    /// Human-readable shape constraints.
    pub constraints: &'static str,
    /// Builds the curve for `(dimension, size)`.
    construct: Constructor,
}

/// Every curve known to the crate, in display order.
pub const REGISTRY: &[CurveEntry] = &[
    CurveEntry {
        key: "hilbert",
        constraints: "dimension >= 2; size a power of two",
        construct: build_hilbert,
    },
    CurveEntry {
        key: "natural",
        constraints: "any dimension and size",
        construct: build_natural,
    },
    CurveEntry {
        key: "zigzag",
        constraints: "any dimension and size",
        construct: build_zigzag,
    },
    CurveEntry {
        key: "zorder",
        constraints: "size a power of two",
        construct: build_zorder,
    },
];

/// Registered curve keys.
pub const CURVE_NAMES: &[&str] = &["hilbert", "natural", "zigzag", "zorder"];

/// Look up a registry entry by key.
pub fn entry(name: &str) -> Result<&'static CurveEntry> {
    REGISTRY
        .iter()
        .find(|e| e.key == name)
        .ok_or_else(|| Error::UnknownCurve(name.to_string()))
}

/// Build a curve by name.
pub fn construct(name: &str, dimension: u32, size: u32) -> Result<Box<dyn SpaceCurve + 'static>> {
    (entry(name)?.construct)(dimension, size)
}

/// Check that `name` can be built for `(dimension, size)` without keeping it.
pub fn validate(name: &str, dimension: u32, size: u32) -> Result<()> {
    construct(name, dimension, size).map(|_| ())
}
