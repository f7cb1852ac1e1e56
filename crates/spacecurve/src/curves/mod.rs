/// Hilbert curve of arbitrary dimension.
pub mod hilbert;
/// Row-major scan.
pub mod natural;
/// Boustrophedon scan.
pub mod zigzag;
/// Z-order (Morton) curve.
pub mod zorder;
