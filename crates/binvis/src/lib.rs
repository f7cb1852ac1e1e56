//! Visualise binary files through space‑filling curves.
//!
//! Each byte offset of the input is assigned a cell along a 2D curve and
//! coloured by one of several byte interpretations, so that ASCII runs,
//! padding, and high-entropy regions stand out at a glance.
//!
//! The pieces, from the bottom up:
//!
//! - [`block`]: an optional offset range painted in a fixed colour.
//! - [`color`]: the colour policies and the [`ColorSource`] that applies them.
//! - [`draw`]: the curve-sampling draw engine and PNG output.
//! - [`cmd`]: whole-file rendering used by the `binvis` binary.

/// Highlighted address ranges.
pub mod block;
/// File-level rendering.
pub mod cmd;
/// Byte colouring policies.
pub mod color;
/// Render settings.
pub mod config;
/// Curve-sampling draw engine.
pub mod draw;
/// Local entropy measurement.
pub mod entropy;
/// Error types.
pub mod error;
/// Progress reporting.
pub mod progress;

pub use crate::{
    block::BlockOverride,
    color::{ColorMode, ColorSource},
    config::RenderConfig,
    draw::Layout,
    error::{Error, Result},
};
