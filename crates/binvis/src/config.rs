//! Render settings and output path derivation.

use std::path::{Path, PathBuf};

use spacecurve::registry;

use crate::{
    block::BlockOverride,
    color::ColorMode,
    draw::{self, Layout},
    error::{Error, Result},
};

/// Default curve used to lay out the image.
pub const DEFAULT_CURVE: &str = "hilbert";
/// Default side length of one square, in pixels.
pub const DEFAULT_SIZE: u32 = 256;

/// Everything needed to render one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Colour policy.
    pub color: ColorMode,
    /// Curve name, one of [`registry::CURVE_NAMES`].
    pub curve: String,
    /// Side length of one square, in pixels.
    pub size: u32,
    /// Canvas arrangement.
    pub layout: Layout,
    /// Optional highlighted range.
    pub block: Option<BlockOverride>,
    /// Show a progress bar on stderr.
    pub progress: bool,
    /// Replace the output file if it already exists.
    pub replace_output: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            curve: DEFAULT_CURVE.to_string(),
            size: DEFAULT_SIZE,
            layout: Layout::default(),
            block: None,
            progress: false,
            replace_output: true,
        }
    }
}

impl RenderConfig {
    /// Check the options that do not depend on the input.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::config("size must be >= 1"));
        }
        let entry = registry::entry(&self.curve)?;
        registry::validate(&self.curve, 2, self.size).map_err(|e| {
            Error::config(format!(
                "curve '{}' cannot be drawn at size {} ({}): {e}",
                self.curve, self.size, entry.constraints
            ))
        })?;
        draw::canvas_dimensions(self.size, self.layout).map(|_| ())
    }
}

/// Output path derived from `input`: its file stem plus `suffix` and `.png`,
/// in the working directory.
pub fn default_output(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "binvis".to_string());
    PathBuf::from(format!("{stem}{suffix}.png"))
}

/// Error for a derived output path that is already taken.
pub(crate) fn refuse_overwrite(path: &Path) -> Error {
    Error::config(format!(
        "refusing to overwrite '{}'; specify the output path explicitly to replace it",
        path.display()
    ))
}

/// Pick the output path: `explicit` when given, otherwise [`default_output`].
///
/// A derived path never overwrites an existing file; name the output
/// explicitly to replace it. The check here fails early, and
/// [`draw::save`] enforces it again when the image is written if
/// [`RenderConfig::replace_output`] is unset.
pub fn resolve_output(input: &Path, explicit: Option<&Path>, suffix: &str) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let derived = default_output(input, suffix);
    if derived.exists() {
        return Err(refuse_overwrite(&derived));
    }
    Ok(derived)
}
