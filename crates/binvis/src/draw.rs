//! Curve-sampling draw engine.
//!
//! Walks a 2D space-filling curve and paints each visited cell with the
//! colour of the byte sampled for that curve position. Inputs longer than
//! the curve are subsampled, shorter ones are stretched; either way the
//! mapping from curve index to byte offset never runs backwards.

use std::{
    fmt, fs,
    io::{self, BufWriter, Write},
    path::Path,
    str::FromStr,
};

use image::{ImageError, ImageFormat, RgbImage};
use log::{debug, info};
use spacecurve::{SpaceCurve, curve_from_length};
use tempfile::{Builder, NamedTempFile};

use crate::{
    color::ColorSource,
    config::refuse_overwrite,
    error::{Error, Result},
    progress::Progress,
};

/// Number of pixels drawn between progress updates.
const TICK_INTERVAL: u64 = 4096;

/// Number of stacked squares in the unrolled layout.
const UNROLLED_QUADRANTS: u32 = 4;

/// Largest canvas, in pixels, a render will allocate (16384×16384).
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// How the curve is arranged on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    /// One `size×size` square holding the whole file.
    Square,
    /// Four `size×size` squares stacked vertically, each holding a quarter of the file.
    #[default]
    Unrolled,
}

impl Layout {
    /// Every layout, in CLI order.
    pub const ALL: [Self; 2] = [Self::Unrolled, Self::Square];

    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Unrolled => "unrolled",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.name() == s)
            .ok_or_else(|| {
                Error::config(format!(
                    "invalid layout '{s}'. Valid options: unrolled, square"
                ))
            })
    }
}

/// Width and height of the canvas for `size` and `layout`.
///
/// Fails before anything is allocated when the canvas would exceed
/// [`MAX_CANVAS_PIXELS`].
pub fn canvas_dimensions(size: u32, layout: Layout) -> Result<(u32, u32)> {
    let squares = match layout {
        Layout::Square => 1,
        Layout::Unrolled => UNROLLED_QUADRANTS,
    };
    let pixels = u64::from(size) * u64::from(size) * u64::from(squares);
    match size.checked_mul(squares) {
        Some(height) if pixels <= MAX_CANVAS_PIXELS => Ok((size, height)),
        _ => Err(Error::config(format!(
            "a {layout} canvas at size {size} needs {pixels} pixels; \
             the limit is {MAX_CANVAS_PIXELS}"
        ))),
    }
}

/// Byte offset sampled for curve position `index` out of `curve_len`.
///
/// Integer scaling keeps the result strictly below `data_len`.
pub fn sample_offset(index: u64, data_len: usize, curve_len: u64) -> usize {
    debug_assert!(index < curve_len, "curve index out of range");
    (u128::from(index) * data_len as u128 / u128::from(curve_len)) as usize
}

/// Report `done` steps if an update is due.
fn tick(progress: &mut dyn Progress, done: u64, total: u64) {
    if done % TICK_INTERVAL == 0 || done == total {
        progress.tick(done);
    }
}

/// Render `source` through the named curve.
///
/// `size` is the side of one square in cells; the curve holds `size²`
/// points. The square layout produces an image sized to the curve, the
/// unrolled layout one four times as tall.
pub fn render(
    source: &ColorSource<'_>,
    curve_name: &str,
    size: u32,
    layout: Layout,
    progress: &mut dyn Progress,
) -> Result<RgbImage> {
    if size == 0 {
        return Err(Error::config("size must be >= 1"));
    }
    if source.is_empty() {
        return Err(Error::config("input is empty"));
    }
    canvas_dimensions(size, layout)?;

    let points = u64::from(size) * u64::from(size);
    let curve = curve_from_length(curve_name, 2, points)?;
    info!(
        "rendering {} bytes: {} colours, {} curve, {size}×{size}, {layout} layout",
        source.len(),
        source.mode(),
        curve.name()
    );

    let image = match layout {
        Layout::Square => draw_square(source, curve.as_ref(), progress),
        Layout::Unrolled => draw_unrolled(source, curve.as_ref(), progress),
    };
    progress.clear();
    debug!("canvas {}×{}", image.width(), image.height());
    Ok(image)
}

/// Paint the whole file into a single square.
fn draw_square(
    source: &ColorSource<'_>,
    curve: &dyn SpaceCurve,
    progress: &mut dyn Progress,
) -> RgbImage {
    let side = curve.size();
    let total = u64::from(curve.length());
    let mut img = RgbImage::new(side, side);

    progress.set_target(total);
    for i in 0..curve.length() {
        let p = curve.point(i);
        let offset = sample_offset(u64::from(i), source.len(), total);
        img.put_pixel(p[0], p[1], source.color(offset));
        tick(progress, u64::from(i) + 1, total);
    }
    img
}

/// Paint the file into four stacked copies of the curve, a quarter each.
fn draw_unrolled(
    source: &ColorSource<'_>,
    curve: &dyn SpaceCurve,
    progress: &mut dyn Progress,
) -> RgbImage {
    let side = curve.size();
    let length = u64::from(curve.length());
    let total = length * u64::from(UNROLLED_QUADRANTS);
    let mut img = RgbImage::new(side, side * UNROLLED_QUADRANTS);

    progress.set_target(total);
    for quadrant in 0..UNROLLED_QUADRANTS {
        let y_base = side * quadrant;
        let index_base = u64::from(quadrant) * length;
        for i in 0..curve.length() {
            let p = curve.point(i);
            let g = index_base + u64::from(i);
            let offset = sample_offset(g, source.len(), total);
            img.put_pixel(p[0], p[1] + y_base, source.color(offset));
            tick(progress, g + 1, total);
        }
    }
    img
}

/// Unwrap the I/O failure inside an encoder error, if there is one.
fn into_io_error(err: ImageError) -> io::Error {
    match err {
        ImageError::IoError(e) => e,
        other => io::Error::other(other),
    }
}

/// Temporary file in `dir`, created with the mode a plain `File::create`
/// would get (`0o666` less the umask).
fn temp_in(dir: &Path) -> io::Result<NamedTempFile> {
    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// Encode `image` as PNG at `path`.
///
/// The image is written to a temporary file beside `path` and renamed into
/// place once complete, so a failed save never leaves a truncated PNG. A
/// replaced file keeps its permissions. With `replace` unset an existing
/// `path` is left alone and the save fails with a configuration error.
pub fn save(image: &RgbImage, path: &Path, replace: bool) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = temp_in(dir).map_err(|e| Error::io(path, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        image
            .write_to(&mut writer, ImageFormat::Png)
            .map_err(|e| Error::io(path, into_io_error(e)))?;
        writer.flush().map_err(|e| Error::io(path, e))?;
    }

    if replace {
        if let Ok(meta) = fs::metadata(path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| Error::io(path, e))?;
        }
        tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    } else {
        tmp.persist_noclobber(path).map_err(|e| match e.error.kind() {
            io::ErrorKind::AlreadyExists => refuse_overwrite(path),
            _ => Error::io(path, e.error),
        })?;
    }
    debug!("wrote {}", path.display());
    Ok(())
}
