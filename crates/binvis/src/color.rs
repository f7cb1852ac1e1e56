//! Byte colouring policies.
//!
//! A [`ColorSource`] answers "what colour is the byte at this offset?" for a
//! whole input buffer. The answer comes from a block override when one covers
//! the offset, and otherwise from the [`ColorPolicy`] selected by
//! [`ColorMode`].

use std::{fmt, str::FromStr};

use image::Rgb;
use log::debug;
use spacecurve::{SpaceCurve, curve_from_length};

use crate::{
    block::BlockOverride,
    entropy,
    error::{Error, Result},
};

/// Black colour for 0x00.
pub const COLOR_BLACK: Rgb<u8> = Rgb([0, 0, 0]);
/// White colour for 0xFF.
pub const COLOR_WHITE: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
/// Green colour for control characters (low ASCII).
pub const COLOR_GREEN: Rgb<u8> = Rgb([0x4d, 0xaf, 0x4a]);
/// Blue colour for printable ASCII.
pub const COLOR_BLUE: Rgb<u8> = Rgb([0x10, 0x72, 0xb8]);
/// Red colour for DEL and high bytes.
pub const COLOR_RED: Rgb<u8> = Rgb([0xe4, 0x1a, 0x1c]);

/// Side of the RGB cube walked by the Hilbert policy.
const CUBE_SIDE: u64 = 256;

/// Maps a byte offset to a colour.
pub trait ColorPolicy {
    /// Colour of the byte at `offset`.
    fn color(&self, offset: usize) -> Rgb<u8>;
}

/// Selects one of the built-in colour policies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Five fixed colours by byte class.
    #[default]
    Class,
    /// Distinct byte values spread along a 3D Hilbert walk of the RGB cube.
    Hilbert,
    /// Local entropy.
    Entropy,
    /// Greyscale by byte value.
    Gradient,
}

impl ColorMode {
    /// Every mode, in CLI order.
    pub const ALL: [Self; 4] = [Self::Class, Self::Hilbert, Self::Entropy, Self::Gradient];

    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Hilbert => "hilbert",
            Self::Entropy => "entropy",
            Self::Gradient => "gradient",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| {
                Error::config(format!(
                    "invalid color policy '{s}'. Valid options: class, hilbert, entropy, gradient"
                ))
            })
    }
}

/// Dense ranks for the byte values present in a buffer.
///
/// Ranks are assigned by ascending byte value, so they run over `0..len()`
/// without gaps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolMap {
    /// Rank of each byte value, `None` when the value never occurs.
    ranks: [Option<u8>; 256],
    /// Number of distinct values.
    count: usize,
}

impl SymbolMap {
    /// Build the map for `data`.
    pub fn new(data: &[u8]) -> Self {
        let mut present = [false; 256];
        for &b in data {
            present[usize::from(b)] = true;
        }
        let mut ranks = [None; 256];
        let mut count = 0;
        for (value, _) in present.iter().enumerate().filter(|(_, p)| **p) {
            // At most 256 values are present, so ranks fit a u8.
            ranks[value] = Some(count as u8);
            count += 1;
        }
        Self { ranks, count }
    }

    /// Rank of `byte`, if it occurs in the buffer.
    pub fn rank(&self, byte: u8) -> Option<u8> {
        self.ranks[usize::from(byte)]
    }

    /// Number of distinct byte values.
    pub fn len(&self) -> usize {
        self.count
    }

    /// True when the buffer was empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Greyscale ramp: 0x00 is black and 0xff is white.
struct Gradient<'a> {
    /// Input bytes.
    data: &'a [u8],
}

impl ColorPolicy for Gradient<'_> {
    fn color(&self, offset: usize) -> Rgb<u8> {
        // round(255 * (b / 255)) is b itself.
        let v = self.data[offset];
        Rgb([v, v, v])
    }
}

/// Colour for a byte's class.
pub fn class_color(byte: u8) -> Rgb<u8> {
    match byte {
        0x00 => COLOR_BLACK,
        0x01..=0x1f => COLOR_GREEN,
        0x20..=0x7e => COLOR_BLUE,
        0x7f..=0xfe => COLOR_RED,
        0xff => COLOR_WHITE,
    }
}

/// Five fixed colours by byte class.
struct Class<'a> {
    /// Input bytes.
    data: &'a [u8],
}

impl ColorPolicy for Class<'_> {
    fn color(&self, offset: usize) -> Rgb<u8> {
        class_color(self.data[offset])
    }
}

/// Distinct byte values placed evenly along a Hilbert walk of the RGB cube,
/// so values with neighbouring ranks get similar colours.
struct Hilbert<'a> {
    /// Input bytes.
    data: &'a [u8],
    /// Colour for each byte value, resolved once at construction.
    palette: [Rgb<u8>; 256],
}

impl<'a> Hilbert<'a> {
    /// Rank the symbols in `data` and resolve their colours.
    fn new(data: &'a [u8], symbols: &SymbolMap) -> Result<Self> {
        let cube = curve_from_length("hilbert", 3, CUBE_SIDE.pow(3))?;
        let step = hilbert_step(cube.as_ref(), symbols);
        debug!(
            "hilbert palette: {} symbols, step {step:.1} over {} cube points",
            symbols.len(),
            cube.length()
        );

        let mut palette = [COLOR_BLACK; 256];
        for byte in 0..=255u8 {
            if let Some(rank) = symbols.rank(byte) {
                palette[usize::from(byte)] = cube_color(cube.as_ref(), rank, step);
            }
        }
        Ok(Self { data, palette })
    }
}

/// Distance along the colour cube between consecutive symbol ranks.
fn hilbert_step(cube: &dyn SpaceCurve, symbols: &SymbolMap) -> f64 {
    f64::from(cube.length()) / symbols.len().max(1) as f64
}

/// Colour at `round(rank * step)` on the cube, read as `(R, G, B)`.
fn cube_color(cube: &dyn SpaceCurve, rank: u8, step: f64) -> Rgb<u8> {
    let index = ((f64::from(rank) * step).round() as u32).min(cube.length() - 1);
    let p = cube.point(index);
    Rgb([p[0] as u8, p[1] as u8, p[2] as u8])
}

impl ColorPolicy for Hilbert<'_> {
    fn color(&self, offset: usize) -> Rgb<u8> {
        self.palette[usize::from(self.data[offset])]
    }
}

/// Quartic bump used for the red channel of the entropy policy.
fn entropy_curve(v: f64) -> f64 {
    (4.0 * v - 4.0 * v * v).powi(4).max(0.0)
}

/// Colour for a local entropy score `e` in `[0, 1]`.
///
/// Blue rises with `e²`; red only appears above 0.5 and climbs steeply to
/// full intensity at 1.0. Green is always zero.
pub fn entropy_color(e: f64) -> Rgb<u8> {
    let red = if e > 0.5 { entropy_curve(e - 0.5) } else { 0.0 };
    let blue = e * e;
    Rgb([
        (255.0 * red).round() as u8,
        0,
        (255.0 * blue).round() as u8,
    ])
}

/// Local entropy of a window around each offset.
struct Entropy<'a> {
    /// Input bytes.
    data: &'a [u8],
    /// Number of distinct symbols in the whole buffer.
    symbols: usize,
}

impl ColorPolicy for Entropy<'_> {
    fn color(&self, offset: usize) -> Rgb<u8> {
        entropy_color(entropy::entropy(
            self.data,
            entropy::WINDOW,
            offset,
            self.symbols,
        ))
    }
}

/// Colours every offset of a byte buffer.
pub struct ColorSource<'a> {
    /// Input bytes.
    data: &'a [u8],
    /// Policy in use.
    mode: ColorMode,
    /// Optional range painted with a fixed colour.
    block: Option<BlockOverride>,
    /// Colour policy consulted outside the block.
    policy: Box<dyn ColorPolicy + 'a>,
}

impl<'a> ColorSource<'a> {
    /// Build the colour source for `data` using `mode`.
    ///
    /// Fails when `data` is empty or `block` reaches past its end.
    pub fn new(mode: ColorMode, data: &'a [u8], block: Option<BlockOverride>) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::config("input is empty"));
        }
        if let Some(block) = &block {
            block.check_bounds(data.len())?;
        }

        let policy: Box<dyn ColorPolicy + 'a> = match mode {
            ColorMode::Class => Box::new(Class { data }),
            ColorMode::Gradient => Box::new(Gradient { data }),
            ColorMode::Hilbert => Box::new(Hilbert::new(data, &SymbolMap::new(data))?),
            ColorMode::Entropy => Box::new(Entropy {
                data,
                symbols: SymbolMap::new(data).len(),
            }),
        };

        Ok(Self {
            data,
            mode,
            block,
            policy,
        })
    }

    /// Colour for `offset`, which must be less than [`len`](Self::len).
    pub fn color(&self, offset: usize) -> Rgb<u8> {
        match &self.block {
            Some(block) if block.contains(offset) => block.color,
            _ => self.policy.color(offset),
        }
    }

    /// Number of bytes being coloured.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The policy in use.
    pub fn mode(&self) -> ColorMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use spacecurve::curve_from_name;

    use super::*;

    fn all_bytes() -> Vec<u8> {
        (0..=255).collect()
    }

    #[test]
    fn class_bins() {
        assert_eq!(class_color(0x00), COLOR_BLACK);
        assert_eq!(class_color(0x01), COLOR_GREEN);
        assert_eq!(class_color(0x1f), COLOR_GREEN);
        assert_eq!(class_color(0x20), COLOR_BLUE);
        assert_eq!(class_color(0x7e), COLOR_BLUE);
        assert_eq!(class_color(0x7f), COLOR_RED);
        assert_eq!(class_color(0xfe), COLOR_RED);
        assert_eq!(class_color(0xff), COLOR_WHITE);

        let palette = [COLOR_BLACK, COLOR_GREEN, COLOR_BLUE, COLOR_RED, COLOR_WHITE];
        let mut counts = [0; 5];
        for b in 0..=255u8 {
            let idx = palette.iter().position(|c| *c == class_color(b)).unwrap();
            counts[idx] += 1;
        }
        assert_eq!(counts, [1, 31, 95, 128, 1]);
    }

    #[test]
    fn gradient_endpoints() -> Result<()> {
        let data = all_bytes();
        let src = ColorSource::new(ColorMode::Gradient, &data, None)?;
        assert_eq!(src.color(0), Rgb([0, 0, 0]));
        assert_eq!(src.color(255), Rgb([255, 255, 255]));
        for i in 1..256 {
            assert!(src.color(i)[0] >= src.color(i - 1)[0]);
        }
        Ok(())
    }

    #[test]
    fn symbol_map_is_dense() {
        let map = SymbolMap::new(&[9, 3, 3, 200, 9]);
        assert_eq!(map.len(), 3);
        assert_eq!(map.rank(3), Some(0));
        assert_eq!(map.rank(9), Some(1));
        assert_eq!(map.rank(200), Some(2));
        assert_eq!(map.rank(4), None);
        assert!(SymbolMap::new(&[]).is_empty());
    }

    #[test]
    fn hilbert_neighbouring_ranks_are_close() -> Result<()> {
        let data: Vec<u8> = vec![1, 5, 9, 17, 100, 101, 250];
        let src = ColorSource::new(ColorMode::Hilbert, &data, None)?;
        let cube = curve_from_name("hilbert", 3, 256)?;
        let step = f64::from(cube.length()) / data.len() as f64;

        let index_of = |rgb: Rgb<u8>| {
            i64::from(cube.index(&spacecurve::point::Point::from([
                u32::from(rgb[0]),
                u32::from(rgb[1]),
                u32::from(rgb[2]),
            ])))
        };
        assert_eq!(index_of(src.color(0)), 0);
        for i in 1..data.len() {
            let gap = index_of(src.color(i)) - index_of(src.color(i - 1));
            assert!(gap > 0 && gap as f64 <= step.ceil(), "gap {gap} step {step}");
        }
        Ok(())
    }

    #[test]
    fn hilbert_single_symbol() -> Result<()> {
        let data = [0x42u8; 10];
        let src = ColorSource::new(ColorMode::Hilbert, &data, None)?;
        assert_eq!(src.color(3), Rgb([0, 0, 0]));
        Ok(())
    }

    #[test]
    fn entropy_extremes() {
        assert_eq!(entropy_color(0.0), Rgb([0, 0, 0]));
        assert_eq!(entropy_color(0.5), Rgb([0, 0, 64]));
        assert_eq!(entropy_color(1.0), Rgb([255, 0, 255]));
    }

    #[test]
    fn entropy_policy_on_flat_and_random_data() -> Result<()> {
        let flat = [0u8; 64];
        let src = ColorSource::new(ColorMode::Entropy, &flat, None)?;
        assert_eq!(src.color(20), Rgb([0, 0, 0]));

        let varied = all_bytes();
        let src = ColorSource::new(ColorMode::Entropy, &varied, None)?;
        assert_eq!(src.color(100), Rgb([255, 0, 255]));
        Ok(())
    }

    #[test]
    fn block_takes_precedence() -> Result<()> {
        let data = all_bytes();
        let block = BlockOverride::new(0x10, 0x20, Rgb([1, 2, 3]))?;
        for mode in ColorMode::ALL {
            let src = ColorSource::new(mode, &data, Some(block.clone()))?;
            assert_eq!(src.color(0x0f), {
                let plain = ColorSource::new(mode, &data, None)?;
                plain.color(0x0f)
            });
            for offset in 0x10..0x20 {
                assert_eq!(src.color(offset), Rgb([1, 2, 3]), "{mode} at {offset}");
            }
            assert_ne!(src.color(0x20), Rgb([1, 2, 3]), "{mode}");
        }
        Ok(())
    }

    #[test]
    fn construction_errors() -> Result<()> {
        let err = ColorSource::new(ColorMode::Class, &[], None).err().unwrap();
        assert!(err.is_configuration());

        let block = BlockOverride::new(0, 20, COLOR_WHITE)?;
        let err = ColorSource::new(ColorMode::Class, &[0; 10], Some(block))
            .err()
            .unwrap();
        assert!(err.is_configuration());
        Ok(())
    }

    #[test]
    fn mode_names() -> Result<()> {
        for mode in ColorMode::ALL {
            assert_eq!(mode.name().parse::<ColorMode>()?, mode);
        }
        assert!("rainbow".parse::<ColorMode>().is_err());
        assert_eq!(ColorMode::default(), ColorMode::Class);
        Ok(())
    }

    proptest! {
        #[test]
        fn class_is_one_of_five(b in any::<u8>()) {
            let c = class_color(b);
            prop_assert!([COLOR_BLACK, COLOR_GREEN, COLOR_BLUE, COLOR_RED, COLOR_WHITE].contains(&c));
        }

        #[test]
        fn gradient_is_monotonic(a in any::<u8>(), b in any::<u8>()) {
            let data = [a, b];
            let src = ColorSource::new(ColorMode::Gradient, &data, None).unwrap();
            prop_assert_eq!(a <= b, src.color(0)[0] <= src.color(1)[0]);
        }

        #[test]
        fn entropy_green_is_zero(e in 0.0f64..=1.0) {
            let c = entropy_color(e);
            prop_assert_eq!(c[1], 0);
        }
    }
}
