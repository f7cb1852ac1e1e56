//! Highlighted address ranges.
//!
//! A block override paints every byte in a half-open offset range with one
//! colour, whatever the active colour policy would say.

use std::{ops::Range, str::FromStr};

use colornames::Color;
use image::Rgb;

use crate::error::{Error, Result};

/// Colour used when a block specification omits one.
pub const DEFAULT_BLOCK_COLOR: Rgb<u8> = Rgb([0xff, 0x00, 0x00]);

/// A byte range forced to a fixed colour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockOverride {
    /// First offset covered.
    pub start: usize,
    /// One past the last offset covered.
    pub end: usize,
    /// Colour painted over the range.
    pub color: Rgb<u8>,
}

impl BlockOverride {
    /// Create an override for `[start, end)`.
    pub fn new(start: usize, end: usize, color: Rgb<u8>) -> Result<Self> {
        if start >= end {
            return Err(Error::config(format!(
                "block start ({start:#x}) must be less than end ({end:#x})"
            )));
        }
        Ok(Self { start, end, color })
    }

    /// The covered offsets as a range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether `offset` falls inside the block.
    pub fn contains(&self, offset: usize) -> bool {
        self.range().contains(&offset)
    }

    /// Check that the block lies within a buffer of `len` bytes.
    pub fn check_bounds(&self, len: usize) -> Result<()> {
        if self.end > len {
            return Err(Error::config(format!(
                "block {:#x}:{:#x} extends past the end of the input ({len:#x} bytes)",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

/// Parse a hexadecimal offset, with or without a leading `0x`.
fn parse_hex_offset(label: &str, raw: &str) -> Result<usize> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    usize::from_str_radix(digits, 16).map_err(|_| {
        Error::config(format!(
            "invalid block {label} '{raw}': expected a hexadecimal offset"
        ))
    })
}

/// Parse a named or hex colour into an `Rgb` value.
///
/// Supports CSS colour names via `colornames` and short/long hex (RGB/RRGGBB)
/// with an optional leading `#` or `0x`.
pub fn parse_color(input: &str) -> Result<Rgb<u8>> {
    fn parse_hex_rgb(hex: &str) -> Option<Rgb<u8>> {
        let raw = hex
            .trim_start_matches('#')
            .trim_start_matches("0x")
            .trim_start_matches("0X");
        if !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let pair = |at: usize| u8::from_str_radix(&raw[at..at + 2], 16).ok();
        let nibble = |at: usize| u8::from_str_radix(&raw[at..at + 1], 16).ok().map(|v| v * 17);

        match raw.len() {
            3 => Some(Rgb([nibble(0)?, nibble(1)?, nibble(2)?])),
            6 => Some(Rgb([pair(0)?, pair(2)?, pair(4)?])),
            _ => None,
        }
    }

    let trimmed = input.trim();
    if let Some(rgb) = parse_hex_rgb(trimmed) {
        return Ok(rgb);
    }

    let color: Color = trimmed.try_into().map_err(|_| {
        Error::config(format!(
            "invalid color '{input}': use a named color or hex (RGB/RRGGBB, '#' or '0x' optional)"
        ))
    })?;
    let (red, green, blue) = color.rgb();
    Ok(Rgb([red, green, blue]))
}

impl FromStr for BlockOverride {
    type Err = Error;

    /// Parse `START:END[:COLOR]`, with hexadecimal offsets.
    fn from_str(value: &str) -> Result<Self> {
        let parts: Vec<&str> = value.split(':').collect();
        let (start, end, color) = match parts.as_slice() {
            [start, end] => (start, end, DEFAULT_BLOCK_COLOR),
            [start, end, color] => (start, end, parse_color(color)?),
            _ => {
                return Err(Error::config(format!(
                    "invalid block '{value}': expected START:END[:COLOR]"
                )));
            }
        };
        Self::new(
            parse_hex_offset("start", start)?,
            parse_hex_offset("end", end)?,
            color,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_block_with_color() -> Result<()> {
        let block: BlockOverride = "0x10:0x20:0xFF0000".parse()?;
        assert_eq!(block.range(), 16..32);
        assert_eq!(block.color, Rgb([255, 0, 0]));

        let block: BlockOverride = "a0:ff:#00f".parse()?;
        assert_eq!(block.range(), 0xa0..0xff);
        assert_eq!(block.color, Rgb([0, 0, 255]));
        Ok(())
    }

    #[test]
    fn defaults_to_red() -> Result<()> {
        let block: BlockOverride = "0:100".parse()?;
        assert_eq!(block.range(), 0..0x100);
        assert_eq!(block.color, DEFAULT_BLOCK_COLOR);
        Ok(())
    }

    #[test]
    fn named_colors() -> Result<()> {
        assert_eq!(parse_color("white")?, Rgb([255, 255, 255]));
        assert!(parse_color("notacolor").is_err());
        Ok(())
    }

    #[test]
    fn rejects_malformed_blocks() {
        for bad in ["", "10", "20:10", "10:10", "zz:20", "1:2:3:4", "1:2:nope"] {
            let err = bad.parse::<BlockOverride>().unwrap_err();
            assert!(err.is_configuration(), "{bad}");
        }
    }

    #[test]
    fn bounds() -> Result<()> {
        let block = BlockOverride::new(4, 8, DEFAULT_BLOCK_COLOR)?;
        assert!(block.contains(4));
        assert!(block.contains(7));
        assert!(!block.contains(8));
        assert!(block.check_bounds(8).is_ok());
        assert!(block.check_bounds(7).is_err());
        Ok(())
    }
}
