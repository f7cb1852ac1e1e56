//! Support operations for curve calculation.

use smallvec::smallvec;

use crate::point::Coords;

/// Interleave the low `order` bits of every coordinate into a Morton code.
///
/// Bit `b` of coordinate `k` lands at position `b * n + (n - 1 - k)`, so the
/// first coordinate carries the most significant bit of each group.
pub fn interleave(order: u32, coords: &[u32]) -> u32 {
    let n = coords.len() as u32;
    let mut code = 0;
    for bit in 0..order {
        for (k, c) in coords.iter().enumerate() {
            let v = (c >> bit) & 1;
            code |= v << (bit * n + (n - 1 - k as u32));
        }
    }
    code
}

/// Inverse of [`interleave`]: split a Morton code into `dimension` coordinates.
pub fn deinterleave(dimension: u32, order: u32, code: u32) -> Coords {
    let n = dimension;
    let mut coords: Coords = smallvec![0; n as usize];
    for bit in 0..order {
        for (k, c) in coords.iter_mut().enumerate() {
            let v = (code >> (bit * n + (n - 1 - k as u32))) & 1;
            *c |= v << bit;
        }
    }
    coords
}

/// Exact integer `n`-th root of `value`, if one exists.
pub fn exact_root(value: u64, n: u32) -> Option<u64> {
    if n == 0 {
        return None;
    }
    if n == 1 || value < 2 {
        return Some(value);
    }
    let guess = (value as f64).powf(1.0 / f64::from(n)).round() as u64;
    // Float rounding can land one off either side of the true root.
    (guess.saturating_sub(1)..=guess + 1).find(|c| c.checked_pow(n) == Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleave_2d() {
        // x = 0b10, y = 0b01 -> x1 y1 x0 y0 = 1 0 0 1
        assert_eq!(interleave(2, &[0b10, 0b01]), 0b1001);
        assert_eq!(deinterleave(2, 2, 0b1001).as_slice(), &[0b10, 0b01]);
    }

    #[test]
    fn interleave_symmetry() {
        for code in 0..512 {
            let coords = deinterleave(3, 3, code);
            assert_eq!(interleave(3, &coords), code);
        }
    }

    #[test]
    fn roots() {
        assert_eq!(exact_root(65536, 2), Some(256));
        assert_eq!(exact_root(1 << 24, 3), Some(256));
        assert_eq!(exact_root(27, 3), Some(3));
        assert_eq!(exact_root(26, 3), None);
        assert_eq!(exact_root(1, 2), Some(1));
        assert_eq!(exact_root(0, 2), Some(0));
        assert_eq!(exact_root(10, 0), None);
    }
}
