//! Local Shannon entropy over a sliding window.

/// Window size used by the entropy colour policy.
pub const WINDOW: usize = 32;

/// Normalised Shannon entropy of the `window` bytes around `offset`.
///
/// The window is centred on `offset` and shifted to stay inside `data`; a
/// buffer shorter than the window is measured as a whole. The logarithm base
/// is `min(window, symbols)` so that the result spans `[0, 1]` even when the
/// window cannot hold every possible symbol.
pub fn entropy(data: &[u8], window: usize, offset: usize, symbols: usize) -> f64 {
    let window = window.min(data.len());
    if window == 0 {
        return 0.0;
    }
    let start = offset
        .saturating_sub(window / 2)
        .min(data.len() - window);

    let mut counts = [0u32; 256];
    for &byte in &data[start..start + window] {
        counts[usize::from(byte)] += 1;
    }

    let base = window.min(symbols);
    if base <= 1 {
        return 0.0;
    }
    let log_base = (base as f64).ln();
    let total = window as f64;
    let h: f64 = counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = f64::from(c) / total;
            -p * p.ln() / log_base
        })
        .sum();
    h.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_data_has_zero_entropy() {
        let data = [0x41u8; 100];
        assert_eq!(entropy(&data, WINDOW, 50, 1), 0.0);
        assert_eq!(entropy(&data, WINDOW, 50, 256), 0.0);
    }

    #[test]
    fn distinct_window_is_maximal() {
        let data: Vec<u8> = (0..=255).collect();
        for offset in [0, 16, 128, 255] {
            let e = entropy(&data, WINDOW, offset, 256);
            assert!((e - 1.0).abs() < 1e-9, "offset {offset}: {e}");
        }
    }

    #[test]
    fn two_symbols_alternating() {
        let data: Vec<u8> = (0..64).map(|i| if i % 2 == 0 { 0 } else { 0xff }).collect();
        let e = entropy(&data, WINDOW, 10, 2);
        assert!((e - 1.0).abs() < 1e-9);
        // log base 32: two equiprobable symbols give log32(2) = 0.2
        let e = entropy(&data, WINDOW, 10, 256);
        assert!((e - 0.2).abs() < 1e-9);
    }

    #[test]
    fn window_clamped_at_edges() {
        let mut data = vec![0u8; 100];
        data[99] = 1;
        // The final window covers offsets 68..100 whichever edge offset is used.
        assert_eq!(entropy(&data, WINDOW, 99, 2), entropy(&data, WINDOW, 90, 2));
        assert!(entropy(&data, WINDOW, 99, 2) > 0.0);
        assert_eq!(entropy(&data, WINDOW, 0, 2), 0.0);
    }

    #[test]
    fn short_buffers() {
        assert_eq!(entropy(&[], WINDOW, 0, 256), 0.0);
        assert_eq!(entropy(&[7], WINDOW, 0, 256), 0.0);
        let e = entropy(&[1, 2, 3, 4], WINDOW, 2, 4);
        assert!((e - 1.0).abs() < 1e-9);
    }
}
