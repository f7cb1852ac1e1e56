//! Property-based tests: every curve maps indices to cells one-to-one.
//!
//! All curves must satisfy `curve.index(curve.point(i)) == i` and keep every
//! coordinate inside the grid.

#![allow(missing_docs, clippy::tests_outside_test_module)]

use proptest::prelude::*;
use spacecurve::{curve_from_length, curve_from_name, registry};

/// Shapes exercised for every registered curve: (dimension, size).
fn shapes(name: &str) -> Vec<(u32, u32)> {
    match name {
        "hilbert" | "zorder" => vec![(2, 16), (3, 8)],
        _ => vec![(2, 10), (3, 5), (2, 16)],
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn bijection_all_curves(curve_idx in 0usize..4, shape_idx in 0usize..2, frac in 0.0f64..1.0) {
        let name = registry::CURVE_NAMES[curve_idx];
        let (dimension, size) = shapes(name)[shape_idx];
        let curve = curve_from_name(name, dimension, size).expect("valid curve");
        let index = ((f64::from(curve.length()) * frac) as u32).min(curve.length() - 1);

        let point = curve.point(index);
        prop_assert_eq!(point.dimension(), dimension);
        prop_assert!(point.iter().all(|&c| c < size), "{} out of grid: {:?}", name, point);
        prop_assert_eq!(curve.index(&point), index, "{} bijection failed", name);
    }

    /// The colour cube used by the Hilbert colour policy.
    #[test]
    fn bijection_colour_cube(index in 0u32..(1 << 24)) {
        let curve = curve_from_length("hilbert", 3, 1 << 24).expect("256^3 hilbert");
        prop_assert_eq!(curve.size(), 256);
        let point = curve.point(index);
        prop_assert_eq!(curve.index(&point), index);
    }
}

#[test]
fn exhaustive_bijection_small_curves() {
    for &name in registry::CURVE_NAMES {
        for (dimension, size) in [(2, 4), (3, 4), (4, 2)] {
            let curve = curve_from_name(name, dimension, size).expect("curve");
            let mut seen = vec![false; curve.length() as usize];
            for i in 0..curve.length() {
                let point = curve.point(i);
                let recovered = curve.index(&point);
                assert_eq!(
                    recovered, i,
                    "{name} (dim={dimension}, size={size}) bijection failed at index {i}"
                );
                let cell = curve_from_name("natural", dimension, size)
                    .expect("natural")
                    .index(&point);
                assert!(!seen[cell as usize], "{name} visits {point:?} twice");
                seen[cell as usize] = true;
            }
        }
    }
}

#[test]
fn every_curve_starts_at_origin() {
    for &name in registry::CURVE_NAMES {
        let curve = curve_from_name(name, 2, 8).expect("curve");
        assert_eq!(curve.point(0).as_slice(), &[0, 0], "{name}");
    }
}
