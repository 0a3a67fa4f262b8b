//! Measurement units and conversion to the canonical feet / square-feet basis.
//!
//! All geometry and allocation math runs in canonical units: feet for running
//! lengths, square feet for areas.

use serde::{Deserialize, Serialize};

/// Linear measurement units accepted from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Ft,
    In,
    M,
    Cm,
}

impl LengthUnit {
    /// Conversion factor to feet.
    ///
    /// These exact numbers are part of the pricing contract; existing quotes
    /// depend on them.
    pub fn factor(&self) -> f64 {
        match self {
            LengthUnit::Ft => 1.0,
            LengthUnit::In => 1.0 / 12.0,
            LengthUnit::M => 3.281,
            LengthUnit::Cm => 30.48,
        }
    }

    /// The area unit with the same basis (ft -> sqft, m -> sqm, ...).
    pub fn area_unit(&self) -> AreaUnit {
        match self {
            LengthUnit::Ft => AreaUnit::Sqft,
            LengthUnit::In => AreaUnit::Sqin,
            LengthUnit::M => AreaUnit::Sqm,
            LengthUnit::Cm => AreaUnit::Sqcm,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LengthUnit::Ft => "ft",
            LengthUnit::In => "in",
            LengthUnit::M => "m",
            LengthUnit::Cm => "cm",
        }
    }
}

/// Areal measurement units accepted from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    #[default]
    Sqft,
    Sqin,
    Sqm,
    Sqcm,
}

impl AreaUnit {
    /// Conversion factor to square feet.
    ///
    /// Areal conversions reuse the linear factors rather than their squares.
    /// Every quote the storefront has issued used these numbers; changing them
    /// would reprice existing projects.
    pub fn factor(&self) -> f64 {
        match self {
            AreaUnit::Sqft => LengthUnit::Ft.factor(),
            AreaUnit::Sqin => LengthUnit::In.factor(),
            AreaUnit::Sqm => LengthUnit::M.factor(),
            AreaUnit::Sqcm => LengthUnit::Cm.factor(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AreaUnit::Sqft => "sqft",
            AreaUnit::Sqin => "sqin",
            AreaUnit::Sqm => "sqm",
            AreaUnit::Sqcm => "sqcm",
        }
    }
}

/// Convert a linear quantity to canonical feet.
pub fn to_canonical_length(value: f64, unit: LengthUnit) -> f64 {
    value * unit.factor()
}

/// Convert an areal quantity to canonical square feet.
pub fn to_canonical_area(value: f64, unit: AreaUnit) -> f64 {
    value * unit.factor()
}

/// Which way [`round_to`] moves a value onto the step grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundDirection {
    Up,
    Down,
}

/// Round `value` to a multiple of `step` in the given direction.
///
/// Used for pallet increments, piece increments and add-on coverage tiers.
/// A non-positive step returns the value unchanged.
pub fn round_to(value: f64, step: f64, direction: RoundDirection) -> f64 {
    if step <= 0.0 {
        return value;
    }
    let multiples = match direction {
        RoundDirection::Up => (value / step).ceil(),
        RoundDirection::Down => (value / step).floor(),
    };
    multiples * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversion() {
        assert_eq!(to_canonical_length(10.0, LengthUnit::Ft), 10.0);
        assert!((to_canonical_length(24.0, LengthUnit::In) - 2.0).abs() < 1e-9);
        assert!((to_canonical_length(2.0, LengthUnit::M) - 6.562).abs() < 1e-9);
    }

    #[test]
    fn test_area_conversion_reuses_linear_factors() {
        assert_eq!(to_canonical_area(100.0, AreaUnit::Sqft), 100.0);
        // sqm uses 3.281, not 3.281^2
        assert!((to_canonical_area(10.0, AreaUnit::Sqm) - 32.81).abs() < 1e-9);
        assert!((to_canonical_area(1.0, AreaUnit::Sqcm) - 30.48).abs() < 1e-9);
    }

    #[test]
    fn test_round_to_down() {
        assert_eq!(round_to(100.0, 64.375, RoundDirection::Down), 64.375);
        assert_eq!(round_to(1200.0, 500.0, RoundDirection::Down), 1000.0);
        assert_eq!(round_to(60.0, 64.375, RoundDirection::Down), 0.0);
    }

    #[test]
    fn test_round_to_up() {
        assert_eq!(round_to(100.0, 64.375, RoundDirection::Up), 128.75);
        assert_eq!(round_to(200.0, 100.0, RoundDirection::Up), 200.0);
        assert_eq!(round_to(0.0, 100.0, RoundDirection::Up), 0.0);
    }

    #[test]
    fn test_round_to_piece_increment() {
        // 35.625 sqft at 4.66 pcs/sqft rounds up to 167 whole pieces
        let step = 1.0 / 4.66;
        let rounded = round_to(35.625, step, RoundDirection::Up);
        assert_eq!((rounded * 4.66).round() as i64, 167);
        assert!(rounded >= 35.625);
    }

    #[test]
    fn test_round_to_degenerate_step() {
        assert_eq!(round_to(42.0, 0.0, RoundDirection::Up), 42.0);
    }

    #[test]
    fn test_unit_strings() {
        assert_eq!(LengthUnit::Cm.as_str(), "cm");
        assert_eq!(AreaUnit::Sqm.as_str(), "sqm");
        assert_eq!(LengthUnit::M.area_unit(), AreaUnit::Sqm);
    }
}
