//! Stone patterns and their coverage specifications.

use crate::ids::SkuId;
use crate::units::{AreaUnit, LengthUnit};
use serde::{Deserialize, Serialize};

/// A stone within a pattern: pieces of this SKU per repeat of the pattern,
/// not an absolute count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoneRef {
    pub sku_id: SkuId,
    pub quantity: f64,
}

/// A group of stones plus a coverage specification describing how much
/// space the group should occupy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub coverage: Coverage,
    pub contents: Vec<StoneRef>,
}

/// The coverage units the picker UI may send, as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageUnit {
    Fr,
    Ft,
    In,
    M,
    Cm,
    Sqft,
    Sqin,
    Sqm,
    Sqcm,
    Unit,
}

/// A fixed (absolute) coverage unit: a length, an area, or pattern repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedUnit {
    Length(LengthUnit),
    Area(AreaUnit),
    Repeats,
}

impl FixedUnit {
    /// Convert a value in this unit to canonical feet / square feet.
    ///
    /// Returns None for [`FixedUnit::Repeats`], whose target depends on the
    /// pattern's intrinsic size rather than a unit conversion.
    pub fn canonical(&self, value: f64) -> Option<f64> {
        match self {
            FixedUnit::Length(unit) => Some(value * unit.factor()),
            FixedUnit::Area(unit) => Some(value * unit.factor()),
            FixedUnit::Repeats => None,
        }
    }
}

/// How much space a pattern occupies.
///
/// Fixed coverage is an absolute amount; fractional coverage is a
/// dimensionless weight sharing whatever capacity remains after all fixed
/// patterns are subtracted. The split is an explicit sum type so the
/// allocator's match is exhaustive.
///
/// On the wire this is the picker's `{ "value": 1.5, "unit": "sqft" }` shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "CoverageSpec", into = "CoverageSpec")]
pub enum Coverage {
    Fixed { unit: FixedUnit, value: f64 },
    Fractional { weight: f64 },
}

impl Coverage {
    /// A fractional coverage with the given weight.
    pub fn fractional(weight: f64) -> Self {
        Coverage::Fractional { weight }
    }

    /// A coverage in the given wire unit. [`CoverageUnit::Fr`] yields a
    /// fractional coverage with `value` as the weight.
    pub fn fixed(value: f64, unit: CoverageUnit) -> Self {
        Coverage::from(CoverageSpec { value, unit })
    }
}

/// Wire representation of a coverage specification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageSpec {
    pub value: f64,
    pub unit: CoverageUnit,
}

impl From<CoverageSpec> for Coverage {
    fn from(spec: CoverageSpec) -> Self {
        let fixed = |unit| Coverage::Fixed {
            unit,
            value: spec.value,
        };
        match spec.unit {
            CoverageUnit::Fr => Coverage::Fractional { weight: spec.value },
            CoverageUnit::Ft => fixed(FixedUnit::Length(LengthUnit::Ft)),
            CoverageUnit::In => fixed(FixedUnit::Length(LengthUnit::In)),
            CoverageUnit::M => fixed(FixedUnit::Length(LengthUnit::M)),
            CoverageUnit::Cm => fixed(FixedUnit::Length(LengthUnit::Cm)),
            CoverageUnit::Sqft => fixed(FixedUnit::Area(AreaUnit::Sqft)),
            CoverageUnit::Sqin => fixed(FixedUnit::Area(AreaUnit::Sqin)),
            CoverageUnit::Sqm => fixed(FixedUnit::Area(AreaUnit::Sqm)),
            CoverageUnit::Sqcm => fixed(FixedUnit::Area(AreaUnit::Sqcm)),
            CoverageUnit::Unit => fixed(FixedUnit::Repeats),
        }
    }
}

impl From<Coverage> for CoverageSpec {
    fn from(coverage: Coverage) -> Self {
        match coverage {
            Coverage::Fractional { weight } => CoverageSpec {
                value: weight,
                unit: CoverageUnit::Fr,
            },
            Coverage::Fixed { unit, value } => {
                let unit = match unit {
                    FixedUnit::Length(LengthUnit::Ft) => CoverageUnit::Ft,
                    FixedUnit::Length(LengthUnit::In) => CoverageUnit::In,
                    FixedUnit::Length(LengthUnit::M) => CoverageUnit::M,
                    FixedUnit::Length(LengthUnit::Cm) => CoverageUnit::Cm,
                    FixedUnit::Area(AreaUnit::Sqft) => CoverageUnit::Sqft,
                    FixedUnit::Area(AreaUnit::Sqin) => CoverageUnit::Sqin,
                    FixedUnit::Area(AreaUnit::Sqm) => CoverageUnit::Sqm,
                    FixedUnit::Area(AreaUnit::Sqcm) => CoverageUnit::Sqcm,
                    FixedUnit::Repeats => CoverageUnit::Unit,
                };
                CoverageSpec { value, unit }
            }
        }
    }
}

impl Pattern {
    /// Create a pattern covering a fractional share of remaining space.
    pub fn with_fraction(weight: f64, contents: Vec<StoneRef>) -> Self {
        Self {
            coverage: Coverage::fractional(weight),
            contents,
        }
    }

    /// Create a pattern with a fixed coverage target.
    pub fn with_fixed(value: f64, unit: CoverageUnit, contents: Vec<StoneRef>) -> Self {
        Self {
            coverage: Coverage::fixed(value, unit),
            contents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_wire_format() {
        let coverage: Coverage = serde_json::from_str(r#"{"value":1.0,"unit":"fr"}"#).unwrap();
        assert_eq!(coverage, Coverage::Fractional { weight: 1.0 });

        let coverage: Coverage = serde_json::from_str(r#"{"value":25.0,"unit":"sqm"}"#).unwrap();
        assert_eq!(
            coverage,
            Coverage::Fixed {
                unit: FixedUnit::Area(AreaUnit::Sqm),
                value: 25.0
            }
        );

        let coverage: Coverage = serde_json::from_str(r#"{"value":3.0,"unit":"unit"}"#).unwrap();
        assert_eq!(
            coverage,
            Coverage::Fixed {
                unit: FixedUnit::Repeats,
                value: 3.0
            }
        );
    }

    #[test]
    fn test_coverage_roundtrip() {
        let original = Coverage::fixed(12.5, CoverageUnit::Ft);
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, r#"{"value":12.5,"unit":"ft"}"#);
        let back: Coverage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_fixed_unit_canonical() {
        let sqm = FixedUnit::Area(AreaUnit::Sqm).canonical(10.0).unwrap();
        assert!((sqm - 32.81).abs() < 1e-9);
        assert_eq!(FixedUnit::Length(LengthUnit::Ft).canonical(7.0), Some(7.0));
        assert_eq!(FixedUnit::Repeats.canonical(3.0), None);
    }
}
