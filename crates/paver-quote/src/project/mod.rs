//! Project description: the geometry and pattern selections a quote is
//! computed from.
//!
//! The project is owned by the form layer and rebuilt on every change; the
//! engine treats it as an immutable value and never mutates it.

mod pattern;

pub use pattern::{Coverage, CoverageSpec, CoverageUnit, FixedUnit, Pattern, StoneRef};

use crate::ids::SkuId;
use crate::units::{to_canonical_area, to_canonical_length, LengthUnit};
use serde::{Deserialize, Serialize};

/// The overall shape of the paved area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Rect,
    Circle,
    Other,
}

/// Raw measurements entered in the form. Only the fields relevant to the
/// project's [`Shape`] are meaningful; the rest stay at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Measurements {
    #[serde(default)]
    pub unit: LengthUnit,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub length: f64,
    #[serde(default)]
    pub radius: f64,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub running_length: f64,
}

/// The physical laying direction of border stones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BorderOrientation {
    #[default]
    SoldierRow,
    TipToTip,
}

impl BorderOrientation {
    /// The other laying direction.
    pub fn opposite(&self) -> BorderOrientation {
        match self {
            BorderOrientation::SoldierRow => BorderOrientation::TipToTip,
            BorderOrientation::TipToTip => BorderOrientation::SoldierRow,
        }
    }
}

/// Unit of the border's running length, or `auto` to derive it from the
/// project's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BorderLengthUnit {
    #[default]
    Auto,
    Ft,
    In,
    M,
    Cm,
}

impl BorderLengthUnit {
    /// The concrete length unit, or None for `auto`.
    pub fn as_length(&self) -> Option<LengthUnit> {
        match self {
            BorderLengthUnit::Auto => None,
            BorderLengthUnit::Ft => Some(LengthUnit::Ft),
            BorderLengthUnit::In => Some(LengthUnit::In),
            BorderLengthUnit::M => Some(LengthUnit::M),
            BorderLengthUnit::Cm => Some(LengthUnit::Cm),
        }
    }
}

/// The border's running length as entered in the form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BorderLength {
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub unit: BorderLengthUnit,
}

/// The 1-D border selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Border {
    #[serde(default)]
    pub running_length: BorderLength,
    #[serde(default)]
    pub orientation: BorderOrientation,
    #[serde(default)]
    pub contents: Vec<Pattern>,
}

/// The 2-D infill selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Infill {
    #[serde(default)]
    pub contents: Vec<Pattern>,
}

/// Quote add-ons the user can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddonId {
    Sealant,
    Polymeric,
    AreaOverage,
    ReducePickups,
}

/// One add-on toggle as sent by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonSelection {
    pub id: AddonId,
    pub enabled: bool,
}

/// A complete project description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Project {
    #[serde(default)]
    pub shape: Shape,
    #[serde(default)]
    pub measurements: Measurements,
    #[serde(default)]
    pub infill: Infill,
    #[serde(default)]
    pub border: Border,
    #[serde(default)]
    pub addons: Vec<AddonSelection>,
}

impl Project {
    /// Project area in canonical square feet.
    ///
    /// The shape's area is computed in the measurement unit first and then
    /// converted as an areal quantity.
    pub fn area_sqft(&self) -> f64 {
        let raw = match self.shape {
            Shape::Rect => self.measurements.width * self.measurements.length,
            Shape::Circle => std::f64::consts::PI * self.measurements.radius.powi(2),
            Shape::Other => self.measurements.area,
        };
        to_canonical_area(raw, self.measurements.unit.area_unit())
    }

    /// The border's running length in canonical feet.
    ///
    /// `auto` derives the length from the shape: rectangle perimeter, circle
    /// circumference, or the explicit running-length measurement for
    /// free-form shapes.
    pub fn border_running_feet(&self) -> f64 {
        match self.border.running_length.unit.as_length() {
            Some(unit) => to_canonical_length(self.border.running_length.value, unit),
            None => {
                let raw = match self.shape {
                    Shape::Rect => 2.0 * (self.measurements.width + self.measurements.length),
                    Shape::Circle => 2.0 * std::f64::consts::PI * self.measurements.radius,
                    Shape::Other => self.measurements.running_length,
                };
                to_canonical_length(raw, self.measurements.unit)
            }
        }
    }

    /// Whether an add-on is present and enabled.
    pub fn addon_enabled(&self, id: AddonId) -> bool {
        self.addons.iter().any(|a| a.id == id && a.enabled)
    }

    /// Every SKU referenced by any pattern, first-seen order, deduplicated.
    ///
    /// Lets the caller drive catalog retain/release from form state.
    pub fn referenced_skus(&self) -> Vec<&SkuId> {
        let mut seen = Vec::new();
        let patterns = self.infill.contents.iter().chain(self.border.contents.iter());
        for stone in patterns.flat_map(|p| p.contents.iter()) {
            if !seen.contains(&&stone.sku_id) {
                seen.push(&stone.sku_id);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_project(width: f64, length: f64) -> Project {
        Project {
            shape: Shape::Rect,
            measurements: Measurements {
                unit: LengthUnit::Ft,
                width,
                length,
                ..Measurements::default()
            },
            ..Project::default()
        }
    }

    #[test]
    fn test_rect_area() {
        assert_eq!(rect_project(10.0, 10.0).area_sqft(), 100.0);
    }

    #[test]
    fn test_rect_area_metric() {
        // Areal conversion reuses the linear factor: 4 sqm * 3.281
        let mut project = rect_project(2.0, 2.0);
        project.measurements.unit = LengthUnit::M;
        assert!((project.area_sqft() - 13.124).abs() < 1e-9);
    }

    #[test]
    fn test_circle_area() {
        let project = Project {
            shape: Shape::Circle,
            measurements: Measurements {
                radius: 2.0,
                ..Measurements::default()
            },
            ..Project::default()
        };
        assert!((project.area_sqft() - std::f64::consts::PI * 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_other_area() {
        let project = Project {
            shape: Shape::Other,
            measurements: Measurements {
                area: 250.0,
                ..Measurements::default()
            },
            ..Project::default()
        };
        assert_eq!(project.area_sqft(), 250.0);
    }

    #[test]
    fn test_auto_border_length() {
        let project = rect_project(10.0, 15.0);
        assert_eq!(project.border_running_feet(), 50.0);
    }

    #[test]
    fn test_explicit_border_length() {
        let mut project = rect_project(10.0, 15.0);
        project.border.running_length = BorderLength {
            value: 120.0,
            unit: BorderLengthUnit::In,
        };
        assert!((project.border_running_feet() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_addon_enabled() {
        let mut project = rect_project(10.0, 10.0);
        project.addons = vec![
            AddonSelection {
                id: AddonId::Sealant,
                enabled: true,
            },
            AddonSelection {
                id: AddonId::Polymeric,
                enabled: false,
            },
        ];

        assert!(project.addon_enabled(AddonId::Sealant));
        assert!(!project.addon_enabled(AddonId::Polymeric));
        assert!(!project.addon_enabled(AddonId::ReducePickups));
    }

    #[test]
    fn test_referenced_skus_dedup() {
        let mut project = rect_project(10.0, 10.0);
        let grey = StoneRef {
            sku_id: SkuId::new("grey"),
            quantity: 1.0,
        };
        let red = StoneRef {
            sku_id: SkuId::new("red"),
            quantity: 2.0,
        };
        project.infill.contents = vec![Pattern::with_fraction(1.0, vec![grey.clone(), red])];
        project.border.contents = vec![Pattern::with_fraction(1.0, vec![grey])];

        let skus = project.referenced_skus();
        assert_eq!(skus.len(), 2);
        assert_eq!(skus[0].as_str(), "grey");
        assert_eq!(skus[1].as_str(), "red");
    }

    #[test]
    fn test_project_wire_format() {
        let json = r#"{
            "shape": "rect",
            "measurements": { "unit": "ft", "width": 10.0, "length": 10.0 },
            "infill": {
                "contents": [{
                    "coverage": { "value": 1.0, "unit": "fr" },
                    "contents": [{ "sku_id": "colonial_classic:grey", "quantity": 1.0 }]
                }]
            },
            "border": {
                "running_length": { "value": 0.0, "unit": "auto" },
                "orientation": "SOLDIER_ROW",
                "contents": []
            },
            "addons": [{ "id": "reduce_pickups", "enabled": true }]
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.shape, Shape::Rect);
        assert_eq!(project.border.orientation, BorderOrientation::SoldierRow);
        assert!(project.addon_enabled(AddonId::ReducePickups));
        assert_eq!(
            project.infill.contents[0].coverage,
            Coverage::Fractional { weight: 1.0 }
        );
    }
}
