use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::format::{format_number, parse_leading_float};

/// Level reported for a numeric value outside every declared band.
pub const UNKNOWN_LEVEL: &str = "unknown";

/// Neutral gray used when a value has no band color.
pub const NEUTRAL_COLOR: &str = "#6b7280";

/// Range text reported alongside [`UNKNOWN_LEVEL`].
pub const UNKNOWN_RANGE: &str = "N/A";

/// One named range entry within a classification table.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub color: String,
}

impl Band {
    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn range_label(&self) -> String {
        format!("{}-{}", format_number(self.min), format_number(self.max))
    }
}

/// Bounds and color of a band as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct BandBounds {
    min: f64,
    max: f64,
    color: String,
}

/// Ordered named numeric ranges.
///
/// Bands may overlap; evaluation follows declaration order and the first
/// band containing the value wins. Serialized as a JSON object whose key
/// order is the declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationTable {
    bands: Vec<Band>,
}

impl ClassificationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a band. Re-declaring a name replaces its bounds in place.
    pub fn with_band(mut self, name: &str, min: f64, max: f64, color: &str) -> Self {
        self.insert(Band {
            name: name.to_string(),
            min,
            max,
            color: color.to_string(),
        });
        self
    }

    fn insert(&mut self, band: Band) {
        match self.bands.iter_mut().find(|b| b.name == band.name) {
            Some(existing) => *existing = band,
            None => self.bands.push(band),
        }
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// First declared band containing `value`.
    pub fn band_for(&self, value: f64) -> Option<&Band> {
        self.bands.iter().find(|band| band.contains(value))
    }
}

impl Serialize for ClassificationTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.bands.len()))?;
        for band in &self.bands {
            map.serialize_entry(
                &band.name,
                &BandBounds {
                    min: band.min,
                    max: band.max,
                    color: band.color.clone(),
                },
            )?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ClassificationTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = ClassificationTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of band name to { min, max, color }")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut table = ClassificationTable::new();
                while let Some((name, bounds)) = access.next_entry::<String, BandBounds>()? {
                    table.insert(Band {
                        name,
                        min: bounds.min,
                        max: bounds.max,
                        color: bounds.color,
                    });
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// Outcome of classifying a numeric value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Classification {
    pub level: String,
    pub color: String,
    pub range: String,
}

impl Classification {
    /// Numeric, but outside every declared band.
    pub fn unknown() -> Self {
        Self {
            level: UNKNOWN_LEVEL.to_string(),
            color: NEUTRAL_COLOR.to_string(),
            range: UNKNOWN_RANGE.to_string(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.level == UNKNOWN_LEVEL
    }
}

impl From<&Band> for Classification {
    fn from(band: &Band) -> Self {
        Self {
            level: band.name.clone(),
            color: band.color.clone(),
            range: band.range_label(),
        }
    }
}

/// Classify an extracted value.
///
/// `None` means there was nothing to classify: the value is absent or has
/// no numeric prefix. A numeric value outside every band yields
/// [`Classification::unknown`] instead.
pub fn classify(value: Option<&str>, table: &ClassificationTable) -> Option<Classification> {
    let numeric = parse_leading_float(value?)?;
    Some(
        table
            .band_for(numeric)
            .map(Classification::from)
            .unwrap_or_else(Classification::unknown),
    )
}
