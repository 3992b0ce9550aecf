//! Threshold tables that turn a slider percentage into a label and a color.
//!
//! Every table is split into five bands (`<20`, `<40`, `<60`, `<80`, rest).
//! The band logic lives in one place and each resource kind only supplies
//! its own labels and colors.

use serde::Serialize;
use std::fmt;

/// One slider position, always within `0..=100`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceLevel(u8);

impl ResourceLevel {
    /// Lowest slider position.
    pub const MIN: Self = Self(0);
    /// Highest slider position.
    pub const MAX: Self = Self(100);

    /// Values above 100 are clamped to 100.
    pub fn new(percent: u8) -> Self {
        Self(percent.min(Self::MAX.0))
    }

    /// Clamps a signed value into `0..=100`.
    pub fn clamped(value: i32) -> Self {
        // The clamp guarantees the cast cannot truncate.
        Self(value.clamp(Self::MIN.0 as i32, Self::MAX.0 as i32) as u8)
    }

    /// Raw percentage.
    pub fn percent(self) -> u8 {
        self.0
    }

    /// Move the level by `delta`, saturating at both ends.
    pub fn offset(self, delta: i32) -> Self {
        Self::clamped(self.0 as i32 + delta)
    }
}

impl fmt::Display for ResourceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// The four sliders on the reporting form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Occupancy of the shelter (high means crowded).
    Capacity,
    /// Food stock.
    Food,
    /// Drinking water stock.
    Water,
    /// Medical supplies.
    Medical,
}

impl ResourceKind {
    /// Display order on the form.
    pub const ALL: [Self; 4] = [Self::Capacity, Self::Food, Self::Water, Self::Medical];

    /// Title shown above the slider.
    pub fn title(self) -> &'static str {
        match self {
            Self::Capacity => "Capacity",
            Self::Food => "Food",
            Self::Water => "Water",
            Self::Medical => "Medical Supplies",
        }
    }

    fn bands(self) -> &'static BandTable {
        match self {
            Self::Capacity => &CAPACITY_BANDS,
            Self::Food => &FOOD_BANDS,
            Self::Water => &WATER_BANDS,
            Self::Medical => &MEDICAL_BANDS,
        }
    }
}

/// 24-bit color attached to a status label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Build from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }
}

pub const DARK_GREEN: Rgb = Rgb::from_hex(0x10B981);
pub const GREEN: Rgb = Rgb::from_hex(0x22C55E);
pub const AMBER: Rgb = Rgb::from_hex(0xF59E0B);
pub const RED: Rgb = Rgb::from_hex(0xEF4444);
pub const DARK_RED: Rgb = Rgb::from_hex(0xDC2626);

/// Label and color for one band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StatusCategory {
    pub label: &'static str,
    pub color: Rgb,
}

const fn cat(label: &'static str, color: Rgb) -> StatusCategory {
    StatusCategory { label, color }
}

/// Width of every band in percent.
const BAND_WIDTH: u8 = 20;

type BandTable = [StatusCategory; 5];

// Capacity is inverted: a full shelter is the bad case.
const CAPACITY_BANDS: BandTable = [
    cat("EMPTY", DARK_GREEN),
    cat("LOW", GREEN),
    cat("HALF FULL", AMBER),
    cat("BUSY", RED),
    cat("FULL", DARK_RED),
];

const FOOD_BANDS: BandTable = [
    cat("CRITICAL", DARK_RED),
    cat("LOW", RED),
    cat("ADEQUATE", AMBER),
    cat("GOOD", GREEN),
    cat("EXCELLENT", DARK_GREEN),
];

const WATER_BANDS: BandTable = [
    cat("CRITICAL", DARK_RED),
    cat("LOW", RED),
    cat("SUFFICIENT", AMBER),
    cat("GOOD", GREEN),
    cat("ABUNDANT", DARK_GREEN),
];

const MEDICAL_BANDS: BandTable = [
    cat("DEPLETED", DARK_RED),
    cat("MINIMAL", RED),
    cat("BASIC", AMBER),
    cat("STOCKED", GREEN),
    cat("FULLY EQUIPPED", DARK_GREEN),
];

/// Index of the band a level falls into. 100 shares the top band with 80..99.
fn band_index(level: ResourceLevel) -> usize {
    usize::from(level.percent() / BAND_WIDTH).min(CAPACITY_BANDS.len() - 1)
}

/// Live label and color for a slider.
pub fn classify(kind: ResourceKind, level: ResourceLevel) -> StatusCategory {
    kind.bands()[band_index(level)]
}

/// Text shown next to the slider, e.g. `"45% - HALF FULL"`.
pub fn status_line(kind: ResourceKind, level: ResourceLevel) -> String {
    format!("{}% - {}", level.percent(), classify(kind, level).label)
}

/// Coarse resource state sent to the coordination backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    Critical,
    Low,
    Adequate,
}

impl ResourceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Low => "low",
            Self::Adequate => "adequate",
        }
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall shelter state derived from the capacity slider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShelterStatus {
    Available,
    Limited,
    Full,
}

impl ShelterStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Limited => "limited",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for ShelterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload status for food, water and medical supplies.
///
/// Everything from 40 up reports `adequate`; the payload does not carry the
/// GOOD/EXCELLENT distinction of the live labels.
pub fn resource_status(level: ResourceLevel) -> ResourceStatus {
    match level.percent() {
        0..=19 => ResourceStatus::Critical,
        20..=39 => ResourceStatus::Low,
        _ => ResourceStatus::Adequate,
    }
}

/// Payload status for the shelter as a whole, driven by capacity.
pub fn shelter_status(capacity: ResourceLevel) -> ShelterStatus {
    match capacity.percent() {
        0..=59 => ShelterStatus::Available,
        60..=79 => ShelterStatus::Limited,
        _ => ShelterStatus::Full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lv(p: u8) -> ResourceLevel {
        ResourceLevel::new(p)
    }

    #[test]
    fn test_level_clamps_out_of_range_input() {
        assert_eq!(lv(150).percent(), 100);
        assert_eq!(ResourceLevel::clamped(-7).percent(), 0);
        assert_eq!(ResourceLevel::clamped(101).percent(), 100);
        assert_eq!(lv(95).offset(10), ResourceLevel::MAX);
        assert_eq!(lv(3).offset(-10), ResourceLevel::MIN);
        assert_eq!(lv(40).offset(-1).percent(), 39);
    }

    #[test]
    fn test_band_edges_are_inclusive_above() {
        // 20 belongs to the second band, 19 to the first.
        assert_eq!(classify(ResourceKind::Food, lv(19)).label, "CRITICAL");
        assert_eq!(classify(ResourceKind::Food, lv(20)).label, "LOW");
        assert_eq!(classify(ResourceKind::Food, lv(79)).label, "GOOD");
        assert_eq!(classify(ResourceKind::Food, lv(80)).label, "EXCELLENT");
        assert_eq!(classify(ResourceKind::Food, lv(100)).label, "EXCELLENT");
    }

    #[test]
    fn test_capacity_table() {
        let k = ResourceKind::Capacity;
        assert_eq!(classify(k, lv(0)), cat("EMPTY", DARK_GREEN));
        assert_eq!(classify(k, lv(25)), cat("LOW", GREEN));
        assert_eq!(classify(k, lv(45)), cat("HALF FULL", AMBER));
        assert_eq!(classify(k, lv(65)), cat("BUSY", RED));
        assert_eq!(classify(k, lv(85)), cat("FULL", DARK_RED));
    }

    #[test]
    fn test_water_and_medical_labels_differ_from_food() {
        assert_eq!(classify(ResourceKind::Water, lv(50)).label, "SUFFICIENT");
        assert_eq!(classify(ResourceKind::Water, lv(90)).label, "ABUNDANT");
        assert_eq!(classify(ResourceKind::Medical, lv(10)).label, "DEPLETED");
        assert_eq!(classify(ResourceKind::Medical, lv(30)).label, "MINIMAL");
        assert_eq!(classify(ResourceKind::Medical, lv(50)).label, "BASIC");
        assert_eq!(classify(ResourceKind::Medical, lv(70)).label, "STOCKED");
        assert_eq!(classify(ResourceKind::Medical, lv(90)).label, "FULLY EQUIPPED");
    }

    #[test]
    fn test_capacity_color_polarity_is_inverted() {
        // Top of capacity is red, top of supplies is green.
        assert_eq!(classify(ResourceKind::Capacity, lv(90)).color, DARK_RED);
        for kind in [ResourceKind::Food, ResourceKind::Water, ResourceKind::Medical] {
            assert_eq!(classify(kind, lv(90)).color, DARK_GREEN);
            assert_eq!(classify(kind, lv(5)).color, DARK_RED);
        }
    }

    #[test]
    fn test_labels_change_only_at_multiples_of_twenty() {
        for kind in ResourceKind::ALL {
            for p in 1..=100u8 {
                let changed = classify(kind, lv(p)) != classify(kind, lv(p - 1));
                let expected = p % 20 == 0 && p < 100;
                assert_eq!(changed, expected, "{kind:?} at {p}");
            }
        }
    }

    #[test]
    fn test_classify_is_repeatable() {
        for kind in ResourceKind::ALL {
            for p in 0..=100u8 {
                assert_eq!(classify(kind, lv(p)), classify(kind, lv(p)));
            }
        }
    }

    #[test]
    fn test_status_line_format() {
        assert_eq!(status_line(ResourceKind::Capacity, lv(45)), "45% - HALF FULL");
        assert_eq!(status_line(ResourceKind::Medical, lv(100)), "100% - FULLY EQUIPPED");
    }

    #[test]
    fn test_resource_status() {
        assert_eq!(resource_status(lv(0)), ResourceStatus::Critical);
        assert_eq!(resource_status(lv(19)), ResourceStatus::Critical);
        assert_eq!(resource_status(lv(20)), ResourceStatus::Low);
        assert_eq!(resource_status(lv(39)), ResourceStatus::Low);
        assert_eq!(resource_status(lv(40)), ResourceStatus::Adequate);
        assert_eq!(resource_status(lv(59)), ResourceStatus::Adequate);
        assert_eq!(resource_status(lv(99)), ResourceStatus::Adequate);
    }

    #[test]
    fn test_shelter_status() {
        assert_eq!(shelter_status(lv(0)), ShelterStatus::Available);
        assert_eq!(shelter_status(lv(50)), ShelterStatus::Available);
        assert_eq!(shelter_status(lv(59)), ShelterStatus::Available);
        assert_eq!(shelter_status(lv(60)), ShelterStatus::Limited);
        assert_eq!(shelter_status(lv(65)), ShelterStatus::Limited);
        assert_eq!(shelter_status(lv(80)), ShelterStatus::Full);
        assert_eq!(shelter_status(lv(85)), ShelterStatus::Full);
    }

    #[test]
    fn test_rgb_from_hex() {
        assert_eq!(DARK_RED, Rgb { r: 0xDC, g: 0x26, b: 0x26 });
        assert_eq!(AMBER, Rgb { r: 0xF5, g: 0x9E, b: 0x0B });
    }
}
