//! Static field-type metadata: names, colours, transparency, danger and half-life.

use super::field::{FieldType, MAX_DENSITY, MIN_DENSITY};
use serde::{Deserialize, Serialize};

/// Terminal colour used when drawing a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    White,
    Red,
    LightRed,
    Pink,
    Green,
    LightGreen,
    Yellow,
    Brown,
    LightGray,
    DarkGray,
    Cyan,
    Blue,
    Magenta,
}

/// Read-only description of one field type, indexed by density - 1.
#[derive(Debug, Clone, Copy)]
pub struct FieldTypeInfo {
    pub names: [&'static str; 3],
    pub glyph: char,
    pub colors: [Color; 3],
    pub transparent: [bool; 3],
    pub dangerous: [bool; 3],
    /// Expected ticks per density step; zero or less never decays.
    pub half_life: i32,
}

const fn entry(
    names: [&'static str; 3],
    glyph: char,
    colors: [Color; 3],
    transparent: [bool; 3],
    dangerous: [bool; 3],
    half_life: i32,
) -> FieldTypeInfo {
    FieldTypeInfo {
        names,
        glyph,
        colors,
        transparent,
        dangerous,
        half_life,
    }
}

use Color::*;

const ALL_WHITE: [Color; 3] = [White, White, White];
const CLEAR: [bool; 3] = [true, true, true];
const HARMLESS: [bool; 3] = [false, false, false];
const HARMFUL: [bool; 3] = [true, true, true];

static CATALOG: [FieldTypeInfo; 20] = [
    // Null
    entry(["", "", ""], '%', ALL_WHITE, CLEAR, HARMLESS, 0),
    // Blood
    entry(
        ["blood splatter", "blood stain", "puddle of blood"],
        '%',
        [Red, Red, Red],
        CLEAR,
        HARMLESS,
        2500,
    ),
    // Bile
    entry(
        ["bile splatter", "bile stain", "puddle of bile"],
        '%',
        [Pink, Pink, Pink],
        CLEAR,
        HARMLESS,
        2500,
    ),
    // Web
    entry(
        ["cobwebs", "webs", "thick webs"],
        '}',
        ALL_WHITE,
        [true, true, false],
        HARMLESS,
        0,
    ),
    // Slime
    entry(
        ["slime trail", "slime stain", "puddle of slime"],
        '%',
        [LightGreen, LightGreen, Green],
        CLEAR,
        HARMLESS,
        2500,
    ),
    // Acid
    entry(
        ["acid splatter", "acid streak", "pool of acid"],
        '5',
        [LightGreen, Green, Green],
        CLEAR,
        HARMFUL,
        10,
    ),
    // Sap
    entry(
        ["sap splatter", "glob of sap", "pool of sap"],
        '5',
        [Yellow, Brown, Brown],
        CLEAR,
        HARMFUL,
        20,
    ),
    // Fire
    entry(
        ["small fire", "fire", "raging fire"],
        '4',
        [Yellow, LightRed, Red],
        CLEAR,
        HARMFUL,
        800,
    ),
    // Smoke
    entry(
        ["thin smoke", "smoke", "thick smoke"],
        '8',
        [White, LightGray, DarkGray],
        [true, false, false],
        [false, true, true],
        300,
    ),
    // ToxicGas
    entry(
        ["hazy cloud", "toxic gas", "thick toxic gas"],
        '8',
        [White, LightGreen, Green],
        [true, false, false],
        [false, true, true],
        900,
    ),
    // TearGas
    entry(
        ["hazy cloud", "tear gas", "thick tear gas"],
        '8',
        [White, Yellow, Brown],
        [true, false, false],
        HARMFUL,
        600,
    ),
    // NukeGas
    entry(
        ["hazy cloud", "radioactive gas", "thick radioactive gas"],
        '8',
        [White, LightGreen, Green],
        [true, true, false],
        HARMFUL,
        1000,
    ),
    // GasVent
    entry(
        ["gas vent", "gas vent", "gas vent"],
        '%',
        ALL_WHITE,
        CLEAR,
        HARMLESS,
        0,
    ),
    // FireVent
    entry(["", "", ""], '&', ALL_WHITE, CLEAR, HARMLESS, 0),
    // FlameBurst
    entry(
        ["fire", "fire", "fire"],
        '5',
        [Red, Red, Red],
        CLEAR,
        HARMFUL,
        0,
    ),
    // Electricity
    entry(
        ["sparks", "electric crackle", "electric cloud"],
        '9',
        [White, Cyan, Blue],
        CLEAR,
        HARMFUL,
        2,
    ),
    // Fatigue
    entry(
        ["odd ripple", "swirling air", "tear in reality"],
        '*',
        [LightGray, DarkGray, Magenta],
        [true, true, false],
        HARMLESS,
        0,
    ),
    // PushItems
    entry(["", "", ""], '&', ALL_WHITE, CLEAR, HARMLESS, 0),
    // ShockVent
    entry(["", "", ""], '&', ALL_WHITE, CLEAR, HARMLESS, 0),
    // AcidVent
    entry(["", "", ""], '&', ALL_WHITE, CLEAR, HARMLESS, 0),
];

fn slot(density: i32) -> usize {
    (density.clamp(MIN_DENSITY, MAX_DENSITY) - 1) as usize
}

/// Catalog entry for a field type.
#[must_use]
pub fn info(field_type: FieldType) -> &'static FieldTypeInfo {
    &CATALOG[field_type as usize]
}

#[must_use]
pub fn is_dangerous(field_type: FieldType, density: i32) -> bool {
    info(field_type).dangerous[slot(density)]
}

#[must_use]
pub fn display_name(field_type: FieldType, density: i32) -> &'static str {
    info(field_type).names[slot(density)]
}

#[must_use]
pub fn is_transparent(field_type: FieldType, density: i32) -> bool {
    info(field_type).transparent[slot(density)]
}

#[must_use]
pub fn color(field_type: FieldType, density: i32) -> Color {
    info(field_type).colors[slot(density)]
}

/// Hidden mechanisms (vents, pushers) draw with `&` and stay invisible on the map.
#[must_use]
pub fn is_hidden(field_type: FieldType) -> bool {
    info(field_type).glyph == '&'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lines_up_with_enum() {
        assert_eq!(info(FieldType::Fire).names[2], "raging fire");
        assert_eq!(info(FieldType::Electricity).half_life, 2);
        assert_eq!(info(FieldType::AcidVent).glyph, '&');
        assert_eq!(CATALOG.len(), FieldType::ACTIVE.len() + 1);
    }

    #[test]
    fn test_density_variants() {
        assert!(!is_dangerous(FieldType::Smoke, 1));
        assert!(is_dangerous(FieldType::Smoke, 2));
        assert_eq!(display_name(FieldType::ToxicGas, 3), "thick toxic gas");
        assert!(is_transparent(FieldType::Web, 2));
        assert!(!is_transparent(FieldType::Web, 3));
        assert_eq!(color(FieldType::Fire, 1), Color::Yellow);
    }

    #[test]
    fn test_out_of_range_density_clamps_to_nearest_variant() {
        assert_eq!(display_name(FieldType::Fire, 9), "raging fire");
        assert_eq!(display_name(FieldType::Fire, 0), "small fire");
    }

    #[test]
    fn test_permanent_types_have_no_half_life() {
        for t in [
            FieldType::Web,
            FieldType::GasVent,
            FieldType::Fatigue,
            FieldType::ShockVent,
        ] {
            assert!(info(t).half_life <= 0);
        }
        assert!(is_hidden(FieldType::PushItems));
        assert!(!is_hidden(FieldType::Fire));
    }
}
