use serde::{Deserialize, Serialize};

/// Lowest density an active field may have.
pub const MIN_DENSITY: i32 = 1;
/// Highest density an active field may have.
pub const MAX_DENSITY: i32 = 3;

/// Every kind of transient phenomenon a tile can hold.
///
/// The discriminant order is not persisted; saves go through [`FieldType::key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    Null,
    Blood,
    Bile,
    Web,
    Slime,
    Acid,
    Sap,
    Fire,
    Smoke,
    ToxicGas,
    TearGas,
    NukeGas,
    GasVent,
    FireVent,
    FlameBurst,
    Electricity,
    Fatigue,
    PushItems,
    ShockVent,
    AcidVent,
}

impl FieldType {
    /// All non-null field types, in catalog order.
    pub const ACTIVE: [FieldType; 19] = [
        FieldType::Blood,
        FieldType::Bile,
        FieldType::Web,
        FieldType::Slime,
        FieldType::Acid,
        FieldType::Sap,
        FieldType::Fire,
        FieldType::Smoke,
        FieldType::ToxicGas,
        FieldType::TearGas,
        FieldType::NukeGas,
        FieldType::GasVent,
        FieldType::FireVent,
        FieldType::FlameBurst,
        FieldType::Electricity,
        FieldType::Fatigue,
        FieldType::PushItems,
        FieldType::ShockVent,
        FieldType::AcidVent,
    ];

    /// Stable save-file key. `Null` has none: an empty tile is never written.
    #[must_use]
    pub fn key(self) -> Option<&'static str> {
        let key = match self {
            FieldType::Null => return None,
            FieldType::Blood => "blood",
            FieldType::Bile => "bile",
            FieldType::Web => "web",
            FieldType::Slime => "slime",
            FieldType::Acid => "acid",
            FieldType::Sap => "sap",
            FieldType::Fire => "fire",
            FieldType::Smoke => "smoke",
            FieldType::ToxicGas => "toxic_gas",
            FieldType::TearGas => "tear_gas",
            FieldType::NukeGas => "nuke_gas",
            FieldType::GasVent => "gas_vent",
            FieldType::FireVent => "fire_vent",
            FieldType::FlameBurst => "flame_burst",
            FieldType::Electricity => "electricity",
            FieldType::Fatigue => "fatigue",
            FieldType::PushItems => "push_items",
            FieldType::ShockVent => "shock_vent",
            FieldType::AcidVent => "acid_vent",
        };
        Some(key)
    }

    /// Inverse of [`FieldType::key`]. Unknown keys yield `None`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ACTIVE.iter().copied().find(|t| t.key() == Some(key))
    }

    /// Empty tiles and cosmetic stains; placing a new field overwrites these.
    #[must_use]
    pub fn is_null_like(self) -> bool {
        matches!(
            self,
            FieldType::Null | FieldType::Blood | FieldType::Bile | FieldType::Slime
        )
    }

    /// Position in the gas upgrade chain: smoke < tear gas < toxic gas < nuke gas.
    #[must_use]
    pub fn gas_rank(self) -> Option<u8> {
        match self {
            FieldType::Smoke => Some(0),
            FieldType::TearGas => Some(1),
            FieldType::ToxicGas => Some(2),
            FieldType::NukeGas => Some(3),
            _ => None,
        }
    }
}

/// Per-tile field state.
///
/// `field_type` is only switched between active kinds through [`FieldCell::convert`];
/// creating and clearing cells is the owning grid's job so that its live count
/// stays exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldCell {
    field_type: FieldType,
    pub density: i32,
    /// Decay clock. Fire keeps its fuel reserve here as a negative value and the
    /// acid vent counts its recharge with it.
    pub age: i32,
    /// Passes survived. Zero means the cell was created during the current pass.
    pub ticks_alive: u32,
}

impl FieldCell {
    /// A freshly created cell, skipped by the pass that created it.
    #[must_use]
    pub fn new(field_type: FieldType, density: i32, age: i32) -> Self {
        Self {
            field_type,
            density,
            age,
            ticks_alive: 0,
        }
    }

    /// A cell that takes part in the next pass, e.g. one restored from a save.
    #[must_use]
    pub fn mature(field_type: FieldType, density: i32, age: i32) -> Self {
        Self {
            ticks_alive: 1,
            ..Self::new(field_type, density, age)
        }
    }

    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.field_type == FieldType::Null
    }

    #[must_use]
    pub fn is(&self, field_type: FieldType) -> bool {
        self.field_type == field_type
    }

    #[must_use]
    pub fn is_null_like(&self) -> bool {
        self.field_type.is_null_like()
    }

    #[must_use]
    pub fn is_newborn(&self) -> bool {
        !self.is_empty() && self.ticks_alive == 0
    }

    /// Switches an active cell to another active kind in place.
    ///
    /// Returns `false` (and leaves the cell untouched) when either side is `Null`.
    pub fn convert(&mut self, field_type: FieldType) -> bool {
        if self.is_empty() || field_type == FieldType::Null {
            return false;
        }
        self.field_type = field_type;
        true
    }

    /// Clamps an out-of-range density back into `[MIN_DENSITY, MAX_DENSITY]`.
    ///
    /// Returns the offending value when a repair was needed.
    pub fn repair_density(&mut self) -> Option<i32> {
        if self.is_empty() || (MIN_DENSITY..=MAX_DENSITY).contains(&self.density) {
            return None;
        }
        let bad = self.density;
        self.density = bad.clamp(MIN_DENSITY, MAX_DENSITY);
        Some(bad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip_for_every_active_type() {
        for t in FieldType::ACTIVE {
            let key = t.key().expect("active types have keys");
            assert_eq!(FieldType::from_key(key), Some(t));
        }
        assert_eq!(FieldType::Null.key(), None);
        assert_eq!(FieldType::from_key("plasma"), None);
    }

    #[test]
    fn test_serde_names_match_keys() {
        let json = serde_json::to_string(&FieldType::ToxicGas).unwrap();
        assert_eq!(json, "\"toxic_gas\"");
    }

    #[test]
    fn test_gas_rank_ordering() {
        assert!(FieldType::Smoke.gas_rank() < FieldType::TearGas.gas_rank());
        assert!(FieldType::TearGas.gas_rank() < FieldType::ToxicGas.gas_rank());
        assert!(FieldType::ToxicGas.gas_rank() < FieldType::NukeGas.gas_rank());
        assert_eq!(FieldType::Fire.gas_rank(), None);
    }

    #[test]
    fn test_convert_refuses_null() {
        let mut empty = FieldCell::default();
        assert!(!empty.convert(FieldType::Fire));
        assert!(empty.is_empty());

        let mut smoke = FieldCell::new(FieldType::Smoke, 2, 0);
        assert!(!smoke.convert(FieldType::Null));
        assert!(smoke.convert(FieldType::TearGas));
        assert!(smoke.is(FieldType::TearGas));
    }

    #[test]
    fn test_repair_density() {
        let mut cell = FieldCell::mature(FieldType::Fire, 7, 0);
        assert_eq!(cell.repair_density(), Some(7));
        assert_eq!(cell.density, 3);

        let mut cell = FieldCell::mature(FieldType::Acid, -2, 0);
        assert_eq!(cell.repair_density(), Some(-2));
        assert_eq!(cell.density, 1);

        let mut fine = FieldCell::mature(FieldType::Acid, 2, 0);
        assert_eq!(fine.repair_density(), None);
    }
}
