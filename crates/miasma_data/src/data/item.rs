use serde::{Deserialize, Serialize};

/// What an item is made of. Fire and acid react to these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Liquid,
    Veggy,
    Flesh,
    Powder,
    Cotton,
    Wool,
    Paper,
    Plastic,
    Leather,
    Glass,
    Wood,
    Stone,
    Iron,
    Steel,
    Kevlar,
    Silver,
}

/// Ammunition families. Only the ones that matter for cook-off are distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmmoType {
    Batteries,
    Nails,
    Bb,
    Bolts,
    Arrows,
    Pistol,
    Rifle,
    Shotgun,
    Gasoline,
}

impl AmmoType {
    /// Whether a round of this kind detonates when heated.
    #[must_use]
    pub fn cooks_off(self) -> bool {
        !matches!(
            self,
            AmmoType::Batteries
                | AmmoType::Nails
                | AmmoType::Bb
                | AmmoType::Bolts
                | AmmoType::Arrows
        )
    }
}

/// A loose item lying on a tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    /// Primary material first; an item counts as made of any listed material.
    pub materials: Vec<Material>,
    pub volume: i32,
    /// Heat damage accumulated so far.
    pub burnt: i32,
    /// Corrosion damage accumulated so far.
    pub damage: i32,
    #[serde(default)]
    pub contents: Vec<Item>,
    #[serde(default)]
    pub ammo: Option<AmmoType>,
    /// Distilled spirits: burn hot and fast.
    #[serde(default)]
    pub spirits: bool,
    /// Small hard objects that push-item fields throw around.
    #[serde(default)]
    pub throwable: bool,
    /// Turn the item was created or last dropped.
    #[serde(default)]
    pub birthday: i64,
}

impl Item {
    #[must_use]
    pub fn new(name: impl Into<String>, material: Material, volume: i32) -> Self {
        Self {
            name: name.into(),
            materials: vec![material],
            volume,
            burnt: 0,
            damage: 0,
            contents: Vec::new(),
            ammo: None,
            spirits: false,
            throwable: false,
            birthday: 0,
        }
    }

    #[must_use]
    pub fn with_contents(mut self, contents: Vec<Item>) -> Self {
        self.contents = contents;
        self
    }

    #[must_use]
    pub fn with_ammo(mut self, ammo: AmmoType) -> Self {
        self.ammo = Some(ammo);
        self
    }

    #[must_use]
    pub fn as_spirits(mut self) -> Self {
        self.spirits = true;
        self
    }

    #[must_use]
    pub fn as_throwable(mut self) -> Self {
        self.throwable = true;
        self
    }

    #[must_use]
    pub fn made_of(&self, material: Material) -> bool {
        self.materials.contains(&material)
    }

    #[must_use]
    pub fn is_ammo(&self) -> bool {
        self.ammo.is_some()
    }

    /// Adds heat damage; returns `true` once the item is burnt through.
    pub fn burn(&mut self, amount: i32) -> bool {
        self.burnt += amount;
        self.burnt >= self.volume * 3
    }

    /// Whether a fire on this item's tile can spread to it.
    #[must_use]
    pub fn is_fuel(&self) -> bool {
        [
            Material::Paper,
            Material::Wood,
            Material::Cotton,
            Material::Powder,
            Material::Veggy,
        ]
        .iter()
        .any(|m| self.made_of(*m))
            || self.is_ammo()
            || self.spirits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burn_threshold_is_three_times_volume() {
        let mut plank = Item::new("plank", Material::Wood, 2);
        assert!(!plank.burn(5));
        assert!(plank.burn(1));
        assert_eq!(plank.burnt, 6);
    }

    #[test]
    fn test_fuel_detection() {
        assert!(Item::new("newspaper", Material::Paper, 1).is_fuel());
        assert!(Item::new("whiskey", Material::Liquid, 1).as_spirits().is_fuel());
        assert!(!Item::new("water", Material::Liquid, 1).is_fuel());
        assert!(Item::new("shells", Material::Steel, 1)
            .with_ammo(AmmoType::Shotgun)
            .is_fuel());
    }

    #[test]
    fn test_cook_off_excludes_inert_ammo() {
        assert!(AmmoType::Rifle.cooks_off());
        assert!(!AmmoType::Nails.cooks_off());
        assert!(!AmmoType::Batteries.cooks_off());
    }
}
