//! Key catalog for item materials, effect types, enchantments, and colors.
//!
//! Descriptors name things either by legacy numeric id or by symbolic name.
//! The catalog only resolves those keys to canonical values; it knows
//! nothing about what a server actually has loaded.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// An item material (item type).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Material {
    /// Legacy numeric id.
    pub id: u16,
    /// Canonical lowercase name.
    pub name: Arc<str>,
    /// Whether the native data byte is stored as `15 - value`.
    pub inverts_data: bool,
}

impl Material {
    /// Creates a material with a non-inverted data byte.
    #[must_use]
    pub fn new(id: u16, name: &str) -> Self {
        Self {
            id,
            name: normalize(name).into(),
            inverts_data: false,
        }
    }

    /// Marks this material as storing its color byte inverted.
    #[must_use]
    pub fn with_inverted_data(mut self) -> Self {
        self.inverts_data = true;
        self
    }

    /// Converts a descriptor data byte to the native byte, and back.
    ///
    /// The conversion is its own inverse.
    #[must_use]
    pub fn convert_data(&self, data: u8) -> u8 {
        if self.inverts_data {
            15u8.saturating_sub(data & 0x0f)
        } else {
            data
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A timed status effect type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EffectType {
    /// Legacy numeric id.
    pub id: u16,
    /// Canonical lowercase name.
    pub name: Arc<str>,
}

impl EffectType {
    /// Creates an effect type.
    #[must_use]
    pub fn new(id: u16, name: &str) -> Self {
        Self {
            id,
            name: normalize(name).into(),
        }
    }
}

impl fmt::Display for EffectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An item enchantment.
///
/// Ordered by id so enchantment lists serialize deterministically.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Enchantment {
    /// Legacy numeric id.
    pub id: u16,
    /// Canonical lowercase name.
    pub name: Arc<str>,
}

impl Enchantment {
    /// Creates an enchantment.
    #[must_use]
    pub fn new(id: u16, name: &str) -> Self {
        Self {
            id,
            name: normalize(name).into(),
        }
    }
}

impl fmt::Display for Enchantment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The sixteen dye colors, usable as item data by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DyeColor {
    /// White.
    White,
    /// Orange.
    Orange,
    /// Magenta.
    Magenta,
    /// Light blue.
    LightBlue,
    /// Yellow.
    Yellow,
    /// Lime.
    Lime,
    /// Pink.
    Pink,
    /// Gray.
    Gray,
    /// Silver (light gray).
    Silver,
    /// Cyan.
    Cyan,
    /// Purple.
    Purple,
    /// Blue.
    Blue,
    /// Brown.
    Brown,
    /// Green.
    Green,
    /// Red.
    Red,
    /// Black.
    Black,
}

impl DyeColor {
    /// All colors, in wool data order.
    pub const ALL: [DyeColor; 16] = [
        Self::White,
        Self::Orange,
        Self::Magenta,
        Self::LightBlue,
        Self::Yellow,
        Self::Lime,
        Self::Pink,
        Self::Gray,
        Self::Silver,
        Self::Cyan,
        Self::Purple,
        Self::Blue,
        Self::Brown,
        Self::Green,
        Self::Red,
        Self::Black,
    ];

    /// The dye data byte of this color (black is 0, white is 15).
    #[must_use]
    pub fn dye_data(self) -> u8 {
        15 - self.wool_data()
    }

    /// The wool data byte of this color (white is 0, black is 15).
    #[must_use]
    pub fn wool_data(self) -> u8 {
        // Variants are declared in wool order.
        self as u8
    }

    /// Canonical lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Orange => "orange",
            Self::Magenta => "magenta",
            Self::LightBlue => "light_blue",
            Self::Yellow => "yellow",
            Self::Lime => "lime",
            Self::Pink => "pink",
            Self::Gray => "gray",
            Self::Silver => "silver",
            Self::Cyan => "cyan",
            Self::Purple => "purple",
            Self::Blue => "blue",
            Self::Brown => "brown",
            Self::Green => "green",
            Self::Red => "red",
            Self::Black => "black",
        }
    }

    /// Looks up a color by name, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let key = normalize(name);
        Self::ALL.into_iter().find(|c| c.name() == key)
    }
}

/// An entry keyed by numeric id and by normalized name.
trait Keyed {
    fn id(&self) -> u16;
    fn name(&self) -> &Arc<str>;
}

macro_rules! impl_keyed {
    ($($ty:ty),*) => {$(
        impl Keyed for $ty {
            fn id(&self) -> u16 {
                self.id
            }
            fn name(&self) -> &Arc<str> {
                &self.name
            }
        }
    )*};
}

impl_keyed!(Material, EffectType, Enchantment);

/// Entries indexed by id and by name.
///
/// Inserting an id that is already present replaces its entry in place and
/// drops the old entry's name.
#[derive(Clone, Debug)]
struct Table<T> {
    entries: Vec<T>,
    ids: HashMap<u16, usize>,
    names: HashMap<Arc<str>, usize>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            ids: HashMap::new(),
            names: HashMap::new(),
        }
    }
}

impl<T: Keyed> Table<T> {
    fn insert(&mut self, entry: T) {
        let index = match self.ids.get(&entry.id()) {
            Some(&index) => {
                let old = self.entries[index].name().clone();
                if self.names.get(&old) == Some(&index) {
                    self.names.remove(&old);
                }
                self.entries[index] = entry;
                index
            }
            None => {
                let index = self.entries.len();
                self.ids.insert(entry.id(), index);
                self.entries.push(entry);
                index
            }
        };
        let name = self.entries[index].name().clone();
        self.names.insert(name, index);
    }

    fn by_id(&self, id: u16) -> Option<&T> {
        self.ids.get(&id).map(|&i| &self.entries[i])
    }

    fn by_name(&self, name: &str) -> Option<&T> {
        self.names
            .get(normalize(name).as_str())
            .map(|&i| &self.entries[i])
    }
}

/// Lookup tables for every key a descriptor can name.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    materials: Table<Material>,
    effects: Table<EffectType>,
    enchantments: Table<Enchantment>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog with the standard legacy id tables.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for &(id, name) in STANDARD_MATERIALS {
            let material = Material::new(id, name);
            let material = if INVERTED_DATA_MATERIALS.contains(&id) {
                material.with_inverted_data()
            } else {
                material
            };
            catalog.materials.insert(material);
        }
        for &(id, name) in STANDARD_EFFECTS {
            catalog.effects.insert(EffectType::new(id, name));
        }
        for &(id, name) in STANDARD_ENCHANTMENTS {
            catalog.enchantments.insert(Enchantment::new(id, name));
        }
        catalog
    }

    /// Adds a material, replacing any with the same id.
    #[must_use]
    pub fn with_material(mut self, material: Material) -> Self {
        self.materials.insert(material);
        self
    }

    /// Adds an effect type, replacing any with the same id.
    #[must_use]
    pub fn with_effect_type(mut self, effect: EffectType) -> Self {
        self.effects.insert(effect);
        self
    }

    /// Adds an enchantment, replacing any with the same id.
    #[must_use]
    pub fn with_enchantment(mut self, enchantment: Enchantment) -> Self {
        self.enchantments.insert(enchantment);
        self
    }

    /// Looks up a material by numeric id.
    #[must_use]
    pub fn material_by_id(&self, id: u16) -> Option<&Material> {
        self.materials.by_id(id)
    }

    /// Looks up a material by name, ignoring case.
    #[must_use]
    pub fn material_by_name(&self, name: &str) -> Option<&Material> {
        self.materials.by_name(name)
    }

    /// Looks up an effect type by numeric id.
    #[must_use]
    pub fn effect_by_id(&self, id: u16) -> Option<&EffectType> {
        self.effects.by_id(id)
    }

    /// Looks up an effect type by name, ignoring case.
    #[must_use]
    pub fn effect_by_name(&self, name: &str) -> Option<&EffectType> {
        self.effects.by_name(name)
    }

    /// Looks up an enchantment by numeric id.
    #[must_use]
    pub fn enchantment_by_id(&self, id: u16) -> Option<&Enchantment> {
        self.enchantments.by_id(id)
    }

    /// Looks up an enchantment by name, ignoring case.
    #[must_use]
    pub fn enchantment_by_name(&self, name: &str) -> Option<&Enchantment> {
        self.enchantments.by_name(name)
    }

    /// Number of known materials.
    #[must_use]
    pub fn material_count(&self) -> usize {
        self.materials.entries.len()
    }

    /// Iterates over known effect types.
    pub fn effect_types(&self) -> impl Iterator<Item = &EffectType> {
        self.effects.entries.iter()
    }
}

/// Normalizes a symbolic key: lowercase, with spaces and dashes as underscores.
#[must_use]
pub fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

// Wool stores its color byte inverted relative to dye data.
const INVERTED_DATA_MATERIALS: &[u16] = &[35];

const STANDARD_MATERIALS: &[(u16, &str)] = &[
    (0, "air"),
    (1, "stone"),
    (2, "grass"),
    (3, "dirt"),
    (4, "cobblestone"),
    (5, "wood"),
    (6, "sapling"),
    (7, "bedrock"),
    (12, "sand"),
    (13, "gravel"),
    (14, "gold_ore"),
    (15, "iron_ore"),
    (16, "coal_ore"),
    (17, "log"),
    (18, "leaves"),
    (20, "glass"),
    (24, "sandstone"),
    (30, "web"),
    (35, "wool"),
    (41, "gold_block"),
    (42, "iron_block"),
    (44, "step"),
    (45, "brick"),
    (46, "tnt"),
    (47, "bookshelf"),
    (49, "obsidian"),
    (50, "torch"),
    (54, "chest"),
    (56, "diamond_ore"),
    (57, "diamond_block"),
    (58, "workbench"),
    (61, "furnace"),
    (65, "ladder"),
    (81, "cactus"),
    (86, "pumpkin"),
    (89, "glowstone"),
    (91, "jack_o_lantern"),
    (103, "melon_block"),
    (116, "enchantment_table"),
    (133, "emerald_block"),
    (256, "iron_spade"),
    (257, "iron_pickaxe"),
    (258, "iron_axe"),
    (259, "flint_and_steel"),
    (260, "apple"),
    (261, "bow"),
    (262, "arrow"),
    (263, "coal"),
    (264, "diamond"),
    (265, "iron_ingot"),
    (266, "gold_ingot"),
    (267, "iron_sword"),
    (268, "wood_sword"),
    (269, "wood_spade"),
    (270, "wood_pickaxe"),
    (271, "wood_axe"),
    (272, "stone_sword"),
    (273, "stone_spade"),
    (274, "stone_pickaxe"),
    (275, "stone_axe"),
    (276, "diamond_sword"),
    (277, "diamond_spade"),
    (278, "diamond_pickaxe"),
    (279, "diamond_axe"),
    (280, "stick"),
    (281, "bowl"),
    (282, "mushroom_soup"),
    (283, "gold_sword"),
    (287, "string"),
    (288, "feather"),
    (289, "sulphur"),
    (297, "bread"),
    (298, "leather_helmet"),
    (299, "leather_chestplate"),
    (300, "leather_leggings"),
    (301, "leather_boots"),
    (302, "chainmail_helmet"),
    (303, "chainmail_chestplate"),
    (304, "chainmail_leggings"),
    (305, "chainmail_boots"),
    (306, "iron_helmet"),
    (307, "iron_chestplate"),
    (308, "iron_leggings"),
    (309, "iron_boots"),
    (310, "diamond_helmet"),
    (311, "diamond_chestplate"),
    (312, "diamond_leggings"),
    (313, "diamond_boots"),
    (314, "gold_helmet"),
    (315, "gold_chestplate"),
    (316, "gold_leggings"),
    (317, "gold_boots"),
    (319, "pork"),
    (320, "grilled_pork"),
    (322, "golden_apple"),
    (325, "bucket"),
    (326, "water_bucket"),
    (327, "lava_bucket"),
    (331, "redstone"),
    (332, "snow_ball"),
    (334, "leather"),
    (339, "paper"),
    (340, "book"),
    (341, "slime_ball"),
    (344, "egg"),
    (345, "compass"),
    (346, "fishing_rod"),
    (347, "watch"),
    (348, "glowstone_dust"),
    (349, "raw_fish"),
    (350, "cooked_fish"),
    (351, "ink_sack"),
    (352, "bone"),
    (353, "sugar"),
    (354, "cake"),
    (357, "cookie"),
    (359, "shears"),
    (360, "melon"),
    (363, "raw_beef"),
    (364, "cooked_beef"),
    (365, "raw_chicken"),
    (366, "cooked_chicken"),
    (367, "rotten_flesh"),
    (368, "ender_pearl"),
    (369, "blaze_rod"),
    (373, "potion"),
    (374, "glass_bottle"),
    (376, "fermented_spider_eye"),
    (377, "blaze_powder"),
    (378, "magma_cream"),
    (381, "eye_of_ender"),
    (382, "speckled_melon"),
    (383, "monster_egg"),
    (384, "exp_bottle"),
    (385, "fireball"),
    (388, "emerald"),
    (391, "carrot_item"),
    (392, "potato_item"),
    (393, "baked_potato"),
    (396, "golden_carrot"),
    (397, "skull_item"),
    (399, "nether_star"),
    (400, "pumpkin_pie"),
    (403, "enchanted_book"),
    (417, "iron_barding"),
    (418, "gold_barding"),
    (419, "diamond_barding"),
    (420, "leash"),
    (421, "name_tag"),
];

const STANDARD_EFFECTS: &[(u16, &str)] = &[
    (1, "speed"),
    (2, "slow"),
    (3, "fast_digging"),
    (4, "slow_digging"),
    (5, "increase_damage"),
    (6, "heal"),
    (7, "harm"),
    (8, "jump"),
    (9, "confusion"),
    (10, "regeneration"),
    (11, "damage_resistance"),
    (12, "fire_resistance"),
    (13, "water_breathing"),
    (14, "invisibility"),
    (15, "blindness"),
    (16, "night_vision"),
    (17, "hunger"),
    (18, "weakness"),
    (19, "poison"),
    (20, "wither"),
    (21, "health_boost"),
    (22, "absorption"),
    (23, "saturation"),
];

const STANDARD_ENCHANTMENTS: &[(u16, &str)] = &[
    (0, "protection_environmental"),
    (1, "protection_fire"),
    (2, "protection_fall"),
    (3, "protection_explosions"),
    (4, "protection_projectile"),
    (5, "oxygen"),
    (6, "water_worker"),
    (7, "thorns"),
    (16, "damage_all"),
    (17, "damage_undead"),
    (18, "damage_arthropods"),
    (19, "knockback"),
    (20, "fire_aspect"),
    (21, "loot_bonus_mobs"),
    (32, "dig_speed"),
    (33, "silk_touch"),
    (34, "durability"),
    (35, "loot_bonus_blocks"),
    (48, "arrow_damage"),
    (49, "arrow_knockback"),
    (50, "arrow_fire"),
    (51, "arrow_infinite"),
    (61, "luck"),
    (62, "lure"),
];
