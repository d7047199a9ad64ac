//! Item grammar, the default kind.
//!
//! ```text
//! item     ::= type (':' data)? (':' amount)? (' ' enchant (';' enchant)*)?
//! type     ::= MATERIAL_ID | MATERIAL_NAME
//! data     ::= NUMBER (0-15) | COLOR_NAME
//! enchant  ::= (ENCHANT_ID | ENCHANT_NAME) ':' LEVEL
//! ```
//!
//! With two colon parts the second is the amount; with three it is data then
//! amount. Items carry no prefix: anything no other kind claims is an item.
//!
//! The data byte held by an [`Item`] is the descriptor byte, in dye space
//! for numbers and color names alike. Materials that store their color
//! inverted (wool) convert on the way to and from an [`ItemStack`].

use std::collections::BTreeMap;
use std::fmt;

use grantable_foundation::{Catalog, DyeColor, Enchantment, Error, Material, Result};

use crate::capability::{Capabilities, Recipient};
use crate::grantable::Grant;

/// Largest data byte.
pub const MAX_DATA: u8 = 15;

/// A native inventory stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemStack {
    /// The stack's material.
    pub material: Material,
    /// Number of items.
    pub amount: u32,
    /// Native data byte.
    pub data: u8,
    /// Enchantment levels.
    pub enchantments: BTreeMap<Enchantment, u32>,
}

impl ItemStack {
    /// Creates a plain stack with data 0 and no enchantments.
    #[must_use]
    pub fn new(material: Material, amount: u32) -> Self {
        Self {
            material,
            amount,
            data: 0,
            enchantments: BTreeMap::new(),
        }
    }

    /// Returns true if `other` would stack with this one.
    #[must_use]
    pub fn is_similar(&self, other: &ItemStack) -> bool {
        self.material.id == other.material.id
            && self.data == other.data
            && self.enchantments == other.enchantments
    }
}

/// An inventory item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    material: Material,
    amount: u32,
    data: u8,
    enchantments: BTreeMap<Enchantment, u32>,
}

impl Item {
    /// Creates an item with data 0 and no enchantments.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if `amount` is zero.
    pub fn new(material: Material, amount: u32) -> Result<Self> {
        if amount == 0 {
            return Err(Error::invalid_value("amount", "0", "must be at least 1"));
        }
        Ok(Self {
            material,
            amount,
            data: 0,
            enchantments: BTreeMap::new(),
        })
    }

    /// Sets the descriptor data byte.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if `data` is above [`MAX_DATA`].
    pub fn with_data(mut self, data: u8) -> Result<Self> {
        if data > MAX_DATA {
            return Err(Error::invalid_value(
                "data",
                data.to_string(),
                "must be between 0 and 15",
            ));
        }
        self.data = data;
        Ok(self)
    }

    /// Adds (or replaces) an enchantment.
    #[must_use]
    pub fn with_enchantment(mut self, enchantment: Enchantment, level: u32) -> Self {
        self.enchantments.insert(enchantment, level);
        self
    }

    /// The material.
    #[must_use]
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// The number of items.
    #[must_use]
    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// The descriptor data byte.
    #[must_use]
    pub fn data(&self) -> u8 {
        self.data
    }

    /// Enchantment levels, ordered by enchantment id.
    #[must_use]
    pub fn enchantments(&self) -> &BTreeMap<Enchantment, u32> {
        &self.enchantments
    }

    /// Parses an item descriptor.
    ///
    /// Data is always read in dye space, whether written as a number or a
    /// color name, so `wool:14:1` and `wool:orange:1` are the same item. For
    /// wool the stack byte is the inverse (`15 - data`); a numeric wool byte
    /// is not passed through to the stack unchanged.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` for an empty token and `InvalidValue` for an
    /// unknown material, bad data or amount, or a bad enchantment entry.
    pub fn parse(token: &str, catalog: &Catalog) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::empty_input("item"));
        }
        let (base, enchants) = match token.split_once(char::is_whitespace) {
            Some((base, rest)) => (base, Some(rest.trim())),
            None => (token, None),
        };

        let parts: Vec<&str> = base.split(':').collect();
        let (key, data, amount) = match parts.as_slice() {
            [key] => (*key, None, None),
            [key, amount] => (*key, None, Some(*amount)),
            [key, data, amount] => (*key, Some(*data), Some(*amount)),
            _ => {
                return Err(Error::invalid_value(
                    "item",
                    base,
                    "expected '<type>[:data][:amount]'",
                ));
            }
        };

        let material = resolve_material(key, catalog)?;
        let amount = amount.map_or(Ok(1), parse_amount)?;
        let data = data.map_or(Ok(0), parse_data)?;
        let mut item = Self::new(material, amount)?.with_data(data)?;

        if let Some(list) = enchants {
            for entry in list.split(';').map(str::trim).filter(|e| !e.is_empty()) {
                let (enchantment, level) = parse_enchantment(entry, catalog)?;
                item.enchantments.insert(enchantment, level);
            }
        }
        Ok(item)
    }

    /// Builds the native stack, converting the data byte.
    #[must_use]
    pub fn to_stack(&self) -> ItemStack {
        ItemStack {
            material: self.material.clone(),
            amount: self.amount,
            data: self.material.convert_data(self.data),
            enchantments: self.enchantments.clone(),
        }
    }

    /// Reads an item back from a native stack.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` for an empty stack.
    pub fn from_stack(stack: &ItemStack) -> Result<Self> {
        let item = Self::new(stack.material.clone(), stack.amount)?
            .with_data(stack.material.convert_data(stack.data))?;
        Ok(Self {
            enchantments: stack.enchantments.clone(),
            ..item
        })
    }

    /// Human-readable summary, e.g. `diamond x3`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} x{}", self.material.name, self.amount)
    }

    /// Returns true if `stack` is this item's material and data. Amount and
    /// enchantments are ignored.
    #[must_use]
    pub fn matches(&self, stack: &ItemStack) -> bool {
        stack.material.id == self.material.id
            && stack.data == self.material.convert_data(self.data)
    }
}

fn resolve_material(key: &str, catalog: &Catalog) -> Result<Material> {
    let found = if is_numeric(key) {
        key.parse().ok().and_then(|id| catalog.material_by_id(id))
    } else {
        catalog.material_by_name(key)
    };
    found
        .cloned()
        .ok_or_else(|| Error::invalid_value("material", key, "no such material"))
}

fn parse_amount(part: &str) -> Result<u32> {
    match part.parse::<u32>() {
        Ok(0) => Err(Error::invalid_value("amount", part, "must be at least 1")),
        Ok(n) if is_numeric(part) => Ok(n),
        _ => Err(Error::invalid_value("amount", part, "not a positive integer")),
    }
}

/// Parses a data byte, either numeric or a dye color name.
fn parse_data(part: &str) -> Result<u8> {
    if is_numeric(part) {
        return match part.parse::<u8>() {
            Ok(data) if data <= MAX_DATA => Ok(data),
            _ => Err(Error::invalid_value("data", part, "must be between 0 and 15")),
        };
    }
    DyeColor::from_name(part)
        .map(DyeColor::dye_data)
        .ok_or_else(|| Error::invalid_value("data", part, "not a number or color name"))
}

fn parse_enchantment(entry: &str, catalog: &Catalog) -> Result<(Enchantment, u32)> {
    let Some((key, level)) = entry.split_once(':') else {
        return Err(Error::invalid_value(
            "enchantment",
            entry,
            "expected '<enchantment>:<level>'",
        ));
    };
    let (key, level) = (key.trim(), level.trim());
    let found = if is_numeric(key) {
        key.parse().ok().and_then(|id| catalog.enchantment_by_id(id))
    } else {
        catalog.enchantment_by_name(key)
    };
    let enchantment = found
        .cloned()
        .ok_or_else(|| Error::invalid_value("enchantment", key, "no such enchantment"))?;
    let level = level
        .parse::<u32>()
        .ok()
        .filter(|_| is_numeric(level))
        .ok_or_else(|| Error::invalid_value("enchantment level", level, "not an integer"))?;
    Ok((enchantment, level))
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl Grant for Item {
    fn grant(&self, caps: &Capabilities, recipient: &Recipient) -> bool {
        caps.inventory()
            .is_some_and(|inv| inv.add(recipient, self.to_stack()))
    }

    fn take(&self, caps: &Capabilities, recipient: &Recipient) -> bool {
        let matches = |stack: &ItemStack| self.matches(stack);
        caps.inventory()
            .is_some_and(|inv| inv.remove_matching(recipient, &matches, self.amount))
    }

    fn has(&self, caps: &Capabilities, recipient: &Recipient) -> bool {
        caps.inventory().is_some_and(|inv| {
            let total: u64 = inv
                .contents(recipient)
                .iter()
                .flatten()
                .filter(|stack| self.matches(stack))
                .map(|stack| u64::from(stack.amount))
                .sum();
            total >= u64::from(self.amount)
        })
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.material.name)?;
        if self.data != 0 {
            write!(f, ":{}", self.data)?;
        }
        if self.amount > 1 || self.data != 0 {
            write!(f, ":{}", self.amount)?;
        }
        for (i, (enchantment, level)) in self.enchantments.iter().enumerate() {
            let sep = if i == 0 { ' ' } else { ';' };
            write!(f, "{sep}{}:{level}", enchantment.id)?;
        }
        Ok(())
    }
}
