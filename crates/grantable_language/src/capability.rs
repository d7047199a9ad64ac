//! Recipient-side capabilities.
//!
//! The grammar never mutates a recipient itself. Granting money, permissions,
//! effects, or items goes through these traits, which the host supplies in a
//! [`Capabilities`] bundle. A grantable whose capability is missing simply
//! reports failure.

use std::fmt;
use std::sync::Arc;

use grantable_foundation::EffectType;

use crate::effect::Effect;
use crate::item::ItemStack;

/// The player (or other entity) a grantable is applied to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Recipient {
    name: String,
}

impl Recipient {
    /// Creates a recipient handle.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The recipient's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An economy that holds recipient balances.
pub trait Economy: Send + Sync {
    /// Credits `amount`. Returns true on success.
    fn deposit(&self, recipient: &Recipient, amount: f64) -> bool;
    /// Debits `amount`. Returns true on success.
    fn withdraw(&self, recipient: &Recipient, amount: f64) -> bool;
    /// Returns true if the balance is at least `amount`.
    fn has(&self, recipient: &Recipient, amount: f64) -> bool;
}

/// A permission store.
pub trait PermissionBackend: Send + Sync {
    /// Grants a permission node.
    fn add(&self, recipient: &Recipient, permission: &str) -> bool;
    /// Revokes a permission node.
    fn remove(&self, recipient: &Recipient, permission: &str) -> bool;
    /// Checks a permission node.
    fn has(&self, recipient: &Recipient, permission: &str) -> bool;
}

/// Applies and inspects timed status effects.
pub trait EffectHost: Send + Sync {
    /// Applies an effect. Returns true on success.
    fn apply(&self, recipient: &Recipient, effect: &Effect) -> bool;
    /// Removes any active effect of the given type. Returns true if one was removed.
    fn remove(&self, recipient: &Recipient, kind: &EffectType) -> bool;
    /// Returns true if an effect of the given type is active.
    fn is_active(&self, recipient: &Recipient, kind: &EffectType) -> bool;
}

/// Access to a recipient's inventory slots.
pub trait Inventory: Send + Sync {
    /// Adds a stack. Returns true if all of it fit.
    fn add(&self, recipient: &Recipient, stack: ItemStack) -> bool;
    /// A snapshot of every slot.
    fn contents(&self, recipient: &Recipient) -> Vec<Option<ItemStack>>;
    /// Removes `amount` items from stacks accepted by `matches`, in slot
    /// order, as one step. Nothing is removed unless the full amount is
    /// held. Returns true if it was removed.
    fn remove_matching(
        &self,
        recipient: &Recipient,
        matches: &dyn Fn(&ItemStack) -> bool,
        amount: u32,
    ) -> bool;
}

/// The capability handles grantables are executed against.
#[derive(Clone, Default)]
pub struct Capabilities {
    economy: Option<Arc<dyn Economy>>,
    permissions: Option<Arc<dyn PermissionBackend>>,
    effects: Option<Arc<dyn EffectHost>>,
    inventory: Option<Arc<dyn Inventory>>,
}

impl Capabilities {
    /// Creates an empty bundle; every grant fails until handles are added.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the economy handle.
    #[must_use]
    pub fn with_economy(mut self, economy: Arc<dyn Economy>) -> Self {
        self.economy = Some(economy);
        self
    }

    /// Sets the permission handle.
    #[must_use]
    pub fn with_permissions(mut self, permissions: Arc<dyn PermissionBackend>) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Sets the effect handle.
    #[must_use]
    pub fn with_effects(mut self, effects: Arc<dyn EffectHost>) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Sets the inventory handle.
    #[must_use]
    pub fn with_inventory(mut self, inventory: Arc<dyn Inventory>) -> Self {
        self.inventory = Some(inventory);
        self
    }

    /// The economy, if any.
    #[must_use]
    pub fn economy(&self) -> Option<&dyn Economy> {
        self.economy.as_deref()
    }

    /// The permission backend, if any.
    #[must_use]
    pub fn permissions(&self) -> Option<&dyn PermissionBackend> {
        self.permissions.as_deref()
    }

    /// The effect host, if any.
    #[must_use]
    pub fn effects(&self) -> Option<&dyn EffectHost> {
        self.effects.as_deref()
    }

    /// The inventory accessor, if any.
    #[must_use]
    pub fn inventory(&self) -> Option<&dyn Inventory> {
        self.inventory.as_deref()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("economy", &self.economy.is_some())
            .field("permissions", &self.permissions.is_some())
            .field("effects", &self.effects.is_some())
            .field("inventory", &self.inventory.is_some())
            .finish()
    }
}
