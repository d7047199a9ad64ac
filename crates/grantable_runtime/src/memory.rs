//! In-memory recipient backends.
//!
//! [`MemoryBackend`] implements every capability trait over plain maps. The
//! REPL executes grantables against it, and tests use it as a fake.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use grantable_foundation::EffectType;
use grantable_language::{
    Capabilities, Economy, Effect, EffectHost, Inventory, ItemStack, PermissionBackend, Recipient,
};

use crate::config::InventoryConfig;

#[derive(Debug, Default)]
struct State {
    balances: HashMap<Recipient, f64>,
    permissions: HashMap<Recipient, BTreeSet<String>>,
    effects: HashMap<Recipient, BTreeMap<u16, Effect>>,
    inventories: HashMap<Recipient, Vec<Option<ItemStack>>>,
}

/// Balances, permissions, effects, and inventories held in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    config: InventoryConfig,
    state: Mutex<State>,
}

impl MemoryBackend {
    /// Creates a backend with the default inventory size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend with the given inventory size.
    #[must_use]
    pub fn with_inventory_config(config: InventoryConfig) -> Self {
        Self {
            config,
            state: Mutex::default(),
        }
    }

    /// A capability bundle with every handle pointing at this backend.
    #[must_use]
    pub fn capabilities(self: &Arc<Self>) -> Capabilities {
        Capabilities::new()
            .with_economy(self.clone())
            .with_permissions(self.clone())
            .with_effects(self.clone())
            .with_inventory(self.clone())
    }

    /// The recipient's balance.
    #[must_use]
    pub fn balance(&self, recipient: &Recipient) -> f64 {
        self.lock().balances.get(recipient).copied().unwrap_or(0.0)
    }

    /// The recipient's permission nodes, sorted.
    #[must_use]
    pub fn permission_nodes(&self, recipient: &Recipient) -> Vec<String> {
        self.lock()
            .permissions
            .get(recipient)
            .map(|nodes| nodes.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// The recipient's active effects, ordered by effect id.
    #[must_use]
    pub fn active_effects(&self, recipient: &Recipient) -> Vec<Effect> {
        self.lock()
            .effects
            .get(recipient)
            .map(|effects| effects.values().cloned().collect())
            .unwrap_or_default()
    }

    /// The recipient's non-empty stacks, in slot order.
    #[must_use]
    pub fn stacks(&self, recipient: &Recipient) -> Vec<ItemStack> {
        self.lock()
            .inventories
            .get(recipient)
            .map(|slots| slots.iter().flatten().cloned().collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn empty_inventory(&self) -> Vec<Option<ItemStack>> {
        vec![None; self.config.slots]
    }
}

impl Economy for MemoryBackend {
    fn deposit(&self, recipient: &Recipient, amount: f64) -> bool {
        if amount < 0.0 {
            return false;
        }
        *self.lock().balances.entry(recipient.clone()).or_default() += amount;
        true
    }

    fn withdraw(&self, recipient: &Recipient, amount: f64) -> bool {
        let mut state = self.lock();
        let balance = state.balances.entry(recipient.clone()).or_default();
        if amount < 0.0 || *balance < amount {
            return false;
        }
        *balance -= amount;
        true
    }

    fn has(&self, recipient: &Recipient, amount: f64) -> bool {
        self.balance(recipient) >= amount
    }
}

impl PermissionBackend for MemoryBackend {
    fn add(&self, recipient: &Recipient, permission: &str) -> bool {
        self.lock()
            .permissions
            .entry(recipient.clone())
            .or_default()
            .insert(permission.to_string());
        true
    }

    fn remove(&self, recipient: &Recipient, permission: &str) -> bool {
        self.lock()
            .permissions
            .get_mut(recipient)
            .is_some_and(|nodes| nodes.remove(permission))
    }

    fn has(&self, recipient: &Recipient, permission: &str) -> bool {
        self.lock()
            .permissions
            .get(recipient)
            .is_some_and(|nodes| nodes.contains(permission))
    }
}

impl EffectHost for MemoryBackend {
    fn apply(&self, recipient: &Recipient, effect: &Effect) -> bool {
        self.lock()
            .effects
            .entry(recipient.clone())
            .or_default()
            .insert(effect.kind().id, effect.clone());
        true
    }

    fn remove(&self, recipient: &Recipient, kind: &EffectType) -> bool {
        self.lock()
            .effects
            .get_mut(recipient)
            .is_some_and(|effects| effects.remove(&kind.id).is_some())
    }

    fn is_active(&self, recipient: &Recipient, kind: &EffectType) -> bool {
        self.lock()
            .effects
            .get(recipient)
            .is_some_and(|effects| effects.contains_key(&kind.id))
    }
}

impl Inventory for MemoryBackend {
    /// Tops up similar stacks first, then fills empty slots. Whatever fits
    /// is kept even when the rest does not.
    fn add(&self, recipient: &Recipient, stack: ItemStack) -> bool {
        let max_stack = self.config.max_stack;
        let empty = self.empty_inventory();
        let mut state = self.lock();
        let slots = state
            .inventories
            .entry(recipient.clone())
            .or_insert(empty);
        let mut remaining = stack.amount;

        for existing in slots.iter_mut().flatten() {
            if remaining == 0 {
                break;
            }
            if existing.is_similar(&stack) && existing.amount < max_stack {
                let moved = (max_stack - existing.amount).min(remaining);
                existing.amount += moved;
                remaining -= moved;
            }
        }
        for slot in slots.iter_mut().filter(|slot| slot.is_none()) {
            if remaining == 0 {
                break;
            }
            let moved = remaining.min(max_stack);
            *slot = Some(ItemStack {
                amount: moved,
                ..stack.clone()
            });
            remaining -= moved;
        }
        remaining == 0
    }

    fn contents(&self, recipient: &Recipient) -> Vec<Option<ItemStack>> {
        self.lock()
            .inventories
            .get(recipient)
            .cloned()
            .unwrap_or_else(|| self.empty_inventory())
    }

    fn remove_matching(
        &self,
        recipient: &Recipient,
        matches: &dyn Fn(&ItemStack) -> bool,
        amount: u32,
    ) -> bool {
        let mut state = self.lock();
        let Some(slots) = state.inventories.get_mut(recipient) else {
            return amount == 0;
        };

        let held: u64 = slots
            .iter()
            .flatten()
            .filter(|stack| matches(stack))
            .map(|stack| u64::from(stack.amount))
            .sum();
        if held < u64::from(amount) {
            return false;
        }

        let mut remaining = amount;
        for slot in slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            let Some(stack) = slot.as_mut().filter(|stack| matches(stack)) else {
                continue;
            };
            let removed = stack.amount.min(remaining);
            stack.amount -= removed;
            remaining -= removed;
            if stack.amount == 0 {
                *slot = None;
            }
        }
        true
    }
}
