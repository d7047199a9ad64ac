//! Grantable values.
//!
//! A grantable is anything that can be granted to, taken from, or checked
//! against a recipient: money, permissions, status effects, items, and
//! groups of those. Every variant renders back to a canonical descriptor
//! through `Display`.

use std::fmt;
use std::sync::Arc;

use crate::capability::{Capabilities, Recipient};
use crate::currency::Currency;
use crate::effect::Effect;
use crate::group::Group;
use crate::item::Item;
use crate::permission::Permission;

/// Grant, take, and check operations against a recipient.
///
/// `Display` must produce a descriptor that parses back to an equivalent value.
pub trait Grant: fmt::Debug + fmt::Display + Send + Sync {
    /// Gives this grantable to the recipient. Returns true on success.
    fn grant(&self, caps: &Capabilities, recipient: &Recipient) -> bool;

    /// Takes an equivalent grantable from the recipient. Returns true on success.
    fn take(&self, caps: &Capabilities, recipient: &Recipient) -> bool;

    /// Returns true if the recipient has this grantable or an equivalent.
    fn has(&self, caps: &Capabilities, recipient: &Recipient) -> bool;
}

/// A parsed descriptor token.
#[derive(Clone, Debug)]
pub enum Grantable {
    /// Economy money.
    Currency(Currency),
    /// A permission node.
    Permission(Permission),
    /// A timed status effect.
    Effect(Effect),
    /// An inventory item.
    Item(Item),
    /// An ordered composite.
    Group(Group),
    /// A value produced by a custom-registered kind.
    Custom(Arc<dyn Grant>),
}

impl Grantable {
    /// Short kind name (`currency`, `permission`, `effect`, `item`, `group`, `custom`).
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Currency(_) => "currency",
            Self::Permission(_) => "permission",
            Self::Effect(_) => "effect",
            Self::Item(_) => "item",
            Self::Group(_) => "group",
            Self::Custom(_) => "custom",
        }
    }

    /// Human-readable summary, e.g. `diamond x3` or `$5`.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Item(item) => item.summary(),
            Self::Group(group) => {
                let parts: Vec<_> = group.iter().map(Grantable::summary).collect();
                parts.join(", ")
            }
            other => other.to_string(),
        }
    }

    /// Returns the item, if this is one.
    #[must_use]
    pub fn as_item(&self) -> Option<&Item> {
        match self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Returns the group, if this is one.
    #[must_use]
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(group) => Some(group),
            _ => None,
        }
    }

    fn as_grant(&self) -> &dyn Grant {
        match self {
            Self::Currency(g) => g,
            Self::Permission(g) => g,
            Self::Effect(g) => g,
            Self::Item(g) => g,
            Self::Group(g) => g,
            Self::Custom(g) => g.as_ref(),
        }
    }
}

impl Grant for Grantable {
    fn grant(&self, caps: &Capabilities, recipient: &Recipient) -> bool {
        self.as_grant().grant(caps, recipient)
    }

    fn take(&self, caps: &Capabilities, recipient: &Recipient) -> bool {
        self.as_grant().take(caps, recipient)
    }

    fn has(&self, caps: &Capabilities, recipient: &Recipient) -> bool {
        self.as_grant().has(caps, recipient)
    }
}

impl fmt::Display for Grantable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_grant(), f)
    }
}

/// Custom values compare by their canonical descriptor.
impl PartialEq for Grantable {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Currency(a), Self::Currency(b)) => a == b,
            (Self::Permission(a), Self::Permission(b)) => a == b,
            (Self::Effect(a), Self::Effect(b)) => a == b,
            (Self::Item(a), Self::Item(b)) => a == b,
            (Self::Group(a), Self::Group(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => {
                Arc::ptr_eq(a, b) || a.to_string() == b.to_string()
            }
            _ => false,
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Grantable {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_variant!(Currency, Permission, Effect, Item, Group);
