//! Kind registry and token dispatcher.
//!
//! The registry holds one entry per kind: a compiled prefix pattern and the
//! function that parses the body left after stripping it. Dispatch order:
//!
//! 1. group tokens (starting with `(`)
//! 2. custom kinds, in registration order
//! 3. built-in kinds: currency, permission, effect
//! 4. the item grammar, on the whole unstripped token
//!
//! Built-in entries never change. Custom entries are append-only and held in
//! an [`im::Vector`] so dispatch works on a cheap snapshot taken under the
//! read lock.

use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use im::Vector;

use grantable_foundation::{Catalog, Error, RegistrationError, Result};

use crate::currency::{self, Currency};
use crate::effect::{self, Effect};
use crate::grantable::Grantable;
use crate::group::Group;
use crate::item::Item;
use crate::pattern::{CompiledPattern, PatternSpec};
use crate::permission::{self, Permission};
use crate::tokenizer::Token;

/// Parses a kind's body (prefix already stripped) into a grantable.
pub type ParseFn = Arc<dyn Fn(&str, &Catalog) -> Result<Grantable> + Send + Sync>;

/// Name of the default kind.
pub const ITEM_KIND: &str = "item";

/// Name of the composite kind.
pub const GROUP_KIND: &str = "group";

#[derive(Clone)]
struct KindEntry {
    name: Arc<str>,
    spec: PatternSpec,
    pattern: CompiledPattern,
    parse: ParseFn,
}

impl KindEntry {
    fn new(name: &str, spec: PatternSpec, pattern: CompiledPattern, parse: ParseFn) -> Self {
        Self {
            name: name.into(),
            spec,
            pattern,
            parse,
        }
    }

    fn info(&self, builtin: bool) -> KindInfo {
        KindInfo {
            name: self.name.to_string(),
            pattern: Some(self.spec.clone()),
            builtin,
        }
    }
}

impl fmt::Debug for KindEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindEntry")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// A registered kind, as listed by [`GrantableRegistry::kinds`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KindInfo {
    /// Kind name.
    pub name: String,
    /// Its symbol and keyword, if it has a prefix.
    pub pattern: Option<PatternSpec>,
    /// True for kinds installed by the registry itself.
    pub builtin: bool,
}

/// The kind registry and dispatcher.
pub struct GrantableRegistry {
    catalog: Arc<Catalog>,
    builtins: Vec<KindEntry>,
    custom: RwLock<Vector<Arc<KindEntry>>>,
}

impl GrantableRegistry {
    /// Creates a registry with the built-in kinds, resolving keys against
    /// `catalog`.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let builtins = vec![
            KindEntry::new(
                "currency",
                currency::pattern_spec(),
                currency::PATTERN.clone(),
                Arc::new(|body: &str, _: &Catalog| Currency::parse_body(body).map(Grantable::from)),
            ),
            KindEntry::new(
                "permission",
                permission::pattern_spec(),
                permission::PATTERN.clone(),
                Arc::new(|body: &str, _: &Catalog| Permission::parse_body(body).map(Grantable::from)),
            ),
            KindEntry::new(
                "effect",
                effect::pattern_spec(),
                effect::PATTERN.clone(),
                Arc::new(|body: &str, catalog: &Catalog| {
                    Effect::parse_body(body, catalog).map(Grantable::from)
                }),
            ),
        ];
        Self {
            catalog,
            builtins,
            custom: RwLock::new(Vector::new()),
        }
    }

    /// The catalog keys are resolved against.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Registers a custom kind.
    ///
    /// Returns `Ok(false)` without changing anything if a kind with this
    /// name is already known.
    ///
    /// # Errors
    ///
    /// Returns a `Registration` error for an empty name or invalid pattern
    /// metadata. Nothing is installed in that case.
    pub fn register<F>(&self, name: &str, spec: PatternSpec, parse: F) -> Result<bool>
    where
        F: Fn(&str, &Catalog) -> Result<Grantable> + Send + Sync + 'static,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistrationError::EmptyName.into());
        }
        let pattern = spec.compile(name)?;

        let mut custom = self.custom.write().unwrap_or_else(PoisonError::into_inner);
        if self.is_builtin(name) || custom.iter().any(|e| e.name.eq_ignore_ascii_case(name)) {
            return Ok(false);
        }
        custom.push_back(Arc::new(KindEntry::new(
            name,
            spec,
            pattern,
            Arc::new(parse),
        )));
        Ok(true)
    }

    /// Returns true if a kind with this name is known.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.is_builtin(name) || self.custom_entry(name).is_some()
    }

    /// Lists every kind in dispatch order, ending with the item and group
    /// kinds.
    #[must_use]
    pub fn kinds(&self) -> Vec<KindInfo> {
        let mut kinds: Vec<_> = self.snapshot().iter().map(|e| e.info(false)).collect();
        kinds.extend(self.builtins.iter().map(|e| e.info(true)));
        for name in [ITEM_KIND, GROUP_KIND] {
            kinds.push(KindInfo {
                name: name.to_string(),
                pattern: None,
                builtin: true,
            });
        }
        kinds
    }

    /// Parses one token into a grantable.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` for a blank token, the failing kind's error for a
    /// token whose prefix matched, and `UnknownKind` if nothing matched and
    /// the item grammar rejected the token. The error context names the
    /// token and every enclosing group.
    pub fn dispatch(&self, token: &str) -> Result<Grantable> {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::empty_input("descriptor token"));
        }
        let result = if token.starts_with('(') {
            Group::parse(token, self).map(Grantable::Group)
        } else {
            self.dispatch_plain(token)
        };
        result.map_err(|err| err.in_token(token))
    }

    /// Parses one tokenizer token.
    ///
    /// # Errors
    ///
    /// See [`GrantableRegistry::dispatch`].
    pub fn dispatch_token(&self, token: &Token) -> Result<Grantable> {
        match token {
            Token::Group(text) => Group::parse(text, self)
                .map(Grantable::Group)
                .map_err(|err| err.in_token(text)),
            Token::Plain(text) => self.dispatch(text),
        }
    }

    /// Parses a token as a specific kind, stripping that kind's prefix if
    /// present.
    ///
    /// # Errors
    ///
    /// Returns `UnknownKind` if no kind has this name, otherwise whatever the
    /// kind's grammar reports.
    pub fn parse_as(&self, kind: &str, token: &str) -> Result<Grantable> {
        let token = token.trim();
        let result = if kind.eq_ignore_ascii_case(ITEM_KIND) {
            Item::parse(token, &self.catalog).map(Grantable::Item)
        } else if kind.eq_ignore_ascii_case(GROUP_KIND) {
            Group::parse(token, self).map(Grantable::Group)
        } else if let Some(entry) = self.builtin_entry(kind) {
            (entry.parse)(entry.pattern.trim(token), &self.catalog)
        } else if let Some(entry) = self.custom_entry(kind) {
            (entry.parse)(entry.pattern.trim(token), &self.catalog)
        } else {
            return Err(Error::unknown_kind(kind, "no kind registered under this name"));
        };
        result.map_err(|err| err.in_token(token))
    }

    fn dispatch_plain(&self, token: &str) -> Result<Grantable> {
        let custom = self.snapshot();
        let entries = custom.iter().map(|e| &**e).chain(self.builtins.iter());
        for entry in entries {
            if let Some(body) = entry.pattern.strip(token) {
                return (entry.parse)(body, &self.catalog);
            }
        }
        Item::parse(token, &self.catalog)
            .map(Grantable::Item)
            .map_err(|err| Error::unknown_kind(token, err.to_string()))
    }

    fn snapshot(&self) -> Vector<Arc<KindEntry>> {
        self.custom
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn is_builtin(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(ITEM_KIND)
            || name.eq_ignore_ascii_case(GROUP_KIND)
            || self.builtin_entry(name).is_some()
    }

    fn builtin_entry(&self, name: &str) -> Option<&KindEntry> {
        self.builtins
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    fn custom_entry(&self, name: &str) -> Option<Arc<KindEntry>> {
        self.snapshot()
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .cloned()
    }
}

impl Default for GrantableRegistry {
    /// A registry over [`Catalog::standard`].
    fn default() -> Self {
        Self::new(Arc::new(Catalog::standard()))
    }
}

impl fmt::Debug for GrantableRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrantableRegistry")
            .field("builtins", &self.builtins)
            .field("custom", &self.snapshot())
            .finish_non_exhaustive()
    }
}

static GLOBAL: LazyLock<GrantableRegistry> = LazyLock::new(GrantableRegistry::default);

/// The process-wide registry over the standard catalog.
#[must_use]
pub fn global() -> &'static GrantableRegistry {
    &GLOBAL
}
