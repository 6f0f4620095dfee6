//! Name-to-kind table for every grammar production.

use rustc_hash::FxHashMap;

use crate::{SyntaxKind, SyntaxSet, ast};

/// Errors returned for user-supplied production names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown production `{0}`")]
    UnknownProduction(String),
}

/// A named group of productions, such as `Pat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub members: SyntaxSet,
}

/// Immutable mapping between production names and their kinds, and from
/// kinds to the category they belong to.
///
/// Build it once and pass it around by reference.
#[derive(Debug)]
pub struct KindRegistry {
    by_name: FxHashMap<&'static str, SyntaxKind>,
    categories: Vec<Category>,
    category_of: FxHashMap<SyntaxKind, usize>,
    all: SyntaxSet,
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl KindRegistry {
    pub fn new() -> Self {
        let mut by_name = FxHashMap::default();
        let mut all = SyntaxSet::EMPTY;
        for &kind in SyntaxKind::NODES {
            if let Some(name) = kind.production_name() {
                by_name.insert(name, kind);
            }
            by_name.insert(kind.raw_name(), kind);
            all.insert(kind);
        }

        let categories: Vec<Category> = ast::CATEGORIES
            .iter()
            .map(|&(name, members)| Category { name, members })
            .collect();
        let mut category_of = FxHashMap::default();
        for (index, category) in categories.iter().enumerate() {
            for kind in category.members.iter() {
                let previous = category_of.insert(kind, index);
                debug_assert!(previous.is_none(), "`{kind:?}` belongs to two categories");
            }
        }

        tracing::debug!(
            productions = all.len(),
            categories = categories.len(),
            "kind registry built"
        );
        Self { by_name, categories, category_of, all }
    }

    /// The kind of the production called `name` (`"TuplePat"` or
    /// `"TUPLE_PAT"`).
    ///
    /// # Panics
    ///
    /// When no production has that name.
    #[track_caller]
    pub fn tag_for(&self, name: &str) -> SyntaxKind {
        match self.try_tag_for(name) {
            Ok(kind) => kind,
            Err(error) => panic!("{error}"),
        }
    }

    pub fn try_tag_for(&self, name: &str) -> Result<SyntaxKind, RegistryError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownProduction(name.to_owned()))
    }

    /// Every node kind.
    pub fn all_tags(&self) -> SyntaxSet {
        self.all
    }

    /// Production name of `kind`, falling back to its raw name for tokens.
    pub fn name_of(&self, kind: SyntaxKind) -> &'static str {
        kind.production_name().unwrap_or_else(|| kind.raw_name())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    pub fn category_of(&self, kind: SyntaxKind) -> Option<&Category> {
        self.category_of.get(&kind).map(|&index| &self.categories[index])
    }

    /// Resolves a production or category name to the kinds it stands for.
    pub fn resolve(&self, name: &str) -> Result<SyntaxSet, RegistryError> {
        if let Some(category) = self.category(name) {
            return Ok(category.members);
        }
        self.try_tag_for(name).map(|kind| SyntaxSet::new([kind]))
    }
}
