//! Ordered registry of cleaning strategies.

use std::collections::HashSet;
use std::path::Path;

use crate::strategy::builtin::all_strategies;
use crate::strategy::CleaningStrategy;

/// Ordered set of strategies.
///
/// Classification is first-match-wins in registration order, so a directory
/// carrying several markers (a `package.json` next to a `Cargo.toml`) is
/// always attributed to the same family.
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn CleaningStrategy>>,
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.ids())
            .finish()
    }
}

impl StrategyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in strategies.
    pub fn builtin() -> Self {
        Self {
            strategies: all_strategies(),
        }
    }

    /// Create a registry with only the specified built-in strategy ids.
    ///
    /// # Example
    /// ```
    /// use spektr::strategy::StrategyRegistry;
    ///
    /// let registry = StrategyRegistry::with_types(&["rust", "node"]);
    /// assert_eq!(registry.len(), 2);
    /// ```
    pub fn with_types(ids: &[&str]) -> Self {
        let id_set: HashSet<&str> = ids.iter().copied().collect();
        Self {
            strategies: all_strategies()
                .into_iter()
                .filter(|s| id_set.contains(s.id()))
                .collect(),
        }
    }

    /// Create a registry excluding the specified built-in strategy ids.
    pub fn without_types(ids: &[&str]) -> Self {
        let id_set: HashSet<&str> = ids.iter().copied().collect();
        Self {
            strategies: all_strategies()
                .into_iter()
                .filter(|s| !id_set.contains(s.id()))
                .collect(),
        }
    }

    /// Append a strategy. It is consulted after every strategy registered before it.
    pub fn register(&mut self, strategy: Box<dyn CleaningStrategy>) {
        self.strategies.push(strategy);
    }

    /// First strategy, in registration order, recognizing `dir` as a project root.
    pub fn classify(&self, dir: &Path) -> Option<&dyn CleaningStrategy> {
        self.strategies
            .iter()
            .find(|s| s.detect(dir))
            .map(|s| s.as_ref())
    }

    pub fn strategies(&self) -> &[Box<dyn CleaningStrategy>] {
        &self.strategies
    }

    /// Look up a strategy by display name.
    pub fn get(&self, name: &str) -> Option<&dyn CleaningStrategy> {
        self.strategies
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.as_ref())
    }

    /// Display names in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
