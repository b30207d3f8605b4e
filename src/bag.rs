use crate::errors::{DecisionError, DecisionResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Item counts carried into battle, keyed by item name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bag {
    items: BTreeMap<String, u32>,
}

impl Bag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items<'a>(items: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        let mut bag = Self::new();
        for (name, count) in items {
            bag.add(name, count);
        }
        bag
    }

    pub fn add(&mut self, name: &str, count: u32) {
        if count == 0 {
            return;
        }
        *self.items.entry(name.to_string()).or_insert(0) += count;
    }

    pub fn count(&self, name: &str) -> u32 {
        self.items.get(name).copied().unwrap_or(0)
    }

    /// Remove one of `name`, dropping the entry once none are left.
    pub fn take(&mut self, name: &str) -> DecisionResult<()> {
        let count = self
            .items
            .get_mut(name)
            .ok_or_else(|| DecisionError::ItemNotOwned(name.to_string()))?;
        *count -= 1;
        if *count == 0 {
            self.items.remove(name);
        }
        Ok(())
    }

    pub fn items(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(name, count)| (name.as_str(), *count))
    }
}
