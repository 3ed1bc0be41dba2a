//! The whole-list root: category → ordered items.

use crate::domain::category::Category;
use crate::domain::item::Item;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from category to its ordered item sequence.
///
/// Serialized transparently as a JSON object keyed by category display name.
/// A category that was used and then emptied keeps its (empty) entry, so a
/// list round-trips exactly through export and import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoppingList {
    categories: BTreeMap<Category, Vec<Item>>,
}

impl ShoppingList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Items of a category in display order; empty if the category was never used.
    #[must_use]
    pub fn items(&self, category: Category) -> &[Item] {
        self.categories.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Mutable access to an existing category sequence.
    pub fn get_mut(&mut self, category: Category) -> Option<&mut Vec<Item>> {
        self.categories.get_mut(&category)
    }

    /// Mutable access to a category sequence, creating it when absent.
    pub fn entry(&mut self, category: Category) -> &mut Vec<Item> {
        self.categories.entry(category).or_default()
    }

    /// Replaces a category sequence wholesale.
    pub fn insert(&mut self, category: Category, items: Vec<Item>) {
        self.categories.insert(category, items);
    }

    /// Iterates categories that have an entry, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[Item])> {
        self.categories.iter().map(|(c, items)| (*c, items.as_slice()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Category, &mut Vec<Item>)> {
        self.categories.iter_mut().map(|(c, items)| (*c, items))
    }

    /// Total number of items across all categories.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}
