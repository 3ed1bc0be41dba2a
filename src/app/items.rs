//! The item store: the authoritative in-memory shopping list.
//!
//! Every mutation goes through [`ItemStore`] and reports whether it changed
//! anything, so the event handler can emit exactly one persistence save per
//! effective change. Rejections (duplicate or empty names, unknown items,
//! mismatched reorders) are silent no-ops that only show up in debug logs.

use crate::domain::{Category, Item, ItemId, Quantity, ShoppingList};
use std::collections::HashSet;

/// In-memory mapping category → ordered items, with id assignment.
#[derive(Debug, Clone)]
pub struct ItemStore {
    list: ShoppingList,
    next_id: u64,
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new(ShoppingList::new())
    }
}

impl ItemStore {
    /// Adopts `list`, assigning a fresh id to every item.
    #[must_use]
    pub fn new(list: ShoppingList) -> Self {
        let mut store = Self {
            list: ShoppingList::new(),
            next_id: 1,
        };
        store.replace_all(list);
        store
    }

    #[must_use]
    pub const fn list(&self) -> &ShoppingList {
        &self.list
    }

    #[must_use]
    pub fn items(&self, category: Category) -> &[Item] {
        self.list.items(category)
    }

    /// Id of the first item named `name` in `category`.
    #[must_use]
    pub fn find_id(&self, category: Category, name: &str) -> Option<ItemId> {
        self.items(category)
            .iter()
            .find(|item| item.name == name)
            .map(|item| item.id)
    }

    /// Category and item for an id.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<(Category, &Item)> {
        self.list
            .iter()
            .find_map(|(category, items)| items.iter().find(|i| i.id == id).map(|i| (category, i)))
    }

    /// Appends an unselected item with quantity 1.
    ///
    /// The name is trimmed first. Returns `None` without touching the list when
    /// the trimmed name is empty or already present in the category.
    pub fn add(&mut self, category: Category, name: &str) -> Option<ItemId> {
        let name = name.trim();
        if name.is_empty() {
            tracing::debug!(%category, "rejecting empty item name");
            return None;
        }
        if self.find_id(category, name).is_some() {
            tracing::debug!(%category, name, "rejecting duplicate item");
            return None;
        }

        let id = self.allocate_id();
        self.list.entry(category).push(Item::new(id, name));
        tracing::debug!(%category, name, %id, "item added");
        Some(id)
    }

    /// Removes the first item named `name`; `false` if there was none.
    pub fn remove(&mut self, category: Category, name: &str) -> bool {
        let Some(items) = self.list.get_mut(category) else {
            return false;
        };
        let Some(index) = items.iter().position(|item| item.name == name) else {
            return false;
        };
        items.remove(index);
        tracing::debug!(%category, name, "item removed");
        true
    }

    /// Flips the selected flag; `false` if the item does not exist.
    pub fn toggle_selected(&mut self, category: Category, name: &str) -> bool {
        match self.item_mut(category, name) {
            Some(item) => {
                item.selected = !item.selected;
                tracing::debug!(%category, name, selected = item.selected, "selection toggled");
                true
            }
            None => false,
        }
    }

    /// Sets the quantity, clamped to `0..=9`.
    ///
    /// Returns `true` only if the stored quantity actually changed.
    pub fn set_quantity(&mut self, category: Category, name: &str, quantity: i64) -> bool {
        let quantity = Quantity::clamped(quantity);
        match self.item_mut(category, name) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                tracing::debug!(%category, name, %quantity, "quantity changed");
                true
            }
            _ => false,
        }
    }

    /// Reorders a category to match `ordered`.
    ///
    /// The ids must be exactly the category's current ids, each once. Anything
    /// else is rejected and the existing order is kept; a reorder is never
    /// partially applied.
    pub fn replace_order(&mut self, category: Category, ordered: &[ItemId]) -> bool {
        let Some(items) = self.list.get_mut(category) else {
            tracing::debug!(%category, "reorder rejected: category has no items");
            return false;
        };

        let current: HashSet<ItemId> = items.iter().map(|item| item.id).collect();
        let requested: HashSet<ItemId> = ordered.iter().copied().collect();
        if ordered.len() != items.len() || requested.len() != ordered.len() || current != requested {
            tracing::debug!(
                %category,
                current = items.len(),
                requested = ordered.len(),
                "reorder rejected: id set mismatch"
            );
            return false;
        }

        let mut remaining = std::mem::take(items);
        for id in ordered {
            if let Some(pos) = remaining.iter().position(|item| item.id == *id) {
                items.push(remaining.swap_remove(pos));
            }
        }
        true
    }

    /// Replaces the whole list, assigning fresh ids.
    pub fn replace_all(&mut self, mut list: ShoppingList) {
        for (_, items) in list.iter_mut() {
            for item in items.iter_mut() {
                item.id = ItemId::new(self.next_id);
                self.next_id += 1;
            }
        }
        self.list = list;
    }

    fn item_mut(&mut self, category: Category, name: &str) -> Option<&mut Item> {
        self.list
            .get_mut(category)?
            .iter_mut()
            .find(|item| item.name == name)
    }

    fn allocate_id(&mut self) -> ItemId {
        let id = ItemId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(store: &ItemStore, category: Category) -> Vec<&str> {
        store.items(category).iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn add_is_idempotent_per_category() {
        let mut store = ItemStore::default();
        assert!(store.add(Category::Dairy, "Milk").is_some());
        assert!(store.add(Category::Dairy, "Milk").is_none());
        assert!(store.add(Category::Dairy, "  Milk ").is_none());
        assert!(store.add(Category::General, "Milk").is_some());

        let dairy = store.items(Category::Dairy);
        assert_eq!(dairy.len(), 1);
        assert_eq!(dairy[0].quantity.get(), 1);
        assert!(!dairy[0].selected);
    }

    #[test]
    fn blank_names_are_rejected() {
        let mut store = ItemStore::default();
        assert!(store.add(Category::Snacks, "   ").is_none());
        assert!(store.list().is_empty());
    }

    #[test]
    fn remove_only_reports_real_removals() {
        let mut store = ItemStore::default();
        store.add(Category::Canned, "Beans");
        assert!(!store.remove(Category::Canned, "Corn"));
        assert!(!store.remove(Category::Frozen, "Beans"));
        assert!(store.remove(Category::Canned, "Beans"));
        assert!(store.items(Category::Canned).is_empty());
    }

    #[test]
    fn toggling_twice_restores_selection() {
        let mut store = ItemStore::default();
        store.add(Category::Drinks, "Water");
        assert!(store.toggle_selected(Category::Drinks, "Water"));
        assert!(store.items(Category::Drinks)[0].selected);
        assert!(store.toggle_selected(Category::Drinks, "Water"));
        assert!(!store.items(Category::Drinks)[0].selected);
        assert!(!store.toggle_selected(Category::Drinks, "Juice"));
    }

    #[test]
    fn quantity_is_clamped() {
        let mut store = ItemStore::default();
        store.add(Category::Produce, "Apples");
        assert!(store.set_quantity(Category::Produce, "Apples", 15));
        assert_eq!(store.items(Category::Produce)[0].quantity.get(), 9);
        assert!(!store.set_quantity(Category::Produce, "Apples", 9));
        assert!(store.set_quantity(Category::Produce, "Apples", -2));
        assert_eq!(store.items(Category::Produce)[0].quantity.get(), 0);
    }

    #[test]
    fn replace_order_permutes_the_category() {
        let mut store = ItemStore::default();
        let a = store.add(Category::General, "A").unwrap();
        let b = store.add(Category::General, "B").unwrap();
        let c = store.add(Category::General, "C").unwrap();

        assert!(store.replace_order(Category::General, &[c, a, b]));
        assert_eq!(names(&store, Category::General), ["C", "A", "B"]);
    }

    #[test]
    fn replace_order_rejects_mismatched_sets() {
        let mut store = ItemStore::default();
        let a = store.add(Category::General, "A").unwrap();
        let b = store.add(Category::General, "B").unwrap();
        let foreign = store.add(Category::Dairy, "Milk").unwrap();

        assert!(!store.replace_order(Category::General, &[b]));
        assert!(!store.replace_order(Category::General, &[b, b]));
        assert!(!store.replace_order(Category::General, &[b, foreign]));
        assert!(!store.replace_order(Category::General, &[b, a, foreign]));
        assert!(!store.replace_order(Category::Snacks, &[]));
        assert_eq!(names(&store, Category::General), ["A", "B"]);
    }

    #[test]
    fn replace_all_assigns_fresh_ids() {
        let mut store = ItemStore::default();
        let old = store.add(Category::General, "A").unwrap();

        let imported = store.list().clone();
        store.replace_all(imported);

        let new = store.find_id(Category::General, "A").unwrap();
        assert_ne!(old, new);
        assert_eq!(store.get(new).map(|(c, i)| (c, i.name.as_str())), Some((Category::General, "A")));
        assert!(store.get(old).is_none());
    }
}
