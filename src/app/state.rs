//! Application state container.
//!
//! [`AppState`] gathers everything the event handler mutates: the item store,
//! the lock mode, the gesture engine, the render tree and the open share
//! draft. It is built once at startup and passed `&mut` to
//! [`handle_event`](crate::app::handle_event); nothing else holds on to it.

use super::items::ItemStore;
use super::lock::LockMode;
use crate::domain::{Category, ShoppingList};
use crate::gesture::{GestureContext, GestureEngine};
use crate::ui::theme::Theme;
use crate::ui::tree::{LayoutMetrics, RenderTree};

/// Central application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Authoritative list.
    pub store: ItemStore,

    /// Drag gate. Starts locked.
    pub lock: LockMode,

    pub gesture: GestureEngine,

    /// What is on screen. During a drag its order runs ahead of the store.
    pub tree: RenderTree,

    /// Share text waiting to be copied or closed.
    pub share_draft: Option<String>,

    /// Category used by `add` when none is given.
    pub last_category: Category,

    pub theme: Theme,
}

impl AppState {
    /// Creates the state for a freshly loaded list.
    ///
    /// ```
    /// use shoplist::app::AppState;
    /// use shoplist::ui::{theme::Theme, tree::LayoutMetrics};
    /// use shoplist::ShoppingList;
    ///
    /// let state = AppState::new(ShoppingList::new(), LayoutMetrics::default(), 500, Theme::default());
    /// assert!(state.lock.is_locked());
    /// assert!(!state.tree.is_draggable());
    /// ```
    #[must_use]
    pub fn new(list: ShoppingList, metrics: LayoutMetrics, long_press_ms: u64, theme: Theme) -> Self {
        let store = ItemStore::new(list);
        let lock = LockMode::default();
        let tree = RenderTree::render(&store, metrics, !lock.is_locked());
        Self {
            store,
            lock,
            gesture: GestureEngine::new(long_press_ms),
            tree,
            share_draft: None,
            last_category: Category::Produce,
            theme,
        }
    }

    /// Splits the state into the engine and the context its transitions need.
    pub fn gesture_parts(&mut self, now_ms: u64) -> (&mut GestureEngine, GestureContext<'_>) {
        (
            &mut self.gesture,
            GestureContext {
                store: &mut self.store,
                tree: &mut self.tree,
                lock: self.lock,
                now_ms,
            },
        )
    }

    /// Rebuilds the render tree after a store mutation.
    pub fn rerender(&mut self) {
        self.tree.refresh(&self.store);
    }
}
