//! Lock mode: the gate consulted before any drag starts.
//!
//! While [`LockMode::Locked`] no drag session may be created. Taps, clicks,
//! quantity changes, adds and deletes stay available. Toggling the mode
//! rewrites the draggable flag of every rendered node in one pass.

use crate::ui::tree::RenderTree;
use std::fmt;

/// Editing mode of the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LockMode {
    /// Reordering disabled. The initial mode.
    #[default]
    Locked,
    /// Reordering enabled.
    Unlocked,
}

impl LockMode {
    #[must_use]
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Locked)
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Locked => Self::Unlocked,
            Self::Unlocked => Self::Locked,
        }
    }

    /// Lock icon shown next to the list title.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Locked => "🔒",
            Self::Unlocked => "🔓",
        }
    }
}

impl fmt::Display for LockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
        })
    }
}

/// Flips `mode` and syncs the tree's draggable flags to the new mode.
///
/// Any gesture in flight must be settled by the caller first.
pub fn toggle(mode: &mut LockMode, tree: &mut RenderTree) -> LockMode {
    *mode = mode.toggled();
    tree.set_draggable(!mode.is_locked());
    tracing::debug!(mode = %mode, "lock toggled");
    *mode
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::items::ItemStore;
    use crate::domain::Category;
    use crate::ui::tree::LayoutMetrics;

    #[test]
    fn starts_locked() {
        assert!(LockMode::default().is_locked());
    }

    #[test]
    fn toggling_twice_restores_mode_and_flags() {
        let mut store = ItemStore::default();
        store.add(Category::Cleaning, "Soap");
        let mut mode = LockMode::default();
        let mut tree = RenderTree::render(&store, LayoutMetrics::default(), false);

        assert_eq!(toggle(&mut mode, &mut tree), LockMode::Unlocked);
        assert!(tree.container(Category::Cleaning).unwrap().nodes[0].draggable);

        assert_eq!(toggle(&mut mode, &mut tree), LockMode::Locked);
        assert!(!tree.container(Category::Cleaning).unwrap().nodes[0].draggable);
        assert!(!tree.is_draggable());
    }
}
