//! Insertion-point computation for an in-flight drag.

use crate::domain::ItemId;
use crate::ui::tree::Container;

/// Where the dragged node should go within its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionPoint {
    /// Immediately before this sibling.
    Before(ItemId),
    /// After the last sibling.
    End,
}

impl InsertionPoint {
    /// The `insertBefore` anchor, `None` meaning append.
    #[must_use]
    pub const fn anchor(self) -> Option<ItemId> {
        match self {
            Self::Before(id) => Some(id),
            Self::End => None,
        }
    }
}

/// Finds the insertion point for `dragged` at pointer height `y`.
///
/// For each sibling (every node but `dragged`) the offset is
/// `y - (top + height / 2)`. The sibling with the greatest negative offset,
/// i.e. the first one whose midpoint lies below the pointer, becomes the
/// anchor. With no such sibling the node goes to the end.
///
/// ```
/// use shoplist::gesture::{find_insertion_point, InsertionPoint};
/// use shoplist::ui::tree::{Container, ListNode};
/// use shoplist::domain::{Category, ItemId, Quantity};
///
/// let node = |id, top| ListNode {
///     id: ItemId::new(id),
///     name: String::new(),
///     selected: false,
///     quantity: Quantity::ONE,
///     top,
///     height: 40.0,
///     draggable: true,
///     dragging: false,
/// };
/// let container = Container {
///     category: Category::General,
///     top: 0.0,
///     header_height: 32.0,
///     nodes: vec![node(1, 32.0), node(2, 72.0), node(3, 112.0)],
/// };
///
/// let point = find_insertion_point(&container, ItemId::new(3), 40.0);
/// assert_eq!(point, InsertionPoint::Before(ItemId::new(1)));
/// assert_eq!(find_insertion_point(&container, ItemId::new(1), 500.0), InsertionPoint::End);
/// ```
#[must_use]
pub fn find_insertion_point(container: &Container, dragged: ItemId, y: f64) -> InsertionPoint {
    let mut closest: Option<(f64, ItemId)> = None;

    for node in container.nodes.iter().filter(|n| n.id != dragged) {
        let offset = y - node.midpoint();
        if offset < 0.0 && closest.map_or(true, |(best, _)| offset > best) {
            closest = Some((offset, node.id));
        }
    }

    closest.map_or(InsertionPoint::End, |(_, id)| InsertionPoint::Before(id))
}
