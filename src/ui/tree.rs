//! Render tree: the item store projected into positioned containers and nodes.
//!
//! The tree plays the part a DOM plays in a browser host. Every category gets
//! a [`Container`] (header plus one [`ListNode`] per item), stacked vertically
//! in display order, with empty categories rendered header-only. Node geometry
//! is derived from [`LayoutMetrics`] and recomputed whenever the node order
//! changes, so hit-testing during a drag always sees the current visual order.
//!
//! During a drag the tree's order is ahead of the store: nodes are moved
//! visually on every pointer move and the store only learns the new order on
//! commit.

use crate::app::items::ItemStore;
use crate::domain::{Category, ItemId, Quantity};

/// Vertical sizes used to lay out the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub row_height: f64,
    pub header_height: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            row_height: 40.0,
            header_height: 32.0,
        }
    }
}

/// One rendered item row.
#[derive(Debug, Clone, PartialEq)]
pub struct ListNode {
    pub id: ItemId,
    pub name: String,
    pub selected: bool,
    pub quantity: Quantity,
    pub top: f64,
    pub height: f64,
    pub draggable: bool,
    pub dragging: bool,
}

impl ListNode {
    /// Vertical center of the row.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// A category block: header followed by its nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub category: Category,
    pub top: f64,
    pub header_height: f64,
    pub nodes: Vec<ListNode>,
}

impl Container {
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.header_height + self.nodes.iter().map(|n| n.height).sum::<f64>()
    }

    #[must_use]
    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }

    /// Ids in visual order.
    #[must_use]
    pub fn order(&self) -> Vec<ItemId> {
        self.nodes.iter().map(|n| n.id).collect()
    }
}

/// Positioned projection of the whole list.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTree {
    containers: Vec<Container>,
    metrics: LayoutMetrics,
    draggable: bool,
}

impl RenderTree {
    /// Builds the tree for `store`.
    ///
    /// `draggable` is the initial value of every node's draggable flag, i.e.
    /// `!locked`.
    #[must_use]
    pub fn render(store: &ItemStore, metrics: LayoutMetrics, draggable: bool) -> Self {
        let mut tree = Self {
            containers: Vec::with_capacity(Category::ALL.len()),
            metrics,
            draggable,
        };
        tree.refresh(store);
        tree
    }

    /// Rebuilds every container from the store, dropping any visual-only order.
    pub fn refresh(&mut self, store: &ItemStore) {
        self.containers = Category::ALL
            .iter()
            .map(|&category| Container {
                category,
                top: 0.0,
                header_height: self.metrics.header_height,
                nodes: store
                    .items(category)
                    .iter()
                    .map(|item| ListNode {
                        id: item.id,
                        name: item.name.clone(),
                        selected: item.selected,
                        quantity: item.quantity,
                        top: 0.0,
                        height: self.metrics.row_height,
                        draggable: self.draggable,
                        dragging: false,
                    })
                    .collect(),
            })
            .collect();
        self.relayout();
        tracing::trace!(containers = self.containers.len(), "render tree refreshed");
    }

    #[must_use]
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    #[must_use]
    pub const fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    #[must_use]
    pub const fn is_draggable(&self) -> bool {
        self.draggable
    }

    #[must_use]
    pub fn container(&self, category: Category) -> Option<&Container> {
        self.containers.iter().find(|c| c.category == category)
    }

    /// Container whose vertical extent contains `y`, if any.
    #[must_use]
    pub fn container_at(&self, y: f64) -> Option<&Container> {
        self.containers.iter().find(|c| c.contains_y(y))
    }

    /// Category and visual index of a node.
    #[must_use]
    pub fn locate(&self, id: ItemId) -> Option<(Category, usize)> {
        self.containers.iter().find_map(|c| {
            c.nodes
                .iter()
                .position(|n| n.id == id)
                .map(|index| (c.category, index))
        })
    }

    #[must_use]
    pub fn node(&self, id: ItemId) -> Option<&ListNode> {
        self.containers
            .iter()
            .flat_map(|c| c.nodes.iter())
            .find(|n| n.id == id)
    }

    /// Sets the draggable flag on every node in one pass.
    pub fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
        for node in self.containers.iter_mut().flat_map(|c| c.nodes.iter_mut()) {
            node.draggable = draggable;
        }
    }

    /// Marks or unmarks a node as the one being dragged.
    pub fn set_dragging(&mut self, id: ItemId, dragging: bool) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.dragging = dragging;
                true
            }
            None => false,
        }
    }

    /// Moves `id` within `category`, inserting it before `before` or at the end.
    ///
    /// Follows DOM `insertBefore` semantics: the node is detached first, then
    /// reinserted. Returns the node's new index, or `None` when either node is
    /// not in `category`.
    pub fn move_node(
        &mut self,
        category: Category,
        id: ItemId,
        before: Option<ItemId>,
    ) -> Option<usize> {
        let container = self.containers.iter_mut().find(|c| c.category == category)?;
        if before == Some(id) {
            return container.nodes.iter().position(|n| n.id == id);
        }
        if let Some(anchor) = before {
            container.nodes.iter().position(|n| n.id == anchor)?;
        }

        let from = container.nodes.iter().position(|n| n.id == id)?;
        let node = container.nodes.remove(from);
        let to = match before {
            Some(anchor) => container
                .nodes
                .iter()
                .position(|n| n.id == anchor)
                .unwrap_or(container.nodes.len()),
            None => container.nodes.len(),
        };
        container.nodes.insert(to, node);
        self.relayout();
        Some(to)
    }

    /// Ids of a category's nodes in visual order.
    #[must_use]
    pub fn order(&self, category: Category) -> Vec<ItemId> {
        self.container(category).map(Container::order).unwrap_or_default()
    }

    fn node_mut(&mut self, id: ItemId) -> Option<&mut ListNode> {
        self.containers
            .iter_mut()
            .flat_map(|c| c.nodes.iter_mut())
            .find(|n| n.id == id)
    }

    fn relayout(&mut self) {
        let mut y = 0.0;
        for container in &mut self.containers {
            container.top = y;
            y += container.header_height;
            for node in &mut container.nodes {
                node.top = y;
                y += node.height;
            }
        }
    }
}
