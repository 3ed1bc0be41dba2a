//! Gesture engine: pointer and touch drags unified into one reorder protocol.
//!
//! # Modules
//!
//! - [`engine`]: the phase machine, drag session and commit
//! - [`position`]: insertion-point computation from pointer height
//!
//! # Example
//!
//! ```
//! use shoplist::app::{items::ItemStore, lock::LockMode};
//! use shoplist::domain::Category;
//! use shoplist::gesture::{GestureContext, GestureEngine, GestureInput};
//! use shoplist::ui::tree::{LayoutMetrics, RenderTree};
//!
//! let mut store = ItemStore::default();
//! let a = store.add(Category::General, "A").unwrap();
//! let b = store.add(Category::General, "B").unwrap();
//! let mut tree = RenderTree::render(&store, LayoutMetrics::default(), true);
//! let above_a = tree.node(a).unwrap().top;
//!
//! let mut engine = GestureEngine::default();
//! let mut ctx = GestureContext { store: &mut store, tree: &mut tree, lock: LockMode::Unlocked, now_ms: 0 };
//! engine.handle(GestureInput::DragStart { item: b }, &mut ctx);
//! engine.handle(GestureInput::DragOver { y: above_a }, &mut ctx);
//! engine.handle(GestureInput::DragEnd, &mut ctx);
//!
//! assert_eq!(store.items(Category::General)[0].name, "B");
//! ```

pub mod engine;
pub mod position;

pub use engine::{
    DragSession, GestureContext, GestureEffect, GestureEngine, GestureInput, GesturePhase, Press,
    TimerId, LONG_PRESS_DELAY_MS,
};
pub use position::{find_insertion_point, InsertionPoint};
