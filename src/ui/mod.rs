//! User interface layer: render tree, terminal drawing and themes.
//!
//! # Architecture
//!
//! ```text
//! ItemStore → RenderTree (geometry, drag flags) → render → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`tree`]: The positioned projection of the list used for hit-testing
//! - [`renderer`]: Line-based terminal drawing of the tree
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod renderer;
pub mod theme;
pub mod tree;

pub use renderer::render;
pub use theme::Theme;
pub use tree::{Container, LayoutMetrics, ListNode, RenderTree};
