//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the terminal host (main.rs) and the
//! domain/storage/gesture layers and implements the event-driven flow that
//! keeps the list, the render tree and persistence in step.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Command → Event → handle_event → State Mutations → Actions → Session side effects
//!                        ↑                                           ↓
//!                        └──────────── fired long-press timers ──────┘
//! ```
//!
//! # Modules
//!
//! - [`items`]: The item store, the only owner of the list
//! - [`lock`]: Lock mode and the draggable-flag sync
//! - [`actions`]: Side effect commands and user notices
//! - [`handler`]: Event processing and state transitions
//! - [`state`]: Central application state container
//! - [`timers`]: Virtual clock for long-press timers
//! - [`command`]: Line command parser used by the terminal host
//! - [`session`]: Runtime that executes actions

pub mod actions;
pub mod command;
pub mod handler;
pub mod items;
pub mod lock;
pub mod session;
pub mod state;
pub mod timers;

pub use actions::{Action, Notice};
pub use handler::{handle_event, Event};
pub use items::ItemStore;
pub use lock::LockMode;
pub use session::Session;
pub use state::AppState;
pub use timers::TimerQueue;
