//! Event handling and state transition logic.
//!
//! This module implements the event handler that turns user input into state
//! changes and action sequences. It is the only writer of the item store.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the session (commands, timers, gesture input)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations go through the item store, lock controller or gesture engine
//! 4. Actions are collected and returned for the session to execute
//!
//! # Event Types
//!
//! - **List edits**: `AddItem`, `RemoveItem`, `ToggleSelected`, `SetQuantity`, `Click`
//! - **Reordering**: `Gesture` (pointer, touch and timer input), `ToggleLock`
//! - **Share**: `Share`, `CopyShare`, `CloseShare`
//! - **Transfer**: `Export`, `Import`
//!
//! Every list edit first settles a gesture in flight, so a drag never outlives
//! a change to the list it is reordering.
//!
//! # Example
//!
//! ```
//! use shoplist::app::{handle_event, Action, AppState, Event};
//! use shoplist::domain::Category;
//! use shoplist::ui::{theme::Theme, tree::LayoutMetrics};
//! use shoplist::ShoppingList;
//!
//! let mut state = AppState::new(ShoppingList::new(), LayoutMetrics::default(), 500, Theme::default());
//! let event = Event::AddItem { category: Some(Category::Dairy), name: "Milk".into() };
//! let (render, actions) = handle_event(&mut state, &event)?;
//! assert!(render);
//! assert_eq!(actions, [Action::Persist]);
//! # Ok::<(), shoplist::ShoplistError>(())
//! ```

use crate::app::lock;
use crate::app::{Action, AppState, Notice};
use crate::domain::error::Result;
use crate::domain::{Category, ItemId};
use crate::gesture::{GestureEffect, GestureInput};
use crate::share::{export_json, import_json, share_text};

/// Events delivered to the handler, one at a time, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Adds an item. `None` means the category used by the previous add.
    AddItem {
        category: Option<Category>,
        name: String,
    },
    RemoveItem {
        category: Category,
        name: String,
    },
    ToggleSelected {
        category: Category,
        name: String,
    },
    /// Sets the quantity; out-of-range values are clamped to `0..=9`.
    SetQuantity {
        category: Category,
        name: String,
        quantity: i64,
    },
    /// Pointer click on a node. Toggles selection unless a drag is in flight.
    Click(ItemId),
    ToggleLock,
    /// Raw drag/touch input or a fired long-press timer.
    Gesture {
        input: GestureInput,
        /// Session clock reading when the input arrived.
        at_ms: u64,
    },
    Share,
    CopyShare,
    CloseShare,
    Export,
    /// Replaces the whole list with the contents of an import file.
    Import { contents: String },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The returned flag tells the host whether the view changed and should be
/// redrawn.
///
/// # Errors
///
/// Returns an error only if the list cannot be serialized for export.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::AddItem { category, name } => {
            let category = category.unwrap_or(state.last_category);
            state.last_category = category;
            let mut actions = settle_gesture(state);
            let changed = state.store.add(category, name).is_some();
            let (_, actions) = finish_edit(state, changed, &mut actions);
            Ok((true, actions))
        }
        Event::RemoveItem { category, name } => {
            let mut actions = settle_gesture(state);
            let changed = state.store.remove(*category, name);
            Ok(finish_edit(state, changed, &mut actions))
        }
        Event::ToggleSelected { category, name } => {
            let mut actions = settle_gesture(state);
            let changed = state.store.toggle_selected(*category, name);
            Ok(finish_edit(state, changed, &mut actions))
        }
        Event::SetQuantity {
            category,
            name,
            quantity,
        } => {
            let mut actions = settle_gesture(state);
            let changed = state.store.set_quantity(*category, name, *quantity);
            Ok(finish_edit(state, changed, &mut actions))
        }
        Event::Click(id) => {
            if state.gesture.is_dragging() {
                tracing::debug!(item = %id, "click ignored during drag");
                return Ok((false, vec![]));
            }
            let changed = toggle_by_id(state, *id);
            Ok((changed, if changed { vec![Action::Persist] } else { vec![] }))
        }
        Event::ToggleLock => {
            let actions = settle_gesture(state);
            lock::toggle(&mut state.lock, &mut state.tree);
            tracing::debug!(mode = %state.lock, "lock mode changed");
            Ok((true, actions))
        }
        Event::Gesture { input, at_ms } => {
            let (engine, mut ctx) = state.gesture_parts(*at_ms);
            let effects = engine.handle(*input, &mut ctx);
            Ok(apply_effects(state, effects))
        }
        Event::Share => match share_text(state.store.list()) {
            Some(text) => {
                state.share_draft = Some(text);
                Ok((true, vec![Action::Notify(Notice::ShareReady)]))
            }
            None => {
                state.share_draft = None;
                Ok((false, vec![Action::Notify(Notice::ShareEmpty)]))
            }
        },
        Event::CopyShare => match &state.share_draft {
            Some(text) => Ok((false, vec![Action::CopyToClipboard(text.clone())])),
            None => {
                tracing::debug!("copy requested with no share text open");
                Ok((false, vec![]))
            }
        },
        Event::CloseShare => Ok((state.share_draft.take().is_some(), vec![])),
        Event::Export => {
            let contents = export_json(state.store.list())?;
            Ok((false, vec![Action::WriteExport { contents }]))
        }
        Event::Import { contents } => match import_json(contents) {
            Ok(list) => {
                let mut actions = settle_gesture(state);
                let items = list.item_count();
                state.store.replace_all(list);
                state.rerender();
                actions.push(Action::Persist);
                actions.push(Action::Notify(Notice::Imported { items }));
                Ok((true, actions))
            }
            Err(e) => {
                tracing::debug!(error = %e, "import refused");
                Ok((false, vec![Action::Notify(Notice::ImportFailed(e))]))
            }
        },
    }
}

/// Resolves any gesture in flight before another change touches the list.
fn settle_gesture(state: &mut AppState) -> Vec<Action> {
    if state.gesture.is_idle() {
        return vec![];
    }
    // Settling never reads the clock.
    let (engine, mut ctx) = state.gesture_parts(0);
    let effects = engine.settle(&mut ctx);
    apply_effects(state, effects).1
}

fn finish_edit(state: &mut AppState, changed: bool, actions: &mut Vec<Action>) -> (bool, Vec<Action>) {
    if changed {
        state.rerender();
        if !actions.contains(&Action::Persist) {
            actions.push(Action::Persist);
        }
    }
    (changed || !actions.is_empty(), std::mem::take(actions))
}

fn toggle_by_id(state: &mut AppState, id: ItemId) -> bool {
    let Some((category, name)) = state
        .store
        .get(id)
        .map(|(category, item)| (category, item.name.clone()))
    else {
        tracing::debug!(item = %id, "toggle for unknown item ignored");
        return false;
    };
    let changed = state.store.toggle_selected(category, &name);
    if changed {
        state.rerender();
    }
    changed
}

/// Maps gesture effects onto state changes and runtime actions.
fn apply_effects(state: &mut AppState, effects: Vec<GestureEffect>) -> (bool, Vec<Action>) {
    let mut render = false;
    let mut actions = Vec::new();

    for effect in effects {
        match effect {
            GestureEffect::ScheduleTimer { id, delay_ms } => {
                actions.push(Action::ScheduleTimer { id, delay_ms });
            }
            GestureEffect::CancelTimer(id) => actions.push(Action::CancelTimer(id)),
            GestureEffect::Tap(id) => {
                if toggle_by_id(state, id) {
                    render = true;
                    actions.push(Action::Persist);
                }
            }
            GestureEffect::DragRejected { item } => {
                tracing::debug!(%item, "default drag suppressed");
            }
            GestureEffect::DragStarted { .. } | GestureEffect::Moved { .. } => render = true,
            GestureEffect::Committed { .. } => {
                state.rerender();
                render = true;
                actions.push(Action::Persist);
            }
            GestureEffect::CommitRejected { category } => {
                tracing::debug!(%category, "drag discarded");
                render = true;
            }
        }
    }

    (render, actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::GesturePhase;
    use crate::ui::theme::Theme;
    use crate::ui::tree::LayoutMetrics;
    use crate::ShoppingList;
    use crate::ImportError;

    fn state() -> AppState {
        AppState::new(ShoppingList::new(), LayoutMetrics::default(), 500, Theme::plain())
    }

    fn add(state: &mut AppState, category: Category, name: &str) -> ItemId {
        handle_event(
            state,
            &Event::AddItem {
                category: Some(category),
                name: name.to_string(),
            },
        )
        .unwrap();
        state.store.find_id(category, name).unwrap()
    }

    fn gesture(state: &mut AppState, input: GestureInput) -> Vec<Action> {
        handle_event(state, &Event::Gesture { input, at_ms: 0 }).unwrap().1
    }

    #[test]
    fn duplicate_add_emits_no_persist() {
        let mut state = state();
        add(&mut state, Category::Dairy, "Milk");
        let (_, actions) = handle_event(
            &mut state,
            &Event::AddItem {
                category: None,
                name: "Milk".into(),
            },
        )
        .unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.store.items(Category::Dairy).len(), 1);
    }

    #[test]
    fn add_without_category_reuses_the_last_one() {
        let mut state = state();
        add(&mut state, Category::Frozen, "Peas");
        handle_event(
            &mut state,
            &Event::AddItem {
                category: None,
                name: "Corn".into(),
            },
        )
        .unwrap();
        assert!(state.store.find_id(Category::Frozen, "Corn").is_some());
    }

    #[test]
    fn noop_edits_do_not_persist() {
        let mut state = state();
        let (render, actions) = handle_event(
            &mut state,
            &Event::RemoveItem {
                category: Category::General,
                name: "Ghost".into(),
            },
        )
        .unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn lock_toggle_mid_drag_forces_a_commit() {
        let mut state = state();
        let a = add(&mut state, Category::General, "A");
        let b = add(&mut state, Category::General, "B");
        handle_event(&mut state, &Event::ToggleLock).unwrap();

        gesture(&mut state, GestureInput::DragStart { item: b });
        let y = state.tree.node(a).unwrap().top + 1.0;
        gesture(&mut state, GestureInput::DragOver { y });

        let (_, actions) = handle_event(&mut state, &Event::ToggleLock).unwrap();
        assert_eq!(actions, [Action::Persist]);
        assert!(state.lock.is_locked());
        assert_eq!(state.gesture.phase(), GesturePhase::Idle);
        assert_eq!(state.store.items(Category::General)[0].name, "B");
    }

    #[test]
    fn lock_toggle_cancels_a_pending_press() {
        let mut state = state();
        let a = add(&mut state, Category::General, "A");
        handle_event(&mut state, &Event::ToggleLock).unwrap();

        let scheduled = gesture(&mut state, GestureInput::TouchStart { item: a });
        let [Action::ScheduleTimer { id, .. }] = scheduled.as_slice() else {
            panic!("expected a timer, got {scheduled:?}");
        };
        let id = *id;

        let (_, actions) = handle_event(&mut state, &Event::ToggleLock).unwrap();
        assert_eq!(actions, [Action::CancelTimer(id)]);
        assert!(state.gesture.is_idle());
    }

    #[test]
    fn click_toggles_unless_dragging() {
        let mut state = state();
        let a = add(&mut state, Category::Snacks, "Nuts");
        handle_event(&mut state, &Event::Click(a)).unwrap();
        assert!(state.store.items(Category::Snacks)[0].selected);

        handle_event(&mut state, &Event::ToggleLock).unwrap();
        gesture(&mut state, GestureInput::DragStart { item: a });
        let (render, actions) = handle_event(&mut state, &Event::Click(a)).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.store.items(Category::Snacks)[0].selected);
    }

    #[test]
    fn tap_toggles_selection_and_persists() {
        let mut state = state();
        let a = add(&mut state, Category::Drinks, "Cola");
        assert!(gesture(&mut state, GestureInput::TouchStart { item: a }).is_empty());
        let actions = gesture(&mut state, GestureInput::TouchEnd { item: a });
        assert_eq!(actions, [Action::Persist]);
        assert!(state.tree.node(a).unwrap().selected);
    }

    #[test]
    fn edit_during_drag_persists_once() {
        let mut state = state();
        let a = add(&mut state, Category::General, "A");
        handle_event(&mut state, &Event::ToggleLock).unwrap();
        gesture(&mut state, GestureInput::DragStart { item: a });

        let (_, actions) = handle_event(
            &mut state,
            &Event::AddItem {
                category: Some(Category::General),
                name: "B".into(),
            },
        )
        .unwrap();
        assert_eq!(actions, [Action::Persist]);
        assert!(state.gesture.is_idle());
    }

    #[test]
    fn share_of_a_bought_list_reports_empty() {
        let mut state = state();
        add(&mut state, Category::General, "Foil");
        handle_event(
            &mut state,
            &Event::ToggleSelected {
                category: Category::General,
                name: "Foil".into(),
            },
        )
        .unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Share).unwrap();
        assert_eq!(actions, [Action::Notify(Notice::ShareEmpty)]);
        assert!(state.share_draft.is_none());
        assert!(handle_event(&mut state, &Event::CopyShare).unwrap().1.is_empty());
    }

    #[test]
    fn share_then_copy_hands_the_draft_to_the_clipboard() {
        let mut state = state();
        add(&mut state, Category::General, "Foil");
        handle_event(&mut state, &Event::Share).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::CopyShare).unwrap();
        let [Action::CopyToClipboard(text)] = actions.as_slice() else {
            panic!("expected a copy, got {actions:?}");
        };
        assert!(text.contains("- Foil (1)"));

        assert!(handle_event(&mut state, &Event::CloseShare).unwrap().0);
        assert!(state.share_draft.is_none());
    }

    #[test]
    fn import_of_a_string_leaves_the_store_alone() {
        let mut state = state();
        add(&mut state, Category::General, "Foil");
        let before = state.store.list().clone();

        let (_, actions) = handle_event(
            &mut state,
            &Event::Import {
                contents: "\"hello\"".into(),
            },
        )
        .unwrap();

        assert!(matches!(
            actions.as_slice(),
            [Action::Notify(Notice::ImportFailed(ImportError::Format(_)))]
        ));
        assert_eq!(state.store.list(), &before);
    }

    #[test]
    fn import_replaces_the_list() {
        let mut state = state();
        add(&mut state, Category::General, "Foil");

        let (_, actions) = handle_event(
            &mut state,
            &Event::Import {
                contents: r#"{"שתיה": [{"name": "Water", "quantity": 6}]}"#.into(),
            },
        )
        .unwrap();

        assert_eq!(
            actions,
            [Action::Persist, Action::Notify(Notice::Imported { items: 1 })]
        );
        assert!(state.store.items(Category::General).is_empty());
        assert_eq!(state.tree.container(Category::Drinks).unwrap().nodes[0].name, "Water");
    }
}
