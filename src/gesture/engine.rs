//! The drag-reorder state machine.
//!
//! Pointer drags and touch long-presses are folded into one protocol: a single
//! [`GesturePhase`] and one transition function, [`GestureEngine::handle`].
//! The engine owns no timers itself. It asks the host to schedule and cancel
//! them through [`GestureEffect`]s and is told about expiry through
//! [`GestureInput::LongPressElapsed`], which keeps every transition
//! synchronous and testable with a virtual clock.
//!
//! A drag session is created in exactly one place (`begin_drag`) and destroyed
//! in exactly one place (`commit`). Every path out of `Dragging` goes through
//! `commit`; cancellation commits the current visual order rather than rolling
//! back.

use crate::app::items::ItemStore;
use crate::app::lock::LockMode;
use crate::domain::{Category, ItemId};
use crate::gesture::position::find_insertion_point;
use crate::ui::tree::RenderTree;
use std::fmt;

/// Press duration that turns a touch into a drag.
pub const LONG_PRESS_DELAY_MS: u64 = 500;

/// Identity of a scheduled long-press timer. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Raw pointer and touch input, already resolved to items by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureInput {
    DragStart { item: ItemId },
    DragOver { y: f64 },
    DragEnd,
    TouchStart { item: ItemId },
    TouchMove { y: f64 },
    TouchEnd { item: ItemId },
    TouchCancel,
    LongPressElapsed(TimerId),
}

/// A touch that has not yet become a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Press {
    pub item: ItemId,
    pub started_at_ms: u64,
    /// `None` once a move turned the press into a scroll.
    pub timer: Option<TimerId>,
}

/// The single in-flight drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub active: ItemId,
    pub source: Category,
    pub origin_index: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GesturePhase {
    #[default]
    Idle,
    Pressed(Press),
    Dragging(DragSession),
    /// Transient: only observable while a commit is being applied.
    Committing(DragSession),
}

/// What the host has to do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureEffect {
    ScheduleTimer { id: TimerId, delay_ms: u64 },
    CancelTimer(TimerId),
    /// A short touch: toggle the item's selection.
    Tap(ItemId),
    /// Drag attempt while locked; the host suppresses its default drag.
    DragRejected { item: ItemId },
    DragStarted { item: ItemId, category: Category },
    /// The node moved visually to `index` within its container.
    Moved { item: ItemId, index: usize },
    /// The store accepted the visual order; persist it.
    Committed {
        category: Category,
        item: ItemId,
        from_index: usize,
        to_index: usize,
    },
    /// The store refused the order; the tree was re-rendered from the store.
    CommitRejected { category: Category },
}

/// Everything a transition may touch.
pub struct GestureContext<'a> {
    pub store: &'a mut ItemStore,
    pub tree: &'a mut RenderTree,
    pub lock: LockMode,
    pub now_ms: u64,
}

#[derive(Debug, Clone)]
pub struct GestureEngine {
    phase: GesturePhase,
    long_press_ms: u64,
    next_timer: u64,
    /// Item touched while locked. Only a touch-end on it, arriving as the very
    /// next input, counts as a tap.
    locked_touch: Option<ItemId>,
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new(LONG_PRESS_DELAY_MS)
    }
}

impl GestureEngine {
    #[must_use]
    pub const fn new(long_press_ms: u64) -> Self {
        Self {
            phase: GesturePhase::Idle,
            long_press_ms,
            next_timer: 1,
            locked_touch: None,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> GesturePhase {
        self.phase
    }

    #[must_use]
    pub const fn long_press_ms(&self) -> u64 {
        self.long_press_ms
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging(_) | GesturePhase::Committing(_))
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.phase, GesturePhase::Idle)
    }

    /// Applies one input and returns the effects for the host.
    pub fn handle(&mut self, input: GestureInput, ctx: &mut GestureContext<'_>) -> Vec<GestureEffect> {
        let phase = std::mem::take(&mut self.phase);
        let locked_touch = self.locked_touch.take();
        tracing::trace!(?phase, ?input, "gesture input");

        match (phase, input) {
            (GesturePhase::Idle, GestureInput::DragStart { item }) => {
                if ctx.lock.is_locked() {
                    tracing::debug!(%item, "drag rejected: list is locked");
                    return vec![GestureEffect::DragRejected { item }];
                }
                self.begin_drag(item, ctx)
            }
            (GesturePhase::Idle, GestureInput::TouchStart { item }) => {
                if ctx.tree.locate(item).is_none() {
                    return vec![];
                }
                if ctx.lock.is_locked() {
                    self.locked_touch = Some(item);
                    return vec![];
                }
                let id = self.allocate_timer();
                self.phase = GesturePhase::Pressed(Press {
                    item,
                    started_at_ms: ctx.now_ms,
                    timer: Some(id),
                });
                tracing::debug!(%item, timer = %id, "press started");
                vec![GestureEffect::ScheduleTimer {
                    id,
                    delay_ms: self.long_press_ms,
                }]
            }
            (GesturePhase::Idle, GestureInput::TouchEnd { item }) => {
                if locked_touch == Some(item) && ctx.tree.locate(item).is_some() {
                    vec![GestureEffect::Tap(item)]
                } else {
                    tracing::debug!(%item, "touch-end without a matching touch-start ignored");
                    vec![]
                }
            }

            (GesturePhase::Pressed(press), GestureInput::LongPressElapsed(id)) => {
                if press.timer != Some(id) {
                    tracing::debug!(timer = %id, "ignoring stale timer");
                    self.phase = GesturePhase::Pressed(press);
                    return vec![];
                }
                tracing::debug!(item = %press.item, "long press elapsed");
                self.begin_drag(press.item, ctx)
            }
            (GesturePhase::Pressed(press), GestureInput::TouchEnd { .. }) => {
                let mut effects = Vec::with_capacity(2);
                let short = match press.timer {
                    Some(id) => {
                        effects.push(GestureEffect::CancelTimer(id));
                        true
                    }
                    None => ctx.now_ms.saturating_sub(press.started_at_ms) < self.long_press_ms,
                };
                if short {
                    effects.push(GestureEffect::Tap(press.item));
                }
                effects
            }
            (GesturePhase::Pressed(mut press), GestureInput::TouchMove { .. }) => {
                let effects = press
                    .timer
                    .take()
                    .map(|id| {
                        tracing::debug!(item = %press.item, "press became a scroll");
                        vec![GestureEffect::CancelTimer(id)]
                    })
                    .unwrap_or_default();
                self.phase = GesturePhase::Pressed(press);
                effects
            }
            (GesturePhase::Pressed(press), GestureInput::TouchCancel) => {
                press.timer.map(GestureEffect::CancelTimer).into_iter().collect()
            }

            (
                GesturePhase::Dragging(session),
                GestureInput::DragOver { y } | GestureInput::TouchMove { y },
            ) => {
                self.phase = GesturePhase::Dragging(session);
                Self::move_to(session, y, ctx)
            }
            (
                GesturePhase::Dragging(session),
                GestureInput::DragEnd | GestureInput::TouchEnd { .. } | GestureInput::TouchCancel,
            ) => self.commit(session, ctx),

            (phase, GestureInput::LongPressElapsed(id)) => {
                tracing::debug!(timer = %id, "ignoring stale timer");
                self.phase = phase;
                self.locked_touch = locked_touch;
                vec![]
            }
            (phase, input) => {
                tracing::debug!(?phase, ?input, "input ignored in current phase");
                self.phase = phase;
                vec![]
            }
        }
    }

    /// Resolves any gesture in flight.
    ///
    /// A drag is committed with its current visual order; a press is dropped
    /// and its timer cancelled. Idle is left untouched.
    pub fn settle(&mut self, ctx: &mut GestureContext<'_>) -> Vec<GestureEffect> {
        self.locked_touch = None;
        match std::mem::take(&mut self.phase) {
            GesturePhase::Dragging(session) | GesturePhase::Committing(session) => {
                tracing::debug!(item = %session.active, "settling drag");
                self.commit(session, ctx)
            }
            GesturePhase::Pressed(press) => {
                press.timer.map(GestureEffect::CancelTimer).into_iter().collect()
            }
            GesturePhase::Idle => vec![],
        }
    }

    fn begin_drag(&mut self, item: ItemId, ctx: &mut GestureContext<'_>) -> Vec<GestureEffect> {
        let Some((source, origin_index)) = ctx.tree.locate(item) else {
            tracing::debug!(%item, "drag ignored: node not rendered");
            return vec![];
        };

        ctx.tree.set_dragging(item, true);
        self.phase = GesturePhase::Dragging(DragSession {
            active: item,
            source,
            origin_index,
        });
        tracing::debug!(%item, category = %source, origin_index, "drag started");
        vec![GestureEffect::DragStarted {
            item,
            category: source,
        }]
    }

    fn move_to(session: DragSession, y: f64, ctx: &mut GestureContext<'_>) -> Vec<GestureEffect> {
        let point = match ctx.tree.container_at(y) {
            Some(container) if container.category == session.source => {
                find_insertion_point(container, session.active, y)
            }
            Some(container) => {
                tracing::trace!(over = %container.category, "move over foreign container ignored");
                return vec![];
            }
            None => return vec![],
        };

        let current = ctx.tree.locate(session.active).map(|(_, index)| index);
        match ctx.tree.move_node(session.source, session.active, point.anchor()) {
            Some(index) if Some(index) != current => vec![GestureEffect::Moved {
                item: session.active,
                index,
            }],
            _ => vec![],
        }
    }

    fn commit(&mut self, session: DragSession, ctx: &mut GestureContext<'_>) -> Vec<GestureEffect> {
        self.phase = GesturePhase::Committing(session);
        ctx.tree.set_dragging(session.active, false);

        let order = ctx.tree.order(session.source);
        let effect = if ctx.store.replace_order(session.source, &order) {
            let to_index = order
                .iter()
                .position(|id| *id == session.active)
                .unwrap_or(session.origin_index);
            tracing::debug!(
                item = %session.active,
                category = %session.source,
                from = session.origin_index,
                to = to_index,
                "drag committed"
            );
            GestureEffect::Committed {
                category: session.source,
                item: session.active,
                from_index: session.origin_index,
                to_index,
            }
        } else {
            tracing::debug!(category = %session.source, "commit rejected, re-rendering from store");
            ctx.tree.refresh(ctx.store);
            GestureEffect::CommitRejected {
                category: session.source,
            }
        };

        self.phase = GesturePhase::Idle;
        vec![effect]
    }

    fn allocate_timer(&mut self) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        id
    }
}
