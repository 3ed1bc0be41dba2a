//! Session runtime: owns the state and executes the handler's actions.
//!
//! The session is what the terminal host talks to. It loads the list once,
//! feeds events through [`handle_event`], and carries out the resulting
//! [`Action`]s against the storage backend, the timer clock, the clipboard
//! chain and the export directory. Failures in those side effects are logged
//! or turned into [`Notice`]s; none of them stops the session.

use crate::app::command::Command;
use crate::app::handler::{handle_event, Event};
use crate::app::timers::TimerQueue;
use crate::app::{Action, AppState, Notice};
use crate::domain::{Category, ItemId, ShoppingList};
use crate::gesture::GestureInput;
use crate::share::{read_import, write_export, ClipboardChain};
use crate::storage::Storage;
use crate::Config;
use std::path::PathBuf;

pub struct Session {
    state: AppState,
    storage: Box<dyn Storage>,
    clipboard: ClipboardChain,
    timers: TimerQueue,
    export_dir: PathBuf,
    notices: Vec<Notice>,
    /// Item under the finger since the last touch-start.
    touch_target: Option<ItemId>,
}

impl Session {
    /// Loads the stored list and builds the initial state.
    ///
    /// A stored value that cannot be read is logged and replaced by an empty
    /// list; the next save overwrites it.
    #[must_use]
    pub fn start(config: &Config, storage: Box<dyn Storage>, clipboard: ClipboardChain) -> Self {
        let _span = tracing::debug_span!("session_start").entered();

        let list = match storage.load() {
            Ok(Some(list)) => {
                tracing::debug!(items = list.item_count(), "restored stored list");
                list
            }
            Ok(None) => ShoppingList::new(),
            Err(e) => {
                tracing::warn!(error = %e, "stored list unreadable, starting empty");
                ShoppingList::new()
            }
        };

        Self {
            state: crate::initialize(config, list),
            storage,
            clipboard,
            timers: TimerQueue::new(),
            export_dir: config.export_dir(),
            notices: Vec::new(),
            touch_target: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Drains the notices produced since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Handles one event and runs its actions. Returns whether to redraw.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.state, event) {
            Ok((render, actions)) => {
                let mut render = render;
                for action in actions {
                    render |= self.execute(action);
                }
                render
            }
            Err(e) => {
                tracing::warn!(error = %e, "event failed");
                false
            }
        }
    }

    /// Moves the clock forward, firing due long-press timers in order.
    pub fn advance(&mut self, delta_ms: u64) -> bool {
        let mut render = false;
        for (deadline, id) in self.timers.advance(delta_ms) {
            tracing::debug!(timer = %id, deadline, "timer fired");
            render |= self.dispatch(&Event::Gesture {
                input: GestureInput::LongPressElapsed(id),
                at_ms: deadline,
            });
        }
        render
    }

    /// Applies a parsed command. Returns whether to redraw.
    ///
    /// `help` and `quit` belong to the host and are no-ops here.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Add { category, name } => self.dispatch(&Event::AddItem { category, name }),
            Command::Remove { category, name } => self.dispatch(&Event::RemoveItem { category, name }),
            Command::Toggle { category, name } => {
                self.dispatch(&Event::ToggleSelected { category, name })
            }
            Command::Quantity {
                category,
                quantity,
                name,
            } => self.dispatch(&Event::SetQuantity {
                category,
                name,
                quantity,
            }),
            Command::Click { category, name } => match self.resolve(category, &name) {
                Some(id) => self.dispatch(&Event::Click(id)),
                None => false,
            },
            Command::Lock => self.dispatch(&Event::ToggleLock),
            Command::Show => true,
            Command::Share => self.dispatch(&Event::Share),
            Command::Copy => self.dispatch(&Event::CopyShare),
            Command::Close => self.dispatch(&Event::CloseShare),
            Command::Export => self.dispatch(&Event::Export),
            Command::Import { path } => match read_import(&path) {
                Ok(contents) => self.dispatch(&Event::Import { contents }),
                Err(e) => {
                    self.notify(Notice::ImportFailed(e));
                    false
                }
            },
            Command::DragStart { category, name } => match self.resolve(category, &name) {
                Some(item) => self.gesture(GestureInput::DragStart { item }),
                None => false,
            },
            Command::DragOver { y } => self.gesture(GestureInput::DragOver { y }),
            Command::DragEnd => self.gesture(GestureInput::DragEnd),
            Command::TouchStart { category, name } => match self.resolve(category, &name) {
                Some(item) => {
                    self.touch_target = Some(item);
                    self.gesture(GestureInput::TouchStart { item })
                }
                None => false,
            },
            Command::TouchMove { y } => self.gesture(GestureInput::TouchMove { y }),
            Command::TouchEnd => match self.touch_target.take() {
                Some(item) => self.gesture(GestureInput::TouchEnd { item }),
                None => {
                    tracing::debug!("touch-end without a touch");
                    false
                }
            },
            Command::TouchCancel => {
                self.touch_target = None;
                self.gesture(GestureInput::TouchCancel)
            }
            Command::Wait { ms } => self.advance(ms),
            Command::Help | Command::Quit => false,
        }
    }

    fn gesture(&mut self, input: GestureInput) -> bool {
        let at_ms = self.timers.now_ms();
        self.dispatch(&Event::Gesture { input, at_ms })
    }

    fn resolve(&self, category: Category, name: &str) -> Option<ItemId> {
        let id = self.state.store.find_id(category, name.trim());
        if id.is_none() {
            tracing::debug!(%category, name, "no such item");
        }
        id
    }

    fn notify(&mut self, notice: Notice) {
        tracing::info!(notice = %notice, "notice");
        self.notices.push(notice);
    }

    fn execute(&mut self, action: Action) -> bool {
        match action {
            Action::Persist => {
                if let Err(e) = self.storage.save(self.state.store.list()) {
                    tracing::warn!(error = %e, "failed to persist list");
                }
                false
            }
            Action::ScheduleTimer { id, delay_ms } => {
                self.timers.schedule(id, delay_ms);
                false
            }
            Action::CancelTimer(id) => {
                self.timers.cancel(id);
                false
            }
            Action::Notify(notice) => {
                self.notify(notice);
                false
            }
            Action::CopyToClipboard(text) => match self.clipboard.copy(&text) {
                Ok(strategy) => {
                    self.notify(Notice::Copied { strategy });
                    self.dispatch(&Event::CloseShare)
                }
                Err(e) => {
                    tracing::debug!(error = %e, "copy failed");
                    self.notify(Notice::CopyFailed);
                    false
                }
            },
            Action::WriteExport { contents } => {
                match write_export(&self.export_dir, &contents) {
                    Ok(path) => self.notify(Notice::Exported { path }),
                    Err(e) => {
                        tracing::warn!(error = %e, "export failed");
                        self.notify(Notice::ExportFailed {
                            reason: e.to_string(),
                        });
                    }
                }
                false
            }
        }
    }
}
