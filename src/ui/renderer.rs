//! Draws the render tree as styled terminal text.
//!
//! Output is line-based so it works equally for an interactive terminal and a
//! script piped to a file. With `theme` set to `None` no escape sequences are
//! written at all.
//!
//! # Layout
//!
//! ```text
//! 🔓 Shopping list (unlocked)
//! *כללי*  @96
//!   [ ] C (1)  @148
//!   [x] A      @188
//! ```
//!
//! Heights (`@y`, a row's vertical midpoint and a header's top) are shown while
//! unlocked so drags can be aimed from a script.

use crate::app::AppState;
use crate::ui::theme::Theme;
use crate::ui::tree::{Container, ListNode};
use std::io::{self, Write};

/// Writes the list, followed by the share text when one is open.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn render<W: Write>(state: &AppState, out: &mut W, theme: Option<&Theme>) -> io::Result<()> {
    let paint = Painter { theme };
    let unlocked = !state.lock.is_locked();

    writeln!(
        out,
        "{}{}{} Shopping list ({}){}",
        paint.bold(),
        paint.fg(|c| &c.title_fg),
        state.lock.icon(),
        state.lock,
        paint.reset()
    )?;

    for container in state.tree.containers() {
        render_container(out, &paint, container, unlocked)?;
    }

    if let Some(text) = &state.share_draft {
        writeln!(out, "{}--- share ---", paint.fg(|c| &c.share_fg))?;
        write!(out, "{text}")?;
        writeln!(out, "-------------{}", paint.reset())?;
    }

    Ok(())
}

fn render_container<W: Write>(
    out: &mut W,
    paint: &Painter<'_>,
    container: &Container,
    unlocked: bool,
) -> io::Result<()> {
    if container.nodes.is_empty() && !unlocked {
        return Ok(());
    }

    write!(
        out,
        "{}{}*{}*{}",
        paint.bold(),
        paint.fg(|c| &c.category_fg),
        container.category,
        paint.reset()
    )?;
    if unlocked {
        write!(out, "  @{}", container.top)?;
    }
    writeln!(out)?;

    for node in &container.nodes {
        render_node(out, paint, node, unlocked)?;
    }
    Ok(())
}

fn render_node<W: Write>(
    out: &mut W,
    paint: &Painter<'_>,
    node: &ListNode,
    unlocked: bool,
) -> io::Result<()> {
    let mark = if node.selected { "[x]" } else { "[ ]" };

    let style = if node.dragging {
        format!(
            "{}{}{}",
            paint.bold(),
            paint.fg(|c| &c.dragging_fg),
            paint.bg(|c| &c.dragging_bg)
        )
    } else if node.selected {
        format!("{}{}{}", paint.dim(), paint.strike(), paint.fg(|c| &c.selected_fg))
    } else {
        paint.fg(|c| &c.item_fg)
    };

    write!(out, "  {style}{mark} {}", node.name)?;
    if node.quantity.get() > 0 {
        write!(out, " {}({}){}", paint.fg(|c| &c.quantity_fg), node.quantity, style)?;
    }
    if node.dragging {
        write!(out, " ⇅")?;
    }
    write!(out, "{}", paint.reset())?;
    if unlocked {
        write!(out, "  @{}", node.midpoint())?;
    }
    writeln!(out)
}

/// Escape sequences for an optional theme.
struct Painter<'a> {
    theme: Option<&'a Theme>,
}

impl Painter<'_> {
    fn fg(&self, pick: impl Fn(&crate::ui::theme::ThemeColors) -> &String) -> String {
        self.theme.map(|t| Theme::fg(pick(&t.colors))).unwrap_or_default()
    }

    fn bg(&self, pick: impl Fn(&crate::ui::theme::ThemeColors) -> &String) -> String {
        self.theme.map(|t| Theme::bg(pick(&t.colors))).unwrap_or_default()
    }

    fn escape(&self, code: &'static str) -> &'static str {
        if self.theme.is_some() {
            code
        } else {
            ""
        }
    }

    fn bold(&self) -> &'static str {
        self.escape(Theme::bold())
    }

    fn dim(&self) -> &'static str {
        self.escape(Theme::dim())
    }

    fn strike(&self) -> &'static str {
        self.escape(Theme::strike())
    }

    fn reset(&self) -> &'static str {
        self.escape(Theme::reset())
    }
}
