//! Plain-text share summary of what is still left to buy.

use crate::domain::{Category, ShoppingList};
use std::fmt::Write as _;

/// First line of every share text.
pub const SHARE_HEADER: &str = "רשימת הקניות שלי:";

/// Formats the unselected items for pasting into a chat or mail.
///
/// Categories appear in their fixed order and only when they still have
/// unselected items. Returns `None` when nothing is left to buy.
///
/// ```
/// use shoplist::domain::{Category, Item, ItemId, ShoppingList};
/// use shoplist::share::share_text;
///
/// let mut list = ShoppingList::new();
/// list.entry(Category::Dairy).push(Item::new(ItemId::new(1), "Milk"));
///
/// let text = share_text(&list).unwrap();
/// assert!(text.ends_with("*מוצרי חלב*\n- Milk (1)\n\n"));
/// ```
#[must_use]
pub fn share_text(list: &ShoppingList) -> Option<String> {
    let mut text = format!("{SHARE_HEADER}\n\n");
    let mut any = false;

    for category in Category::ALL {
        let mut pending = list.items(category).iter().filter(|item| !item.selected).peekable();
        if pending.peek().is_none() {
            continue;
        }
        any = true;

        let _ = writeln!(text, "*{category}*");
        for item in pending {
            if item.quantity.get() > 0 {
                let _ = writeln!(text, "- {} ({})", item.name, item.quantity);
            } else {
                let _ = writeln!(text, "- {}", item.name);
            }
        }
        text.push('\n');
    }

    any.then_some(text)
}
