//! Line-oriented command language of the terminal host.
//!
//! Each line is one command. Item-addressing commands take a category followed
//! by the item name; the category is either its display name (which may be
//! two words) or its English slug. Pointer heights are written `@<y>`.

use crate::domain::Category;
use std::path::PathBuf;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  add [<category>] <name>          add an item (category defaults to the last one used)
  rm <category> <name>             remove an item
  toggle <category> <name>         mark an item as bought / not bought
  qty <category> <n> <name>        set the quantity (clamped to 0-9)
  click <category> <name>          click an item
  lock                             lock / unlock reordering
  show                             redraw the list
  share | copy | close             open the share text, copy it, dismiss it
  export                           write shoppingList_data.json
  import <path>                    replace the list with a JSON file
                                   (unknown categories are skipped)
  drag-start <category> <name>     start a pointer drag
  drag-over @<y>                   move the pointer to height y
  drag-end                         drop
  touch-start <category> <name>    touch an item
  touch-move @<y>                  move the finger to height y
  touch-end | touch-cancel         lift the finger / cancel the touch
  wait <ms>                        let time pass (long press is 500 ms)
  help | quit

Categories: produce, frozen, canned, general, drinks, nuts, dairy, cleaning, snacks";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add {
        category: Option<Category>,
        name: String,
    },
    Remove {
        category: Category,
        name: String,
    },
    Toggle {
        category: Category,
        name: String,
    },
    Quantity {
        category: Category,
        quantity: i64,
        name: String,
    },
    Click {
        category: Category,
        name: String,
    },
    Lock,
    Show,
    Share,
    Copy,
    Close,
    Export,
    Import {
        path: PathBuf,
    },
    DragStart {
        category: Category,
        name: String,
    },
    DragOver {
        y: f64,
    },
    DragEnd,
    TouchStart {
        category: Category,
        name: String,
    },
    TouchMove {
        y: f64,
    },
    TouchEnd,
    TouchCancel,
    Wait {
        ms: u64,
    },
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),

    #[error("`{command}` needs {what}")]
    Missing {
        command: &'static str,
        what: &'static str,
    },

    #[error("unknown category in `{0}`")]
    UnknownCategory(String),

    #[error("`{0}` is not a number")]
    InvalidNumber(String),
}

/// Parses one input line. Blank lines and `#` comments yield `Ok(None)`.
///
/// # Errors
///
/// Returns a [`CommandError`] describing what is wrong with the line.
///
/// ```
/// use shoplist::app::command::{parse_command, Command};
/// use shoplist::domain::Category;
///
/// let cmd = parse_command("qty dairy 2 Goat cheese").unwrap();
/// assert_eq!(
///     cmd,
///     Some(Command::Quantity { category: Category::Dairy, quantity: 2, name: "Goat cheese".into() })
/// );
/// ```
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let command = match verb {
        "add" => {
            if rest.is_empty() {
                return Err(CommandError::Missing {
                    command: "add",
                    what: "an item name",
                });
            }
            match split_category(rest) {
                Some((category, name)) if !name.is_empty() => Command::Add {
                    category: Some(category),
                    name: name.to_string(),
                },
                _ => Command::Add {
                    category: None,
                    name: rest.to_string(),
                },
            }
        }
        "rm" | "remove" => {
            let (category, name) = item_ref("rm", rest)?;
            Command::Remove { category, name }
        }
        "toggle" => {
            let (category, name) = item_ref("toggle", rest)?;
            Command::Toggle { category, name }
        }
        "qty" => {
            let (category, rest) =
                split_category(rest).ok_or_else(|| CommandError::UnknownCategory(rest.to_string()))?;
            let (number, name) = rest.split_once(char::is_whitespace).ok_or(CommandError::Missing {
                command: "qty",
                what: "a quantity and an item name",
            })?;
            let quantity = number
                .parse()
                .map_err(|_| CommandError::InvalidNumber(number.to_string()))?;
            Command::Quantity {
                category,
                quantity,
                name: name.trim().to_string(),
            }
        }
        "click" => {
            let (category, name) = item_ref("click", rest)?;
            Command::Click { category, name }
        }
        "lock" | "unlock" => Command::Lock,
        "show" | "ls" => Command::Show,
        "share" => Command::Share,
        "copy" => Command::Copy,
        "close" => Command::Close,
        "export" => Command::Export,
        "import" => {
            if rest.is_empty() {
                return Err(CommandError::Missing {
                    command: "import",
                    what: "a file path",
                });
            }
            Command::Import {
                path: PathBuf::from(rest),
            }
        }
        "drag-start" => {
            let (category, name) = item_ref("drag-start", strip_height(rest))?;
            Command::DragStart { category, name }
        }
        "drag-over" => Command::DragOver {
            y: height("drag-over", rest)?,
        },
        "drag-end" | "drop" => Command::DragEnd,
        "touch-start" => {
            let (category, name) = item_ref("touch-start", strip_height(rest))?;
            Command::TouchStart { category, name }
        }
        "touch-move" => Command::TouchMove {
            y: height("touch-move", rest)?,
        },
        "touch-end" => Command::TouchEnd,
        "touch-cancel" => Command::TouchCancel,
        "wait" => {
            let ms = rest.trim_end_matches("ms");
            Command::Wait {
                ms: ms
                    .parse()
                    .map_err(|_| CommandError::InvalidNumber(rest.to_string()))?,
            }
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

/// Splits a leading category (two-word display names first) off `text`.
fn split_category(text: &str) -> Option<(Category, &str)> {
    let mut words = text.splitn(3, char::is_whitespace);
    let first = words.next()?;
    if let Some(second) = words.next() {
        if let Some(category) = Category::from_name(&format!("{first} {second}")) {
            return Some((category, words.next().unwrap_or("").trim()));
        }
    }
    let category = Category::from_name(first)?;
    Some((category, text[first.len()..].trim()))
}

fn item_ref(command: &'static str, rest: &str) -> Result<(Category, String), CommandError> {
    let (category, name) =
        split_category(rest).ok_or_else(|| CommandError::UnknownCategory(rest.to_string()))?;
    if name.is_empty() {
        return Err(CommandError::Missing {
            command,
            what: "an item name",
        });
    }
    Ok((category, name.to_string()))
}

/// Drops a trailing `@<y>`; the starting height of a drag is not used.
fn strip_height(rest: &str) -> &str {
    match rest.rsplit_once(char::is_whitespace) {
        Some((head, tail)) if tail.starts_with('@') => head.trim_end(),
        _ => rest,
    }
}

fn height(command: &'static str, rest: &str) -> Result<f64, CommandError> {
    let raw = rest.strip_prefix('@').unwrap_or(rest);
    if raw.is_empty() {
        return Err(CommandError::Missing {
            command,
            what: "a height like @120",
        });
    }
    raw.parse::<f64>()
        .ok()
        .filter(|y| y.is_finite())
        .ok_or_else(|| CommandError::InvalidNumber(rest.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        parse_command(line).unwrap().unwrap()
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(parse_command("# setup"), Ok(None));
    }

    #[test]
    fn two_word_hebrew_categories() {
        assert_eq!(
            parse("add מוצרי חלב Milk"),
            Command::Add {
                category: Some(Category::Dairy),
                name: "Milk".into()
            }
        );
        assert_eq!(
            parse("toggle ירקות ופירות עגבניות שרי"),
            Command::Toggle {
                category: Category::Produce,
                name: "עגבניות שרי".into()
            }
        );
    }

    #[test]
    fn add_without_category_keeps_whole_name() {
        assert_eq!(
            parse("add Paper towels"),
            Command::Add {
                category: None,
                name: "Paper towels".into()
            }
        );
    }

    #[test]
    fn gesture_commands() {
        assert_eq!(
            parse("drag-start general C @228"),
            Command::DragStart {
                category: Category::General,
                name: "C".into()
            }
        );
        assert_eq!(parse("drag-over @130"), Command::DragOver { y: 130.0 });
        assert_eq!(parse("touch-move 12.5"), Command::TouchMove { y: 12.5 });
        assert_eq!(parse("wait 600ms"), Command::Wait { ms: 600 });
        assert_eq!(parse("drag-end"), Command::DragEnd);
    }

    #[test]
    fn errors_describe_the_problem() {
        assert_eq!(
            parse_command("frobnicate"),
            Err(CommandError::Unknown("frobnicate".into()))
        );
        assert!(matches!(parse_command("rm bakery Bread"), Err(CommandError::UnknownCategory(_))));
        assert!(matches!(parse_command("rm dairy"), Err(CommandError::Missing { .. })));
        assert!(matches!(parse_command("qty dairy lots Milk"), Err(CommandError::InvalidNumber(_))));
        assert!(matches!(parse_command("drag-over @up"), Err(CommandError::InvalidNumber(_))));
        assert!(matches!(parse_command("import"), Err(CommandError::Missing { .. })));
    }

    #[test]
    fn help_warns_that_import_drops_unknown_categories() {
        let import = HELP
            .lines()
            .skip_while(|line| !line.trim_start().starts_with("import"))
            .take(2)
            .collect::<Vec<_>>()
            .join(" ");
        assert!(import.contains("unknown categories are skipped"));
    }
}
