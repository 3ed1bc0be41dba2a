//! End-to-end behavior of a session driven through the command language.

use shoplist::app::command::parse_command;
use shoplist::share::{ClipboardChain, ClipboardError, ClipboardStrategy, EXPORT_FILE_NAME};
use shoplist::storage::{JsonStorage, MemoryStorage, Storage, LIST_KEY, STORE_FILE_NAME};
use shoplist::{Category, Config, ImportError, Item, ItemId, Notice, Session, ShoppingList};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Clipboard strategy that records what it was asked to copy.
struct Recording {
    copied: Rc<RefCell<Vec<String>>>,
}

impl ClipboardStrategy for Recording {
    fn name(&self) -> &str {
        "recording"
    }

    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.copied.borrow_mut().push(text.to_string());
        Ok(())
    }
}

struct Harness {
    session: Session,
    storage: MemoryStorage,
    copied: Rc<RefCell<Vec<String>>>,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(&Config::default())
    }

    fn with_config(config: &Config) -> Self {
        let storage = MemoryStorage::default();
        let copied = Rc::new(RefCell::new(Vec::new()));
        let clipboard = ClipboardChain::new(vec![Box::new(Recording {
            copied: Rc::clone(&copied),
        })]);
        let session = Session::start(config, Box::new(storage.clone()), clipboard);
        Self {
            session,
            storage,
            copied,
        }
    }

    fn run(&mut self, script: &str) -> Vec<Notice> {
        for line in script.lines() {
            if let Some(command) = parse_command(line).unwrap() {
                self.session.apply(command);
            }
        }
        self.session.take_notices()
    }

    fn names(&self, category: Category) -> Vec<String> {
        self.session
            .state()
            .store
            .items(category)
            .iter()
            .map(|item| item.name.clone())
            .collect()
    }

    fn id(&self, category: Category, name: &str) -> ItemId {
        self.session.state().store.find_id(category, name).unwrap()
    }

    /// A height just below the top of `name`'s row, so a drop lands before it.
    fn above(&self, category: Category, name: &str) -> f64 {
        self.session.state().tree.node(self.id(category, name)).unwrap().top + 2.0
    }

    fn stored(&self) -> ShoppingList {
        self.storage.load().unwrap().unwrap()
    }
}

fn general_abc() -> Harness {
    let mut h = Harness::new();
    h.run("add general A\nadd general B\nadd general C");
    h
}

#[test]
fn adding_twice_keeps_one_unselected_item() {
    let mut h = Harness::new();
    h.run("add מוצרי חלב Milk\nadd מוצרי חלב Milk");

    let items = h.session.state().store.items(Category::Dairy);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity.get(), 1);
    assert!(!items[0].selected);
    assert_eq!(h.storage.save_count(), 1);
}

#[test]
fn add_without_category_reuses_the_last_one() {
    let mut h = Harness::new();
    h.run("add dairy Milk\nadd Yogurt\nadd nuts Almonds\nadd Cashews");

    assert_eq!(h.names(Category::Dairy), ["Milk", "Yogurt"]);
    assert_eq!(h.names(Category::NutsAndLegumes), ["Almonds", "Cashews"]);
}

#[test]
fn unlocked_drag_moves_c_before_a() {
    let mut h = general_abc();
    h.run("lock\ndrag-start general C");
    let y = h.above(Category::General, "A");
    h.run(&format!("drag-over @{y}\ndrag-end"));

    assert_eq!(h.names(Category::General), ["C", "A", "B"]);
    assert!(h.session.state().gesture.is_idle());
    assert_eq!(h.stored().items(Category::General)[0].name, "C");
}

#[test]
fn locked_drag_is_rejected() {
    let mut h = general_abc();
    let saves = h.storage.save_count();
    let y = h.above(Category::General, "A");
    h.run(&format!("drag-start general C\ndrag-over @{y}\ndrag-end"));

    assert_eq!(h.names(Category::General), ["A", "B", "C"]);
    assert!(h.session.state().gesture.is_idle());
    assert_eq!(h.storage.save_count(), saves);
}

#[test]
fn drag_over_another_category_is_ignored() {
    let mut h = general_abc();
    h.run("add dairy Milk\nlock\ndrag-start general A");
    let y = h.above(Category::Dairy, "Milk");
    h.run(&format!("drag-over @{y}\ndrag-end"));

    assert_eq!(h.names(Category::General), ["A", "B", "C"]);
    assert_eq!(h.names(Category::Dairy), ["Milk"]);
}

#[test]
fn drops_only_permute_the_source_category() {
    let mut h = general_abc();
    h.run("add dairy Milk\nadd dairy Cheese\nlock");
    let before = h.session.state().store.list().clone();

    for (item, target) in [("A", "C"), ("B", "A"), ("C", "B")] {
        h.run(&format!("drag-start general {item}"));
        let y = h.above(Category::General, target);
        h.run(&format!("drag-over @{y}\ndrag-end"));
    }

    let mut names = h.names(Category::General);
    names.sort();
    assert_eq!(names, ["A", "B", "C"]);
    assert_eq!(
        h.session.state().store.items(Category::Dairy),
        before.items(Category::Dairy)
    );
}

#[test]
fn locking_mid_drag_commits_the_visual_order() {
    let mut h = general_abc();
    h.run("lock\ndrag-start general C");
    let y = h.above(Category::General, "A");
    h.run(&format!("drag-over @{y}\nlock"));

    assert!(h.session.state().lock.is_locked());
    assert!(h.session.state().gesture.is_idle());
    assert_eq!(h.names(Category::General), ["C", "A", "B"]);
    assert!(!h.session.state().tree.is_draggable());
}

#[test]
fn long_press_turns_a_touch_into_a_drag() {
    let mut h = general_abc();
    h.run("lock\ntouch-start general C\nwait 499");
    assert!(!h.session.state().gesture.is_dragging());

    h.run("wait 1");
    assert!(h.session.state().gesture.is_dragging());

    let y = h.above(Category::General, "A");
    h.run(&format!("touch-move @{y}\ntouch-end"));
    assert_eq!(h.names(Category::General), ["C", "A", "B"]);
    assert!(h.session.state().gesture.is_idle());
    // The drop is not also a tap.
    assert!(!h.session.state().store.items(Category::General)[0].selected);
}

#[test]
fn short_touch_is_a_tap() {
    let mut h = general_abc();
    h.run("lock\ntouch-start general B\nwait 100\ntouch-end\nwait 1000");

    let items = h.session.state().store.items(Category::General);
    assert!(items[1].selected);
    assert_eq!(h.names(Category::General), ["A", "B", "C"]);
    assert!(h.session.state().gesture.is_idle());
}

#[test]
fn touch_while_locked_still_selects() {
    let mut h = general_abc();
    h.run("touch-start general A\nwait 800\ntouch-end");

    assert!(h.session.state().store.items(Category::General)[0].selected);
    assert!(h.session.state().gesture.is_idle());
}

#[test]
fn releasing_after_a_pointer_drop_does_not_select() {
    let mut h = general_abc();
    h.run("lock\ntouch-start general A\nwait 500");
    assert!(h.session.state().gesture.is_dragging());

    h.run("drag-end\ntouch-end");
    assert!(h.session.state().gesture.is_idle());
    assert!(!h.session.state().store.items(Category::General)[0].selected);

    h.run("touch-start general B\nwait 500\nlock\ntouch-end");
    assert!(h.session.state().lock.is_locked());
    assert!(!h.session.state().store.items(Category::General)[1].selected);
}

#[test]
fn touch_scroll_then_release_is_not_a_drag() {
    let mut h = general_abc();
    h.run("lock\ntouch-start general A\ntouch-move @300\nwait 600");
    assert!(!h.session.state().gesture.is_dragging());

    h.run("touch-end");
    assert_eq!(h.names(Category::General), ["A", "B", "C"]);
    assert!(!h.session.state().store.items(Category::General)[0].selected);
}

#[test]
fn touch_cancel_drops_the_press() {
    let mut h = general_abc();
    h.run("lock\ntouch-start general A\ntouch-cancel\nwait 600");

    assert!(h.session.state().gesture.is_idle());
    assert!(!h.session.state().store.items(Category::General)[0].selected);
}

#[test]
fn click_toggles_selection_twice() {
    let mut h = general_abc();
    h.run("click general B");
    assert!(h.session.state().store.items(Category::General)[1].selected);
    h.run("click general B");
    assert!(!h.session.state().store.items(Category::General)[1].selected);
}

#[test]
fn quantity_is_clamped() {
    let mut h = Harness::new();
    h.run("add snacks Chips\nqty snacks 15 Chips");
    assert_eq!(h.session.state().store.items(Category::Snacks)[0].quantity.get(), 9);

    h.run("qty snacks -3 Chips");
    assert_eq!(h.session.state().store.items(Category::Snacks)[0].quantity.get(), 0);
    assert_eq!(h.stored().items(Category::Snacks)[0].quantity.get(), 0);
}

#[test]
fn share_reports_an_empty_list_when_everything_is_bought() {
    let mut h = general_abc();
    h.run("toggle general A\ntoggle general B\ntoggle general C");
    let notices = h.run("share");

    assert_eq!(notices, [Notice::ShareEmpty]);
    assert!(h.session.state().share_draft.is_none());
}

#[test]
fn copy_sends_the_share_text_and_closes_it() {
    let mut h = general_abc();
    h.run("toggle general B\nqty general 3 C");
    h.run("share");
    let notices = h.run("copy");

    assert_eq!(
        notices,
        [Notice::Copied {
            strategy: "recording".into()
        }]
    );
    assert_eq!(
        h.copied.borrow().as_slice(),
        ["רשימת הקניות שלי:\n\n*כללי*\n- A (1)\n- C (3)\n\n"]
    );
    assert!(h.session.state().share_draft.is_none());
}

#[test]
fn failed_copy_keeps_the_share_text_open() {
    let storage = MemoryStorage::default();
    let mut session = Session::start(
        &Config::default(),
        Box::new(storage),
        ClipboardChain::new(Vec::new()),
    );
    for line in ["add general A", "share", "copy"] {
        session.apply(parse_command(line).unwrap().unwrap());
    }

    assert_eq!(session.take_notices(), [Notice::ShareReady, Notice::CopyFailed]);
    assert!(session.state().share_draft.is_some());
}

#[test]
fn importing_a_string_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.json");
    std::fs::write(&path, "\"hello\"").unwrap();

    let mut h = general_abc();
    let before = h.session.state().store.list().clone();
    let notices = h.run(&format!("import {}", path.display()));

    assert!(matches!(
        notices.as_slice(),
        [Notice::ImportFailed(ImportError::Format(_))]
    ));
    assert_eq!(h.session.state().store.list(), &before);
}

#[test]
fn importing_a_missing_file_reports_it() {
    let mut h = general_abc();
    let notices = h.run("import /no/such/list.json");

    assert!(matches!(
        notices.as_slice(),
        [Notice::ImportFailed(ImportError::Read(_))]
    ));
    assert_eq!(h.names(Category::General), ["A", "B", "C"]);
}

#[test]
fn export_then_import_restores_the_list() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        export_dir: Some(dir.path().to_path_buf()),
        ..Config::default()
    };

    let mut source = Harness::with_config(&config);
    source.run("add produce Tomatoes\nadd dairy Milk\nqty dairy 2 Milk\ntoggle produce Tomatoes");
    let notices = source.run("export");
    let path = dir.path().join(EXPORT_FILE_NAME);
    assert_eq!(notices, [Notice::Exported { path: path.clone() }]);

    let mut target = Harness::with_config(&config);
    target.run("add general Leftover");
    let notices = target.run(&format!("import {}", path.display()));

    assert_eq!(notices, [Notice::Imported { items: 2 }]);
    assert_eq!(
        target.session.state().store.list(),
        source.session.state().store.list()
    );
    assert_eq!(target.stored(), source.stored());
}

#[test]
fn imported_items_can_be_dragged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.json");
    std::fs::write(
        &path,
        r#"{"כללי": [{"name": "A"}, {"name": "B", "quantity": 2}], "Bakery": []}"#,
    )
    .unwrap();

    let mut h = Harness::new();
    h.run(&format!("import {}\nlock\ndrag-start general B", path.display()));
    let y = h.above(Category::General, "A");
    h.run(&format!("drag-over @{y}\ndrag-end"));

    assert_eq!(h.names(Category::General), ["B", "A"]);
    assert_eq!(h.session.state().store.items(Category::General)[1].quantity.get(), 0);
}

#[test]
fn stored_list_is_drawn_on_start() {
    let mut list = ShoppingList::new();
    list.entry(Category::Frozen).push(Item::new(ItemId::new(7), "Peas"));
    list.entry(Category::Frozen).push(Item::new(ItemId::new(8), "Ice cream"));
    let storage = MemoryStorage::with_list(&list).unwrap();

    let mut session = Session::start(
        &Config::default(),
        Box::new(storage.clone()),
        ClipboardChain::new(Vec::new()),
    );
    assert_eq!(storage.save_count(), 0);
    let names: Vec<_> = session
        .state()
        .store
        .items(Category::Frozen)
        .iter()
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(names, ["Peas", "Ice cream"]);

    session.apply(parse_command("click frozen Peas").unwrap().unwrap());
    assert_eq!(storage.save_count(), 1);
    assert!(storage.load().unwrap().unwrap().items(Category::Frozen)[0].selected);
}

#[test]
fn json_store_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join(STORE_FILE_NAME);

    let start = |path: &Path| {
        Session::start(
            &Config::default(),
            Box::new(JsonStorage::new(path.to_path_buf()).unwrap()),
            ClipboardChain::new(Vec::new()),
        )
    };

    let mut session = start(&store);
    for line in ["add general A", "add general B", "lock", "drag-start general B"] {
        session.apply(parse_command(line).unwrap().unwrap());
    }
    let a = session.state().store.find_id(Category::General, "A").unwrap();
    let y = session.state().tree.node(a).unwrap().top + 2.0;
    session.apply(parse_command(&format!("drag-over @{y}")).unwrap().unwrap());
    session.apply(parse_command("drag-end").unwrap().unwrap());
    drop(session);

    let restarted = start(&store);
    let names: Vec<_> = restarted
        .state()
        .store
        .items(Category::General)
        .iter()
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(names, ["B", "A"]);
    assert!(restarted.state().lock.is_locked());
}

#[test]
fn corrupt_stored_value_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join(STORE_FILE_NAME);

    let mut storage = JsonStorage::new(store.clone()).unwrap();
    storage.set(LIST_KEY, "not a list".to_string()).unwrap();

    let mut session = Session::start(
        &Config::default(),
        Box::new(JsonStorage::new(store.clone()).unwrap()),
        ClipboardChain::new(Vec::new()),
    );
    assert!(session.state().store.list().is_empty());

    session.apply(parse_command("add dairy Milk").unwrap().unwrap());
    let reloaded = JsonStorage::new(store).unwrap().load().unwrap().unwrap();
    assert_eq!(reloaded.items(Category::Dairy).len(), 1);
}

#[test]
fn corrupt_store_file_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join(STORE_FILE_NAME);
    std::fs::write(&store, "{ not json").unwrap();

    assert!(JsonStorage::new(store).is_err());
}
