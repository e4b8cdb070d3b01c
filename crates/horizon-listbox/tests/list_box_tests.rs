//! End-to-end tests for the list box through its public API.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use horizon_listbox::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    name: &'static str,
    kind: &'static str,
    seq: u32,
}

impl Entry {
    fn new(name: &'static str, kind: &'static str, seq: u32) -> Self {
        Self { name, kind, seq }
    }
}

impl RowContent for Entry {
    fn preferred_height(&self, _width: f32) -> f32 {
        30.0
    }
}

/// Header before every row whose kind differs from the previous visible row.
fn kind_headers(row: &mut ListBoxRow<Entry>, before: Option<&ListBoxRow<Entry>>) {
    let kind = row.content().kind;
    if before.is_some_and(|b| b.content().kind == kind) {
        row.set_separator(None);
    } else {
        row.set_separator(Some(Separator::header(kind)));
    }
}

fn names(list: &ListBox<Entry>) -> Vec<&'static str> {
    list.rows().map(|row| row.content().name).collect()
}

fn visible_names(list: &ListBox<Entry>) -> Vec<&'static str> {
    list.visible_rows()
        .filter_map(|id| list.content(id))
        .map(|entry| entry.name)
        .collect()
}

fn separator_labels(list: &ListBox<Entry>) -> Vec<Option<String>> {
    list.visible_rows()
        .filter_map(|id| list.row(id))
        .map(|row| {
            row.separator()
                .and_then(|separator| separator.label())
                .map(str::to_string)
        })
        .collect()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("horizon_listbox=trace")
        .with_test_writer()
        .try_init();
}

#[test]
fn test_filter_then_sort_end_to_end() {
    init_tracing();
    let mut list = ListBox::new();
    let r1 = list.append(Entry::new("R1", "a", 1));
    let r2 = list.append(Entry::new("R2", "a", 2));
    let r3 = list.append(Entry::new("R3", "a", 3));

    list.set_filter_func(|row| row.content().name != "R2");
    assert_eq!(visible_names(&list), vec!["R1", "R3"]);

    list.set_sort_func(|a, b| b.content().seq.cmp(&a.content().seq));
    assert_eq!(list.row_ids(), &[r3, r2, r1]);
    assert_eq!(visible_names(&list), vec!["R3", "R1"]);
    assert_eq!(list.row_at_index(1), Some(r1));
}

#[test]
fn test_refilter_is_idempotent() {
    let mut list = ListBox::new();
    for (i, name) in ["a", "b", "c", "d"].into_iter().enumerate() {
        list.append(Entry::new(name, if i < 2 { "x" } else { "y" }, i as u32));
    }
    list.set_separator_func(kind_headers);
    list.set_filter_func(|row| row.content().name != "b");

    let visible = visible_names(&list);
    let labels = separator_labels(&list);
    let changes = Arc::new(AtomicUsize::new(0));
    let counter = changes.clone();
    list.selected_rows_changed.connect(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    list.refilter();
    list.refilter();
    assert_eq!(visible_names(&list), visible);
    assert_eq!(separator_labels(&list), labels);
    assert_eq!(changes.load(Ordering::SeqCst), 0);
}

#[test]
fn test_remove_and_reinsert_restores_view() {
    let mut list = ListBox::new();
    list.append(Entry::new("a", "x", 0));
    let b = list.append(Entry::new("b", "y", 1));
    list.append(Entry::new("c", "y", 2));
    list.set_separator_func(kind_headers);

    let visible = visible_names(&list);
    let labels = separator_labels(&list);
    let index = list.row_index(b).unwrap();

    let content = list.remove(b).unwrap();
    assert_ne!(separator_labels(&list), labels);
    list.insert(content, index);

    assert_eq!(visible_names(&list), visible);
    assert_eq!(separator_labels(&list), labels);
}

#[test]
fn test_resort_ascending_and_stable() {
    let mut list = ListBox::new();
    for (seq, name) in [(3, "first three"), (1, "one"), (2, "two"), (3, "second three")] {
        list.append(Entry::new(name, "x", seq));
    }
    list.set_sort_func(|a, b| a.content().seq.cmp(&b.content().seq));
    assert_eq!(names(&list), vec!["one", "two", "first three", "second three"]);

    // Resorting an already sorted list changes nothing.
    list.resort();
    assert_eq!(names(&list), vec!["one", "two", "first three", "second three"]);
}

#[test]
fn test_browse_clear_selects_first_visible() {
    let config = ListBoxConfig::default().with_selection_mode(SelectionMode::Browse);
    let mut list = ListBox::with_config(config).unwrap();
    let a = list.append(Entry::new("a", "x", 0));
    let b = list.append(Entry::new("b", "x", 1));
    list.append(Entry::new("c", "x", 2));

    list.select_row(Some(b)).unwrap();
    assert_eq!(list.selected_row(), Some(b));

    list.select_row(None).unwrap();
    assert_eq!(list.selected_rows(), vec![a]);

    list.set_filter_func(|row| row.content().name != "a");
    list.unselect_all();
    assert_eq!(list.selected_rows(), vec![b]);
}

#[test]
fn test_row_change_leaves_earlier_separator_untouched() {
    let mut list = ListBox::new();
    let a = list.append(Entry::new("A", "x", 0));
    let b = list.append(Entry::new("B", "x", 1));
    let c = list.append(Entry::new("C", "y", 2));

    let calls = Arc::new(Mutex::new(Vec::new()));
    let log = calls.clone();
    list.set_separator_func(move |row, before| {
        log.lock().push(row.id());
        kind_headers(row, before);
    });
    calls.lock().clear();

    list.content_mut(b).unwrap().kind = "y";
    list.row_changed(b).unwrap();

    let touched = calls.lock().clone();
    assert!(!touched.contains(&a));
    assert!(touched.contains(&b));
    assert!(touched.contains(&c));
    assert_eq!(
        separator_labels(&list),
        vec![Some("x".to_string()), Some("y".to_string()), None]
    );
}

#[test]
fn test_cursor_clamp_single_overshoot() {
    let mut list = ListBox::new();
    let ids: Vec<RowId> = (0..5)
        .map(|i| list.append(Entry::new("row", "x", i)))
        .collect();
    let overshoots = Arc::new(Mutex::new(Vec::new()));
    let log = overshoots.clone();
    list.cursor_overshoot.connect(move |direction| log.lock().push(*direction));

    list.move_cursor(MovementStep::BufferEnds, 1);
    assert_eq!(list.cursor_row(), Some(ids[4]));
    assert!(overshoots.lock().is_empty());

    list.move_cursor(MovementStep::DisplayLines, 10);
    assert_eq!(list.cursor_row(), Some(ids[4]));
    assert_eq!(*overshoots.lock(), vec![Direction::Down]);
}

#[test]
fn test_keyboard_navigation_selects_and_activates() {
    let mut list = ListBox::new();
    let ids: Vec<RowId> = (0..3)
        .map(|i| list.append(Entry::new("row", "x", i)))
        .collect();
    let activated = Arc::new(Mutex::new(Vec::new()));
    let log = activated.clone();
    list.row_activated.connect(move |row| log.lock().push(*row));

    list.move_cursor(MovementStep::DisplayLines, 1);
    list.move_cursor(MovementStep::DisplayLines, 1);
    list.activate_cursor_row();

    assert_eq!(list.selected_row(), Some(ids[1]));
    assert_eq!(*activated.lock(), vec![ids[1]]);
}

#[test]
fn test_row_at_y_after_mutation_without_layout_call() {
    let mut list = ListBox::new();
    list.layout(200.0);
    let a = list.append(Entry::new("a", "x", 0));
    let b = list.append(Entry::new("b", "x", 1));

    assert_eq!(list.row_at_y(10.0), Some(a));
    assert_eq!(list.row_at_y(45.0), Some(b));
    assert_eq!(list.content_height(), 60.0);

    list.remove(a).unwrap();
    assert_eq!(list.row_at_y(10.0), Some(b));
}

#[test]
fn test_rows_from_another_list_are_rejected() {
    let mut first: ListBox<Entry> = ListBox::new();
    let mut second: ListBox<Entry> = ListBox::new();
    let foreign = second.append(Entry::new("x", "x", 0));
    first.append(Entry::new("y", "y", 0));

    assert!(matches!(first.select_row(Some(foreign)), Err(ListBoxError::UnknownRow(_))));
    assert!(first.row_changed(foreign).is_err());
    assert!(first.set_cursor_row(Some(foreign)).is_err());
    assert!(first.row_clicked(foreign, 1).is_err());
    assert_eq!(first.selected_row(), None);
    assert_eq!(second.len(), 1);
}

#[test]
fn test_content_visibility_follows_filter() {
    #[derive(Default)]
    struct Tracked {
        shown: bool,
        hidden_count: usize,
    }

    impl RowContent for Tracked {
        fn preferred_height(&self, _width: f32) -> f32 {
            10.0
        }

        fn set_visible(&mut self, visible: bool) {
            self.shown = visible;
            if !visible {
                self.hidden_count += 1;
            }
        }
    }

    let mut list = ListBox::new();
    let id = list.append(Tracked {
        shown: true,
        ..Tracked::default()
    });
    list.set_filter_func(|_| false);
    list.refilter();
    assert!(!list.content(id).unwrap().shown);
    assert_eq!(list.content(id).unwrap().hidden_count, 1);

    list.clear_filter_func();
    assert!(list.content(id).unwrap().shown);
}

#[test]
fn test_config_from_toml_drives_list() {
    let config = ListBoxConfig::from_toml_str(
        r#"
selection_mode = "multiple"
activate_on_single_click = false
page_size = 90.0
"#,
    )
    .unwrap();
    let mut list: ListBox<Entry> = ListBox::with_config(config).unwrap();
    assert_eq!(list.selection_mode(), SelectionMode::Multiple);
    assert_eq!(list.page_size(), 90.0);

    let ids: Vec<RowId> = (0..3)
        .map(|i| list.append(Entry::new("row", "x", i)))
        .collect();
    list.select_all();
    assert_eq!(list.selected_rows(), ids);

    assert!(ListBoxConfig::from_toml_str("page_size = \"big\"").is_err());
}
