#![forbid(unsafe_code)]

//! Integration tests: value synchronization between host and widget.

use serde_json::{Value, json};
use superselect_runtime::{BatchScope, Observable};
use superselect_widgets::{FullItemAccessor, JsonAccessor, SelectEvent, SelectOptions, SuperSelect};

fn people() -> Observable<Vec<Value>> {
    Observable::new(vec![
        json!({"name": "Ada", "id": "u1"}),
        json!({"name": "Grace", "id": "u2"}),
        json!({"name": "Linus", "id": "u3"}),
    ])
}

fn bound(external: &Observable<Value>) -> SuperSelect<JsonAccessor> {
    SuperSelect::builder(JsonAccessor::new("name"), people(), external.clone())
        .options(r#"{"selectValue":"id","isRequired":"true"}"#)
        .build()
}

#[test]
fn external_assignment_reaches_widget_in_one_pass() {
    let external = Observable::new(Value::Null);
    let s = bound(&external);
    for (id, name) in [("u1", "Ada"), ("u3", "Linus"), ("u2", "Grace")] {
        external.set(json!(id));
        let sel = s.selected_item();
        assert_eq!(sel.val, json!(id));
        assert_eq!(sel.title, name);
    }
}

#[test]
fn selection_reaches_host() {
    let external = Observable::new(Value::Null);
    let s = bound(&external);
    s.handle_event(SelectEvent::LabelClicked);
    s.handle_event(SelectEvent::OptionClicked(2));
    assert_eq!(external.get(), json!("u3"));
    assert!(s.is_valid());
}

#[test]
fn no_feedback_loop() {
    let external = Observable::new(Value::Null);
    let s = bound(&external);
    let before = external.version();
    s.select(json!({"name": "Ada", "id": "u1"}));
    assert_eq!(external.version(), before + 1, "host value written exactly once");

    let before = external.version();
    external.set(json!("u2"));
    assert_eq!(external.version(), before + 1, "widget does not write back");
    assert_eq!(s.selected_item().val, json!("u2"));
}

#[test]
fn selected_option_is_marked_in_view() {
    let external = Observable::new(json!("u2"));
    let s = bound(&external);
    s.expand();
    let view = s.view();
    let panel = view.panel.expect("open select renders a panel");
    let marked: Vec<&str> = panel
        .options
        .iter()
        .filter(|o| o.selected)
        .map(|o| o.title.as_str())
        .collect();
    assert_eq!(marked, vec!["Grace"]);
    assert!(panel.filter_input.is_none());
}

#[test]
fn view_renders_label_and_validity() {
    let external = Observable::new(Value::Null);
    let s = bound(&external);
    assert_eq!(s.view().render_lines(10), vec!["       ▾ !"]);

    external.set(json!("u1"));
    assert_eq!(s.view().render_lines(10), vec!["Ada    ▾ ✓"]);
}

// Both sides written in one pass: the listener that flushes first decides.
// External notifications flush first when the host writes first.
#[test]
fn batched_conflict_host_first_wins() {
    let external = Observable::new(Value::Null);
    let s = bound(&external);
    {
        let _pass = BatchScope::new();
        external.set(json!("u1"));
        s.select(json!({"name": "Grace", "id": "u2"}));
    }
    assert_eq!(external.get(), json!("u1"));
    assert_eq!(s.selected_item().val, json!("u1"));
    assert_eq!(s.selected_item().title, "Ada");
}

#[test]
fn batched_conflict_widget_first_wins() {
    let external = Observable::new(Value::Null);
    let s = bound(&external);
    {
        let _pass = BatchScope::new();
        s.select(json!({"name": "Grace", "id": "u2"}));
        external.set(json!("u1"));
    }
    assert_eq!(external.get(), json!("u2"));
    assert_eq!(s.selected_item().val, json!("u2"));
}

#[derive(Debug, Clone, PartialEq)]
struct Person {
    id: u32,
    name: &'static str,
}

fn staff() -> Vec<Person> {
    vec![
        Person { id: 1, name: "Ada" },
        Person { id: 2, name: "Grace" },
    ]
}

#[test]
fn typed_full_item_binding_seeds_and_round_trips() {
    let external = Observable::new(Some(Person { id: 2, name: "Grace" }));
    let s = SuperSelect::builder(
        FullItemAccessor::new(|p: &Person| p.name.to_string()),
        Observable::new(staff()),
        external.clone(),
    )
    .options(SelectOptions::default().required(true))
    .build();

    assert!(!s.has_pending_seed());
    assert_eq!(s.selected_item().title, "Grace");
    assert_eq!(s.selected_item().full_item, Some(staff()[1].clone()));
    assert!(s.is_valid());

    s.handle_event(SelectEvent::LabelClicked);
    s.handle_event(SelectEvent::OptionClicked(0));
    assert_eq!(external.get(), Some(staff()[0].clone()));
    assert_eq!(s.selected_item().title, "Ada");

    external.set(None);
    assert_eq!(s.selected_item().val, None);
    assert_eq!(s.selected_item().title, "");
    assert!(!s.is_valid());
}
