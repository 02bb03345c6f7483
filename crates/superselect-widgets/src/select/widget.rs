#![forbid(unsafe_code)]

//! The select widget controller.
//!
//! # Synchronization
//!
//! Two observables carry the selection: the host's external value and the
//! widget's internal `val`. Each has one listener.
//!
//! - external changed to `v`, and `v != val`: the change came from the host.
//!   Resolve `v` against the source list, then copy it into `val`.
//! - `val` changed: the change came from the widget. Copy it to the external
//!   value. When they are already equal this is a no-op, which ends the
//!   exchange.
//!
//! After either listener, a required widget recomputes `is_valid`.
//!
//! The check is asymmetric. Inside a [`BatchScope`] where both sides are
//! written, listeners flush in registration order (external first), and
//! whichever value the external listener sees wins. That outcome is
//! order-dependent by construction.
//!
//! [`BatchScope`]: superselect_runtime::BatchScope

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use superselect_runtime::{
    Binding, BindingScope, Observable, Subscription, bind_mapped, bind_observable,
};

use super::accessor::ItemAccessor;
use super::config::{RequiredValue, SelectConfig, Validator};
use super::group::{GroupMembership, GroupOrigin, SelectGroups, SelectId};
use super::model::{SelectModel, SelectedItem};
use super::options::{OptionsInput, SelectOptions, ValueSelector};
use super::view::{Caret, FilterInputView, OptionView, PanelView, SelectView, ValidityIcon};

/// Input events a host feeds into the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectEvent {
    /// Click on the label: toggles the panel.
    LabelClicked,
    /// Click on the option at this index of the filtered list.
    OptionClicked(usize),
    /// Click inside the panel but not on an option.
    PanelClicked,
    /// New text in the filter input.
    FilterInput(String),
}

/// What handling an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The panel was toggled; carries the new open state.
    Toggled(bool),
    /// An item was selected and the panel toggled.
    Selected,
    /// The filter text changed.
    FilterChanged,
    /// Nothing changed locally.
    Ignored,
}

struct SelectInner<A: ItemAccessor> {
    id: SelectId,
    accessor: A,
    config: SelectConfig<A::Value>,
    selector: ValueSelector,
    source: Observable<Vec<A::Item>>,
    external: Observable<A::Value>,
    val: Observable<A::Value>,
    full_item: RefCell<Option<A::Item>>,
    title: Observable<String>,
    filter: Observable<String>,
    is_open: Observable<bool>,
    is_valid: Observable<bool>,
}

impl<A> SelectInner<A>
where
    A: ItemAccessor + 'static,
    A::Value: RequiredValue,
{
    fn on_external_change(&self, v: &A::Value) {
        let external_origin = self.val.with(|cur| cur != v);
        if external_origin {
            self.resolve(v);
            self.val.set(v.clone());
        }
        self.revalidate();
    }

    fn on_val_change(&self, v: &A::Value) {
        self.external.set(v.clone());
        self.revalidate();
    }

    fn on_source_change(&self) {
        let unresolved = self.full_item.borrow().is_none();
        if unresolved && self.val.with(Self::is_bound) {
            self.resolve(&self.val.get());
        }
    }

    /// Point `full_item`/`title` at the first source item whose value is `v`.
    fn resolve(&self, v: &A::Value) {
        let found = self.source.with(|items| {
            items
                .iter()
                .find(|item| self.accessor.value_of(item, &self.selector) == *v)
                .cloned()
        });
        let title = found
            .as_ref()
            .map(|item| self.accessor.display_of(item))
            .unwrap_or_default();
        *self.full_item.borrow_mut() = found;
        self.title.set(title);
    }

    fn seed(&self, v: &A::Value) {
        self.resolve(v);
        self.val.set(v.clone());
        self.revalidate();
    }

    fn revalidate(&self) {
        if let Some(valid) = self.val.with(|v| self.config.validate(v)) {
            self.is_valid.set(valid);
        }
    }

    fn select(&self, item: A::Item) {
        let val = self.accessor.value_of(&item, &self.selector);
        let title = self.accessor.display_of(&item);
        *self.full_item.borrow_mut() = Some(item);
        self.title.set(title);
        self.val.set(val);
        self.expand();
    }

    fn expand(&self) -> bool {
        let open = !self.is_open.get();
        self.is_open.set(open);
        open
    }

    fn close_from_group(&self, origin: GroupOrigin) {
        if !origin.is(self.id) && self.is_open.get() {
            self.is_open.set(false);
            tracing::debug!(select = %self.id, ?origin, "closed by group click");
        }
    }
}

impl<A: ItemAccessor> SelectInner<A> {
    /// Whether `v` carries a value, as opposed to the unset default.
    fn is_bound(v: &A::Value) -> bool {
        *v != A::Value::default()
    }

    fn filtered_items(&self) -> Vec<A::Item> {
        let query = self.filter.with(|f| f.to_lowercase());
        self.source.with(|items| {
            items
                .iter()
                .filter(|item| query.is_empty() || self.accessor.matches(item, &query))
                .cloned()
                .collect()
        })
    }
}

/// Builder for [`SuperSelect`].
pub struct SuperSelectBuilder<A: ItemAccessor> {
    accessor: A,
    source: Observable<Vec<A::Item>>,
    external: Observable<A::Value>,
    options: OptionsInput,
    validator: Option<Validator<A::Value>>,
    groups: Option<SelectGroups>,
}

impl<A> SuperSelectBuilder<A>
where
    A: ItemAccessor + 'static,
    A::Value: RequiredValue,
{
    /// Options bag: typed, JSON text, or JSON value.
    #[must_use]
    pub fn options(mut self, options: impl Into<OptionsInput>) -> Self {
        self.options = options.into();
        self
    }

    /// Custom validator for required widgets.
    #[must_use]
    pub fn validator(mut self, validator: impl Fn(&A::Value) -> bool + 'static) -> Self {
        self.validator = Some(Rc::new(validator));
        self
    }

    /// Registry used when the options name a `scopeBind` group.
    #[must_use]
    pub fn groups(mut self, groups: &SelectGroups) -> Self {
        self.groups = Some(groups.clone());
        self
    }

    /// Build and wire the widget.
    pub fn build(self) -> SuperSelect<A> {
        let config = SelectConfig::new(self.options.normalize(), self.validator);
        let selector = config.value_selector();
        let id = SelectId::next();

        let inner = Rc::new(SelectInner {
            id,
            accessor: self.accessor,
            config,
            selector,
            source: self.source,
            external: self.external,
            val: Observable::new(A::Value::default()),
            full_item: RefCell::new(None),
            title: Observable::new(String::new()),
            filter: Observable::new(String::new()),
            is_open: Observable::new(false),
            is_valid: Observable::new(false),
        });

        let mut scope = BindingScope::new();
        let on_external = Rc::clone(&inner);
        scope.subscribe(&inner.external, move |v| on_external.on_external_change(v));
        let on_val = Rc::clone(&inner);
        scope.subscribe(&inner.val, move |v| on_val.on_val_change(v));
        let on_source = Rc::clone(&inner);
        scope.subscribe(&inner.source, move |_| on_source.on_source_change());

        let seed: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let initial = inner.external.get();
        if SelectInner::<A>::is_bound(&initial) {
            inner.seed(&initial);
        } else {
            // Late initial value: seed on the first change, then unsubscribe.
            let slot = Rc::clone(&seed);
            let weak = Rc::downgrade(&inner);
            let sub = inner.external.subscribe(move |v| {
                if let Some(inner) = weak.upgrade() {
                    inner.seed(v);
                }
                slot.borrow_mut().take();
            });
            *seed.borrow_mut() = Some(sub);
            inner.revalidate();
        }

        let membership = match (inner.config.scope_bind(), self.groups) {
            (Some(key), Some(groups)) => {
                let target = Rc::clone(&inner);
                groups.join(key, id, move |origin| target.close_from_group(origin))
            }
            (Some(key), None) => {
                tracing::debug!(select = %id, group = %key, "scopeBind set without a group registry");
                None
            }
            (None, _) => None,
        };

        tracing::debug!(select = %id, options = ?inner.config.options(), "select built");
        SuperSelect {
            inner,
            scope,
            seed,
            membership,
            torn_down: false,
        }
    }
}

/// A filterable, validating select widget.
///
/// The host owns the source list and the bound value as [`Observable`]s; the
/// widget keeps its own selection in sync with them until torn down.
///
/// ```ignore
/// let fruits = Observable::new(vec![json!({"title": "Apple", "id": "a"})]);
/// let value = Observable::new(Value::Null);
/// let select = SuperSelect::builder(JsonAccessor::new("title"), fruits, value.clone())
///     .options(r#"{"selectValue":"id","isRequired":"true"}"#)
///     .build();
///
/// select.handle_event(SelectEvent::LabelClicked);
/// select.handle_event(SelectEvent::OptionClicked(0));
/// assert_eq!(value.get(), json!("a"));
/// ```
pub struct SuperSelect<A: ItemAccessor> {
    inner: Rc<SelectInner<A>>,
    scope: BindingScope,
    seed: Rc<RefCell<Option<Subscription>>>,
    membership: Option<GroupMembership>,
    torn_down: bool,
}

impl<A> SuperSelect<A>
where
    A: ItemAccessor + 'static,
    A::Value: RequiredValue,
{
    /// Start building a widget over `source`, bound to `external`.
    pub fn builder(
        accessor: A,
        source: Observable<Vec<A::Item>>,
        external: Observable<A::Value>,
    ) -> SuperSelectBuilder<A> {
        SuperSelectBuilder {
            accessor,
            source,
            external,
            options: OptionsInput::Absent,
            validator: None,
            groups: None,
        }
    }

    /// Choose `item`: bind its value, show its title, and toggle the panel.
    pub fn select(&self, item: A::Item) {
        self.inner.select(item);
    }

    /// Toggle the panel. Returns the new open state.
    pub fn expand(&self) -> bool {
        self.inner.expand()
    }

    /// Set the filter text. Ignored unless the widget is filterable.
    pub fn set_filter(&self, text: impl Into<String>) -> bool {
        if !self.inner.config.is_filterable() {
            tracing::trace!(select = %self.inner.id, "filter input on non-filterable select");
            return false;
        }
        self.inner.filter.set(text.into())
    }

    /// Feed one input event.
    ///
    /// Clicks are relayed to the widget's group before they act locally.
    pub fn handle_event(&self, event: SelectEvent) -> SelectOutcome {
        match event {
            SelectEvent::LabelClicked => {
                self.relay_click();
                SelectOutcome::Toggled(self.expand())
            }
            SelectEvent::OptionClicked(index) => {
                self.relay_click();
                match self.inner.filtered_items().into_iter().nth(index) {
                    Some(item) => {
                        self.select(item);
                        SelectOutcome::Selected
                    }
                    None => SelectOutcome::Ignored,
                }
            }
            SelectEvent::PanelClicked => {
                self.relay_click();
                SelectOutcome::Ignored
            }
            SelectEvent::FilterInput(text) => {
                if self.set_filter(text) {
                    SelectOutcome::FilterChanged
                } else {
                    SelectOutcome::Ignored
                }
            }
        }
    }

    fn relay_click(&self) {
        if let Some(membership) = &self.membership {
            membership.relay_click();
        }
    }
}

impl<A: ItemAccessor + 'static> SuperSelect<A> {
    /// This widget's id.
    #[must_use]
    pub fn id(&self) -> SelectId {
        self.inner.id
    }

    /// Normalized options.
    #[must_use]
    pub fn options(&self) -> &SelectOptions {
        self.inner.config.options()
    }

    /// Whether a validator is installed.
    #[must_use]
    pub fn has_validator(&self) -> bool {
        self.inner.config.has_validator()
    }

    /// Whether the panel is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.is_open.get()
    }

    /// Last validation result.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.inner.is_valid.get()
    }

    /// Current filter text.
    #[must_use]
    pub fn filter(&self) -> String {
        self.inner.filter.get()
    }

    /// Current selection.
    #[must_use]
    pub fn selected_item(&self) -> SelectedItem<A::Item, A::Value> {
        SelectedItem {
            full_item: self.inner.full_item.borrow().clone(),
            title: self.inner.title.get(),
            val: self.inner.val.get(),
        }
    }

    /// Snapshot of the full view state.
    #[must_use]
    pub fn model(&self) -> SelectModel<A::Item, A::Value> {
        SelectModel {
            filter: self.filter(),
            is_open: self.is_open(),
            is_valid: self.is_valid(),
            selected_item: self.selected_item(),
            use_full_object: self.inner.config.options().use_full_object(),
        }
    }

    /// Source items passing the current filter, in source order.
    #[must_use]
    pub fn filtered_items(&self) -> Vec<A::Item> {
        self.inner.filtered_items()
    }

    /// Whether this widget joined a close-on-click group.
    #[must_use]
    pub fn in_group(&self) -> bool {
        self.membership.is_some()
    }

    /// Whether the one-shot seed listener is still waiting for a value.
    #[must_use]
    pub fn has_pending_seed(&self) -> bool {
        self.seed.borrow().is_some()
    }

    /// Whether [`teardown`](Self::teardown) has run.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Number of live subscriptions this widget holds, seed included.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.scope.binding_count() + usize::from(self.has_pending_seed())
    }

    /// The open flag, for hosts that re-render on change.
    #[must_use]
    pub fn open_state(&self) -> Observable<bool> {
        self.inner.is_open.clone()
    }

    /// Read binding on the open flag.
    #[must_use]
    pub fn open_binding(&self) -> Binding<bool> {
        bind_observable(&self.inner.is_open)
    }

    /// Read binding on the caret direction.
    #[must_use]
    pub fn caret_binding(&self) -> Binding<Caret> {
        bind_mapped(&self.inner.is_open, |open| Caret::for_open(*open))
    }

    /// Read binding on the label text.
    #[must_use]
    pub fn title_binding(&self) -> Binding<String> {
        bind_observable(&self.inner.title)
    }

    /// Read binding on the validity icon; `None` when not required.
    #[must_use]
    pub fn validity_binding(&self) -> Binding<Option<ValidityIcon>> {
        let required = self.inner.config.is_required();
        bind_mapped(&self.inner.is_valid, move |valid| {
            required.then(|| ValidityIcon::for_valid(*valid))
        })
    }

    /// Build the declarative view for the current state.
    #[must_use]
    pub fn view(&self) -> SelectView {
        let inner = &self.inner;
        let is_open = inner.is_open.get();
        let panel = is_open.then(|| {
            let current = inner.full_item.borrow();
            let options = inner
                .filtered_items()
                .iter()
                .map(|item| OptionView {
                    title: inner.accessor.display_of(item),
                    selected: current.as_ref() == Some(item),
                })
                .collect();
            PanelView {
                filter_input: inner
                    .config
                    .is_filterable()
                    .then(|| FilterInputView::new(inner.filter.get())),
                options,
            }
        });
        SelectView {
            label: inner.title.get(),
            caret: Caret::for_open(is_open),
            panel,
            validity: inner
                .config
                .is_required()
                .then(|| ValidityIcon::for_valid(inner.is_valid.get())),
        }
    }

    /// Release all subscriptions and leave the group. Safe to call twice.
    ///
    /// After teardown the widget no longer tracks the external value; local
    /// actions still update its own state.
    pub fn teardown(&mut self) {
        if self.release() {
            tracing::debug!(select = %self.inner.id, "select torn down");
        }
    }
}

impl<A: ItemAccessor> SuperSelect<A> {
    /// Drop subscriptions, the pending seed, and the group membership.
    /// Returns `false` if they were already released.
    fn release(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.torn_down = true;
        self.scope.clear();
        self.seed.borrow_mut().take();
        self.membership.take();
        true
    }
}

impl<A: ItemAccessor> Drop for SuperSelect<A> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<A: ItemAccessor> fmt::Debug for SuperSelect<A>
where
    A::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuperSelect")
            .field("id", &self.inner.id)
            .field("val", &self.inner.val)
            .field("is_open", &self.inner.is_open)
            .field("in_group", &self.membership.is_some())
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::accessor::{FnAccessor, JsonAccessor};
    use serde_json::{Value, json};

    fn fruits() -> Observable<Vec<Value>> {
        Observable::new(vec![
            json!({"title": "Apple", "id": "a"}),
            json!({"title": "Banana", "id": "b"}),
            json!({"title": "Cherry", "id": "c"}),
        ])
    }

    fn by_id(external: &Observable<Value>, options: &str) -> SuperSelect<JsonAccessor> {
        SuperSelect::builder(JsonAccessor::new("title"), fruits(), external.clone())
            .options(options)
            .build()
    }

    #[test]
    fn select_sets_title_value_and_closes() {
        let external = Observable::new(Value::Null);
        let s = by_id(&external, r#"{"selectValue":"id"}"#);
        s.expand();
        assert!(s.is_open());

        s.select(json!({"title": "Banana", "id": "b"}));
        let sel = s.selected_item();
        assert_eq!(sel.title, "Banana");
        assert_eq!(sel.val, json!("b"));
        assert!(!s.is_open());
        assert_eq!(external.get(), json!("b"));
    }

    #[test]
    fn full_object_binding_without_select_value() {
        let external = Observable::new(Value::Null);
        let s = by_id(&external, "{}");
        assert!(s.model().use_full_object);
        s.select(json!({"title": "Cherry", "id": "c"}));
        assert_eq!(external.get(), json!({"title": "Cherry", "id": "c"}));
    }

    #[test]
    fn external_assignment_resolves_title() {
        let external = Observable::new(Value::Null);
        let s = by_id(&external, r#"{"selectValue":"id"}"#);
        external.set(json!("c"));
        let sel = s.selected_item();
        assert_eq!(sel.val, json!("c"));
        assert_eq!(sel.title, "Cherry");
        assert_eq!(sel.full_item, Some(json!({"title": "Cherry", "id": "c"})));
    }

    #[test]
    fn unknown_external_value_clears_title() {
        let external = Observable::new(json!("a"));
        let s = by_id(&external, r#"{"selectValue":"id"}"#);
        assert_eq!(s.selected_item().title, "Apple");
        external.set(json!("zzz"));
        let sel = s.selected_item();
        assert_eq!(sel.val, json!("zzz"));
        assert_eq!(sel.title, "");
        assert!(sel.full_item.is_none());
    }

    #[test]
    fn initial_value_seeds_immediately() {
        let external = Observable::new(json!("b"));
        let s = by_id(&external, r#"{"selectValue":"id"}"#);
        assert!(!s.has_pending_seed());
        assert_eq!(s.selected_item().title, "Banana");
    }

    #[test]
    fn numeric_initial_value_seeds() {
        let external = Observable::new(json!(2));
        let s = SuperSelect::builder(
            JsonAccessor::new("title"),
            Observable::new(vec![
                json!({"title": "Apple", "id": 1}),
                json!({"title": "Banana", "id": 2}),
            ]),
            external.clone(),
        )
        .options(r#"{"selectValue":"id"}"#)
        .build();
        assert!(!s.has_pending_seed());
        assert_eq!(s.selected_item().val, json!(2));
        assert_eq!(s.selected_item().title, "Banana");
    }

    #[test]
    fn full_object_initial_value_seeds() {
        let banana = json!({"title": "Banana", "id": "b"});
        let external = Observable::new(banana.clone());
        let s = by_id(&external, "{}");
        assert!(s.model().use_full_object);
        assert!(!s.has_pending_seed());
        let sel = s.selected_item();
        assert_eq!(sel.val, banana);
        assert_eq!(sel.full_item, Some(banana));
        assert_eq!(sel.title, "Banana");
    }

    #[test]
    fn late_source_resolves_numeric_value() {
        let source = Observable::new(Vec::<Value>::new());
        let external = Observable::new(json!(7));
        let s = SuperSelect::builder(JsonAccessor::new("title"), source.clone(), external)
            .options(r#"{"selectValue":"id"}"#)
            .build();
        assert_eq!(s.selected_item().title, "");
        source.set(vec![json!({"title": "Seven", "id": 7})]);
        assert_eq!(s.selected_item().title, "Seven");
    }

    #[test]
    fn late_value_seeds_once() {
        let external = Observable::new(Value::Null);
        let s = by_id(&external, r#"{"selectValue":"id"}"#);
        assert!(s.has_pending_seed());
        external.set(json!("a"));
        assert!(!s.has_pending_seed());
        assert_eq!(s.selected_item().title, "Apple");
    }

    #[test]
    fn late_source_list_resolves_title() {
        let source = Observable::new(Vec::new());
        let external = Observable::new(json!("b"));
        let s = SuperSelect::builder(JsonAccessor::new("title"), source.clone(), external)
            .options(r#"{"selectValue":"id"}"#)
            .build();
        assert_eq!(s.selected_item().title, "");
        source.set(fruits().get());
        assert_eq!(s.selected_item().title, "Banana");
    }

    #[test]
    fn required_default_validator_tracks_value() {
        let external = Observable::new(Value::Null);
        let s = by_id(&external, r#"{"selectValue":"id","isRequired":true}"#);
        assert!(s.has_validator());
        assert!(!s.is_valid());
        s.select(json!({"title": "Apple", "id": "a"}));
        assert!(s.is_valid());
        external.set(json!(""));
        assert!(!s.is_valid());
    }

    #[test]
    fn custom_validator() {
        let external = Observable::new(String::new());
        let s = SuperSelect::builder(
            FnAccessor::new(|t: &String| t.clone(), |t: &String| t.clone()),
            Observable::new(vec!["x".to_string(), "y".to_string()]),
            external.clone(),
        )
        .options(SelectOptions::default().required(true))
        .validator(|v: &String| v == "y")
        .build();

        s.select("x".into());
        assert!(!s.is_valid());
        s.select("y".into());
        assert!(s.is_valid());
    }

    #[test]
    fn filter_only_when_filterable() {
        let external = Observable::new(Value::Null);
        let plain = by_id(&external, "{}");
        assert_eq!(
            plain.handle_event(SelectEvent::FilterInput("an".into())),
            SelectOutcome::Ignored
        );
        assert_eq!(plain.filtered_items().len(), 3);

        let filterable = by_id(&external, r#"{"isFilterable":"true"}"#);
        assert_eq!(
            filterable.handle_event(SelectEvent::FilterInput("an".into())),
            SelectOutcome::FilterChanged
        );
        let titles: Vec<Value> = filterable.filtered_items();
        assert_eq!(titles, vec![json!({"title": "Banana", "id": "b"})]);
    }

    #[test]
    fn option_click_uses_filtered_index() {
        let external = Observable::new(Value::Null);
        let s = by_id(&external, r#"{"selectValue":"id","isFilterable":true}"#);
        s.handle_event(SelectEvent::LabelClicked);
        s.handle_event(SelectEvent::FilterInput("ch".into()));
        assert_eq!(
            s.handle_event(SelectEvent::OptionClicked(0)),
            SelectOutcome::Selected
        );
        assert_eq!(external.get(), json!("c"));
        assert_eq!(
            s.handle_event(SelectEvent::OptionClicked(5)),
            SelectOutcome::Ignored
        );
    }

    #[test]
    fn label_click_toggles() {
        let external = Observable::new(Value::Null);
        let s = by_id(&external, "{}");
        assert_eq!(
            s.handle_event(SelectEvent::LabelClicked),
            SelectOutcome::Toggled(true)
        );
        assert_eq!(
            s.handle_event(SelectEvent::LabelClicked),
            SelectOutcome::Toggled(false)
        );
    }

    #[test]
    fn teardown_is_idempotent_and_disconnects() {
        let external = Observable::new(Value::Null);
        let mut s = by_id(&external, r#"{"selectValue":"id"}"#);
        assert!(s.subscription_count() > 0);
        s.teardown();
        s.teardown();
        assert!(s.is_torn_down());
        assert_eq!(s.subscription_count(), 0);
        assert_eq!(external.subscriber_count(), 0);

        external.set(json!("a"));
        assert_eq!(s.selected_item().val, Value::Null);
    }

    #[test]
    fn drop_releases_external_subscribers() {
        let external = Observable::new(Value::Null);
        {
            let _s = by_id(&external, "{}");
            assert!(external.subscriber_count() > 0);
        }
        assert_eq!(external.subscriber_count(), 0);
    }

    #[test]
    fn bindings_follow_state() {
        let external = Observable::new(Value::Null);
        let s = by_id(&external, r#"{"isRequired":true,"selectValue":"id"}"#);
        let open = s.open_binding();
        let caret = s.caret_binding();
        let title = s.title_binding();
        let validity = s.validity_binding();

        assert!(!open.get());
        assert_eq!(caret.get(), Caret::Down);
        assert_eq!(validity.get(), Some(ValidityIcon::Invalid));

        s.expand();
        assert!(open.get());
        assert_eq!(caret.get(), Caret::Up);

        s.select(json!({"title": "Apple", "id": "a"}));
        assert_eq!(title.get(), "Apple");
        assert_eq!(validity.get(), Some(ValidityIcon::Valid));
    }

    #[test]
    fn scope_bind_without_registry_is_inert() {
        let external = Observable::new(Value::Null);
        let s = by_id(&external, r#"{"scopeBind":"g"}"#);
        assert!(!s.in_group());
    }
}
