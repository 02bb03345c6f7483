#![forbid(unsafe_code)]

//! Close-on-click coordination between select widgets.
//!
//! Several selects on one screen usually belong to one form, and opening one
//! should close the others. [`SelectGroups`] is the mediator: a registry from
//! group key to the live widgets of that group. A widget that is clicked
//! relays the click through the registry, and every *other* member of its
//! group closes its panel if open.
//!
//! A group only exists while at least one [`GroupAnchor`] for its key is
//! alive. The anchor is the owner of the group, typically the form or panel
//! containing the selects. Widgets that ask to join a key with no anchor
//! are left uncoordinated; this is not an error.
//!
//! # Invariants
//!
//! - A relay never reaches the member that originated it.
//! - Handlers run synchronously, in join order, with no registry borrow held,
//!   so a handler may join or leave groups.
//! - Dropping a [`GroupMembership`] removes the member before the next relay.
//!
//! # Example
//!
//! ```ignore
//! let groups = SelectGroups::new();
//! let _form = groups.anchor("checkout");
//!
//! let country = SuperSelect::builder(acc, countries, country_value)
//!     .options(SelectOptions::default().scope_bind("checkout"))
//!     .groups(&groups)
//!     .build();
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use ahash::AHashMap;

/// Global counter for widget ids.
static SELECT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of one select widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectId(u64);

impl SelectId {
    /// Allocate a fresh id.
    pub(crate) fn next() -> Self {
        Self(SELECT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SelectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "select#{}", self.0)
    }
}

/// Who produced a relayed click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOrigin {
    /// A member widget was clicked.
    Select(SelectId),
    /// The group anchor itself was clicked.
    Anchor,
}

impl GroupOrigin {
    /// Whether this click came from `id`.
    #[must_use]
    pub fn is(self, id: SelectId) -> bool {
        self == Self::Select(id)
    }
}

type CloseHandler = dyn Fn(GroupOrigin);

struct Member {
    id: SelectId,
    handler: Weak<CloseHandler>,
}

#[derive(Default)]
struct Group {
    anchors: usize,
    members: Vec<Member>,
}

#[derive(Default)]
struct Registry {
    groups: AHashMap<String, Group>,
}

/// Registry and mediator for close-on-click groups.
///
/// Cloning shares the registry.
#[derive(Clone, Default)]
pub struct SelectGroups {
    registry: Rc<RefCell<Registry>>,
}

impl SelectGroups {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor the group `key`, creating it if needed.
    ///
    /// Anchors are counted: the group lives until every anchor is dropped.
    #[must_use = "the group dissolves when its last anchor is dropped"]
    pub fn anchor(&self, key: impl Into<String>) -> GroupAnchor {
        let key = key.into();
        self.registry
            .borrow_mut()
            .groups
            .entry(key.clone())
            .or_default()
            .anchors += 1;
        tracing::debug!(group = %key, "group anchored");
        GroupAnchor {
            groups: self.clone(),
            key,
        }
    }

    /// Whether `key` currently has an anchor.
    #[must_use]
    pub fn is_anchored(&self, key: &str) -> bool {
        self.registry.borrow().groups.contains_key(key)
    }

    /// Join `key` as `id`. `on_close` runs for every click relayed by
    /// another member or by the anchor.
    ///
    /// Returns `None` when `key` has no anchor.
    pub fn join(
        &self,
        key: &str,
        id: SelectId,
        on_close: impl Fn(GroupOrigin) + 'static,
    ) -> Option<GroupMembership> {
        let handler: Rc<CloseHandler> = Rc::new(on_close);
        {
            let mut registry = self.registry.borrow_mut();
            let Some(group) = registry.groups.get_mut(key) else {
                tracing::debug!(group = %key, select = %id, "no anchor for group, not coordinating");
                return None;
            };
            group.members.push(Member {
                id,
                handler: Rc::downgrade(&handler),
            });
        }
        tracing::debug!(group = %key, select = %id, "joined group");
        Some(GroupMembership {
            groups: self.clone(),
            key: key.to_owned(),
            id,
            _handler: handler,
        })
    }

    /// Number of live members in `key`.
    #[must_use]
    pub fn member_count(&self, key: &str) -> usize {
        self.registry.borrow().groups.get(key).map_or(0, |g| {
            g.members
                .iter()
                .filter(|m| m.handler.strong_count() > 0)
                .count()
        })
    }

    /// Relay a click from `origin` to the other members of `key`.
    ///
    /// Returns how many handlers ran.
    pub fn relay(&self, key: &str, origin: GroupOrigin) -> usize {
        let targets: Vec<Rc<CloseHandler>> = {
            let mut registry = self.registry.borrow_mut();
            let Some(group) = registry.groups.get_mut(key) else {
                return 0;
            };
            group.members.retain(|m| m.handler.strong_count() > 0);
            group
                .members
                .iter()
                .filter(|m| !origin.is(m.id))
                .filter_map(|m| m.handler.upgrade())
                .collect()
        };
        tracing::debug!(group = %key, ?origin, targets = targets.len(), "relaying click");
        for handler in &targets {
            handler(origin);
        }
        targets.len()
    }

    fn leave(&self, key: &str, id: SelectId) {
        let mut registry = self.registry.borrow_mut();
        if let Some(group) = registry.groups.get_mut(key) {
            group.members.retain(|m| m.id != id);
        }
    }

    fn release_anchor(&self, key: &str) {
        let mut registry = self.registry.borrow_mut();
        let dissolve = match registry.groups.get_mut(key) {
            Some(group) => {
                group.anchors = group.anchors.saturating_sub(1);
                group.anchors == 0
            }
            None => false,
        };
        if dissolve {
            registry.groups.remove(key);
            tracing::debug!(group = %key, "group dissolved");
        }
    }
}

impl fmt::Debug for SelectGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        let mut keys: Vec<&String> = registry.groups.keys().collect();
        keys.sort();
        f.debug_struct("SelectGroups").field("groups", &keys).finish()
    }
}

/// Keeps a group alive. Dropping the last anchor of a key dissolves it.
#[must_use = "the group dissolves when its last anchor is dropped"]
pub struct GroupAnchor {
    groups: SelectGroups,
    key: String,
}

impl GroupAnchor {
    /// The anchored key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// A click on the anchor itself: every open member closes.
    pub fn click(&self) -> usize {
        self.groups.relay(&self.key, GroupOrigin::Anchor)
    }
}

impl Drop for GroupAnchor {
    fn drop(&mut self) {
        self.groups.release_anchor(&self.key);
    }
}

impl fmt::Debug for GroupAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupAnchor").field("key", &self.key).finish()
    }
}

/// A widget's place in a group. Dropping it leaves the group.
#[must_use = "dropping the membership leaves the group"]
pub struct GroupMembership {
    groups: SelectGroups,
    key: String,
    id: SelectId,
    _handler: Rc<CloseHandler>,
}

impl GroupMembership {
    /// The joined key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Relay a click on this member to the rest of the group.
    pub fn relay_click(&self) -> usize {
        self.groups.relay(&self.key, GroupOrigin::Select(self.id))
    }
}

impl Drop for GroupMembership {
    fn drop(&mut self) {
        self.groups.leave(&self.key, self.id);
        tracing::debug!(group = %self.key, select = %self.id, "left group");
    }
}

impl fmt::Debug for GroupMembership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupMembership")
            .field("key", &self.key)
            .field("id", &self.id)
            .finish()
    }
}
