use std::fmt;

use serde::Serialize;

/// Undo callback run with the action's hash token when the action is popped.
pub type UndoFn = Box<dyn FnMut(&str)>;

/// Process-unique identity of a pushed action. Never reused.
///
/// Breadcrumb activations are routed by id rather than by position, so a
/// click on a crumb whose action is already gone does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActionId(u64);

impl ActionId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action#{}", self.0)
    }
}

/// One navigation step on the controller's stack.
pub(crate) struct Action<H> {
    pub(crate) id: ActionId,
    pub(crate) hash: String,
    pub(crate) pop_stack: Vec<UndoFn>,
    /// Stack length right after this action was appended.
    pub(crate) index: usize,
    /// Location hash just before the push; restored when this is the
    /// oldest action of a location-moving pop.
    pub(crate) prior_hash: String,
    pub(crate) breadcrumb: H,
}

impl<H> Action<H> {
    /// Run every undo callback in insertion order.
    pub(crate) fn undo(&mut self) {
        for undo in &mut self.pop_stack {
            undo(self.hash.as_str());
        }
    }

    pub(crate) fn info(&self) -> ActionInfo {
        ActionInfo {
            id: self.id,
            hash: self.hash.clone(),
            index: self.index,
        }
    }
}

/// Read-only view of a live action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionInfo {
    pub id: ActionId,
    pub hash: String,
    pub index: usize,
}
