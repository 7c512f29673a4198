use serde::Serialize;

/// Whether the controller is waiting to see its own hash write come back.
///
/// Writing the location hash makes the page fire a hash-change event just
/// like a user navigation would. Before writing, the controller records the
/// hash it expects; the first observed change to exactly that hash is its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "expected", rename_all = "snake_case")]
pub enum SyncState {
    #[default]
    Idle,
    AwaitingSelfChange(String),
}

impl SyncState {
    /// `true` while a self-initiated change is in flight.
    pub fn is_changing(&self) -> bool {
        matches!(self, Self::AwaitingSelfChange(_))
    }

    /// Hash the location is expected to settle on, if any.
    pub fn target_hash(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::AwaitingSelfChange(hash) => Some(hash.as_str()),
        }
    }

    pub(crate) fn expect(&mut self, hash: String) {
        *self = Self::AwaitingSelfChange(hash);
    }

    /// Record an observed hash change. Always returns to `Idle`.
    ///
    /// Returns `true` when the change is the one this state was waiting for.
    pub(crate) fn observe(&mut self, observed: &str) -> bool {
        let self_caused = self.target_hash() == Some(observed);
        *self = Self::Idle;
        self_caused
    }
}

/// Outcome of `ActionController::handle_hash_change`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HashChange {
    /// The controller's own write; nothing to do.
    SelfCaused,
    /// The user moved back to an earlier point of the trail; the surplus
    /// actions were undone.
    Rewound { popped: usize },
    /// The new hash is not a prefix of the trail; the stack is left alone.
    Unrelated,
}
