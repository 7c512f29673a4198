use serde::Serialize;

use crate::hash;
use crate::location::Location;
use crate::view::BreadcrumbView;

use super::action::{Action, ActionId, ActionInfo, UndoFn};
use super::sync::{HashChange, SyncState};

/// Callback run once per location-moving pop, before the hash is rewritten.
pub type CommitFn = Box<dyn FnMut()>;

/// Serializable picture of the controller at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub tokens: Vec<String>,
    pub hash: String,
    pub sync: SyncState,
}

// ---------------------------------------------------------------------------
// ActionController
// ---------------------------------------------------------------------------

/// A stack of undoable navigation steps, mirrored into a breadcrumb trail and
/// the location hash (`#a&b&c`).
///
/// The controller owns both ports. Whoever owns the page forwards breadcrumb
/// clicks to [`activate_breadcrumb`](Self::activate_breadcrumb) and
/// hash-change events to [`handle_hash_change`](Self::handle_hash_change).
pub struct ActionController<L, V>
where
    L: Location,
    V: BreadcrumbView,
{
    location: L,
    view: V,
    actions: Vec<Action<V::Handle>>,
    sync: SyncState,
    commit_state: CommitFn,
    // Accepted for compatibility with existing callers; never invoked.
    #[allow(dead_code)]
    default_pop: Option<UndoFn>,
    next_id: u64,
}

impl<L, V> ActionController<L, V>
where
    L: Location,
    V: BreadcrumbView,
{
    pub fn new(
        location: L,
        view: V,
        commit_state: impl FnMut() + 'static,
        default_pop: Option<UndoFn>,
    ) -> Self {
        Self {
            location,
            view,
            actions: Vec::new(),
            sync: SyncState::Idle,
            commit_state: Box::new(commit_state),
            default_pop,
            next_id: 0,
        }
    }

    /// Record a new navigation step.
    ///
    /// With `forced_hash` the breadcrumb links to that hash and the location
    /// is left alone: the caller has already moved it (or will). Otherwise
    /// the token is appended to the current location hash and written back.
    pub fn push_action(
        &mut self,
        action_hash: impl Into<String>,
        pop_function: impl FnMut(&str) + 'static,
        forced_hash: Option<&str>,
    ) -> ActionId {
        let token = action_hash.into();
        if token.is_empty() {
            tracing::warn!("controller: pushing an empty action token");
        } else if let Some(c) = hash::reserved_char(&token) {
            tracing::warn!("controller: action token {token:?} contains separator {c:?}");
        }

        let id = ActionId::from_raw(self.next_id);
        self.next_id += 1;
        let index = self.actions.len() + 1;

        let prior_hash = self.location.hash();
        let full_hash = match forced_hash {
            Some(forced) => forced.to_owned(),
            None => hash::append(&prior_hash, &token),
        };

        let breadcrumb = self.view.add_breadcrumb(&token, &full_hash);
        self.view.bind_activation(&breadcrumb, id);

        tracing::debug!("controller: push {token:?} as {id} at index {index} -> {full_hash:?}");
        self.actions.push(Action {
            id,
            hash: token,
            pop_stack: vec![Box::new(pop_function)],
            index,
            prior_hash,
            breadcrumb,
        });

        if forced_hash.is_none() {
            self.sync.expect(full_hash.clone());
            self.location.set_hash(&full_hash);
        }
        id
    }

    /// Add another undo callback to the most recent action.
    ///
    /// Returns `false` when the stack is empty.
    pub fn push_undo(&mut self, undo: impl FnMut(&str) + 'static) -> bool {
        match self.actions.last_mut() {
            Some(action) => {
                action.pop_stack.push(Box::new(undo));
                true
            }
            None => false,
        }
    }

    /// Undo the `count` most recent actions, newest first.
    ///
    /// `count` is clamped to the stack size; popping nothing (a zero count
    /// or an empty stack) has no effect at all. When `move_location` is set
    /// the commit callback runs and the location goes back to the hash it
    /// held just before the oldest popped action was pushed. Returns the
    /// number of actions actually popped.
    pub fn pop_actions(&mut self, count: usize, move_location: bool) -> usize {
        let n = count.min(self.actions.len());
        if n == 0 {
            return 0;
        }
        if n < count {
            tracing::debug!("controller: pop of {count} clamped to {n}");
        }

        let mut restore = None;
        for _ in 0..n {
            let Some(mut action) = self.actions.pop() else {
                break;
            };
            tracing::debug!("controller: undo {:?} ({})", action.hash, action.id);
            action.undo();
            self.view.remove_breadcrumb(action.breadcrumb);
            restore = Some(action.prior_hash);
        }

        if move_location {
            if let Some(target) = restore {
                (self.commit_state)();
                self.sync.expect(target.clone());
                self.location.set_hash(&target);
            }
        }
        n
    }

    /// A breadcrumb bound to `id` was activated.
    ///
    /// Pops that action and everything pushed after it, restoring the stack
    /// to its state before the action was pushed. Activations for actions no
    /// longer on the stack are ignored.
    pub fn activate_breadcrumb(&mut self, id: ActionId) -> usize {
        let Some(pos) = self.actions.iter().position(|a| a.id == id) else {
            tracing::debug!("controller: ignoring activation of stale {id}");
            return 0;
        };
        // `index` is the 1-based position of a live action.
        let count = self.actions.len() - self.actions[pos].index + 1;
        self.pop_actions(count, true)
    }

    /// The location hash changed; decide whether it needs handling.
    ///
    /// Call this from the page's hash-change listener. A change to the hash
    /// the controller itself just wrote is acknowledged and ignored. A change
    /// back to an earlier point of the trail (browser back, or the user
    /// trimming the fragment) undoes the surplus actions without moving the
    /// location again.
    pub fn handle_hash_change(&mut self) -> HashChange {
        let observed = self.location.hash();
        if self.sync.observe(&observed) {
            tracing::debug!("controller: acknowledged own change to {observed:?}");
            return HashChange::SelfCaused;
        }

        let segments = hash::segments(&observed);
        let is_prefix = segments.len() <= self.actions.len()
            && segments
                .iter()
                .zip(&self.actions)
                .all(|(segment, action)| *segment == action.hash);
        if !is_prefix {
            tracing::debug!("controller: external change to {observed:?} is not on the trail");
            return HashChange::Unrelated;
        }

        let surplus = self.actions.len() - segments.len();
        let popped = self.pop_actions(surplus, false);
        tracing::debug!("controller: external change to {observed:?} rewound {popped} action(s)");
        HashChange::Rewound { popped }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Hash tokens of the live actions, oldest first.
    pub fn tokens(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.hash.as_str()).collect()
    }

    pub fn actions(&self) -> Vec<ActionInfo> {
        self.actions.iter().map(Action::info).collect()
    }

    pub fn sync_state(&self) -> &SyncState {
        &self.sync
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tokens: self.tokens().into_iter().map(str::to_owned).collect(),
            hash: self.location.hash(),
            sync: self.sync.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::location::MemoryLocation;
    use crate::view::TextTrail;

    type Log = Rc<RefCell<Vec<String>>>;

    fn controller() -> (ActionController<MemoryLocation, TextTrail>, Log, Rc<Cell<usize>>) {
        let commits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&commits);
        let ctl = ActionController::new(
            MemoryLocation::new(),
            TextTrail::default(),
            move || counter.set(counter.get() + 1),
            None,
        );
        (ctl, Rc::new(RefCell::new(Vec::new())), commits)
    }

    fn recorder(log: &Log) -> impl FnMut(&str) + 'static {
        let log = Rc::clone(log);
        move |token: &str| log.borrow_mut().push(token.to_owned())
    }

    #[test]
    fn push_assigns_one_based_indexes() {
        let (mut ctl, log, _) = controller();
        ctl.push_action("a", recorder(&log), None);
        ctl.push_action("b", recorder(&log), None);
        let indexes: Vec<usize> = ctl.actions().iter().map(|a| a.index).collect();
        assert_eq!(indexes, vec![1, 2]);
    }

    #[test]
    fn index_is_stack_depth_after_pops() {
        let (mut ctl, log, _) = controller();
        ctl.push_action("a", recorder(&log), None);
        ctl.push_action("b", recorder(&log), None);
        ctl.pop_actions(1, true);
        ctl.push_action("c", recorder(&log), None);
        let indexes: Vec<usize> = ctl.actions().iter().map(|a| a.index).collect();
        assert_eq!(indexes, vec![1, 2]);
    }

    #[test]
    fn ids_are_never_reused() {
        let (mut ctl, log, _) = controller();
        let a = ctl.push_action("a", recorder(&log), None);
        ctl.pop_actions(1, true);
        let b = ctl.push_action("a", recorder(&log), None);
        assert_ne!(a, b);
    }

    #[test]
    fn push_enters_awaiting_state() {
        let (mut ctl, log, _) = controller();
        ctl.push_action("a", recorder(&log), None);
        assert_eq!(
            ctl.sync_state(),
            &SyncState::AwaitingSelfChange("#a".to_owned())
        );
        assert_eq!(ctl.location().hash(), "#a");
    }

    #[test]
    fn push_undo_extends_top_action() {
        let (mut ctl, log, _) = controller();
        assert!(!ctl.push_undo(recorder(&log)));
        ctl.push_action("a", recorder(&log), None);
        let extra = Rc::clone(&log);
        assert!(ctl.push_undo(move |t: &str| extra.borrow_mut().push(format!("extra:{t}"))));
        ctl.pop_actions(1, false);
        assert_eq!(*log.borrow(), vec!["a".to_owned(), "extra:a".to_owned()]);
    }

    #[test]
    fn pop_without_moving_location_keeps_hash_and_commit() {
        let (mut ctl, log, commits) = controller();
        ctl.push_action("a", recorder(&log), None);
        ctl.push_action("b", recorder(&log), None);
        let before = ctl.sync_state().clone();
        assert_eq!(ctl.pop_actions(1, false), 1);
        assert_eq!(ctl.location().hash(), "#a&b");
        assert_eq!(ctl.sync_state(), &before);
        assert_eq!(commits.get(), 0);
    }

    #[test]
    fn pop_all_clears_hash() {
        let (mut ctl, log, _) = controller();
        ctl.push_action("a", recorder(&log), None);
        ctl.pop_actions(1, true);
        assert_eq!(ctl.location().hash(), "");
        assert_eq!(ctl.sync_state().target_hash(), Some(""));
    }

    #[test]
    fn pop_on_empty_stack_is_a_no_op() {
        let (mut ctl, _, commits) = controller();
        assert_eq!(ctl.pop_actions(3, true), 0);
        assert_eq!(commits.get(), 0);
        assert!(ctl.location().writes().is_empty());
        assert_eq!(ctl.sync_state(), &SyncState::Idle);
    }

    #[test]
    fn pop_restores_hash_when_tokens_share_text() {
        let (mut ctl, log, _) = controller();
        ctl.push_action("ab", recorder(&log), None);
        ctl.push_action("b", recorder(&log), None);
        ctl.push_action("a", recorder(&log), None);
        ctl.pop_actions(1, true);
        assert_eq!(ctl.location().hash(), "#ab&b");
    }

    #[test]
    fn stale_activation_is_ignored() {
        let (mut ctl, log, commits) = controller();
        ctl.push_action("a", recorder(&log), None);
        let b = ctl.push_action("b", recorder(&log), None);
        ctl.pop_actions(1, true);
        assert_eq!(ctl.activate_breadcrumb(b), 0);
        assert_eq!(ctl.tokens(), vec!["a"]);
        assert_eq!(commits.get(), 1);
    }

    #[test]
    fn default_pop_is_never_called() {
        let called = Rc::new(Cell::new(false));
        let flag = Rc::clone(&called);
        let mut ctl = ActionController::new(
            MemoryLocation::new(),
            TextTrail::default(),
            || {},
            Some(Box::new(move |_: &str| flag.set(true))),
        );
        ctl.push_action("a", |_: &str| {}, None);
        ctl.pop_actions(5, true);
        assert!(!called.get());
    }

    #[test]
    fn snapshot_reflects_state() {
        let (mut ctl, log, _) = controller();
        ctl.push_action("a", recorder(&log), None);
        ctl.push_action("b", recorder(&log), None);
        let snap = ctl.snapshot();
        assert_eq!(snap.tokens, vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(snap.hash, "#a&b");
        assert_eq!(snap.sync, SyncState::AwaitingSelfChange("#a&b".to_owned()));
    }
}
