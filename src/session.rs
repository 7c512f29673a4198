use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::config::types::AppConfig;
use crate::controller::{ActionController, HashChange, Snapshot};
use crate::location::{Location, MemoryLocation};
use crate::script::Step;
use crate::view::TextTrail;

/// Result of applying one script step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// 1-based step number.
    pub step: usize,
    pub command: String,
    pub trail: String,
    #[serde(flatten)]
    pub snapshot: Snapshot,
    /// Tokens whose undo callbacks ran during this step, in call order.
    pub undone: Vec<String>,
    /// How the hash-change listener classified the move, when the hash moved.
    pub change: Option<HashChange>,
    pub committed: bool,
}

/// Drives an [`ActionController`] over an in-memory page.
///
/// Mimics the browser: after every step that moves the location hash, the
/// hash-change listener (`handle_hash_change`) runs once.
pub struct Session {
    controller: ActionController<MemoryLocation, TextTrail>,
    undone: Rc<RefCell<Vec<String>>>,
    commits: Rc<Cell<usize>>,
    steps_run: usize,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        let commits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&commits);
        let controller = ActionController::new(
            MemoryLocation::new(),
            TextTrail::new(config.trail.clone()),
            move || counter.set(counter.get() + 1),
            None,
        );
        Self {
            controller,
            undone: Rc::new(RefCell::new(Vec::new())),
            commits,
            steps_run: 0,
        }
    }

    pub fn controller(&self) -> &ActionController<MemoryLocation, TextTrail> {
        &self.controller
    }

    pub fn apply(&mut self, step: &Step) -> StepReport {
        self.steps_run += 1;
        let hash_before = self.controller.location().hash();
        let commits_before = self.commits.get();

        match step {
            Step::Push { token, forced_hash } => {
                let log = Rc::clone(&self.undone);
                self.controller.push_action(
                    token.as_str(),
                    move |t: &str| log.borrow_mut().push(t.to_owned()),
                    forced_hash.as_deref(),
                );
            }
            Step::Pop {
                count,
                move_location,
            } => {
                self.controller.pop_actions(*count, *move_location);
            }
            Step::Click { position } => match self.controller.view().click(*position) {
                Some(id) => {
                    self.controller.activate_breadcrumb(id);
                }
                None => tracing::debug!("session: no breadcrumb at position {position}"),
            },
            Step::Back => {
                self.controller.location_mut().back();
            }
            Step::Forward => {
                self.controller.location_mut().forward();
            }
            Step::Navigate { hash } => {
                self.controller.location_mut().navigate(hash);
            }
        }

        let change = if self.controller.location().hash() == hash_before {
            None
        } else {
            Some(self.controller.handle_hash_change())
        };

        StepReport {
            step: self.steps_run,
            command: step.to_string(),
            trail: self.controller.view().render(),
            snapshot: self.controller.snapshot(),
            undone: std::mem::take(&mut *self.undone.borrow_mut()),
            change,
            committed: self.commits.get() > commits_before,
        }
    }

    pub fn run(&mut self, steps: &[Step]) -> Vec<StepReport> {
        steps.iter().map(|s| self.apply(s)).collect()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Push {
                token,
                forced_hash: None,
            } => write!(f, "push {token}"),
            Step::Push {
                token,
                forced_hash: Some(forced),
            } => write!(f, "push {token} {forced}"),
            Step::Pop {
                count,
                move_location: true,
            } => write!(f, "pop {count}"),
            Step::Pop {
                count,
                move_location: false,
            } => write!(f, "pop {count} stay"),
            Step::Click { position } => write!(f, "click {position}"),
            Step::Back => f.write_str("back"),
            Step::Forward => f.write_str("forward"),
            Step::Navigate { hash } if hash.is_empty() => f.write_str("navigate"),
            Step::Navigate { hash } => write!(f, "navigate {hash}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script;

    fn run(src: &str) -> Vec<StepReport> {
        let steps = script::parse(src).unwrap();
        Session::new(&AppConfig::default()).run(&steps)
    }

    #[test]
    fn own_writes_are_acknowledged() {
        let reports = run("push a\npush b\n");
        assert_eq!(reports[1].snapshot.hash, "#a&b");
        assert_eq!(reports[1].change, Some(HashChange::SelfCaused));
        assert!(!reports[1].snapshot.sync.is_changing());
    }

    #[test]
    fn back_button_rewinds_without_commit() {
        let reports = run("push a\npush b\npush c\nback\n");
        let last = reports.last().unwrap();
        assert_eq!(last.change, Some(HashChange::Rewound { popped: 1 }));
        assert_eq!(last.snapshot.tokens, vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(last.undone, vec!["c".to_owned()]);
        assert!(!last.committed);
    }

    #[test]
    fn click_commits_and_reports_undone_in_pop_order() {
        let reports = run("push a\npush b\npush c\nclick 2\n");
        let last = reports.last().unwrap();
        assert_eq!(last.undone, vec!["c".to_owned(), "b".to_owned()]);
        assert_eq!(last.snapshot.hash, "#a");
        assert_eq!(last.trail, "a");
        assert!(last.committed);
        assert_eq!(last.change, Some(HashChange::SelfCaused));
    }

    #[test]
    fn navigate_off_trail_is_unrelated() {
        let reports = run("push a\nnavigate #zzz\n");
        let last = reports.last().unwrap();
        assert_eq!(last.change, Some(HashChange::Unrelated));
        assert_eq!(last.snapshot.tokens, vec!["a".to_owned()]);
    }

    #[test]
    fn step_display_round_trips_commands() {
        let src = "push a #x\npop 2 stay\nclick 1\nnavigate #a\nnavigate";
        let steps = script::parse(src).unwrap();
        let rendered: Vec<String> = steps.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, src.lines().collect::<Vec<_>>());
    }
}
