// controller module — the action stack mirrored into breadcrumbs and the location hash

mod action;
mod action_controller;
mod sync;

pub use action::{ActionId, ActionInfo, UndoFn};
pub use action_controller::{ActionController, CommitFn, Snapshot};
pub use sync::{HashChange, SyncState};
