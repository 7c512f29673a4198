// Pedantic: suppress noise for internal crate code.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

pub mod config;
pub mod controller;
pub mod hash;
pub mod location;
pub mod script;
pub mod session;
pub mod view;
