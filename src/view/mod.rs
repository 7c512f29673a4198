// view module — the breadcrumb port and a plain-text renderer

mod interface;
pub mod trail;

pub use interface::BreadcrumbView;
pub use trail::{CrumbId, TextTrail};
