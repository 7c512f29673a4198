use serde::Deserialize;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub trail: TrailConfig,
    pub session: SessionConfig,
}

// ---------------------------------------------------------------------------
// Trail rendering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Text placed between two crumbs.
    pub separator: String,
    /// Fixed first crumb that is never popped (e.g. `"home"`).
    pub root_label: Option<String>,
    /// Prefix each crumb with its 1-based position, the number `click` takes.
    pub show_positions: bool,
    /// Truncate labels wider than this many columns.
    pub max_label_width: Option<usize>,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            separator: " › ".to_owned(),
            root_label: None,
            show_positions: false,
            max_label_width: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Line printed when the controller commits state before moving the hash.
    pub commit_message: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            commit_message: "state committed".to_owned(),
        }
    }
}
