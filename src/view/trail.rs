use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::types::TrailConfig;
use crate::controller::ActionId;

use super::interface::BreadcrumbView;

/// Handle to one crumb rendered by [`TextTrail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CrumbId(u64);

#[derive(Debug, Clone)]
struct Crumb {
    id: CrumbId,
    label: String,
    link: String,
    target: Option<ActionId>,
}

// ---------------------------------------------------------------------------
// TextTrail
// ---------------------------------------------------------------------------

/// Renders the breadcrumb trail as a single line of text.
///
/// ```text
/// home › capture › frame:12 › draw:40
/// ```
#[derive(Debug, Clone)]
pub struct TextTrail {
    crumbs: Vec<Crumb>,
    next_id: u64,
    config: TrailConfig,
}

impl Default for TextTrail {
    fn default() -> Self {
        Self::new(TrailConfig::default())
    }
}

impl TextTrail {
    pub fn new(config: TrailConfig) -> Self {
        Self {
            crumbs: Vec::new(),
            next_id: 0,
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.crumbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crumbs.is_empty()
    }

    /// Crumb labels in trail order (untruncated).
    pub fn labels(&self) -> Vec<&str> {
        self.crumbs.iter().map(|c| c.label.as_str()).collect()
    }

    /// Link target of the 1-based crumb at `position`.
    pub fn link(&self, position: usize) -> Option<&str> {
        self.crumb_at(position).map(|c| c.link.as_str())
    }

    /// Simulate activating the crumb at 1-based `position`.
    ///
    /// Returns the action the crumb is bound to; hand it to
    /// `ActionController::activate_breadcrumb`.
    pub fn click(&self, position: usize) -> Option<ActionId> {
        self.crumb_at(position).and_then(|c| c.target)
    }

    fn crumb_at(&self, position: usize) -> Option<&Crumb> {
        position.checked_sub(1).and_then(|i| self.crumbs.get(i))
    }

    /// Render the whole trail on one line.
    pub fn render(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.crumbs.len() + 1);
        if let Some(root) = self.config.root_label.as_deref() {
            if !root.is_empty() {
                parts.push(root.to_owned());
            }
        }
        for (i, crumb) in self.crumbs.iter().enumerate() {
            let label = match self.config.max_label_width {
                Some(max) => truncate_to_width(&crumb.label, max),
                None => crumb.label.clone(),
            };
            if self.config.show_positions {
                parts.push(format!("{}:{label}", i + 1));
            } else {
                parts.push(label);
            }
        }
        parts.join(self.config.separator.as_str())
    }
}

impl BreadcrumbView for TextTrail {
    type Handle = CrumbId;

    fn add_breadcrumb(&mut self, label: &str, link: &str) -> CrumbId {
        let id = CrumbId(self.next_id);
        self.next_id += 1;
        self.crumbs.push(Crumb {
            id,
            label: label.to_owned(),
            link: link.to_owned(),
            target: None,
        });
        tracing::debug!("trail: added crumb {label:?} -> {link:?}");
        id
    }

    fn bind_activation(&mut self, handle: &CrumbId, action: ActionId) {
        if let Some(crumb) = self.crumbs.iter_mut().find(|c| c.id == *handle) {
            crumb.target = Some(action);
        }
    }

    fn remove_breadcrumb(&mut self, handle: CrumbId) {
        if let Some(pos) = self.crumbs.iter().position(|c| c.id == handle) {
            let crumb = self.crumbs.remove(pos);
            tracing::debug!("trail: removed crumb {:?}", crumb.label);
        }
    }
}

/// Truncate `text` to at most `max` display columns, marking the cut with `…`.
fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_owned();
    }
    if max == 0 {
        return String::new();
    }
    let budget = max - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail(root: Option<&str>, show_positions: bool, max: Option<usize>) -> TextTrail {
        TextTrail::new(TrailConfig {
            separator: " > ".to_owned(),
            root_label: root.map(str::to_owned),
            show_positions,
            max_label_width: max,
        })
    }

    #[test]
    fn empty_trail_renders_root_only() {
        assert_eq!(trail(None, false, None).render(), "");
        assert_eq!(trail(Some("home"), false, None).render(), "home");
    }

    #[test]
    fn crumbs_render_in_order() {
        let mut t = trail(Some("home"), false, None);
        t.add_breadcrumb("a", "#a");
        t.add_breadcrumb("b", "#a&b");
        assert_eq!(t.render(), "home > a > b");
        assert_eq!(t.link(2), Some("#a&b"));
        assert_eq!(t.link(0), None);
    }

    #[test]
    fn positions_are_one_based() {
        let mut t = trail(None, true, None);
        t.add_breadcrumb("a", "#a");
        t.add_breadcrumb("b", "#a&b");
        assert_eq!(t.render(), "1:a > 2:b");
    }

    #[test]
    fn remove_drops_only_that_crumb() {
        let mut t = trail(None, false, None);
        let a = t.add_breadcrumb("a", "#a");
        t.add_breadcrumb("b", "#a&b");
        t.remove_breadcrumb(a);
        assert_eq!(t.labels(), vec!["b"]);
    }

    #[test]
    fn click_returns_bound_action_only() {
        let mut t = trail(None, false, None);
        let h = t.add_breadcrumb("a", "#a");
        assert_eq!(t.click(1), None);
        t.bind_activation(&h, ActionId::from_raw(7));
        assert_eq!(t.click(1), Some(ActionId::from_raw(7)));
        assert_eq!(t.click(2), None);
    }

    #[test]
    fn long_labels_are_truncated_by_width() {
        assert_eq!(truncate_to_width("frame", 10), "frame");
        assert_eq!(truncate_to_width("framebuffer", 6), "frame…");
        // Wide characters take two columns each.
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
