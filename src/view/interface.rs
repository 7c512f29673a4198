use crate::controller::ActionId;

/// The UI component that draws one breadcrumb per action.
///
/// The controller owns the returned handles and gives each one back to
/// `remove_breadcrumb` exactly once, when its action is popped.
pub trait BreadcrumbView {
    /// Opaque reference to one rendered breadcrumb.
    type Handle;

    /// Render a breadcrumb labelled `label` that links to `link`
    /// (the full location hash at the time the action was pushed).
    fn add_breadcrumb(&mut self, label: &str, link: &str) -> Self::Handle;

    /// Route activations (clicks) of `handle` to `action`.
    ///
    /// The view reports an activation by passing `action` to
    /// `ActionController::activate_breadcrumb`.
    fn bind_activation(&mut self, handle: &Self::Handle, action: ActionId);

    fn remove_breadcrumb(&mut self, handle: Self::Handle);
}
