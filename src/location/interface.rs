/// The page's navigation state, reduced to its hash fragment.
///
/// Implemented by whatever owns the address bar: a browser binding, or
/// `MemoryLocation` in tests and the CLI. Hash-change notifications flow the
/// other way: the owner calls `ActionController::handle_hash_change` after
/// the fragment moves.
pub trait Location {
    /// Current hash fragment including the leading `#`, or `""` when unset.
    fn hash(&self) -> String;

    /// Replace the hash fragment.
    fn set_hash(&mut self, hash: &str);
}
