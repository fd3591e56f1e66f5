use serde_yaml::Value;

use crate::core::traits::logger::Logger;

/// A handler for one install-file directive.
///
/// The host keeps plugins in a table keyed by `directive()` and hands each
/// matching block to `handle`.
pub trait Plugin {
    /// Directive name this plugin is registered under (e.g. "age").
    fn directive(&self) -> &str;

    fn can_handle(&self, directive: &str) -> bool {
        directive == self.directive()
    }

    /// Process one directive block. Returns `true` only if every entry
    /// in the block succeeded.
    ///
    /// `defaults` carries the value of a preceding `defaults` block for this
    /// directive, if any.
    fn handle(
        &self,
        directive: &str,
        data: &Value,
        defaults: Option<&Value>,
        log: &dyn Logger,
    ) -> bool;
}
