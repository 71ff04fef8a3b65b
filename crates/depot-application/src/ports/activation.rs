//! Activation source port

/// Read-only key/value source of activation flags
///
/// Sources are looked up with keys such as
/// `depot.activation::<raw type>::<name>` or the keys of alternative
/// conditions. Nothing in the engine ever writes to a source.
pub trait ActivationSource: Send + Sync {
    /// Value of `key`, if set
    fn get(&self, key: &str) -> Option<String>;

    /// Description of the source for dumps
    fn describe(&self) -> String;
}
