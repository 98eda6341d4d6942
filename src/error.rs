#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    // Optional components.
    /// An accessor or a `require_per_*` guard was used while the named
    /// optional component is not enabled. Enable the component first.
    MissingComponent(&'static str),
    // Custom components.
    ComponentDoesNotExist(String),
    /// A custom component was accessed with a type different from the one it
    /// was registered with.
    BadCustomComponentType {
        name: String,
        registered: &'static str,
        requested: &'static str,
    },
    // Storage.
    /// The operation needs a container without tombstones. Compact first.
    MissingCompactness(&'static str),
}
