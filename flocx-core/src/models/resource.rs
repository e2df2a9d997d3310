use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The kind of resource an offer lists.
///
/// Resource types are open-ended; each one is backed by a plugin of the
/// [`crate::ports::ResourceAuthority`]. Bare-metal nodes are the default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceType(String);

impl ResourceType {
    /// The name of the bare-metal node resource type
    pub const IRONIC_NODE: &'static str = "ironic_node";

    /// View the raw resource type
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ResourceType {
    fn default() -> Self {
        Self(Self::IRONIC_NODE.to_owned())
    }
}

impl From<String> for ResourceType {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ResourceType {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
