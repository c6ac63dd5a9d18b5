use serde::{Deserialize, Serialize};

/// Opaque tab handle. Allocated from a per-registry monotonic counter,
/// never reused within a registry.
pub type TabId = u64;

/// Represents a browser tab with its current state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    pub url: String,
    pub title: String,
    pub favicon: Option<String>,
    pub loading: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

/// Partial update merged into a tab by `TabRegistry::update`.
///
/// `None` fields are left untouched. Applying a patch to an unknown tab id
/// is a silent no-op, which is what makes in-flight load events for a
/// concurrently closed tab safe.
#[derive(Debug, Clone, Default)]
pub struct TabPatch {
    pub url: Option<String>,
    pub title: Option<String>,
    pub favicon: Option<String>,
    pub loading: Option<bool>,
    pub can_go_back: Option<bool>,
    pub can_go_forward: Option<bool>,
}
