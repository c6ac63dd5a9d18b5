// Prism Shell state managers
// Managers handle stateful cores: the per-window tab collection and the
// browsing history log.

pub mod history_store;
pub mod tab_registry;
