//! Property-based tests for the tab registry.
//!
//! These tests drive the registry with arbitrary sequences of create, close,
//! and activate operations and check the structural invariants that the rest
//! of the shell depends on.

use prism_shell::managers::tab_registry::{TabRegistry, TabRegistryTrait};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum TabOp {
    Create,
    /// Close the tab at this index (modulo current length).
    Close(usize),
    /// Activate the tab at this index (modulo current length).
    Activate(usize),
    /// Close an id that was never allocated.
    CloseUnknown,
}

fn arb_op() -> impl Strategy<Value = TabOp> {
    prop_oneof![
        3 => Just(TabOp::Create),
        2 => (0usize..32).prop_map(TabOp::Close),
        2 => (0usize..32).prop_map(TabOp::Activate),
        1 => Just(TabOp::CloseUnknown),
    ]
}

fn apply(reg: &mut TabRegistry, op: &TabOp) {
    match op {
        TabOp::Create => {
            let id = reg.create_tab("https://example.com", "tab");
            reg.set_active(id);
        }
        TabOp::Close(i) => {
            if !reg.is_empty() {
                let id = reg.tabs()[i % reg.len()].id;
                reg.close_tab(id);
            }
        }
        TabOp::Activate(i) => {
            if !reg.is_empty() {
                let id = reg.tabs()[i % reg.len()].id;
                reg.set_active(id);
            }
        }
        TabOp::CloseUnknown => {
            reg.close_tab(u64::MAX);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // After any operation sequence, the active tab is absent exactly when
    // the registry is empty, and otherwise refers to a live tab.
    #[test]
    fn active_tab_is_live_or_absent(ops in proptest::collection::vec(arb_op(), 0..64)) {
        let mut reg = TabRegistry::new();
        for op in &ops {
            apply(&mut reg, op);

            match reg.active_id() {
                None => prop_assert!(reg.is_empty()),
                Some(id) => prop_assert!(reg.get(id).is_some()),
            }
        }
    }

    // Ids are unique across the whole run, even after closes.
    #[test]
    fn ids_never_collide(ops in proptest::collection::vec(arb_op(), 0..64)) {
        let mut reg = TabRegistry::new();
        let mut seen = std::collections::HashSet::new();
        for op in &ops {
            if matches!(op, TabOp::Create) {
                let id = reg.create_tab("https://example.com", "tab");
                prop_assert!(seen.insert(id), "id {} was reused", id);
            } else {
                apply(&mut reg, op);
            }
        }
    }

    // Closing every tab in any order always ends with an empty registry and
    // no active tab.
    #[test]
    fn drain_always_reaches_empty(count in 1usize..20, seed in any::<u64>()) {
        let mut reg = TabRegistry::new();
        for _ in 0..count {
            let id = reg.create_tab("https://example.com", "tab");
            reg.set_active(id);
        }

        let mut state = seed;
        while !reg.is_empty() {
            // Cheap deterministic index selection.
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let idx = (state >> 33) as usize % reg.len();
            let id = reg.tabs()[idx].id;
            reg.close_tab(id);

            if let Some(active) = reg.active_id() {
                prop_assert!(reg.get(active).is_some());
            }
        }
        prop_assert!(reg.active_id().is_none());
    }
}
