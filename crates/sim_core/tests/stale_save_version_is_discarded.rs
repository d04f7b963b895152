#![allow(clippy::unwrap_used, clippy::expect_used)]

use data_runtime::save::{MemorySaveStore, SaveSlot};
use sim_core::{GameState, persist};

#[test]
fn older_version_is_cleared_and_session_starts_fresh() {
    let donor = GameState::headless(1);
    let mut doc = persist::capture(&donor);
    doc.version = "0.9.0".into();
    doc.game_store.money = 5000;
    let json = serde_json::to_string(&doc).unwrap();
    let mut slot = SaveSlot::new(MemorySaveStore::with_contents(json));
    assert!(slot.has_saved_game());

    let mut gs = GameState::headless(2);
    assert!(!persist::load_game(&mut gs, &mut slot));
    assert!(!slot.has_saved_game(), "stale save removed");
    assert_eq!(gs.progress.money, 100);
    assert!(slot.save_info().is_none());
}

#[test]
fn garbage_in_the_slot_is_treated_as_no_save() {
    let mut slot = SaveSlot::new(MemorySaveStore::with_contents("{not json"));
    let mut gs = GameState::headless(2);
    assert!(!persist::load_game(&mut gs, &mut slot));
    assert!(!slot.has_saved_game());
}
