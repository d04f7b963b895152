use data_runtime::save::{
    FileSaveStore, GameStoreSave, PlayerSave, SAVE_VERSION, SaveDoc, SaveSlot, SaveStore, StructureSave,
};

fn doc(wave: u32) -> SaveDoc {
    SaveDoc {
        version: SAVE_VERSION.to_string(),
        timestamp: 42,
        game_store: GameStoreSave {
            money: 100,
            score: 0,
            high_score: 0,
            player_health: 100.0,
            player_max_health: 100.0,
            enemies_killed: 0,
            current_wave: wave,
            wave_in_progress: false,
            wave_countdown: 10.0,
            enemies_spawned_this_wave: 0,
            enemies_alive: 0,
            total_waves: 0,
            difficulty: None,
        },
        towers: Vec::new(),
        enemies: Vec::new(),
        player: PlayerSave { pos_x: 0.0, pos_y: 10.0, pos_z: 20.0 },
        library: StructureSave { health: 1000.0, max_health: 1000.0 },
    }
}

#[test]
fn file_slot_persists_across_instances() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested/slot.json");
    let mut slot = SaveSlot::new(FileSaveStore::new(&path));
    assert!(!slot.has_saved_game());
    slot.save(&doc(4)).expect("save");
    assert!(path.is_file());

    let mut reopened = SaveSlot::new(FileSaveStore::new(&path));
    assert!(reopened.has_saved_game());
    let loaded = reopened.load().expect("doc");
    assert_eq!(loaded.game_store.current_wave, 4);
}

#[test]
fn overwriting_keeps_single_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut slot = SaveSlot::new(FileSaveStore::new(dir.path().join("slot.json")));
    slot.save(&doc(1)).expect("save 1");
    slot.save(&doc(2)).expect("save 2");
    assert_eq!(slot.load().expect("doc").game_store.current_wave, 2);
    let leftovers: Vec<_> = std::fs::read_dir(dir.path()).expect("read_dir").collect();
    assert_eq!(leftovers.len(), 1, "temp file should be renamed away");
}

#[test]
fn stale_version_on_disk_is_removed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("slot.json");
    let mut old = doc(7);
    old.version = "0.1.0".into();
    let mut store = FileSaveStore::new(&path);
    store
        .write(&serde_json::to_string(&old).expect("json"))
        .expect("write");
    let mut slot = SaveSlot::new(store);
    assert!(slot.load().is_none());
    assert!(!path.exists(), "mismatched save must be deleted");
    slot.clear().expect("clearing an empty slot is fine");
}
