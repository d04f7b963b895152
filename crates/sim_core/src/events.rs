//! Gameplay notifications produced during a tick, drained by the host.

use data_runtime::configs::towers::TowerKind;
use ecs_core::EntityId;

use crate::towers::{GridCell, PlacementError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    PlayerDied,
    StructureDestroyed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EnemySpawned { id: EntityId, wave: u32, boss: bool },
    EnemyKilled { id: EntityId, reward: u32 },
    TowerPlaced { id: EntityId, kind: TowerKind, cell: GridCell },
    PlacementRejected(PlacementError),
    TowerDestroyed { id: EntityId, cell: GridCell },
    WaveStarted { wave: u32, target: u32, enemy_health: f32 },
    WaveCompleted { wave: u32, bonus: u32 },
    GameOver(GameOverReason),
}
