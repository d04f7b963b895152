//! Authoritative game state and the per-tick entry point.

use data_runtime::configs::game::GameConfig;
use ecs_core::{EntityId, EntityStore};
use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::effects::EffectQueue;
use crate::events::{GameEvent, GameOverReason};
use crate::progress::Progress;
use crate::providers::Backends;
use crate::schedule::{Ctx, Schedule};
use crate::shooting::PlayerGun;
use crate::towers::TowerManager;
use crate::waves::WaveDirector;

/// Everything one session owns. Systems receive it explicitly; there is no
/// global instance.
pub struct GameState {
    pub cfg: GameConfig,
    pub store: EntityStore,
    pub backends: Backends,
    pub progress: Progress,
    pub towers: TowerManager,
    pub waves: WaveDirector,
    pub effects: EffectQueue,
    pub gun: PlayerGun,
    pub player: Option<EntityId>,
    pub structure: Option<EntityId>,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) move_intent: Vec3,
    now_s: f64,
    game_over: Option<GameOverReason>,
}

impl GameState {
    /// Build a session and spawn the player and the defended structure.
    pub fn new(cfg: GameConfig, backends: Backends, seed: u64) -> Self {
        let mut s = Self {
            store: EntityStore::new(),
            backends,
            progress: Progress::new(cfg.economy.starting_money, cfg.economy.difficulty),
            towers: TowerManager::new(cfg.world.grid_cell, cfg.world.exclusion_half),
            waves: WaveDirector::new(cfg.waves.clone()),
            effects: EffectQueue::new(),
            gun: PlayerGun::new(&cfg.combat),
            player: None,
            structure: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            events: Vec::new(),
            move_intent: Vec3::ZERO,
            now_s: 0.0,
            game_over: None,
            cfg,
        };
        s.player = Some(s.spawn_player());
        s.structure = Some(s.spawn_structure());
        log::info!("session started (seed {seed}, difficulty {})", s.progress.difficulty);
        s
    }

    /// Headless session with default tuning.
    pub fn headless(seed: u64) -> Self { Self::new(GameConfig::default(), Backends::headless(), seed) }

    /// Seconds of simulated time since the session began.
    #[inline]
    pub fn now_s(&self) -> f64 { self.now_s }
    #[inline]
    pub fn is_over(&self) -> bool { self.game_over.is_some() }
    #[inline]
    pub fn game_over(&self) -> Option<GameOverReason> { self.game_over }

    /// Advance the simulation by `dt` seconds (clamped to `[0, max_dt]`).
    pub fn update(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.clamp(0.0, self.cfg.world.max_dt) } else { 0.0 };
        if self.is_over() {
            self.effects.tick(self.backends.render.as_mut(), dt);
            return;
        }
        let t0 = std::time::Instant::now();
        self.now_s += f64::from(dt);
        let ctx = Ctx { dt, now_s: self.now_s };
        Schedule.run(self, &ctx);
        metrics::histogram!("sim.tick_ms").record(t0.elapsed().as_secs_f64() * 1000.0);
    }

    /// Planar walking direction for the player; zero stops.
    pub fn set_move_intent(&mut self, dir: Vec3) { self.move_intent = Vec3::new(dir.x, 0.0, dir.z); }

    /// Take all events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> { std::mem::take(&mut self.events) }

    /// Current physics position of an entity's body, falling back to its transform.
    pub fn position(&self, id: EntityId) -> Option<Vec3> {
        if let Some(b) = self.store.body(id)
            && let Some(p) = self.backends.physics.translation(b.body)
        {
            return Some(p);
        }
        self.store.transform(id).map(|t| t.pos)
    }

    pub fn player_position(&self) -> Option<Vec3> { self.player.and_then(|p| self.position(p)) }

    pub fn structure_position(&self) -> Option<Vec3> { self.structure.and_then(|s| self.position(s)) }

    pub(crate) fn raise_game_over(&mut self, reason: GameOverReason) {
        if self.game_over.is_some() {
            return;
        }
        self.game_over = Some(reason);
        log::warn!("game over: {reason:?} at wave {} score {}", self.waves.current_wave, self.progress.score);
        metrics::counter!("sim.game_over_total").increment(1);
        self.events.push(GameEvent::GameOver(reason));
    }

    pub(crate) fn clear_game_over(&mut self) { self.game_over = None; }
}
