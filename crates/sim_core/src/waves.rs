//! Wave director: countdown, spawn pacing and wave completion.
//!
//! [`WaveDirector::advance`] is a pure state machine that reports what should
//! happen this tick; `systems::waves` turns those actions into entities,
//! sounds and rewards.

use data_runtime::configs::waves::WaveCfg;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WavePhase {
    Countdown { remaining_s: f32 },
    Active { target: u32, enemy_health: f32, since_spawn_s: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaveAction {
    Started { wave: u32, target: u32, enemy_health: f32 },
    Spawn { wave: u32, boss: bool, health: f32 },
    Completed { wave: u32, bonus: u32 },
}

#[derive(Debug, Clone)]
pub struct WaveDirector {
    cfg: WaveCfg,
    pub phase: WavePhase,
    pub current_wave: u32,
    pub spawned_this_wave: u32,
    pub enemies_alive: u32,
    /// Completed waves.
    pub total_waves: u32,
    pub spawn_interval_s: f32,
}

impl WaveDirector {
    pub fn new(cfg: WaveCfg) -> Self {
        Self {
            phase: WavePhase::Countdown { remaining_s: cfg.initial_countdown_s },
            current_wave: 0,
            spawned_this_wave: 0,
            enemies_alive: 0,
            total_waves: 0,
            spawn_interval_s: cfg.initial_spawn_interval_s,
            cfg,
        }
    }

    pub fn cfg(&self) -> &WaveCfg { &self.cfg }

    #[inline]
    pub fn in_progress(&self) -> bool { matches!(self.phase, WavePhase::Active { .. }) }

    pub fn countdown_s(&self) -> f32 {
        match self.phase {
            WavePhase::Countdown { remaining_s } => remaining_s,
            WavePhase::Active { .. } => 0.0,
        }
    }

    pub fn target(&self) -> Option<u32> {
        match self.phase {
            WavePhase::Active { target, .. } => Some(target),
            WavePhase::Countdown { .. } => None,
        }
    }

    /// Advance by `dt` seconds and return the transitions that occurred.
    pub fn advance(&mut self, dt: f32) -> Vec<WaveAction> {
        let mut out = Vec::new();
        match self.phase {
            WavePhase::Countdown { remaining_s } => {
                let remaining_s = (remaining_s - dt).max(0.0);
                if remaining_s <= 0.0 {
                    out.push(self.start_next());
                } else {
                    self.phase = WavePhase::Countdown { remaining_s };
                }
            }
            WavePhase::Active {
                target,
                enemy_health,
                since_spawn_s,
            } => {
                let mut since = since_spawn_s + dt;
                if since >= self.spawn_interval_s {
                    since = 0.0;
                    if self.spawned_this_wave < target {
                        let boss = self.cfg.is_boss_wave(self.current_wave) && self.spawned_this_wave == 0;
                        let health = if boss { enemy_health * self.cfg.boss_health_mult } else { enemy_health };
                        self.spawned_this_wave += 1;
                        out.push(WaveAction::Spawn {
                            wave: self.current_wave,
                            boss,
                            health,
                        });
                    }
                }
                if self.spawned_this_wave >= target {
                    out.push(self.complete());
                } else {
                    self.phase = WavePhase::Active {
                        target,
                        enemy_health,
                        since_spawn_s: since,
                    };
                }
            }
        }
        out
    }

    fn start_next(&mut self) -> WaveAction {
        self.current_wave += 1;
        let wave = self.current_wave;
        self.spawned_this_wave = 0;
        self.spawn_interval_s = self.cfg.next_interval(self.spawn_interval_s, wave);
        let target = self.cfg.target_for(wave);
        let enemy_health = self.cfg.health_for(wave);
        self.phase = WavePhase::Active {
            target,
            enemy_health,
            since_spawn_s: 0.0,
        };
        WaveAction::Started {
            wave,
            target,
            enemy_health,
        }
    }

    fn complete(&mut self) -> WaveAction {
        let wave = self.current_wave;
        self.total_waves += 1;
        self.phase = WavePhase::Countdown { remaining_s: self.cfg.between_waves_s };
        WaveAction::Completed {
            wave,
            bonus: wave * self.cfg.bonus_per_wave,
        }
    }

    /// Reinstate saved counters. Per-wave target, enemy health and spawn
    /// interval are derived from the wave number.
    pub fn restore(&mut self, wave: u32, in_progress: bool, countdown_s: f32, spawned: u32, alive: u32, total: u32) {
        self.current_wave = wave;
        self.spawned_this_wave = spawned;
        self.enemies_alive = alive;
        self.total_waves = total;
        self.spawn_interval_s = self.cfg.interval_after(wave);
        self.phase = if in_progress && wave > 0 {
            WavePhase::Active {
                target: self.cfg.target_for(wave),
                enemy_health: self.cfg.health_for(wave),
                since_spawn_s: 0.0,
            }
        } else {
            WavePhase::Countdown { remaining_s: countdown_s.max(0.0) }
        };
    }
}
