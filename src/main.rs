//! Headless Bastion runner.
//! Usage: cargo run -- --ticks 2400 --build basic:3,3 --build splash:-4,2 --save

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use data_runtime::configs::economy::Difficulty;
use data_runtime::configs::game::GameConfig;
use data_runtime::configs::telemetry;
use data_runtime::configs::towers::TowerKind;
use data_runtime::save::{FileSaveStore, SaveSlot};
use glam::Vec3;
use sim_core::{Backends, GameEvent, GameState, GridCell, ShotOutcome, persist};

#[derive(Parser, Debug)]
#[command(name = "bastion", about = "Run the tower-defense simulation without a window")]
struct Cli {
    /// Number of fixed steps to simulate
    #[arg(long, default_value_t = 2400)]
    ticks: u32,

    /// Seconds per step (clamped by the world config)
    #[arg(long, default_value_t = 0.05)]
    dt: f32,

    /// Seed for spawn placement
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Override the configured difficulty (easy, medium, hard)
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Tower to place before the first tick, as `kind:x,z`
    #[arg(long = "build", value_parser = parse_build)]
    builds: Vec<(TowerKind, GridCell)>,

    /// Let the player shoot at the nearest enemy every tick
    #[arg(long)]
    autofire: bool,

    /// Restore from the save slot before running
    #[arg(long)]
    resume: bool,

    /// Write the final state to the save slot
    #[arg(long)]
    save: bool,

    /// Save file location (defaults to data/saves/bastion.json)
    #[arg(long)]
    save_path: Option<PathBuf>,
}

fn parse_build(s: &str) -> Result<(TowerKind, GridCell)> {
    let (kind, cell) = s.split_once(':').context("expected kind:x,z")?;
    let (x, z) = cell.split_once(',').context("expected x,z after ':'")?;
    let kind: TowerKind = kind.parse()?;
    let x = x.trim().parse().with_context(|| format!("bad x in '{s}'"))?;
    let z = z.trim().parse().with_context(|| format!("bad z in '{s}'"))?;
    Ok((kind, GridCell::new(x, z)))
}

fn nearest_enemy(gs: &GameState, from: Vec3) -> Option<Vec3> {
    gs.store
        .enemies()
        .into_iter()
        .filter_map(|id| gs.position(id))
        .min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let tcfg = telemetry::load_default().context("load telemetry config")?;
    let _telemetry = sim_core::telemetry::init_telemetry(&tcfg)?;

    let mut cfg = GameConfig::load_default().context("load game config")?;
    if let Some(d) = cli.difficulty {
        cfg.economy.difficulty = d;
    }
    if cli.dt.is_nan() || cli.dt <= 0.0 {
        bail!("--dt must be positive");
    }

    let store = match &cli.save_path {
        Some(p) => FileSaveStore::new(p),
        None => FileSaveStore::default_location(),
    };
    let mut slot = SaveSlot::new(store);
    let mut gs = GameState::new(cfg, Backends::headless(), cli.seed);

    if cli.resume {
        if persist::load_game(&mut gs, &mut slot) {
            log::info!("resumed from {}", slot.store().path().display());
        } else {
            log::info!("no usable save; starting fresh");
        }
    }

    for (kind, cell) in &cli.builds {
        if let Err(e) = gs.place_tower(*kind, *cell) {
            log::warn!("could not place {kind} at {cell}: {e}");
        }
    }

    let (mut kills, mut shots_hit) = (0u32, 0u32);
    for _ in 0..cli.ticks {
        if cli.autofire
            && let Some(from) = gs.player_position()
            && let Some(at) = nearest_enemy(&gs, from)
            && matches!(gs.shoot(from, at - from), ShotOutcome::Hit { .. })
        {
            shots_hit += 1;
        }
        gs.update(cli.dt);
        for ev in gs.drain_events() {
            match ev {
                GameEvent::EnemyKilled { .. } => kills += 1,
                GameEvent::WaveStarted { wave, target, .. } => log::info!("wave {wave}: {target} enemies"),
                GameEvent::GameOver(reason) => log::warn!("game over: {reason:?}"),
                _ => {}
            }
        }
        if gs.is_over() {
            break;
        }
    }

    let structure_hp = gs
        .structure
        .and_then(|s| gs.store.health(s))
        .map(|h| h.current())
        .unwrap_or(0.0);
    println!(
        "t={:.1}s wave={} score={} money={} kills={} gun_hits={} towers={} enemies={} structure={:.0} over={}",
        gs.now_s(),
        gs.waves.current_wave,
        gs.progress.score,
        gs.progress.money,
        kills,
        shots_hit,
        gs.towers.len(),
        gs.store.enemies().len(),
        structure_hp,
        gs.is_over()
    );

    if cli.save {
        if gs.is_over() {
            slot.clear()?;
            log::info!("game over; save slot cleared");
        } else {
            persist::save_game(&gs, &mut slot)?;
        }
    }
    gs.teardown();
    Ok(())
}
