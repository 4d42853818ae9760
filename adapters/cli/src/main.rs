#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Rampart Defence session.
//!
//! Plays a scripted defence: between waves it builds and upgrades towers
//! from a fixed list of emplacements, then pumps the simulation until the
//! wave resolves and prints a one-line summary.

use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use rampart_core::{Event, GamePhase, PlacementError, TowerKind, UpgradeError, WorldPoint};
use rampart_session::Session;

/// Emplacements the scripted defence builds on, in build order. Each spot
/// keeps clear of the path clearance band and the playfield border.
const EMPLACEMENTS: [WorldPoint; 6] = [
    WorldPoint::new(245.0, 175.0),
    WorldPoint::new(375.0, 175.0),
    WorldPoint::new(560.0, 100.0),
    WorldPoint::new(100.0, 400.0),
    WorldPoint::new(385.0, 430.0),
    WorldPoint::new(820.0, 100.0),
];

/// Tower kinds the scripted defence prefers, most expensive first.
const BUILD_PREFERENCE: [TowerKind; 3] = [TowerKind::Sniper, TowerKind::Explosive, TowerKind::Basic];

/// Upper bound on ticks per wave before the run is declared stuck.
const MAX_TICKS_PER_WAVE: u32 = 200_000;

/// Headless autoplay for the Rampart Defence simulation.
#[derive(Debug, Parser)]
#[command(name = "rampart", version, about)]
struct Args {
    /// Number of waves to attempt before stopping.
    #[arg(long, default_value_t = 10)]
    waves: u32,

    /// Simulated milliseconds per tick.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.tick_ms == 0 {
        bail!("--tick-ms must be at least 1");
    }
    let tick = Duration::from_millis(args.tick_ms);

    let mut session = Session::new();
    session.begin_preparation();

    for _ in 0..args.waves {
        build_defences(&mut session);
        session.start_wave();
        let wave = session.wave().get();
        let outcome = run_wave(&mut session, tick)?;

        let hud = session.hud();
        println!(
            "wave {wave}: slain {}, leaked {}, gold {}, lives {}, score {}",
            outcome.slain, outcome.leaked, hud.gold, hud.lives, hud.score
        );

        if session.phase() == GamePhase::GameOver {
            println!("game over on wave {wave}");
            break;
        }
    }

    let hud = session.hud();
    println!(
        "final: wave {}, score {}, lives {}",
        hud.wave.get(),
        hud.score,
        hud.lives
    );
    Ok(())
}

/// Spends available gold on new towers and upgrades between waves.
///
/// Placement and upgrade rejections are expected here whenever a spot is
/// already built on or the gold runs short; those attempts are skipped.
fn build_defences(session: &mut Session) {
    for spot in EMPLACEMENTS {
        for kind in BUILD_PREFERENCE {
            match session.place_tower(kind, spot) {
                Ok(_) => break,
                Err(PlacementError::InsufficientGold) => continue,
                Err(_) => break,
            }
        }
    }

    let towers = session.towers().into_vec();
    for tower in towers {
        match session.upgrade_tower(tower.id) {
            Ok(_) | Err(UpgradeError::MaxLevel) => {}
            Err(UpgradeError::InsufficientGold) => break,
            Err(_) => {}
        }
    }
}

struct WaveOutcome {
    slain: u32,
    leaked: u32,
}

/// Pumps ticks until the wave resolves, tallying kills and leaks.
fn run_wave(session: &mut Session, tick: Duration) -> Result<WaveOutcome> {
    let mut outcome = WaveOutcome {
        slain: 0,
        leaked: 0,
    };

    for _ in 0..MAX_TICKS_PER_WAVE {
        for event in session.tick(tick) {
            match event {
                Event::EnemySlain { .. } => outcome.slain += 1,
                Event::EnemyLeaked { .. } => outcome.leaked += 1,
                _ => {}
            }
        }
        if session.phase() != GamePhase::Playing {
            return Ok(outcome);
        }
    }

    bail!("wave failed to resolve within {MAX_TICKS_PER_WAVE} ticks")
}
