use anyhow::Result;
use clap::Parser;
use fastrand::Rng;
use log::{info, warn};
use std::path::PathBuf;

mod core;
mod engine;
mod game;

use engine::game_loop::{GameLoop, FIXED_TIMESTEP, FIXED_TIMESTEP_DURATION};
use engine::prefs::JsonFilePrefs;
use engine::scene::{SceneId, SceneRequest};
use engine::world::FlatArena;
use game::autopilot::Autopilot;
use game::characters::PlayerEvent;
use game::config::GameConfig;
use game::session::GameSession;

/// Hollow Survival headless simulation
#[derive(Parser)]
#[command(version, about = "Runs the survival simulation with a scripted player")]
struct Cli {
    /// Seconds of game time to simulate
    #[arg(long, default_value_t = 180.0, value_parser = parse_seconds)]
    seconds: f32,

    /// Seed for spawns and enemy behavior (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// INI file overriding the default tuning
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Where the save data lives
    #[arg(long, value_name = "PATH", default_value = "save/prefs.json")]
    save: PathBuf,
}

/// Finite, non-negative simulation length
fn parse_seconds(arg: &str) -> Result<f32, String> {
    let seconds: f32 = arg.parse().map_err(|e| format!("{e}"))?;
    if seconds.is_finite() && seconds >= 0.0 {
        Ok(seconds)
    } else {
        Err(format!("expected a finite number of seconds >= 0, got {arg}"))
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    info!("Starting Hollow Survival...");

    let config = match &cli.config {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::default(),
    };
    let prefs = JsonFilePrefs::open(&cli.save)?;
    let rng = match cli.seed {
        Some(seed) => Rng::with_seed(seed),
        None => Rng::new(),
    };

    let mut session = GameSession::new(config, FlatArena::default(), prefs, rng);
    let mut game_loop = GameLoop::new();
    let mut autopilot = Autopilot::new();

    let frames = (cli.seconds / FIXED_TIMESTEP).ceil() as u64;

    // Main loop, fed synthetic frame times so runs replay exactly
    'frames: for _ in 0..frames {
        for _ in 0..game_loop.advance(FIXED_TIMESTEP_DURATION) {
            let input = autopilot.steer(&session);
            session.tick(&input, game_loop.fixed_timestep());
        }

        for event in session.drain_events() {
            match event {
                PlayerEvent::Died => {
                    info!("Respawning player");
                    session.respawn_player();
                }
                PlayerEvent::GameOver { collected } => {
                    info!("Round finished with {} items", collected);
                    session.return_to_main_menu();
                }
                PlayerEvent::Collected { .. } | PlayerEvent::Hit { .. } => {}
            }
        }

        while let Some(request) = session.scenes_mut().next_request() {
            match request {
                SceneRequest::Load(SceneId::Game) => session.start(),
                SceneRequest::Load(SceneId::MainMenu) => {
                    info!("Back at the main menu, stopping");
                    break 'frames;
                }
                SceneRequest::Quit => {
                    info!("Quit requested");
                    break 'frames;
                }
            }
        }
    }

    let stats = session.stats();
    let player = session.player();
    info!(
        "Simulated {:.1}s over {} session ticks ({} loop ticks, {:.1}s, {} frames)",
        stats.simulated,
        stats.ticks,
        game_loop.tick_count(),
        game_loop.simulated().as_secs_f32(),
        game_loop.frame_count()
    );
    info!(
        "Enemies spawned {}, despawned {}; items spawned {}, collected {}, expired {}; deaths {}",
        stats.enemies_spawned,
        stats.enemies_despawned,
        stats.items_spawned,
        stats.items_collected,
        stats.items_expired,
        stats.deaths
    );
    info!(
        "Player: hp {:.1}, fear {:.1}, stamina {:.1}, dash {}, time {:.0}, collected {}",
        player.stats().health(),
        player.stats().fear(),
        player.stats().stamina(),
        player.stats().dash(),
        player.stats().time(),
        player.stats().collected()
    );
    let hud = session.hud();
    info!(
        "HUD: {}, {}, stamina bar {:.2}",
        hud.collected_text(),
        hud.timer_text(),
        hud.stamina_bar().fill()
    );
    if player.is_dead() {
        warn!("Run ended with the player dead");
    }

    Ok(())
}
