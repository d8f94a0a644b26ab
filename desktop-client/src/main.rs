mod config;
mod game_loop;
mod highscore;
mod palette;
mod state;
mod ui;

use clap::Parser;
use eframe::egui;
use tokio::sync::mpsc;

use engine::logger::init_logger;

use config::{config_manager_at, get_config_manager};
use game_loop::run_offline_game;
use state::SharedState;
use ui::GameApp;

#[derive(Parser, Debug)]
#[command(name = "contrib_snake", about = "Snake over a GitHub contribution graph")]
struct Args {
    /// Path to the YAML config file (defaults to next to the executable).
    #[arg(long)]
    config: Option<String>,
    /// Fixed RNG seed for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger(Some("client".to_string()));
    let args = Args::parse();

    let config_manager = match &args.config {
        Some(path) => config_manager_at(path),
        None => get_config_manager(),
    };
    let config = config_manager.get_config()?;

    let shared_state = SharedState::new();
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let dark_theme = config.dark_theme;
    let window_width = config.board_pixel_width as f32 + 40.0;
    let window_height = config.board_pixel_height as f32 + 200.0;

    let shared_state_clone = shared_state.clone();
    let game_config = config.clone();
    let seed = args.seed;
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(run_offline_game(game_config, seed, shared_state_clone, command_rx));
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([window_width, window_height])
            .with_title("GitHub Contribution Snake"),
        ..Default::default()
    };

    eframe::run_native(
        "GitHub Contribution Snake",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(if dark_theme {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            Ok(Box::new(GameApp::new(shared_state, command_tx, dark_theme)))
        }),
    )?;

    Ok(())
}
