use tokio::sync::mpsc;

use engine::game::{Frame, GameEvent, GameOverReason, GameOverReport, GameState, SessionRng};
use engine::log;
use engine::session::{FrameSink, GameSession, InputCommand};

use crate::config::ClientConfig;
use crate::highscore::FileHighScoreStore;
use crate::state::SharedState;

/// Bridges the session loop to the UI: frames and reports land in
/// `SharedState`, events become log lines.
#[derive(Clone)]
pub struct SharedFrameSink {
    shared_state: SharedState,
}

impl SharedFrameSink {
    pub fn new(shared_state: SharedState) -> Self {
        Self { shared_state }
    }
}

impl FrameSink for SharedFrameSink {
    async fn publish_frame(&self, frame: Frame) {
        for event in &frame.events {
            self.shared_state.add_event(format_event(event));
        }
        self.shared_state.set_frame(frame);
    }

    async fn publish_game_over(&self, report: GameOverReport) {
        self.shared_state.set_game_over(report);
    }
}

pub fn format_event(event: &GameEvent) -> String {
    match event {
        GameEvent::FoodEaten { kind, points } => format!("+{} {}", points, kind.label()),
        GameEvent::SpeedIncreased { interval_ms } => format!("Speed up: {}ms per move", interval_ms),
        GameEvent::NewHighScore { score } => format!("New high score: {}", score),
        GameEvent::GameOver { reason } => format_game_over_reason(*reason).to_string(),
    }
}

pub fn format_game_over_reason(reason: GameOverReason) -> &'static str {
    match reason {
        GameOverReason::BoundaryCollision => "Hit the edge of the graph",
        GameOverReason::SelfCollision => "Ran into yourself",
        GameOverReason::WallCollision => "Hit a wall",
        GameOverReason::BoardFull => "The graph is full",
    }
}

pub async fn run_offline_game(
    config: ClientConfig,
    seed: Option<u64>,
    shared_state: SharedState,
    commands: mpsc::UnboundedReceiver<InputCommand>,
) {
    let rng = match seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };

    let state = match GameState::new(
        config.game.clone(),
        config.board_pixel_width,
        config.board_pixel_height,
    ) {
        Ok(state) => state,
        Err(e) => {
            log!("Failed to create game: {}", e);
            return;
        }
    };

    let sink = SharedFrameSink::new(shared_state);
    let store = FileHighScoreStore::at_default_location();
    GameSession::run(state, rng, commands, sink, store).await;
}
