use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, interval_at};

use crate::game::{
    Direction, Frame, GameOverReport, GameState, GameStatus, SessionRng,
};
use crate::log;

/// Commands delivered by the input collaborator. They never touch game state
/// directly; the session applies them between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputCommand {
    Turn(Direction),
    TogglePause,
    Restart,
}

/// Receives frames and game-over reports; the presentation side decides how
/// to draw them.
pub trait FrameSink: Send + Sync + 'static {
    fn publish_frame(&self, frame: Frame) -> impl Future<Output = ()> + Send;

    fn publish_game_over(&self, report: GameOverReport) -> impl Future<Output = ()> + Send;
}

/// Single key-value slot for the persistent high score.
pub trait HighScoreStore: Send + 'static {
    fn load(&self) -> Result<u32, String>;
    fn save(&self, value: u32) -> Result<(), String>;
}

pub struct GameSession;

impl GameSession {
    /// Drives the game until the command channel closes. Ticks run on a
    /// repeating timer that is re-armed whenever the speed changes or the
    /// game resumes from pause; game over suspends ticking until `Restart`.
    pub async fn run<TSink, TStore>(
        mut state: GameState,
        mut rng: SessionRng,
        mut commands: mpsc::UnboundedReceiver<InputCommand>,
        sink: TSink,
        store: TStore,
    ) where
        TSink: FrameSink,
        TStore: HighScoreStore,
    {
        match store.load() {
            Ok(high_score) => state.high_score = high_score,
            Err(e) => log!("Failed to load high score: {}", e),
        }

        log!("Session seed: {}", rng.seed());
        if let Err(e) = state.start(&mut rng) {
            log!("Failed to start game: {}", e);
            return;
        }

        let mut tick: u64 = 0;
        let mut high_score_beaten = false;
        let mut timer = arm_timer(state.tick_interval);
        sink.publish_frame(state.frame(tick, vec![])).await;

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    if state.status != GameStatus::Running {
                        continue;
                    }
                    tick += 1;

                    let outcome = state.tick(&mut rng);

                    if outcome.new_high_score {
                        high_score_beaten = true;
                        if let Err(e) = store.save(state.high_score) {
                            log!("Failed to persist high score: {}", e);
                        }
                    }
                    if outcome.speed_changed {
                        timer = arm_timer(state.tick_interval);
                    }

                    let game_over = outcome.game_over;
                    sink.publish_frame(state.frame(tick, outcome.events)).await;

                    if let Some(reason) = game_over {
                        sink.publish_game_over(GameOverReport {
                            score: state.score,
                            high_score: state.high_score,
                            new_high_score: high_score_beaten,
                            reason,
                        }).await;
                    }
                }
                command = commands.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    match command {
                        InputCommand::Turn(direction) => state.change_direction(direction),
                        InputCommand::TogglePause => {
                            state.toggle_pause();
                            if state.status == GameStatus::Running {
                                timer = arm_timer(state.tick_interval);
                            }
                            sink.publish_frame(state.frame(tick, vec![])).await;
                        }
                        InputCommand::Restart => {
                            match state.start(&mut rng) {
                                Ok(()) => {
                                    high_score_beaten = false;
                                    timer = arm_timer(state.tick_interval);
                                    sink.publish_frame(state.frame(tick, vec![])).await;
                                }
                                Err(e) => log!("Failed to restart game: {}", e),
                            }
                        }
                    }
                }
            }
        }

        log!("Session closed");
    }
}

/// `interval_at` so re-arming never fires an immediate catch-up tick.
fn arm_timer(tick_interval: Duration) -> Interval {
    interval_at(Instant::now() + tick_interval, tick_interval)
}
