mod board;
mod food;
mod frame;
mod game_state;
mod session_rng;
mod settings;
mod snake;
mod types;

pub use board::{Board, CELL_PADDING, MAX_INTENSITY, WALL_MIN_INTENSITY};
pub use food::{Food, FoodKind};
pub use frame::{FoodView, Frame, GameEvent, GameOverReport};
pub use game_state::{GameState, INITIAL_SNAKE_LENGTH, TickOutcome};
pub use session_rng::SessionRng;
pub use settings::GameSettings;
pub use snake::Snake;
pub use types::{BoardSizing, Direction, EdgePolicy, GameOverReason, GameStatus, Point};
