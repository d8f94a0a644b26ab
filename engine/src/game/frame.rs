use std::time::Duration;

use super::food::FoodKind;
use super::types::{GameOverReason, GameStatus, Point};

/// Immutable per-tick snapshot handed to the presentation collaborator.
/// Nothing here borrows from the game state, so renderers can hold on to it.
#[derive(Clone, Debug)]
pub struct Frame {
    pub tick: u64,
    pub cols: usize,
    pub rows: usize,
    pub cell_size: u32,
    /// Palette level (0-4) per cell, row-major.
    pub cell_levels: Vec<u8>,
    /// Snake segments, head first.
    pub snake: Vec<Point>,
    pub food: Option<FoodView>,
    pub score: u32,
    pub high_score: u32,
    pub status: GameStatus,
    pub tick_interval: Duration,
    pub events: Vec<GameEvent>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FoodView {
    pub pos: Point,
    pub kind: FoodKind,
    pub points: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    FoodEaten { kind: FoodKind, points: u32 },
    SpeedIncreased { interval_ms: u64 },
    NewHighScore { score: u32 },
    GameOver { reason: GameOverReason },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOverReport {
    pub score: u32,
    pub high_score: u32,
    pub new_high_score: bool,
    pub reason: GameOverReason,
}
