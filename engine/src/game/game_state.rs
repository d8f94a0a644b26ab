use std::time::Duration;

use crate::config::Validate;
use crate::log;

use super::board::Board;
use super::food::{Food, FoodKind};
use super::frame::{FoodView, Frame, GameEvent};
use super::session_rng::SessionRng;
use super::settings::GameSettings;
use super::snake::Snake;
use super::types::{
    Direction, EdgePolicy, GameOverReason, GameStatus, Point, wrapping_dec, wrapping_inc,
};

pub const INITIAL_SNAKE_LENGTH: usize = 3;
const FOOD_PLACEMENT_ATTEMPTS: usize = 100;

/// What a single tick did, for the driver loop and the renderer's event log.
#[derive(Clone, Debug, Default)]
pub struct TickOutcome {
    pub events: Vec<GameEvent>,
    pub speed_changed: bool,
    pub new_high_score: bool,
    pub game_over: Option<GameOverReason>,
}

/// The whole mutable session state. Input handlers only ever touch the
/// pending direction or request a status transition; everything else is
/// mutated exclusively inside `tick`.
#[derive(Clone, Debug)]
pub struct GameState {
    settings: GameSettings,
    pub board: Board,
    pub snake: Snake,
    pub food: Option<Food>,
    pub status: GameStatus,
    pub score: u32,
    pub high_score: u32,
    pub tick_interval: Duration,
    pub game_over_reason: Option<GameOverReason>,
}

impl GameState {
    pub fn new(
        settings: GameSettings,
        pixel_width: u32,
        pixel_height: u32,
    ) -> Result<Self, String> {
        settings.validate()?;
        let board = Board::from_pixels(
            pixel_width,
            pixel_height,
            settings.cell_size,
            settings.board_sizing,
            settings.walls,
        )?;
        Ok(Self::from_board(settings, board))
    }

    fn from_board(settings: GameSettings, board: Board) -> Self {
        let snake = Snake::new(
            Self::start_position(&board),
            Direction::Right,
            INITIAL_SNAKE_LENGTH,
            board.cols(),
            board.rows(),
        );
        let tick_interval = settings.initial_tick_interval();
        Self {
            settings,
            board,
            snake,
            food: None,
            status: GameStatus::Idle,
            score: 0,
            high_score: 0,
            tick_interval,
            game_over_reason: None,
        }
    }

    #[cfg(test)]
    pub fn with_board(settings: GameSettings, board: Board) -> Self {
        Self::from_board(settings, board)
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// One quarter in from the left, vertically centered.
    fn start_position(board: &Board) -> Point {
        Point::new(board.cols() / 4, board.rows() / 2)
    }

    /// Full (re)initialization: board, snake, food, score and speed.
    /// The high score survives restarts.
    pub fn start(&mut self, rng: &mut SessionRng) -> Result<(), String> {
        let start = Self::start_position(&self.board);

        self.board.reset(rng, self.settings.decorative_noise);
        if self.settings.walls {
            self.board
                .generate_walls(rng, start, self.settings.wall_safe_distance);
        }

        self.snake = Snake::new(
            start,
            Direction::Right,
            INITIAL_SNAKE_LENGTH,
            self.board.cols(),
            self.board.rows(),
        );
        self.score = 0;
        self.tick_interval = self.settings.initial_tick_interval();
        self.game_over_reason = None;

        self.food = Some(
            self.create_food(rng)
                .ok_or_else(|| "No free cell left to place food".to_string())?,
        );
        self.status = GameStatus::Running;
        Ok(())
    }

    /// Advances the game by one step. A no-op outside `Running`.
    pub fn tick(&mut self, rng: &mut SessionRng) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.status != GameStatus::Running {
            return outcome;
        }

        if let Some(direction) = self.snake.pending_direction.take() {
            self.snake.direction = direction;
        }

        let new_head = match self.next_head_position() {
            Ok(pos) => pos,
            Err(reason) => {
                self.finish(reason, &mut outcome);
                return outcome;
            }
        };

        self.snake.advance(new_head);

        let mut board_full = false;
        match self.food {
            Some(food) if food.pos == new_head => {
                let points = food.kind.points();
                self.score += points;
                outcome.events.push(GameEvent::FoodEaten {
                    kind: food.kind,
                    points,
                });
                log!(
                    "Ate {} at ({}, {}) for {} points. Score: {}",
                    food.kind.label(),
                    new_head.x,
                    new_head.y,
                    points,
                    self.score
                );

                if self.score > self.high_score {
                    self.high_score = self.score;
                    outcome.new_high_score = true;
                    outcome.events.push(GameEvent::NewHighScore { score: self.score });
                }

                let new_interval = self
                    .tick_interval
                    .saturating_sub(self.settings.speedup_per_food())
                    .max(self.settings.min_tick_interval());
                if new_interval != self.tick_interval {
                    self.tick_interval = new_interval;
                    outcome.speed_changed = true;
                    outcome.events.push(GameEvent::SpeedIncreased {
                        interval_ms: new_interval.as_millis() as u64,
                    });
                }

                match self.create_food(rng) {
                    Some(food) => self.food = Some(food),
                    None => {
                        self.food = None;
                        board_full = true;
                    }
                }
            }
            _ => {
                let tail = self.snake.retract();
                if self.settings.trail_decay {
                    self.board.decrease_intensity(tail.x, tail.y);
                }
            }
        }

        if !self.board.is_wall(new_head.x, new_head.y) {
            self.board.increase_intensity(new_head.x, new_head.y);
        }

        if board_full {
            self.finish(GameOverReason::BoardFull, &mut outcome);
        }

        outcome
    }

    fn next_head_position(&self) -> Result<Point, GameOverReason> {
        let head = self.snake.head();
        let cols = self.board.cols();
        let rows = self.board.rows();

        let next = match self.settings.edge_policy {
            EdgePolicy::Bounded => match self.snake.direction {
                Direction::Up => {
                    if head.y == 0 {
                        return Err(GameOverReason::BoundaryCollision);
                    }
                    Point::new(head.x, head.y - 1)
                }
                Direction::Down => {
                    if head.y >= rows - 1 {
                        return Err(GameOverReason::BoundaryCollision);
                    }
                    Point::new(head.x, head.y + 1)
                }
                Direction::Left => {
                    if head.x == 0 {
                        return Err(GameOverReason::BoundaryCollision);
                    }
                    Point::new(head.x - 1, head.y)
                }
                Direction::Right => {
                    if head.x >= cols - 1 {
                        return Err(GameOverReason::BoundaryCollision);
                    }
                    Point::new(head.x + 1, head.y)
                }
            },
            EdgePolicy::Wrapping => match self.snake.direction {
                Direction::Up => Point::new(head.x, wrapping_dec(head.y, rows)),
                Direction::Down => Point::new(head.x, wrapping_inc(head.y, rows)),
                Direction::Left => Point::new(wrapping_dec(head.x, cols), head.y),
                Direction::Right => Point::new(wrapping_inc(head.x, cols), head.y),
            },
        };

        if self.snake.contains(&next) {
            return Err(GameOverReason::SelfCollision);
        }
        if self.board.is_wall(next.x, next.y) {
            return Err(GameOverReason::WallCollision);
        }

        Ok(next)
    }

    /// Overwrites the pending direction unless the request would reverse the
    /// current one. Between two ticks only the last accepted request counts.
    pub fn change_direction(&mut self, requested: Direction) {
        if !matches!(self.status, GameStatus::Running | GameStatus::Paused) {
            return;
        }
        if requested.is_opposite(&self.snake.direction) {
            return;
        }
        self.snake.pending_direction = Some(requested);
    }

    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            other => other,
        };
    }

    /// Rejection-samples a free cell, then falls back to scanning the whole
    /// grid. `None` means the board is genuinely full.
    pub fn create_food(&self, rng: &mut SessionRng) -> Option<Food> {
        let cols = self.board.cols();
        let rows = self.board.rows();

        for _ in 0..FOOD_PLACEMENT_ATTEMPTS {
            let pos = Point::new(rng.random_range(0..cols), rng.random_range(0..rows));
            if self.is_free_for_food(pos) {
                return Some(Food {
                    pos,
                    kind: FoodKind::random(rng),
                });
            }
        }

        let free: Vec<Point> = (0..rows)
            .flat_map(|y| (0..cols).map(move |x| Point::new(x, y)))
            .filter(|pos| self.is_free_for_food(*pos))
            .collect();
        if free.is_empty() {
            return None;
        }
        Some(Food {
            pos: free[rng.random_range(0..free.len())],
            kind: FoodKind::random(rng),
        })
    }

    fn is_free_for_food(&self, pos: Point) -> bool {
        !self.snake.contains(&pos) && !self.board.is_wall(pos.x, pos.y)
    }

    fn finish(&mut self, reason: GameOverReason, outcome: &mut TickOutcome) {
        self.status = GameStatus::GameOver;
        self.game_over_reason = Some(reason);
        outcome.game_over = Some(reason);
        outcome.events.push(GameEvent::GameOver { reason });
        log!("Game over: {:?}. Final score: {}", reason, self.score);
    }

    pub fn frame(&self, tick: u64, events: Vec<GameEvent>) -> Frame {
        Frame {
            tick,
            cols: self.board.cols(),
            rows: self.board.rows(),
            cell_size: self.board.cell_size(),
            cell_levels: self.board.levels().to_vec(),
            snake: self.snake.body.iter().copied().collect(),
            food: self.food.map(|food| FoodView {
                pos: food.pos,
                kind: food.kind,
                points: food.kind.points(),
            }),
            score: self.score,
            high_score: self.high_score,
            status: self.status,
            tick_interval: self.tick_interval,
            events,
        }
    }
}
