use std::sync::{Arc, Mutex};

use engine::game::{Frame, GameOverReport, GameStatus};
use ringbuffer::{AllocRingBuffer, RingBuffer};

pub const EVENT_LOG_CAPACITY: usize = 8;

/// Snapshots shared between the game task and the UI thread. The game task
/// writes, the UI only reads clones.
pub struct SharedState {
    frame: Arc<Mutex<Option<Frame>>>,
    game_over: Arc<Mutex<Option<GameOverReport>>>,
    event_log: Arc<Mutex<AllocRingBuffer<String>>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self {
            frame: Arc::new(Mutex::new(None)),
            game_over: Arc::new(Mutex::new(None)),
            event_log: Arc::new(Mutex::new(AllocRingBuffer::new(EVENT_LOG_CAPACITY))),
        }
    }

    pub fn set_frame(&self, frame: Frame) {
        if frame.status != GameStatus::GameOver {
            *self.game_over.lock().unwrap() = None;
        }
        *self.frame.lock().unwrap() = Some(frame);
    }

    pub fn get_frame(&self) -> Option<Frame> {
        self.frame.lock().unwrap().clone()
    }

    pub fn set_game_over(&self, report: GameOverReport) {
        *self.game_over.lock().unwrap() = Some(report);
    }

    pub fn get_game_over(&self) -> Option<GameOverReport> {
        *self.game_over.lock().unwrap()
    }

    pub fn add_event(&self, line: String) {
        self.event_log.lock().unwrap().enqueue(line);
    }

    pub fn event_lines(&self) -> Vec<String> {
        self.event_log.lock().unwrap().iter().cloned().collect()
    }
}

impl Clone for SharedState {
    fn clone(&self) -> Self {
        Self {
            frame: Arc::clone(&self.frame),
            game_over: Arc::clone(&self.game_over),
            event_log: Arc::clone(&self.event_log),
        }
    }
}
