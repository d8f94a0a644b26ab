use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Validate;

use super::types::{BoardSizing, EdgePolicy};

/// One configuration covering every board/game variant: edge policy,
/// trail decay, walls and background noise are all flags here rather than
/// separate game modes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub edge_policy: EdgePolicy,
    pub walls: bool,
    pub trail_decay: bool,
    pub decorative_noise: bool,
    pub board_sizing: BoardSizing,
    pub cell_size: u32,
    pub initial_tick_interval_ms: u64,
    pub speedup_per_food_ms: u64,
    pub min_tick_interval_ms: u64,
    pub wall_safe_distance: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            edge_policy: EdgePolicy::Bounded,
            walls: false,
            trail_decay: false,
            decorative_noise: true,
            board_sizing: BoardSizing::Fit,
            cell_size: 15,
            initial_tick_interval_ms: 150,
            speedup_per_food_ms: 2,
            min_tick_interval_ms: 50,
            wall_safe_distance: 5,
        }
    }
}

impl GameSettings {
    pub fn initial_tick_interval(&self) -> Duration {
        Duration::from_millis(self.initial_tick_interval_ms)
    }

    pub fn min_tick_interval(&self) -> Duration {
        Duration::from_millis(self.min_tick_interval_ms)
    }

    pub fn speedup_per_food(&self) -> Duration {
        Duration::from_millis(self.speedup_per_food_ms)
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if self.cell_size < 4 || self.cell_size > 64 {
            return Err("Cell size must be between 4 and 64 pixels".to_string());
        }
        if self.initial_tick_interval_ms < 50 || self.initial_tick_interval_ms > 5000 {
            return Err("Tick interval must be between 50ms and 5000ms".to_string());
        }
        if self.min_tick_interval_ms < 10 {
            return Err("Minimum tick interval must be at least 10ms".to_string());
        }
        if self.min_tick_interval_ms > self.initial_tick_interval_ms {
            return Err("Minimum tick interval must not exceed the initial interval".to_string());
        }
        if self.speedup_per_food_ms > 50 {
            return Err("Speedup per food must be at most 50ms".to_string());
        }
        if self.wall_safe_distance < 1 || self.wall_safe_distance > 20 {
            return Err("Wall safe distance must be between 1 and 20 cells".to_string());
        }
        if self.walls && self.edge_policy == EdgePolicy::Bounded {
            return Err("Walls require the wrapping edge policy".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(GameSettings::default().validate().is_ok());
    }

    #[test]
    fn test_interval_bounds_are_enforced() {
        let too_fast = GameSettings {
            initial_tick_interval_ms: 10,
            min_tick_interval_ms: 10,
            ..GameSettings::default()
        };
        assert!(too_fast.validate().is_err());

        let too_slow = GameSettings {
            initial_tick_interval_ms: 9000,
            ..GameSettings::default()
        };
        assert!(too_slow.validate().is_err());
    }

    #[test]
    fn test_floor_must_not_exceed_initial_interval() {
        let settings = GameSettings {
            min_tick_interval_ms: 200,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_walls_require_wrapping_edges() {
        let bounded = GameSettings {
            walls: true,
            ..GameSettings::default()
        };
        assert!(bounded.validate().is_err());

        let wrapping = GameSettings {
            walls: true,
            edge_policy: EdgePolicy::Wrapping,
            ..GameSettings::default()
        };
        assert!(wrapping.validate().is_ok());
    }

    #[test]
    fn test_cell_size_bounds() {
        let settings = GameSettings {
            cell_size: 2,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
