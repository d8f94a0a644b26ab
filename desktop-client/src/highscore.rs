use std::path::PathBuf;

use engine::session::HighScoreStore;

/// Matches the storage key the browser version kept in local storage.
const HIGH_SCORE_FILE_NAME: &str = "github-snake-high-score";

/// A single plain-integer slot on disk, next to the executable.
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn at_default_location() -> Self {
        let path = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(HIGH_SCORE_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(HIGH_SCORE_FILE_NAME));
        Self::new(path)
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> Result<u32, String> {
        if !self.path.exists() {
            return Ok(0);
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read high score file {}: {}", self.path.display(), e))?;
        content
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("Corrupt high score file {}: {}", self.path.display(), e))
    }

    fn save(&self, value: u32) -> Result<(), String> {
        std::fs::write(&self.path, value.to_string())
            .map_err(|e| format!("Failed to write high score file {}: {}", self.path.display(), e))
    }
}
