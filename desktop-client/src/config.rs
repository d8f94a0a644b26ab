use serde::{Deserialize, Serialize};

use engine::config::{ConfigManager, FileContentConfigProvider, Validate};
use engine::game::GameSettings;

const CONFIG_FILE_NAME: &str = "contrib_snake_config.yaml";

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager() -> ConfigManager<FileContentConfigProvider, ClientConfig> {
    ConfigManager::from_yaml_file(&get_config_path())
}

pub fn config_manager_at(path: &str) -> ConfigManager<FileContentConfigProvider, ClientConfig> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ClientConfig {
    pub game: GameSettings,
    pub board_pixel_width: u32,
    pub board_pixel_height: u32,
    pub dark_theme: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            game: GameSettings::default(),
            board_pixel_width: 800,
            board_pixel_height: 480,
            dark_theme: true,
        }
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        if self.board_pixel_width < 200 || self.board_pixel_width > 4000 {
            return Err("Board width must be between 200 and 4000 pixels".to_string());
        }
        if self.board_pixel_height < 200 || self.board_pixel_height > 4000 {
            return Err("Board height must be between 200 and 4000 pixels".to_string());
        }
        Ok(())
    }
}
