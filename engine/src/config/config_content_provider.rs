use std::path::PathBuf;

pub trait ConfigContentProvider {
    /// Returns `Ok(None)` when no config has been written yet.
    fn get_config_content(&self) -> Result<Option<String>, String>;
    fn set_config_content(&self, content: &str) -> Result<(), String>;
}

pub struct FileContentConfigProvider {
    path: PathBuf,
}

impl FileContentConfigProvider {
    pub fn new(path: String) -> Self {
        Self { path: PathBuf::from(path) }
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, String> {
        if !self.path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&self.path)
            .map(Some)
            .map_err(|e| format!("Failed to read config file {}: {}", self.path.display(), e))
    }

    fn set_config_content(&self, content: &str) -> Result<(), String> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }
        std::fs::write(&self.path, content)
            .map_err(|e| format!("Failed to write config file {}: {}", self.path.display(), e))
    }
}
