use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

pub struct ConfigManager<TProvider, TConfig>
where
    TProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    serializer: YamlConfigSerializer,
    provider: TProvider,
    cached: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(FileContentConfigProvider::new(file_path.to_string()))
    }
}

impl<TProvider, TConfig> ConfigManager<TProvider, TConfig>
where
    TProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn new(provider: TProvider) -> Self {
        Self {
            serializer: YamlConfigSerializer::new(),
            provider,
            cached: Mutex::new(None),
        }
    }

    /// Returns the cached config, loading and validating it on first use.
    /// Falls back to `TConfig::default()` when nothing has been written yet.
    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut cached = self.cached.lock().unwrap();

        if let Some(config) = cached.as_ref() {
            return Ok(config.clone());
        }

        match self.provider.get_config_content()? {
            Some(content) => {
                let config: TConfig = self.serializer.deserialize(&content)?;
                config
                    .validate()
                    .map_err(|e| format!("Config validation error: {}", e))?;
                *cached = Some(config.clone());
                Ok(config)
            }
            None => Ok(TConfig::default()),
        }
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let content = self.serializer.serialize(config)?;
        self.provider.set_config_content(&content)?;

        *self.cached.lock().unwrap() = Some(config.clone());
        Ok(())
    }
}
