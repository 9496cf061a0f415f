use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use coloredmanga_util::http::DEFAULT_USER_AGENT;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    #[serde(skip)]
    path: PathBuf,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request budget of the http client, `0` disables rate limiting
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    /// Leading segments of a chapter link dropped to get the chapter id.
    /// `https://coloredmanga.com/manga/{manga}/{chapter}/` splits into
    /// `["https:", "", "coloredmanga.com", "manga", "{manga}", "{chapter}"]`
    #[serde(default = "default_chapter_path_offset")]
    pub chapter_path_offset: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: coloredmanga_home().join("config.yml"),
            base_url: default_base_url(),
            requests_per_second: default_requests_per_second(),
            chapter_path_offset: default_chapter_path_offset(),
            user_agent: default_user_agent(),
        }
    }
}

fn coloredmanga_home() -> PathBuf {
    match std::env::var("COLOREDMANGA_HOME") {
        Ok(path) => PathBuf::from(path),
        Err(_) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".coloredmanga"),
    }
}

fn default_base_url() -> String {
    "https://coloredmanga.com".to_string()
}

fn default_requests_per_second() -> u32 {
    5
}

fn default_chapter_path_offset() -> usize {
    5
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Config {
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Config, ConfigError> {
        let config_path = match path {
            Some(p) => PathBuf::new().join(p),
            None => coloredmanga_home().join("config.yml"),
        };

        match std::fs::File::open(&config_path) {
            Ok(file) => {
                info!("Open config from {:?}", config_path);
                let mut cfg: Self = serde_yml::from_reader(file)?;
                cfg.path = config_path;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Config {
                    path: config_path,
                    ..Default::default()
                };
                cfg.save()?;
                info!("Write default config at {:?}", cfg.path);
                Ok(cfg)
            }
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_yml::to_string(&self)?)?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base url without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
