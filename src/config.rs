// ABOUTME: Configuration module for the lesson-slides application
// ABOUTME: Provides configuration settings and environment variable handling

use crate::errors::Result;
use crate::utils;
use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;

/// Global configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub snippets_dir: PathBuf,
    pub media_dir: PathBuf,
    pub static_dir: PathBuf,
    pub default_name: String,
    pub default_color: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            workers: default_workers(),
            snippets_dir: PathBuf::from("snippets"),
            media_dir: PathBuf::from("media"),
            static_dir: PathBuf::from("static"),
            default_name: "Stranger".to_string(),
            default_color: "#fff".to_string(),
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(defaults.port);
        let workers = env::var("WORKERS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.workers);
        let snippets_dir = env::var("SNIPPETS_DIR")
            .ok()
            .map(PathBuf::from)
            .unwrap_or(defaults.snippets_dir);
        let media_dir = env::var("MEDIA_DIR")
            .ok()
            .map(PathBuf::from)
            .unwrap_or(defaults.media_dir);
        let static_dir = env::var("STATIC_DIR")
            .ok()
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);
        let default_name = env::var("DEFAULT_NAME").unwrap_or(defaults.default_name);
        let default_color = env::var("DEFAULT_COLOR").unwrap_or(defaults.default_color);

        Self {
            host,
            port,
            workers,
            snippets_dir,
            media_dir,
            static_dir,
            default_name,
            default_color,
        }
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check that the directories needed to build decks are present
    pub fn validate(&self) -> Result<()> {
        utils::validate_directory_exists(&self.snippets_dir)?;
        if !self.media_dir.is_dir() {
            log::warn!(
                "Media directory {:?} does not exist; image slides will fail",
                self.media_dir
            );
        }
        Ok(())
    }
}
