//! spacetraveling: a server-rendered blog front-end for a Prismic repository
//!
//! Posts are fetched from the content repository on request and rendered
//! with embedded Tera templates. The home page lists post summaries with
//! cursor pagination; post pages show the reading time and publication date.

pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod pagination;
pub mod server;
pub mod templates;

pub use error::{Error, Result};

use chrono_tz::Tz;
use std::path::Path;

/// The main application
#[derive(Clone)]
pub struct SpaceTraveling {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Display timezone for dates
    pub timezone: Tz,
}

impl SpaceTraveling {
    /// Create a new instance from a directory.
    ///
    /// Reads `_config.yml` when present, then applies environment overrides.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> anyhow::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        Self::with_config(base_dir, config)
    }

    /// Create an instance from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(
        base_dir: P,
        config: config::SiteConfig,
    ) -> anyhow::Result<Self> {
        let timezone = config.timezone()?;
        Ok(Self {
            config,
            base_dir: base_dir.as_ref().to_path_buf(),
            timezone,
        })
    }

    /// Template and formatting helpers for this site
    pub fn helpers(&self) -> helpers::Helpers {
        helpers::Helpers::new(self.timezone)
    }

    /// Build the content repository client from configuration
    pub fn client(&self) -> anyhow::Result<cms::PrismicClient> {
        self.config.validate()?;
        Ok(cms::PrismicClient::new(&self.config.prismic)?)
    }
}
