use clap::Parser;
use std::path::PathBuf;

use crate::config::ConfigLoader;
use crate::config::ConfigOverrides;

#[derive(Parser, Debug, Default)]
#[command(version, about = "Browse the project showcase by category")]
pub struct Cli {
    /// Listing endpoint. `?category=<id>` is appended on every request.
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Category selected at startup.
    #[arg(long, short = 'c', value_name = "ID")]
    pub category: Option<String>,

    /// State directory holding `config.toml` and `log/`.
    #[arg(long, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Read this config file instead of `<home>/config.toml`.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn config_loader(&self) -> ConfigLoader {
        let mut loader = ConfigLoader::new().with_overrides(ConfigOverrides {
            endpoint: self.endpoint.clone(),
            initial_category: self.category.clone(),
        });
        if let Some(home) = &self.home {
            loader = loader.with_home(home.clone());
        }
        if let Some(path) = &self.config {
            loader = loader.with_config_file(path.clone());
        }
        loader
    }
}
