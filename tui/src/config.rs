//! Layered configuration for the showcase.
//!
//! Precedence, later layers overriding earlier ones:
//! 1. Defaults (the public listing service and its assets)
//! 2. File config (`<home>/config.toml`, or an explicit `--config` path)
//! 3. Environment overrides (`SHOWCASE_ENDPOINT`, `SHOWCASE_INITIAL_CATEGORY`)
//! 4. Command-line overrides
//!
//! `<home>` is `--home`, else `$SHOWCASE_HOME`, else `~/.project-showcase`.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::project_filter::Assets;
use crate::project_filter::Category;
use crate::project_filter::DEFAULT_CATEGORY;

pub const DEFAULT_ENDPOINT: &str = "https://apis.ccbp.in/ps/projects";
pub const DEFAULT_LOGO_URL: &str =
    "https://assets.ccbp.in/frontend/react-js/projects-showcase/website-logo-img.png";
pub const DEFAULT_FAILURE_IMAGE_URL: &str =
    "https://assets.ccbp.in/frontend/react-js/projects-showcase/failure-img.png";

const CONFIG_FILE: &str = "config.toml";
const DEFAULT_HOME_DIR: &str = ".project-showcase";
const DEFAULT_ENV_PREFIX: &str = "SHOWCASE";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid endpoint `{value}`: {reason}")]
    InvalidEndpoint { value: String, reason: String },

    #[error("invalid category list: {0}")]
    InvalidCategories(String),

    #[error("cannot determine home directory")]
    NoHomeDir,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseConfig {
    pub home: PathBuf,
    pub endpoint: Url,
    pub logo_url: String,
    pub failure_image_url: String,
    pub initial_category: String,
    pub categories: Vec<Category>,
}

impl ShowcaseConfig {
    pub fn assets(&self) -> Assets {
        Assets {
            logo_url: self.logo_url.clone(),
            failure_image_url: self.failure_image_url.clone(),
        }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.home.join("log")
    }
}

pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("ALL", "All"),
        Category::new("STATIC", "Static"),
        Category::new("RESPONSIVE", "Responsive"),
        Category::new("DYNAMIC", "Dynamic"),
        Category::new("REACT", "React"),
    ]
}

/// Values from the command line; highest precedence.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub initial_category: Option<String>,
}

/// One partially specified layer.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigLayer {
    endpoint: Option<String>,
    logo_url: Option<String>,
    failure_image_url: Option<String>,
    initial_category: Option<String>,
    categories: Option<Vec<Category>>,
}

impl ConfigLayer {
    fn merge(&mut self, other: ConfigLayer) {
        if other.endpoint.is_some() {
            self.endpoint = other.endpoint;
        }
        if other.logo_url.is_some() {
            self.logo_url = other.logo_url;
        }
        if other.failure_image_url.is_some() {
            self.failure_image_url = other.failure_image_url;
        }
        if other.initial_category.is_some() {
            self.initial_category = other.initial_category;
        }
        if other.categories.is_some() {
            self.categories = other.categories;
        }
    }
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String>>;

pub struct ConfigLoader {
    home: Option<PathBuf>,
    config_file: Option<PathBuf>,
    env_prefix: String,
    env: EnvLookup,
    skip_file: bool,
    skip_env: bool,
    overrides: ConfigOverrides,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            home: None,
            config_file: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            env: Box::new(|key| std::env::var(key).ok()),
            skip_file: false,
            skip_env: false,
            overrides: ConfigOverrides::default(),
        }
    }

    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = Some(home);
        self
    }

    /// Read this file instead of `<home>/config.toml`. Unlike the default
    /// location, a missing explicit file is an error.
    pub fn with_config_file(mut self, path: PathBuf) -> Self {
        self.config_file = Some(path);
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Replace the process environment, mainly for tests.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String> + 'static) -> Self {
        self.env = Box::new(lookup);
        self
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn skip_file_layer(mut self) -> Self {
        self.skip_file = true;
        self
    }

    pub fn skip_env_layer(mut self) -> Self {
        self.skip_env = true;
        self
    }

    pub fn load(self) -> Result<ShowcaseConfig, ConfigLoadError> {
        let home = self.resolve_home()?;
        let mut layer = ConfigLayer::default();

        if !self.skip_file {
            let file_layer = match &self.config_file {
                Some(path) => read_layer(path)?,
                None => read_optional_layer(&home.join(CONFIG_FILE))?,
            };
            layer.merge(file_layer);
        }

        if !self.skip_env {
            layer.merge(ConfigLayer {
                endpoint: self.env_var("ENDPOINT"),
                initial_category: self.env_var("INITIAL_CATEGORY"),
                ..ConfigLayer::default()
            });
        }

        layer.merge(ConfigLayer {
            endpoint: self.overrides.endpoint.clone(),
            initial_category: self.overrides.initial_category.clone(),
            ..ConfigLayer::default()
        });

        finalize(home, layer)
    }

    fn env_var(&self, name: &str) -> Option<String> {
        (self.env)(&format!("{}_{name}", self.env_prefix)).filter(|v| !v.trim().is_empty())
    }

    fn resolve_home(&self) -> Result<PathBuf, ConfigLoadError> {
        if let Some(home) = &self.home {
            return Ok(home.clone());
        }
        if let Some(home) = self.env_var("HOME") {
            return Ok(PathBuf::from(home));
        }
        dirs::home_dir()
            .map(|home| home.join(DEFAULT_HOME_DIR))
            .ok_or(ConfigLoadError::NoHomeDir)
    }
}

fn read_layer(path: &Path) -> Result<ConfigLayer, ConfigLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_optional_layer(path: &Path) -> Result<ConfigLayer, ConfigLoadError> {
    if !path.exists() {
        tracing::info!("{} not found, using defaults", path.display());
        return Ok(ConfigLayer::default());
    }
    read_layer(path)
}

fn finalize(home: PathBuf, layer: ConfigLayer) -> Result<ShowcaseConfig, ConfigLoadError> {
    let endpoint_value = layer
        .endpoint
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let endpoint = parse_endpoint(&endpoint_value)?;

    let categories = layer.categories.unwrap_or_else(default_categories);
    validate_categories(&categories)?;

    let requested = layer
        .initial_category
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    let initial_category = if categories.iter().any(|c| c.id == requested) {
        requested
    } else {
        let fallback = categories[0].id.clone();
        tracing::warn!(
            requested = requested.as_str(),
            fallback = fallback.as_str(),
            "initial category is not configured; falling back"
        );
        fallback
    };

    Ok(ShowcaseConfig {
        home,
        endpoint,
        logo_url: layer.logo_url.unwrap_or_else(|| DEFAULT_LOGO_URL.to_string()),
        failure_image_url: layer
            .failure_image_url
            .unwrap_or_else(|| DEFAULT_FAILURE_IMAGE_URL.to_string()),
        initial_category,
        categories,
    })
}

fn parse_endpoint(value: &str) -> Result<Url, ConfigLoadError> {
    let url = Url::parse(value).map_err(|e| ConfigLoadError::InvalidEndpoint {
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigLoadError::InvalidEndpoint {
            value: value.to_string(),
            reason: format!("unsupported scheme `{scheme}`"),
        }),
    }
}

fn validate_categories(categories: &[Category]) -> Result<(), ConfigLoadError> {
    if categories.is_empty() {
        return Err(ConfigLoadError::InvalidCategories(
            "at least one category is required".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    for category in categories {
        if category.id.trim().is_empty() {
            return Err(ConfigLoadError::InvalidCategories(
                "category ids must not be empty".to_string(),
            ));
        }
        if !seen.insert(category.id.as_str()) {
            return Err(ConfigLoadError::InvalidCategories(format!(
                "duplicate category id `{}`",
                category.id
            )));
        }
    }
    Ok(())
}
