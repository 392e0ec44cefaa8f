use config::{Config, ConfigError, Environment, File, FileFormat, Map};
use pythagoras_distance::{DistanceError, GridConfig, Position, RankOrder, Token};
use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const ENV_PREFIX: &str = "PYTHAGORAS";

/// Permission level of the user running the report, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Player,
    Trusted,
    Assistant,
    Gamemaster,
}

impl UserRole {
    /// Players and trusted players fall back to their own tokens when nothing is selected.
    pub fn falls_back_to_owned(&self) -> bool {
        *self < UserRole::Assistant
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserSettings {
    pub name: String,
    #[serde(default)]
    pub role: UserRole,
}

impl Default for UserSettings {
    fn default() -> Self {
        UserSettings {
            name: "Player".to_string(),
            role: UserRole::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportSettings {
    #[serde(default)]
    pub order: RankOrder,
}

/// A token as laid out on the scene, with the user's interaction state.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSettings {
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub elevation: f64,
    #[serde(default)]
    pub controlled: bool,
    #[serde(default)]
    pub owned: bool,
    #[serde(default)]
    pub targeted: bool,
}

impl TokenSettings {
    pub fn to_token(&self) -> Result<Token, DistanceError> {
        Token::new(self.name.clone(), Position::new(self.x, self.y, self.elevation))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    #[serde(default)]
    pub user: UserSettings,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub tokens: Vec<TokenSettings>,
}

/// Load the scene snapshot from a TOML file, with `PYTHAGORAS__*` environment overrides.
pub fn load_config(path: &str) -> Result<Settings, ConfigError> {
    load_config_with_env(path, None)
}

/// Same as [`load_config`], reading overrides from `env` instead of the
/// process environment when given.
pub fn load_config_with_env(
    path: &str,
    env: Option<Map<String, String>>,
) -> Result<Settings, ConfigError> {
    info!("Attempting to load configuration from {}", path);

    let settings = Config::builder()
        .add_source(File::new(path, FileFormat::Toml).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()
        .and_then(|config| config.try_deserialize::<Settings>());

    match settings {
        Ok(settings) => {
            info!(
                grid = %settings.grid,
                tokens = settings.tokens.len(),
                "Successfully loaded configuration"
            );
            Ok(settings)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}

/// Parse a scene snapshot from TOML text.
pub fn parse_settings(toml: &str) -> Result<Settings, ConfigError> {
    Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()
}
