use std::path::Path;

use serde::Deserialize;

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading a config file.
    Load(String),
    /// The file was read but could not be parsed as YAML.
    Parse(String),
    /// A value (file or environment) is not acceptable for its key.
    Invalid { key: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {msg}"),
            ConfigError::Invalid { key, message } => {
                write!(f, "Invalid config value for '{key}': {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// How sequence entries are grouped; see [`crate::sequences`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupNameMode {
    /// The whole tree shares the outermost registered blueprint's key.
    #[default]
    OnlyBase,
    /// Every group opens its own scope: a group entry carries its own key,
    /// and its subtree inherits it until the next group.
    EveryGroup,
}

/// Settings driving derivation, composition and scanning.
///
/// Loaded from a YAML file ([`TrellisConfig::load`]), after which
/// `TRELLIS_*` environment variables overlay individual keys:
///
/// | key | env var | default |
/// |-----|---------|---------|
/// | `auto_scan` | `TRELLIS_AUTO_SCAN` | `false` |
/// | `url_delimiter` | `TRELLIS_URL_DELIMITER` | `/` |
/// | `url_segment_delimiter` | `TRELLIS_URL_SEGMENT_DELIMITER` | `-` |
/// | `route_name_delimiter` | `TRELLIS_ROUTE_NAME_DELIMITER` | `.` |
/// | `view_delimiter` | `TRELLIS_VIEW_DELIMITER` | `.` |
/// | `action_delimiter` | `TRELLIS_ACTION_DELIMITER` | `::` |
/// | `variable_open` | `TRELLIS_VARIABLE_OPEN` | `{` |
/// | `variable_close` | `TRELLIS_VARIABLE_CLOSE` | `}` |
/// | `group_name_mode` | `TRELLIS_GROUP_NAME_MODE` | `only_base` |
/// | `blueprint_dir` | `TRELLIS_BLUEPRINT_DIR` | `src/blueprints` |
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrellisConfig {
    /// Register every catalogued blueprint automatically.
    pub auto_scan: bool,
    /// Separator between URL segments.
    pub url_delimiter: String,
    /// Delimiter used within individual URL segments.
    pub url_segment_delimiter: String,
    /// Delimiter between composed route-name segments.
    pub route_name_delimiter: String,
    /// Delimiter between composed view-name segments.
    pub view_delimiter: String,
    /// Delimiter between a controller and its method in action keys.
    pub action_delimiter: String,
    /// Opening marker wrapped around URL variables.
    pub variable_open: String,
    /// Closing marker wrapped around URL variables.
    pub variable_close: String,
    /// How sequence entries are grouped.
    pub group_name_mode: GroupNameMode,
    /// Directory the CLI generates blueprints into and lists routes from.
    pub blueprint_dir: String,
}

impl Default for TrellisConfig {
    fn default() -> Self {
        TrellisConfig {
            auto_scan: false,
            url_delimiter: "/".to_string(),
            url_segment_delimiter: "-".to_string(),
            route_name_delimiter: ".".to_string(),
            view_delimiter: ".".to_string(),
            action_delimiter: "::".to_string(),
            variable_open: "{".to_string(),
            variable_close: "}".to_string(),
            group_name_mode: GroupNameMode::OnlyBase,
            blueprint_dir: "src/blueprints".to_string(),
        }
    }
}

impl TrellisConfig {
    /// Loads the given YAML file, then overlays `TRELLIS_*` environment
    /// variables. A missing file yields the defaults, so a project without
    /// a config file still works.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .map_err(|err| ConfigError::Load(format!("{}: {err}", path.display())))?;
            Self::from_yaml_str(&raw)?
        } else {
            Self::default()
        };
        config.overlay_env()?;
        Ok(config)
    }

    /// Parses a config from YAML. Unknown keys are ignored; missing keys
    /// fall back to their defaults.
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Applies `TRELLIS_*` environment variables on top of the current
    /// values.
    pub fn overlay_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(value) = std::env::var("TRELLIS_AUTO_SCAN") {
            self.auto_scan = parse_bool("TRELLIS_AUTO_SCAN", &value)?;
        }
        for (var, field) in [
            ("TRELLIS_URL_DELIMITER", &mut self.url_delimiter),
            ("TRELLIS_URL_SEGMENT_DELIMITER", &mut self.url_segment_delimiter),
            ("TRELLIS_ROUTE_NAME_DELIMITER", &mut self.route_name_delimiter),
            ("TRELLIS_VIEW_DELIMITER", &mut self.view_delimiter),
            ("TRELLIS_ACTION_DELIMITER", &mut self.action_delimiter),
            ("TRELLIS_VARIABLE_OPEN", &mut self.variable_open),
            ("TRELLIS_VARIABLE_CLOSE", &mut self.variable_close),
            ("TRELLIS_BLUEPRINT_DIR", &mut self.blueprint_dir),
        ] {
            if let Ok(value) = std::env::var(var) {
                *field = value;
            }
        }
        if let Ok(value) = std::env::var("TRELLIS_GROUP_NAME_MODE") {
            self.group_name_mode = match value.as_str() {
                "only_base" => GroupNameMode::OnlyBase,
                "every_group" => GroupNameMode::EveryGroup,
                other => {
                    return Err(ConfigError::Invalid {
                        key: "TRELLIS_GROUP_NAME_MODE".to_string(),
                        message: format!("expected 'only_base' or 'every_group', got '{other}'"),
                    });
                }
            };
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid {
            key: key.to_string(),
            message: format!("expected a boolean, got '{other}'"),
        }),
    }
}
