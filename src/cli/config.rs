use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::settings::policy::{AnimationSpeed, FillPolicy};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-autofill",
    version,
    about = "Fill web forms with plausible random data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: form-autofill.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Path to the stored settings file (options and profiles)
    #[arg(long, global = true)]
    pub settings: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fill the form controls of a page snapshot
    Fill {
        /// Page snapshot JSON ({url, title, dom: [...]})
        #[arg(long)]
        page: String,

        /// Locale code for generated data, e.g. en_US, fr, ja
        #[arg(long)]
        locale: Option<String>,

        /// Only fill fields marked required
        #[arg(long)]
        required_only: bool,

        /// Ignore step, minlength and maxlength constraints
        #[arg(long)]
        ignore_validation: bool,

        /// Highlight speed for filled fields
        #[arg(long, value_enum)]
        speed: Option<SpeedArg>,

        /// Seed for reproducible fills
        #[arg(long)]
        seed: Option<u64>,

        /// Write the filled snapshot here
        #[arg(short, long)]
        output: Option<String>,

        /// Append per-field JSONL trace events here
        #[arg(long)]
        trace: Option<String>,

        /// Summary format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Count the fillable fields of a page snapshot
    Count {
        #[arg(long)]
        page: String,
    },

    /// Show how a field would be classified
    Classify {
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        id: String,

        #[arg(long, default_value = "")]
        placeholder: String,

        /// Input type, or "select" / "textarea"
        #[arg(long = "type", default_value = "text")]
        input_type: String,
    },

    /// List supported locale codes
    Locales,

    /// Show or change the stored fill options
    Options {
        #[command(subcommand)]
        action: OptionsAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum OptionsAction {
    /// Print the stored options as JSON
    Show,

    /// Update stored options
    Set {
        #[arg(long)]
        locale: Option<String>,

        #[arg(long, action = clap::ArgAction::Set)]
        fill_optional: Option<bool>,

        #[arg(long, action = clap::ArgAction::Set)]
        respect_validation: Option<bool>,

        #[arg(long, value_enum)]
        speed: Option<SpeedArg>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpeedArg {
    Instant,
    Fast,
    Slow,
}

impl From<SpeedArg> for AnimationSpeed {
    fn from(speed: SpeedArg) -> Self {
        match speed {
            SpeedArg::Instant => AnimationSpeed::Instant,
            SpeedArg::Fast => AnimationSpeed::Fast,
            SpeedArg::Slow => AnimationSpeed::Slow,
        }
    }
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

pub const DEFAULT_CONFIG_PATH: &str = "form-autofill.yaml";
pub const DEFAULT_SETTINGS_PATH: &str = "form-autofill-settings.json";

/// Optional YAML config file: `form-autofill.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub fill: FillConfig,

    /// Settings file used when `--settings` is not given.
    #[serde(default)]
    pub settings: Option<String>,
}

/// Fill defaults. Unset keys leave the stored options untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FillConfig {
    pub locale: Option<String>,
    pub include_optional_fields: Option<bool>,
    pub respect_validation: Option<bool>,
    pub animation_speed: Option<AnimationSpeed>,
    pub trace: Option<String>,
}

impl FillConfig {
    pub fn apply(&self, policy: &mut FillPolicy) {
        if let Some(locale) = &self.locale {
            policy.locale = locale.clone();
        }
        if let Some(include) = self.include_optional_fields {
            policy.include_optional_fields = include;
        }
        if let Some(respect) = self.respect_validation {
            policy.respect_validation = respect;
        }
        if let Some(speed) = self.animation_speed {
            policy.animation_speed = speed;
        }
    }
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = config_path, error = %e, "malformed config file, using defaults");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

/// Settings file path: CLI > config > default.
pub fn resolve_settings_path(cli: Option<&str>, config: &AppConfig) -> String {
    cli.or(config.settings.as_deref())
        .unwrap_or(DEFAULT_SETTINGS_PATH)
        .to_string()
}

/// Flags from `fill` that override the resolved policy.
#[derive(Debug, Clone, Default)]
pub struct FillOverrides {
    pub locale: Option<String>,
    pub required_only: bool,
    pub ignore_validation: bool,
    pub speed: Option<SpeedArg>,
}

/// Build the policy for one fill: CLI > config > stored options > defaults.
pub fn build_fill_policy(stored: FillPolicy, config: &FillConfig, overrides: &FillOverrides) -> FillPolicy {
    let mut policy = stored;
    config.apply(&mut policy);

    if let Some(locale) = &overrides.locale {
        policy.locale = locale.clone();
    }
    if overrides.required_only {
        policy.include_optional_fields = false;
    }
    if overrides.ignore_validation {
        policy.respect_validation = false;
    }
    if let Some(speed) = overrides.speed {
        policy.animation_speed = speed.into();
    }
    policy
}
