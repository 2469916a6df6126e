//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub tokens: TokenSettings,
    pub decoder: DecoderSettings,
    pub report: ReportSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenSettings {
    /// Label marking non-speech.
    pub silence: String,
    /// Separator inside multi-word labels.
    pub word_delimiter: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecoderSettings {
    pub lm_scale: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    pub words_at_time: f64,
    pub hit_words: Vec<String>,
    pub time_precision: usize,
    pub wer_precision: usize,
    /// Decimal digits for lattice density.
    pub density_precision: usize,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_empty {
        ($section:ident . $field:ident) => {
            if s.$section.$field.is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }
    macro_rules! check_finite_non_negative {
        ($section:ident . $field:ident) => {
            if !s.$section.$field.is_finite() || s.$section.$field < 0.0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be a finite, non-negative number".to_string(),
                });
            }
        };
    }
    macro_rules! check_precision {
        ($section:ident . $field:ident) => {
            if s.$section.$field > 6 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be between 0 and 6".to_string(),
                });
            }
        };
    }

    check_non_empty!(tokens.silence);
    check_non_empty!(tokens.word_delimiter);
    if s.tokens.silence.split_whitespace().count() != 1 {
        return Err(SettingsError::InvalidValue {
            field: "tokens.silence".to_string(),
            reason: "must be a single token without whitespace".to_string(),
        });
    }

    check_finite_non_negative!(decoder.lm_scale);
    check_finite_non_negative!(report.words_at_time);
    check_precision!(report.time_precision);
    check_precision!(report.wer_precision);
    check_precision!(report.density_precision);

    Ok(())
}
