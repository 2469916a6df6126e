use std::fs;
use std::process;

use wordlat_core::settings::{self, SettingsError};

macro_rules! die {
    ($code:expr, $result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit($code);
        })
    };
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

/// One-line summary of a settings TOML, or the first validation failure.
pub fn settings_summary(content: &str) -> Result<String, SettingsError> {
    let s = settings::parse_settings_toml(content)?;
    Ok(format!(
        "OK: tokens.silence={:?}, decoder.lm_scale={}, report.hit_words={:?}",
        s.tokens.silence, s.decoder.lm_scale, s.report.hit_words
    ))
}

pub fn settings_validate(file: &str) {
    let content = die!(1, fs::read_to_string(file), "Error reading {file}: {}");
    let summary = die!(2, settings_summary(&content), "Error: {}");
    println!("{summary}");
}

/// Install `file` as the process-wide settings before any command runs.
pub fn load_custom_settings(file: &str) {
    let content = die!(1, fs::read_to_string(file), "Error reading {file}: {}");
    die!(2, settings::init_custom(content), "Error in {file}: {}");
}
