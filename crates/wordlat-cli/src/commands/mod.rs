pub mod config_ops;
pub mod inspect_ops;
pub mod run_ops;

use std::io;
use std::path::PathBuf;

use wordlat_core::LatticeError;

/// Failure writing command output to the terminal.
pub(crate) fn stdout_error(source: io::Error) -> LatticeError {
    LatticeError::FileAccess {
        path: PathBuf::from("<stdout>"),
        source,
    }
}

/// Command-line language-model scale: a finite, non-negative number.
pub fn parse_lm_scale(arg: &str) -> Result<f64, String> {
    let scale: f64 = arg
        .parse()
        .map_err(|_| format!("{arg:?} is not a number"))?;
    if !scale.is_finite() || scale < 0.0 {
        return Err(format!("{arg:?} must be a finite, non-negative number"));
    }
    Ok(scale)
}
