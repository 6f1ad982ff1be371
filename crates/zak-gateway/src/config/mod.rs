//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use zak_core::error::{Result, ZakError};

pub use schema::{HttpSection, KernelSection, Mode, SentrySection, ZakConfig};

pub fn load_from_file(path: &str) -> Result<ZakConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ZakError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ZakConfig> {
    let cfg: ZakConfig =
        serde_yaml::from_str(s).map_err(|e| ZakError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
