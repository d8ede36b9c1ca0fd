//! TOML loading for [`DispatchConfig`].
//!
//! Every key is optional; missing keys take their defaults.
//!
//! ```toml
//! tick_duration_ms        = 1000
//! total_ticks             = 3600
//! primary_auto_delay_mins = 25
//! lock_cooldown_ms        = 5000
//! ```

use std::path::Path;

use fd_core::DispatchConfig;
use tracing::debug;

use crate::DispatchResult;

/// Parse and validate a config from TOML text.
pub fn config_from_toml_str(text: &str) -> DispatchResult<DispatchConfig> {
    let config: DispatchConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Read, parse, and validate a config file.
pub fn load_config(path: &Path) -> DispatchResult<DispatchConfig> {
    let text = std::fs::read_to_string(path)?;
    let config = config_from_toml_str(&text)?;
    debug!(path = %path.display(), ?config, "dispatch config loaded");
    Ok(config)
}
