//! Configuration command handler.
//!
//! This module implements the `cfg` command, which displays the resolved
//! configuration together with the layer each value came from (default,
//! configuration file or environment).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "machines": {
//!     "value": 1,
//!     "source": "default"
//!   },
//!   "seed": {
//!     "value": 42,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(e.to_string()));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "machines": {
            "value": config.machines,
            "source": sources.machines,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "strategy": {
            "value": config.strategy,
            "source": sources.strategy,
        },
        "poll_interval_ms": {
            "value": config.poll_interval_ms,
            "source": sources.poll_interval_ms,
        },
        "think_min_ms": {
            "value": config.think_min_ms,
            "source": sources.think_min_ms,
        },
        "think_max_ms": {
            "value": config.think_max_ms,
            "source": sources.think_max_ms,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
