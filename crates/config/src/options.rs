//! Engine tuning options (`[placeholder]` table).

use std::time::Duration;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Sustained pause before a continuation prompt is offered.
pub const DEFAULT_PAUSE_THRESHOLD: Duration = Duration::from_millis(1500);
/// Period of the idle check.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);
/// Documents at or below this content size count as effectively empty.
pub const DEFAULT_MIN_CONTENT_SIZE: usize = 2;

/// Validated placeholder engine options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderOptions {
	pub pause_threshold: Duration,
	pub tick_interval: Duration,
	pub min_content_size: usize,
}

impl Default for PlaceholderOptions {
	fn default() -> Self {
		Self {
			pause_threshold: DEFAULT_PAUSE_THRESHOLD,
			tick_interval: DEFAULT_TICK_INTERVAL,
			min_content_size: DEFAULT_MIN_CONTENT_SIZE,
		}
	}
}

/// Raw `[placeholder]` table as written in TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawPlaceholderOptions {
	#[serde(default)]
	pause_threshold_ms: Option<u64>,
	#[serde(default)]
	tick_interval_ms: Option<u64>,
	#[serde(default)]
	min_content_size: Option<usize>,
}

impl RawPlaceholderOptions {
	pub(crate) fn validate(self) -> Result<PlaceholderOptions> {
		let defaults = PlaceholderOptions::default();
		let pause_threshold = match self.pause_threshold_ms {
			Some(0) => {
				return Err(ConfigError::InvalidOption {
					name: "pause_threshold_ms",
					reason: "must be greater than zero",
				});
			}
			Some(ms) => Duration::from_millis(ms),
			None => defaults.pause_threshold,
		};
		let tick_interval = match self.tick_interval_ms {
			Some(0) => {
				return Err(ConfigError::InvalidOption {
					name: "tick_interval_ms",
					reason: "must be greater than zero",
				});
			}
			Some(ms) => Duration::from_millis(ms),
			None => defaults.tick_interval,
		};
		Ok(PlaceholderOptions {
			pause_threshold,
			tick_interval,
			min_content_size: self.min_content_size.unwrap_or(defaults.min_content_size),
		})
	}
}
