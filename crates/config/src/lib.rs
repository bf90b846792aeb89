//! Configuration for Quill.
//!
//! Configuration is written in TOML and may contain:
//!
//! - **Placeholder options**: idle detection timing and the empty-document threshold
//! - **Templates**: document sections with prompt pools keyed by heading
//! - **Prompts**: prompt pools applied after every template (including `default`)
//!
//! ```toml
//! [placeholder]
//! pause_threshold_ms = 1500
//! tick_interval_ms = 1000
//!
//! [prompts]
//! default = ["What's on your mind?"]
//!
//! [[template]]
//! id = "retro"
//! title = "Retrospective"
//! outline = """
//! ## Retrospective
//! ### What went well?
//!
//! """
//!
//! [template.prompts]
//! "What went well?" = ["Name one win.", "Who helped?"]
//! ```
//!
//! Quill looks for `$XDG_CONFIG_HOME/quill/config.toml` (or the platform
//! equivalent). Bundled templates are always available underneath the user's.

pub mod error;
pub mod options;
pub mod template;

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use error::{ConfigError, Result};
pub use options::PlaceholderOptions;
pub use template::{PromptMap, Template, TemplateSet};

use crate::options::RawPlaceholderOptions;

/// Bundled section templates, compiled into the binary.
const BUNDLED_TEMPLATES: &str = include_str!("../assets/templates.toml");

/// Parsed configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
	/// Engine tuning.
	pub placeholder: PlaceholderOptions,
	/// Section templates in load order.
	pub templates: TemplateSet,
	/// Top-level prompt pools, layered over template prompts.
	pub prompts: PromptMap,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
	#[serde(default)]
	placeholder: RawPlaceholderOptions,
	#[serde(default, rename = "template")]
	templates: Vec<Template>,
	#[serde(default)]
	prompts: PromptMap,
}

impl Config {
	/// Parses configuration from a TOML string.
	pub fn from_toml(src: &str) -> Result<Self> {
		let raw: RawConfig = toml::from_str(src)?;
		Ok(Self {
			placeholder: raw.placeholder.validate()?,
			templates: TemplateSet::new(raw.templates)?,
			prompts: raw.prompts,
		})
	}

	/// Reads and parses a configuration file.
	pub fn load(path: &Path) -> Result<Self> {
		let src = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let config = Self::from_toml(&src)?;
		tracing::debug!(
			path = %path.display(),
			templates = config.templates.len(),
			prompts = config.prompts.len(),
			"config.load"
		);
		Ok(config)
	}

	/// Configuration holding only the bundled templates.
	pub fn bundled() -> Result<Self> {
		Self::from_toml(BUNDLED_TEMPLATES)
	}

	/// Layers this configuration's templates over the bundled set.
	pub fn with_bundled(self) -> Result<Self> {
		let mut templates = Self::bundled()?.templates;
		templates.overlay(self.templates);
		Ok(Self { templates, ..self })
	}

	/// Default user config location, if the platform has a config directory.
	pub fn default_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join("quill").join("config.toml"))
	}

	/// Prompt mappings in merge order: template prompts, then top-level prompts.
	pub fn prompt_sources(&self) -> [PromptMap; 2] {
		[self.templates.merged_prompts(), self.prompts.clone()]
	}
}
