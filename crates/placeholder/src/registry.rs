//! Context key to prompt pool lookup table.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::context::DEFAULT_CONTEXT;

/// Default pool used when no prompt mapping is configured.
pub const BUILTIN_DEFAULT_PROMPTS: [&str; 4] = [
	"What's on your mind?",
	"Elaborate on this...",
	"Anything else to add?",
	"What are the key details?",
];

/// Default pool supplied when a configured mapping lacks a usable `default`.
pub const FALLBACK_DEFAULT_PROMPTS: [&str; 3] = ["What's on your mind?", "Elaborate on this...", "Anything else to add?"];

/// An ordered, non-empty list of prompts. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPool(Arc<[String]>);

impl PromptPool {
	/// Creates a pool, or `None` if `prompts` is empty.
	pub fn new(prompts: Vec<String>) -> Option<Self> {
		(!prompts.is_empty()).then(|| Self(prompts.into()))
	}

	fn from_static(prompts: &[&str]) -> Self {
		Self(prompts.iter().map(|p| (*p).to_owned()).collect())
	}

	/// Number of prompts. Never zero.
	#[allow(clippy::len_without_is_empty, reason = "pools are never empty")]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// First prompt in the pool.
	pub fn first(&self) -> &str {
		&self.0[0]
	}

	/// Prompt at `index`, wrapping around the pool length.
	pub fn get(&self, index: usize) -> &str {
		&self.0[index % self.0.len()]
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}
}

/// Read-only table from context key to prompt pool.
///
/// Built once from caller mappings; lookups for unknown keys resolve to the
/// default pool, which is guaranteed non-empty.
#[derive(Debug, Clone)]
pub struct PromptRegistry {
	pools: FxHashMap<String, PromptPool>,
	default: PromptPool,
}

impl PromptRegistry {
	/// Merges `sources` in order. A key present in several sources takes the
	/// pool from the last one.
	///
	/// Empty lists are dropped, so their keys fall back to the default pool.
	/// A missing or empty `default` is replaced by [`FALLBACK_DEFAULT_PROMPTS`].
	pub fn new<I, M>(sources: I) -> Self
	where
		I: IntoIterator<Item = M>,
		M: IntoIterator<Item = (String, Vec<String>)>,
	{
		let mut merged: FxHashMap<String, Vec<String>> = FxHashMap::default();
		for source in sources {
			for (key, prompts) in source {
				merged.insert(key, prompts);
			}
		}

		let mut pools = FxHashMap::default();
		for (key, prompts) in merged {
			match PromptPool::new(prompts) {
				Some(pool) => {
					pools.insert(key, pool);
				}
				None => tracing::debug!(context = %key, "placeholder.registry.empty_pool_dropped"),
			}
		}

		let default = match pools.remove(DEFAULT_CONTEXT) {
			Some(pool) => pool,
			None => {
				tracing::debug!("placeholder.registry.fallback_default");
				PromptPool::from_static(&FALLBACK_DEFAULT_PROMPTS)
			}
		};

		Self { pools, default }
	}

	/// Pool for `key`, or the default pool.
	pub fn lookup(&self, key: &str) -> &PromptPool {
		self.pools.get(key).unwrap_or(&self.default)
	}

	/// True when `key` has its own pool.
	pub fn contains(&self, key: &str) -> bool {
		key == DEFAULT_CONTEXT || self.pools.contains_key(key)
	}

	pub fn default_pool(&self) -> &PromptPool {
		&self.default
	}

	/// Context keys with a dedicated pool, excluding `default`, sorted.
	pub fn keys(&self) -> Vec<&str> {
		let mut keys: Vec<&str> = self.pools.keys().map(String::as_str).collect();
		keys.sort_unstable();
		keys
	}
}

impl Default for PromptRegistry {
	/// Registry with no configured mapping: only the built-in default pool.
	fn default() -> Self {
		Self {
			pools: FxHashMap::default(),
			default: PromptPool::from_static(&BUILTIN_DEFAULT_PROMPTS),
		}
	}
}
