use rustc_hash::FxHashMap;

/// A typed metadata value attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
	Flag(bool),
	Int(i64),
	Text(String),
}

impl From<bool> for MetaValue {
	fn from(value: bool) -> Self {
		Self::Flag(value)
	}
}

impl From<i64> for MetaValue {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<String> for MetaValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<&str> for MetaValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}

/// Extensible metadata channel carried by a transaction.
///
/// Plugins use it to tag synthetic transactions (for example an idle trigger)
/// that change neither the document nor the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
	entries: FxHashMap<&'static str, MetaValue>,
}

impl Meta {
	pub fn get(&self, key: &str) -> Option<&MetaValue> {
		self.entries.get(key)
	}

	/// Sets `key`, replacing any previous value.
	pub fn set(&mut self, key: &'static str, value: impl Into<MetaValue>) {
		self.entries.insert(key, value.into());
	}

	/// Returns true when `key` is set to `Flag(true)`.
	pub fn flag(&self, key: &str) -> bool {
		matches!(self.get(key), Some(MetaValue::Flag(true)))
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
