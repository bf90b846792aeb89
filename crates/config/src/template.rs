//! Section templates: prompt pools keyed by heading, plus an initial outline.

use indexmap::IndexMap;
use quill_primitives::{Document, Node, parse_outline};
use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Heading text to ordered prompt list.
pub type PromptMap = IndexMap<String, Vec<String>>;

/// A document section template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Template {
	/// Stable identifier, unique within a [`TemplateSet`].
	pub id: String,
	/// Display title.
	pub title: String,
	#[serde(default)]
	pub description: String,
	/// Prompt pools keyed by the heading text they apply under.
	#[serde(default)]
	pub prompts: PromptMap,
	/// Initial content in outline syntax.
	#[serde(default)]
	pub outline: Option<String>,
}

impl Template {
	/// Builds the template's initial document.
	///
	/// Templates without an outline produce a titled section with one empty
	/// paragraph.
	pub fn document(&self) -> Document {
		match &self.outline {
			Some(outline) => parse_outline(outline),
			None => Document::new(vec![Node::heading(2, self.title.as_str()), Node::paragraph("")]),
		}
	}
}

/// An ordered collection of templates with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSet {
	templates: Vec<Template>,
}

impl TemplateSet {
	/// Creates a set, rejecting duplicate ids.
	pub fn new(templates: Vec<Template>) -> Result<Self> {
		for (i, template) in templates.iter().enumerate() {
			if templates[..i].iter().any(|t| t.id == template.id) {
				return Err(ConfigError::DuplicateTemplate(template.id.clone()));
			}
		}
		Ok(Self { templates })
	}

	/// Looks up a template by id.
	pub fn get(&self, id: &str) -> Option<&Template> {
		self.templates.iter().find(|t| t.id == id)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Template> {
		self.templates.iter()
	}

	pub fn len(&self) -> usize {
		self.templates.len()
	}

	pub fn is_empty(&self) -> bool {
		self.templates.is_empty()
	}

	/// Layers `other` over this set. Templates with a matching id are
	/// replaced in place; new ids are appended.
	pub fn overlay(&mut self, other: TemplateSet) {
		for template in other.templates {
			match self.templates.iter_mut().find(|t| t.id == template.id) {
				Some(slot) => *slot = template,
				None => self.templates.push(template),
			}
		}
	}

	/// Merges every template's prompts in order.
	///
	/// A heading defined by several templates takes the pools of the last one.
	pub fn merged_prompts(&self) -> PromptMap {
		let mut merged = PromptMap::new();
		for template in &self.templates {
			for (heading, prompts) in &template.prompts {
				merged.insert(heading.clone(), prompts.clone());
			}
		}
		merged
	}
}
