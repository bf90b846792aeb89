/// Node type tag.
///
/// Headings and paragraphs are textblocks: their content is inline text only.
/// Every other non-text kind holds block children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
	/// Document root. Has no opening or closing token.
	Doc,
	/// Section heading, level 1 through 6.
	Heading { level: u8 },
	Paragraph,
	Blockquote,
	BulletList,
	ListItem,
	/// Inline text run. Occupies one position per character.
	Text,
}

impl NodeKind {
	/// Returns the schema name of this node type.
	pub const fn name(self) -> &'static str {
		match self {
			Self::Doc => "doc",
			Self::Heading { .. } => "heading",
			Self::Paragraph => "paragraph",
			Self::Blockquote => "blockquote",
			Self::BulletList => "bullet_list",
			Self::ListItem => "list_item",
			Self::Text => "text",
		}
	}

	/// Returns true for node types whose content is inline text.
	pub const fn is_textblock(self) -> bool {
		matches!(self, Self::Heading { .. } | Self::Paragraph)
	}

	/// Returns true for heading nodes of any level.
	pub const fn is_heading(self) -> bool {
		matches!(self, Self::Heading { .. })
	}
}

/// An immutable document tree node.
///
/// Sizes are computed once at construction. Textblocks are normalized so they
/// hold at most one non-empty text child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
	kind: NodeKind,
	text: String,
	children: Vec<Node>,
	content_size: usize,
}

impl Node {
	/// Creates a paragraph holding `text`.
	pub fn paragraph(text: impl Into<String>) -> Self {
		Self::textblock(NodeKind::Paragraph, text.into())
	}

	/// Creates a heading of the given level. Levels are clamped to `1..=6`.
	pub fn heading(level: u8, text: impl Into<String>) -> Self {
		Self::textblock(NodeKind::Heading { level: level.clamp(1, 6) }, text.into())
	}

	/// Creates a blockquote around block children.
	pub fn blockquote(children: Vec<Node>) -> Self {
		Self::branch(NodeKind::Blockquote, children)
	}

	/// Creates a bullet list from list items.
	pub fn bullet_list(items: Vec<Node>) -> Self {
		Self::branch(NodeKind::BulletList, items)
	}

	/// Creates a list item around block children.
	pub fn list_item(children: Vec<Node>) -> Self {
		Self::branch(NodeKind::ListItem, children)
	}

	/// Creates a textblock of `kind` holding `text`.
	pub(crate) fn textblock(kind: NodeKind, text: String) -> Self {
		debug_assert!(kind.is_textblock());
		let children = if text.is_empty() { Vec::new() } else { vec![Self::text(text)] };
		Self::branch(kind, children)
	}

	/// Creates a container node. Text children are not merged here; use
	/// [`Node::textblock`] for inline content.
	pub(crate) fn branch(kind: NodeKind, children: Vec<Node>) -> Self {
		let content_size = children.iter().map(Node::node_size).sum();
		Self {
			kind,
			text: String::new(),
			children,
			content_size,
		}
	}

	fn text(text: String) -> Self {
		let content_size = text.chars().count();
		Self {
			kind: NodeKind::Text,
			text,
			children: Vec::new(),
			content_size,
		}
	}

	pub fn kind(&self) -> NodeKind {
		self.kind
	}

	/// Schema name of this node's type.
	pub fn type_name(&self) -> &'static str {
		self.kind.name()
	}

	pub fn children(&self) -> &[Node] {
		&self.children
	}

	pub fn is_text(&self) -> bool {
		self.kind == NodeKind::Text
	}

	pub fn is_textblock(&self) -> bool {
		self.kind.is_textblock()
	}

	/// Number of positions between this node's opening and closing tokens.
	pub fn content_size(&self) -> usize {
		self.content_size
	}

	/// Number of positions this node occupies in its parent.
	pub fn node_size(&self) -> usize {
		match self.kind {
			NodeKind::Text => self.content_size,
			NodeKind::Doc => self.content_size,
			_ => self.content_size + 2,
		}
	}

	/// Inline text of a text node or textblock. Empty for other containers.
	pub fn inline_text(&self) -> &str {
		match self.kind {
			NodeKind::Text => &self.text,
			_ if self.kind.is_textblock() => self.children.first().map_or("", |t| t.text.as_str()),
			_ => "",
		}
	}

	/// Concatenated text of every descendant text node.
	pub fn text_content(&self) -> String {
		if self.is_text() {
			return self.text.clone();
		}
		let mut out = String::new();
		self.collect_text(&mut out);
		out
	}

	fn collect_text(&self, out: &mut String) {
		for child in &self.children {
			if child.is_text() {
				out.push_str(&child.text);
			} else {
				child.collect_text(out);
			}
		}
	}

	/// Returns a copy of this textblock with its inline text replaced.
	pub(crate) fn with_inline_text(&self, text: String) -> Self {
		Self::textblock(self.kind, text)
	}

	/// Returns a copy of this container with `range` of its children replaced.
	pub(crate) fn splice_children(&self, range: std::ops::Range<usize>, replacement: Vec<Node>) -> Self {
		let mut children = self.children.clone();
		children.splice(range, replacement);
		Self::branch(self.kind, children)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn textblock_sizes_include_tokens() {
		let p = Node::paragraph("abc");
		assert_eq!(p.content_size(), 3);
		assert_eq!(p.node_size(), 5);

		let empty = Node::paragraph("");
		assert_eq!(empty.content_size(), 0);
		assert_eq!(empty.node_size(), 2);
		assert!(empty.children().is_empty());
	}

	#[test]
	fn sizes_count_chars_not_bytes() {
		let h = Node::heading(2, "Café");
		assert_eq!(h.content_size(), 4);
		assert_eq!(h.inline_text(), "Café");
	}

	#[test]
	fn nested_containers_sum_children() {
		let list = Node::bullet_list(vec![Node::list_item(vec![Node::paragraph("x")])]);
		// list(2) + item(2) + paragraph(2) + "x"(1)
		assert_eq!(list.node_size(), 7);
		assert_eq!(list.text_content(), "x");
	}

	#[test]
	fn heading_level_is_clamped() {
		assert_eq!(Node::heading(0, "a").kind(), NodeKind::Heading { level: 1 });
		assert_eq!(Node::heading(9, "a").kind(), NodeKind::Heading { level: 6 });
	}
}
