//! Line-based outline syntax for seeding documents.
//!
//! Each line becomes one block:
//!
//! * `#` through `######` followed by a space: heading of that level
//! * `- text` or a lone `-`: list item; consecutive items share one list
//! * `> text`: paragraph inside a blockquote; consecutive lines share one quote
//! * blank line: empty paragraph
//! * anything else: paragraph
//!
//! Leading and trailing blank lines are ignored.

use crate::document::Document;
use crate::node::Node;

/// Parses an outline into a document.
pub fn parse_outline(src: &str) -> Document {
	let lines: Vec<&str> = src.lines().map(str::trim_end).collect();
	let first = lines.iter().position(|l| !l.trim().is_empty());
	let last = lines.iter().rposition(|l| !l.trim().is_empty());
	let lines = match (first, last) {
		(Some(first), Some(last)) => &lines[first..=last],
		_ => return Document::empty(),
	};

	let mut blocks = Vec::new();
	let mut items: Vec<Node> = Vec::new();
	let mut quoted: Vec<Node> = Vec::new();

	for line in lines {
		let line = line.trim_start();
		if let Some(item) = list_item(line) {
			flush(&mut quoted, &mut blocks, Node::blockquote);
			items.push(Node::list_item(vec![Node::paragraph(item)]));
			continue;
		}
		if let Some(text) = line.strip_prefix('>') {
			flush(&mut items, &mut blocks, Node::bullet_list);
			quoted.push(Node::paragraph(text.trim_start()));
			continue;
		}
		flush(&mut items, &mut blocks, Node::bullet_list);
		flush(&mut quoted, &mut blocks, Node::blockquote);

		blocks.push(match heading(line) {
			Some((level, text)) => Node::heading(level, text),
			None => Node::paragraph(line),
		});
	}
	flush(&mut items, &mut blocks, Node::bullet_list);
	flush(&mut quoted, &mut blocks, Node::blockquote);

	Document::new(blocks)
}

fn flush(pending: &mut Vec<Node>, blocks: &mut Vec<Node>, wrap: fn(Vec<Node>) -> Node) {
	if !pending.is_empty() {
		blocks.push(wrap(std::mem::take(pending)));
	}
}

fn list_item(line: &str) -> Option<&str> {
	if line == "-" {
		return Some("");
	}
	line.strip_prefix("- ").map(str::trim)
}

fn heading(line: &str) -> Option<(u8, &str)> {
	let level = line.bytes().take_while(|&b| b == b'#').count();
	if !(1..=6).contains(&level) {
		return None;
	}
	let rest = &line[level..];
	if rest.is_empty() {
		return Some((level as u8, ""));
	}
	rest.strip_prefix(' ').map(|text| (level as u8, text.trim()))
}
