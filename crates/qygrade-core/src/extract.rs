use serde::{Deserialize, Serialize};
use tracing::trace;

pub const SOLUTION_OPEN: &str = "<solution>";
pub const SOLUTION_CLOSE: &str = "</solution>";
pub const PLOT_SUMMARY_OPEN: &str = "<PLOT_SUMMARY>";
pub const PLOT_SUMMARY_CLOSE: &str = "</PLOT_SUMMARY>";
pub const TYPO_DELIMITER: &str = "---";
pub const BOXED_PREFIX: &str = "\\boxed";

/// One way of locating an answer inside raw model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum Marker {
	/// Text between `open` and the next `close`. Every pair is a capture.
	WrappedTag { open: String, close: String },
	/// Everything after the first `open`, for answers cut off before the closing tag.
	OpenTag { open: String },
	/// Text between the first and second occurrence of `token`.
	DelimiterPair { token: String },
	/// Brace-balanced payload of the last `prefix{...}`, with LaTeX text wrappers removed.
	BoxedNotation { prefix: String },
}

impl Marker {
	pub fn wrapped_tag(open: impl Into<String>, close: impl Into<String>) -> Self {
		Marker::WrappedTag { open: open.into(), close: close.into() }
	}

	pub fn open_tag(open: impl Into<String>) -> Self {
		Marker::OpenTag { open: open.into() }
	}

	pub fn delimiter_pair(token: impl Into<String>) -> Self {
		Marker::DelimiterPair { token: token.into() }
	}

	pub fn boxed_notation(prefix: impl Into<String>) -> Self {
		Marker::BoxedNotation { prefix: prefix.into() }
	}

	/// All untrimmed captures of this marker, in document order.
	pub fn captures(&self, text: &str) -> Vec<String> {
		match self {
			Marker::WrappedTag { open, close } => wrapped(text, open, close),
			Marker::OpenTag { open } => after_open(text, open).into_iter().collect(),
			Marker::DelimiterPair { token } => between_delimiters(text, token).into_iter().collect(),
			Marker::BoxedNotation { prefix } => boxed(text, prefix).into_iter().collect(),
		}
	}
}

fn wrapped(text: &str, open: &str, close: &str) -> Vec<String> {
	if open.is_empty() || close.is_empty() {
		return Vec::new();
	}
	let mut found = Vec::new();
	let mut rest = text;
	while let Some(start) = rest.find(open) {
		let inner = &rest[start + open.len()..];
		let Some(end) = inner.find(close) else { break };
		found.push(inner[..end].to_string());
		rest = &inner[end + close.len()..];
	}
	found
}

fn after_open(text: &str, open: &str) -> Option<String> {
	if open.is_empty() {
		return None;
	}
	text.find(open).map(|start| text[start + open.len()..].to_string())
}

fn between_delimiters(text: &str, token: &str) -> Option<String> {
	if token.is_empty() {
		return None;
	}
	let start = text.find(token)? + token.len();
	let end = text[start..].find(token)?;
	Some(text[start..start + end].to_string())
}

fn boxed(text: &str, prefix: &str) -> Option<String> {
	if prefix.is_empty() {
		return None;
	}
	let body = &text[text.rfind(prefix)? + prefix.len()..];
	if !body.starts_with('{') {
		return None;
	}

	let mut depth = 0usize;
	let mut close = None;
	for (i, c) in body.char_indices() {
		match c {
			'{' => depth += 1,
			'}' => {
				depth -= 1;
				if depth == 0 {
					close = Some(i);
					break;
				}
			}
			_ => {}
		}
	}
	let payload = &body[1..close?];
	Some(payload.replace("\\text{", "").replace('}', "").replace('\\', ""))
}

/// Ordered marker strategies; the first one producing a non-blank capture wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extractor {
	markers: Vec<Marker>,
}

impl Extractor {
	pub fn new(markers: Vec<Marker>) -> Self {
		Self { markers }
	}

	/// `<solution>` block, else the text between two `---` markers.
	pub fn typos() -> Self {
		Self::new(vec![
			Marker::wrapped_tag(SOLUTION_OPEN, SOLUTION_CLOSE),
			Marker::delimiter_pair(TYPO_DELIMITER),
		])
	}

	/// `<solution>` block, else a block opened by a mistyped `</solution>`,
	/// else a `\boxed{...}` payload.
	pub fn connections() -> Self {
		Self::new(vec![
			Marker::wrapped_tag(SOLUTION_OPEN, SOLUTION_CLOSE),
			Marker::wrapped_tag(SOLUTION_CLOSE, SOLUTION_CLOSE),
			Marker::boxed_notation(BOXED_PREFIX),
		])
	}

	/// `<PLOT_SUMMARY>` block, else everything after an unclosed `<PLOT_SUMMARY>`.
	pub fn unscrambling() -> Self {
		Self::new(vec![
			Marker::wrapped_tag(PLOT_SUMMARY_OPEN, PLOT_SUMMARY_CLOSE),
			Marker::open_tag(PLOT_SUMMARY_OPEN),
		])
	}

	pub fn markers(&self) -> &[Marker] {
		&self.markers
	}

	/// Non-blank, trimmed captures of the first marker that has any.
	pub fn find_all(&self, raw: &str) -> Option<Vec<String>> {
		self.markers.iter().find_map(|marker| {
			let captures: Vec<String> = marker
				.captures(raw)
				.iter()
				.map(|c| c.trim())
				.filter(|c| !c.is_empty())
				.map(str::to_string)
				.collect();
			if captures.is_empty() {
				None
			} else {
				trace!(?marker, count = captures.len(), "answer marker matched");
				Some(captures)
			}
		})
	}

	/// Last capture of the first matching marker.
	pub fn find(&self, raw: &str) -> Option<String> {
		self.find_all(raw).and_then(|mut captures| captures.pop())
	}

	/// Like [`Extractor::find`], falling back to the whole trimmed text.
	pub fn extract(&self, raw: &str) -> String {
		self.find(raw).unwrap_or_else(|| raw.trim().to_string())
	}

	/// Like [`Extractor::find_all`], falling back to the whole trimmed text.
	pub fn extract_all(&self, raw: &str) -> Vec<String> {
		self.find_all(raw).unwrap_or_else(|| vec![raw.trim().to_string()])
	}
}
