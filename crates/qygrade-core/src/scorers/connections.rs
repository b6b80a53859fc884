use std::collections::BTreeSet;

use qygrade_types::{Score, TaskKind};
use tracing::debug;

use crate::extract::Extractor;
use crate::scorer::Scorer;
use crate::segment::tokens;

pub const GROUP_SIZE: usize = 4;

type Group = BTreeSet<String>;

/// Fraction of reference groups of four that the answer reproduces.
///
/// Groups compare as lower-cased sets. Each reference group can be claimed
/// by at most one answer group, and a trailing partial group never counts.
pub struct ConnectionsScorer {
	extractor: Extractor,
}

impl ConnectionsScorer {
	pub fn new() -> Self {
		Self::with_extractor(Extractor::connections())
	}

	pub fn with_extractor(extractor: Extractor) -> Self {
		Self { extractor }
	}

	/// Answer tokens. Several solution blocks are concatenated and only the
	/// last `expected_len` tokens are kept.
	pub fn answer_tokens(&self, model_output: &str, expected_len: usize) -> Vec<String> {
		let captures = self.extractor.extract_all(model_output);
		let multiple = captures.len() > 1;
		let mut words: Vec<String> = captures
			.iter()
			.flat_map(|capture| tokens(&capture.replace('\n', "")))
			.collect();
		if multiple && words.len() > expected_len {
			words.drain(..words.len() - expected_len);
		}
		words
	}
}

impl Default for ConnectionsScorer {
	fn default() -> Self {
		Self::new()
	}
}

/// Consecutive groups of exactly [`GROUP_SIZE`] words, lower-cased.
pub fn group_words<S: AsRef<str>>(words: &[S]) -> Vec<Group> {
	words
		.chunks_exact(GROUP_SIZE)
		.map(|chunk| chunk.iter().map(|w| w.as_ref().to_lowercase()).collect())
		.collect()
}

/// Number of reference groups claimed by some answer group.
pub fn count_matched(reference: &[Group], answer: &[Group]) -> usize {
	let mut claimed = vec![false; reference.len()];
	for group in answer {
		let hit = reference
			.iter()
			.enumerate()
			.position(|(i, r)| !claimed[i] && r == group);
		if let Some(i) = hit {
			claimed[i] = true;
		}
	}
	claimed.into_iter().filter(|&c| c).count()
}

impl Scorer for ConnectionsScorer {
	fn name(&self) -> &'static str {
		"connections"
	}

	fn kind(&self) -> TaskKind {
		TaskKind::Connections
	}

	fn score(&self, label: &str, model_output: &str) -> Score {
		let reference_words = tokens(label);
		let answer_words = self.answer_tokens(model_output, reference_words.len());

		let reference = group_words(&reference_words);
		let answer = group_words(&answer_words);
		let matched = count_matched(&reference, &answer);

		let value = if reference.is_empty() {
			0.0
		} else {
			matched as f64 / reference.len() as f64
		};
		if value < 1.0 {
			debug!(?reference, ?answer, value, "connections: incorrect");
		}

		Score::new(
			self.name(),
			value,
			Some(serde_json::json!({
				"matched_groups": matched,
				"reference_groups": reference.len(),
				"answer_groups": answer,
			})),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const GT: &str = "Apple,Banana,Pear,Grape,Red,Blue,Green,Yellow";

	fn score(label: &str, output: &str) -> f64 {
		ConnectionsScorer::new().score(label, output).value
	}

	#[test]
	fn test_perfect_with_spaces() {
		assert_eq!(score(GT, "<solution>Apple, Banana, Pear, Grape, Red, Blue, Green, Yellow</solution>"), 1.0);
	}

	#[test]
	fn test_order_within_group_ignored() {
		assert_eq!(score(GT, "<solution>grape,pear,BANANA,apple,Yellow,Green,Blue,Red</solution>"), 1.0);
	}

	#[test]
	fn test_partial() {
		assert_eq!(score(GT, "<solution>Apple,Banana,Pear,Orange,Red,Blue,Green,Yellow</solution>"), 0.5);
	}

	#[test]
	fn test_interleaved_is_zero() {
		assert_eq!(score(GT, "<solution>Red,Apple,Blue,Banana,Green,Pear,Yellow,Grape</solution>"), 0.0);
	}

	#[test]
	fn test_boxed() {
		assert_eq!(score("cat,dog,bird,fish", "\\boxed{\\text{cat, dog, bird, fish}}"), 1.0);
	}

	#[test]
	fn test_mistyped_opening_tag() {
		assert_eq!(score("a,b,c,d", "</solution>a,b,c,d</solution>"), 1.0);
		assert_eq!(score(GT, "Answer: </solution>Apple,Banana,Pear,Grape,Red,Blue,Green,Yellow</solution>"), 1.0);
	}

	#[test]
	fn test_no_solution() {
		assert_eq!(score("a,b,c,d", "no solution here"), 0.0);
		assert_eq!(score("a,b,c,d", ""), 0.0);
	}

	#[test]
	fn test_bare_list_falls_back_to_raw() {
		assert_eq!(score("a,b,c,d", "a, b, c, d"), 1.0);
	}

	#[test]
	fn test_repeated_group_counts_once() {
		assert_eq!(score(GT, "<solution>Apple,Banana,Pear,Grape,Apple,Banana,Pear,Grape</solution>"), 0.5);
	}

	#[test]
	fn test_trailing_partial_group_ignored() {
		// the reference trims to one whole group
		assert_eq!(score("a,b,c,d,e,f", "<solution>a,b,c,d,e,f</solution>"), 1.0);
		assert_eq!(score(GT, "<solution>Apple,Banana,Pear,Grape,Red,Blue</solution>"), 0.5);
	}

	#[test]
	fn test_empty_reference() {
		assert_eq!(score("", "<solution>a,b,c,d</solution>"), 0.0);
		assert_eq!(score("a,b", "<solution>a,b</solution>"), 0.0);
	}

	#[test]
	fn test_multiple_solution_blocks_keep_tail() {
		let output = "<solution>x,y,z,w</solution> on reflection <solution>Apple,Banana,Pear,Grape</solution><solution>Red,Blue,Green,Yellow</solution>";
		let scorer = ConnectionsScorer::new();
		let words = scorer.answer_tokens(output, 8);
		assert_eq!(words.len(), 8);
		assert_eq!(words[0], "Apple");
		assert_eq!(scorer.score(GT, output).value, 1.0);
	}

	#[test]
	fn test_newlines_in_solution() {
		assert_eq!(score("a,b,c,d", "<solution>a,\nb,\nc,\nd</solution>"), 1.0);
	}
}
