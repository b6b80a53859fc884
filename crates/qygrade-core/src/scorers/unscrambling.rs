//! Plot unscrambling: how close is the order in which the model retold the
//! sentences to the reference order?
//!
//! Every reference sentence is paired with its nearest answer sentence by
//! char-level edit distance. The resulting list of answer indices is then
//! compared to `0..n` with the same edit distance, so paraphrasing costs
//! nothing here and only reordering, dropping or repeating sentences does.

use qygrade_types::{Score, TaskKind};
use tracing::debug;

use crate::config::default_ignored_sentences;
use crate::distance::{edit_distance, similarity};
use crate::extract::Extractor;
use crate::matcher::match_order;
use crate::scorer::Scorer;
use crate::segment::sentences;

pub struct UnscramblingScorer {
	extractor: Extractor,
	ignored_sentences: Vec<String>,
}

/// Intermediate values of one unscrambling grade.
#[derive(Debug, Clone, PartialEq)]
pub struct Ordering {
	pub reference: Vec<String>,
	pub answer: Vec<String>,
	pub matched: Vec<usize>,
	pub distance: usize,
}

impl Ordering {
	/// `1 - distance / n`, floored at zero. An empty reference scores `1.0`
	/// only when nothing was matched.
	pub fn score(&self) -> f64 {
		let n = self.reference.len();
		if n == 0 {
			return if self.matched.is_empty() { 1.0 } else { 0.0 };
		}
		(1.0 - self.distance as f64 / n as f64).max(0.0)
	}
}

impl UnscramblingScorer {
	pub fn new() -> Self {
		Self::with_extractor(Extractor::unscrambling())
	}

	pub fn with_extractor(extractor: Extractor) -> Self {
		Self {
			extractor,
			ignored_sentences: default_ignored_sentences(),
		}
	}

	pub fn ignored_sentences(mut self, ignored: Vec<String>) -> Self {
		self.ignored_sentences = ignored;
		self
	}

	/// Sentences of `text` minus the ignored ones. Applied to both sides so a
	/// label carrying the same marker still grades against itself.
	fn kept_sentences(&self, text: &str) -> Vec<String> {
		sentences(text)
			.into_iter()
			.filter(|s| !self.ignored_sentences.iter().any(|ignored| ignored == s))
			.collect()
	}

	pub fn order(&self, label: &str, model_output: &str) -> Ordering {
		let answer_text = self.extractor.extract(model_output);
		let reference = self.kept_sentences(label);
		let answer = self.kept_sentences(&answer_text);

		let matched = match_order(&reference, &answer);
		let canonical: Vec<usize> = (0..reference.len()).collect();
		let distance = edit_distance(&canonical, &matched);

		Ordering { reference, answer, matched, distance }
	}
}

impl Default for UnscramblingScorer {
	fn default() -> Self {
		Self::new()
	}
}

impl Scorer for UnscramblingScorer {
	fn name(&self) -> &'static str {
		"unscrambling"
	}

	fn kind(&self) -> TaskKind {
		TaskKind::Unscrambling
	}

	fn score(&self, label: &str, model_output: &str) -> Score {
		let ordering = self.order(label, model_output);
		let value = ordering.score();
		let match_similarity: Vec<f64> = ordering
			.matched
			.iter()
			.zip(&ordering.reference)
			.map(|(&j, reference)| similarity(reference, &ordering.answer[j]))
			.collect();
		if value < 1.0 {
			debug!(
				reference = ?ordering.reference,
				answer = ?ordering.answer,
				matched = ?ordering.matched,
				value,
				"unscrambling: incorrect"
			);
		}

		Score::new(
			self.name(),
			value,
			Some(serde_json::json!({
				"reference_sentences": ordering.reference.len(),
				"answer_sentences": ordering.answer.len(),
				"matched_order": ordering.matched,
				"distance": ordering.distance,
				"match_similarity": match_similarity,
			})),
		)
	}
}
