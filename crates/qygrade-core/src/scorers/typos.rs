use qygrade_types::{Score, TaskKind};
use tracing::debug;

use crate::extract::{Extractor, SOLUTION_CLOSE, SOLUTION_OPEN};
use crate::scorer::Scorer;

/// Passes when the corrected word appears verbatim in the extracted answer.
///
/// Containment is case-sensitive; no case folding is applied.
pub struct TypoScorer {
	extractor: Extractor,
}

impl TypoScorer {
	pub fn new() -> Self {
		Self::with_extractor(Extractor::typos())
	}

	pub fn with_extractor(extractor: Extractor) -> Self {
		Self { extractor }
	}

	/// Extracted answer with stray solution tags removed and lines joined by a space.
	pub fn parse_answer(&self, model_output: &str) -> String {
		let answer = self
			.extractor
			.extract(model_output)
			.replace(SOLUTION_OPEN, "")
			.replace(SOLUTION_CLOSE, "");
		answer
			.trim()
			.lines()
			.filter(|line| !line.is_empty())
			.collect::<Vec<_>>()
			.join(" ")
	}
}

impl Default for TypoScorer {
	fn default() -> Self {
		Self::new()
	}
}

impl Scorer for TypoScorer {
	fn name(&self) -> &'static str {
		"typos"
	}

	fn kind(&self) -> TaskKind {
		TaskKind::Typos
	}

	fn score(&self, label: &str, model_output: &str) -> Score {
		let answer = self.parse_answer(model_output);
		let found = answer.contains(label);
		if !found {
			debug!(expected = label, parsed = %answer, "typos: incorrect");
		}

		Score::new(
			self.name(),
			if found { 1.0 } else { 0.0 },
			Some(serde_json::json!({
				"answer": answer,
				"found": found
			})),
		)
	}
}
