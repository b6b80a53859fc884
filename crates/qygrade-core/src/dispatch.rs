use std::collections::HashMap;

use qygrade_types::{ExtraInfo, Sample, SampleResult, Score, TaskKind};

use crate::config::GraderConfig;
use crate::error::Result;
use crate::extract::Extractor;
use crate::scorer::Scorer;
use crate::scorers::{
	connections::ConnectionsScorer, typos::TypoScorer, unscrambling::UnscramblingScorer,
};

/// Default scorer for `kind`.
pub fn scorer_for(kind: TaskKind) -> Box<dyn Scorer> {
	match kind {
		TaskKind::Typos => Box::new(TypoScorer::new()),
		TaskKind::Connections => Box::new(ConnectionsScorer::new()),
		TaskKind::Unscrambling => Box::new(UnscramblingScorer::new()),
	}
}

/// Harness entry point: grade `model_output` with the scorer named by `data_source`.
///
/// Only an unknown `data_source` is an error; grading itself never fails.
pub fn compute_score(data_source: &str, model_output: &str, extra_info: &ExtraInfo) -> Result<f64> {
	let kind: TaskKind = data_source.parse()?;
	Ok(scorer_for(kind).score(&extra_info.label, model_output).value)
}

/// One configured scorer per task kind.
pub struct Grader {
	scorers: HashMap<TaskKind, Box<dyn Scorer>>,
}

impl Grader {
	pub fn new() -> Self {
		Self::from_config(&GraderConfig::default())
	}

	pub fn from_config(config: &GraderConfig) -> Self {
		let typos = TypoScorer::with_extractor(config.typos.extractor_or(Extractor::typos));
		let connections = ConnectionsScorer::with_extractor(config.connections.extractor_or(Extractor::connections));
		let unscrambling = UnscramblingScorer::with_extractor(config.unscrambling.extractor())
			.ignored_sentences(config.unscrambling.ignored_sentences.clone());

		let mut scorers: HashMap<TaskKind, Box<dyn Scorer>> = HashMap::new();
		scorers.insert(TaskKind::Typos, Box::new(typos));
		scorers.insert(TaskKind::Connections, Box::new(connections));
		scorers.insert(TaskKind::Unscrambling, Box::new(unscrambling));
		Self { scorers }
	}

	pub fn scorer(&self, kind: TaskKind) -> &dyn Scorer {
		// every kind is inserted by from_config
		self.scorers[&kind].as_ref()
	}

	pub fn score(&self, kind: TaskKind, label: &str, model_output: &str) -> Score {
		self.scorer(kind).score(label, model_output)
	}

	pub fn grade(&self, sample: &Sample) -> Result<Score> {
		let kind: TaskKind = sample.data_source.parse()?;
		Ok(self.score(kind, sample.label(), &sample.model_output))
	}

	/// Grades samples in order. Unknown data sources are recorded as errors
	/// instead of aborting the batch.
	pub fn grade_all<I>(&self, samples: I) -> Vec<SampleResult>
	where
		I: IntoIterator<Item = Sample>,
	{
		samples
			.into_iter()
			.map(|sample| match self.grade(&sample) {
				Ok(score) => SampleResult { sample, error: None, score: Some(score) },
				Err(err) => {
					tracing::warn!(id = ?sample.id, %err, "sample not graded");
					SampleResult { sample, error: Some(err.to_string()), score: None }
				}
			})
			.collect()
	}
}

impl Default for Grader {
	fn default() -> Self {
		Self::new()
	}
}
