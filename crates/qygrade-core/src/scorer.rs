use qygrade_types::{Score, TaskKind};

/// Grades one model output against its reference label.
///
/// Scoring is total: any pair of strings yields a value in `[0, 1]`.
pub trait Scorer: Send + Sync {
	fn name(&self) -> &'static str;
	fn kind(&self) -> TaskKind;
	fn score(&self, label: &str, model_output: &str) -> Score;
}
