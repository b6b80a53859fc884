//! qygrade-core: reference-based graders for model answers.
//! Extract the answer, segment it, match it against the reference, score it.
//! See `examples/grade.rs` for a quickstart.

pub mod config;
pub mod dispatch;
pub mod distance;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod samples;
pub mod scorer;
pub mod segment;
pub mod testing;

pub mod scorers {
	pub mod connections;
	pub mod typos;
	pub mod unscrambling;
}

pub use config::GraderConfig;
pub use dispatch::{compute_score, scorer_for, Grader};
pub use distance::edit_distance;
pub use error::{Error, Result};
pub use extract::{Extractor, Marker};
pub use samples::parse_jsonl;
pub use scorer::Scorer;
pub use scorers::{
	connections::ConnectionsScorer, typos::TypoScorer, unscrambling::UnscramblingScorer,
};
pub use qygrade_types::{ExtraInfo, GradeReport, GradeSummary, Sample, SampleResult, Score, TaskKind};
