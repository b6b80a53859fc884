use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::{Table, Tabled};

/// The three task families a reference label can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
	Typos,
	Connections,
	Unscrambling,
}

impl TaskKind {
	pub const ALL: [TaskKind; 3] = [TaskKind::Typos, TaskKind::Connections, TaskKind::Unscrambling];

	pub fn as_str(&self) -> &'static str {
		match self {
			TaskKind::Typos => "typos",
			TaskKind::Connections => "connections",
			TaskKind::Unscrambling => "unscrambling",
		}
	}
}

impl fmt::Display for TaskKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when a `data_source` string names no known task.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown data_source: {name}. Available: typos, connections, unscrambling")]
pub struct UnknownTaskKind {
	pub name: String,
}

impl FromStr for TaskKind {
	type Err = UnknownTaskKind;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		TaskKind::ALL
			.into_iter()
			.find(|kind| kind.as_str() == s)
			.ok_or_else(|| UnknownTaskKind { name: s.to_string() })
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtraInfo {
	pub label: String,
}

/// One harness record: which grader to use, the reference and the raw model text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	pub data_source: String,
	pub model_output: String,
	pub extra_info: ExtraInfo,
}

impl Sample {
	pub fn new(kind: TaskKind, label: impl Into<String>, model_output: impl Into<String>) -> Self {
		Self {
			id: None,
			data_source: kind.to_string(),
			model_output: model_output.into(),
			extra_info: ExtraInfo { label: label.into() },
		}
	}

	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn label(&self) -> &str {
		&self.extra_info.label
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
	pub name: String,
	pub value: f64,
	pub passed: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Value>,
}

impl Score {
	/// A score counts as passed only at full credit.
	pub fn new(name: impl Into<String>, value: f64, details: Option<Value>) -> Self {
		Self { name: name.into(), value, passed: value >= 1.0, details }
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleResult {
	pub sample: Sample,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub score: Option<Score>,
}

impl SampleResult {
	pub fn value(&self) -> f64 {
		self.score.as_ref().map(|s| s.value).unwrap_or(0.0)
	}

	pub fn passed(&self) -> bool {
		self.score.as_ref().is_some_and(|s| s.passed)
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindSummary {
	pub kind: String,
	pub total: usize,
	pub avg_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeSummary {
	pub total: usize,
	pub passed: usize,
	pub errors: usize,
	pub pass_rate: f64,
	pub avg_score: f64,
	pub per_kind: Vec<KindSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
	pub results: Vec<SampleResult>,
	pub summary: GradeSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, Tabled)]
struct SummaryRow {
	id: String,
	data_source: String,
	passed: String,
	score: String,
	label: String,
	answer: String,
}

impl GradeReport {
	pub fn new(results: Vec<SampleResult>) -> Self {
		let summary = Self::summarize(&results);
		Self { results, summary }
	}

	pub fn summarize(results: &[SampleResult]) -> GradeSummary {
		let total = results.len();
		let passed = results.iter().filter(|r| r.passed()).count();
		let errors = results.iter().filter(|r| r.error.is_some()).count();
		let score_sum: f64 = results.iter().map(SampleResult::value).sum();

		// Unknown data sources are grouped under their raw name so they still show up.
		let mut kinds: Vec<String> = results.iter().map(|r| r.sample.data_source.clone()).collect();
		kinds.sort();
		kinds.dedup();
		let per_kind = kinds
			.into_iter()
			.map(|kind| {
				let values: Vec<f64> = results
					.iter()
					.filter(|r| r.sample.data_source == kind)
					.map(SampleResult::value)
					.collect();
				KindSummary {
					total: values.len(),
					avg_score: values.iter().sum::<f64>() / values.len() as f64,
					kind,
				}
			})
			.collect();

		let pass_rate = if total == 0 { 0.0 } else { passed as f64 / total as f64 };
		let avg_score = if total == 0 { 0.0 } else { score_sum / total as f64 };

		GradeSummary { total, passed, errors, pass_rate, avg_score, per_kind }
	}

	pub fn summary_table(&self) -> String {
		let rows: Vec<SummaryRow> = self
			.results
			.iter()
			.map(|r| SummaryRow {
				id: r.sample.id.clone().unwrap_or_else(|| "-".to_string()),
				data_source: r.sample.data_source.clone(),
				passed: if r.passed() { "✓" } else { " " }.to_string(),
				score: match (&r.score, &r.error) {
					(Some(s), _) => format!("{:.3}", s.value),
					(None, Some(_)) => "error".to_string(),
					(None, None) => "-".to_string(),
				},
				label: truncate(single_line(r.sample.label()), 48),
				answer: truncate(single_line(&r.sample.model_output), 48),
			})
			.collect();

		let table_str = Table::new(rows).to_string();

		let mut summary_text = format!(
			"Total: {}  Passed: {}  Errors: {}  Pass rate: {:.1}%  Avg score: {:.3}",
			self.summary.total,
			self.summary.passed,
			self.summary.errors,
			self.summary.pass_rate * 100.0,
			self.summary.avg_score
		);
		for k in &self.summary.per_kind {
			summary_text.push_str(&format!("\n  {}: {} samples, avg {:.3}", k.kind, k.total, k.avg_score));
		}

		format!("{}\n\n{}\n", table_str, summary_text)
	}
}

fn single_line(s: &str) -> String {
	s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(s: String, max_len: usize) -> String {
	if s.chars().count() <= max_len {
		return s;
	}
	let mut truncated = s.chars().take(max_len.saturating_sub(1)).collect::<String>();
	truncated.push('…');
	truncated
}
