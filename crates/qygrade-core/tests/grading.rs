use qygrade_core::testing::{assert_report_all_passed, assert_report_avg_score};
use qygrade_core::{compute_score, parse_jsonl, ExtraInfo, GradeReport, Grader, GraderConfig};

const SAMPLES: &str = r#"
{"id": "t1", "data_source": "typos", "model_output": "The correct spelling is <solution>extraordinary</solution>.", "extra_info": {"label": "extraordinary"}}
{"id": "t2", "data_source": "typos", "model_output": "The correct spelling is <solution>extraordinry</solution>.", "extra_info": {"label": "extraordinary"}}
{"id": "c1", "data_source": "connections", "model_output": "<solution>Apple,Banana,Pear,Orange,Red,Blue,Green,Yellow</solution>", "extra_info": {"label": "Apple,Banana,Pear,Grape,Red,Blue,Green,Yellow"}}
{"id": "c2", "data_source": "connections", "model_output": "<solution>Red,Apple,Blue,Banana,Green,Pear,Yellow,Grape</solution>", "extra_info": {"label": "Apple,Banana,Pear,Grape,Red,Blue,Green,Yellow"}}
{"id": "u1", "data_source": "unscrambling", "model_output": "<PLOT_SUMMARY>The hero wakes up. He wins the gold. He fights the dragon.</PLOT_SUMMARY>", "extra_info": {"label": "The hero wakes up. He fights the dragon. He wins the gold."}}
"#;

fn value_of(report: &GradeReport, id: &str) -> f64 {
	report
		.results
		.iter()
		.find(|r| r.sample.id.as_deref() == Some(id))
		.map(|r| r.value())
		.unwrap()
}

#[test]
fn test_batch_matches_reference_scores() {
	let report = GradeReport::new(Grader::new().grade_all(parse_jsonl(SAMPLES).unwrap()));
	assert_eq!(report.summary.total, 5);
	assert_eq!(report.summary.passed, 1);
	assert_eq!(value_of(&report, "t1"), 1.0);
	assert_eq!(value_of(&report, "t2"), 0.0);
	assert_eq!(value_of(&report, "c1"), 0.5);
	assert_eq!(value_of(&report, "c2"), 0.0);
	assert!((value_of(&report, "u1") - 1.0 / 3.0).abs() < 1e-9);

	assert!(assert_report_all_passed(&report).is_err());
	assert!(assert_report_avg_score(&report, 0.3).is_ok());
	assert!(assert_report_avg_score(&report, 0.9).is_err());
}

#[test]
fn test_compute_score_matches_grader() {
	let grader = Grader::new();
	for sample in parse_jsonl(SAMPLES).unwrap() {
		let direct = compute_score(&sample.data_source, &sample.model_output, &sample.extra_info).unwrap();
		assert_eq!(direct, grader.grade(&sample).unwrap().value);
	}
}

#[test]
fn test_custom_markers_from_yaml() {
	let config = GraderConfig::from_yaml_str(
		r#"
unscrambling:
  markers:
    - type: wrapped_tag
      open: "<story>"
      close: "</story>"
"#,
	)
	.unwrap();
	let grader = Grader::from_config(&config);
	let sample = qygrade_core::Sample::new(qygrade_core::TaskKind::Unscrambling, "A. B.", "<story>A. B.</story>");
	let report = GradeReport::new(grader.grade_all(vec![sample]));
	assert_report_all_passed(&report).unwrap();
}

#[test]
fn test_default_grader_ignores_foreign_tags() {
	let info = ExtraInfo { label: "A. B.".to_string() };
	// without the custom marker the whole output is segmented: "<story>A", "B", "</story>"
	let v = compute_score("unscrambling", "<story>A. B.</story>", &info).unwrap();
	assert!(v < 1.0);
}
