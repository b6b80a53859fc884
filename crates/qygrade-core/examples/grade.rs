use qygrade_core::{parse_jsonl, GradeReport, Grader, Sample, TaskKind};

fn main() -> anyhow::Result<()> {
    // Example 1: Inline samples
    let samples = vec![
        Sample::new(
            TaskKind::Typos,
            "extraordinary",
            "The correct spelling is <solution>extraordinary</solution>.",
        )
        .with_id("0"),
        Sample::new(
            TaskKind::Connections,
            "Apple,Banana,Pear,Grape,Red,Blue,Green,Yellow",
            "<solution>Apple, Banana, Pear, Orange, Red, Blue, Green, Yellow</solution>",
        )
        .with_id("1"),
        Sample::new(
            TaskKind::Unscrambling,
            "The hero wakes up. He fights the dragon. He wins the gold.",
            "<PLOT_SUMMARY>The hero wakes up. He wins the gold. He fights the dragon.</PLOT_SUMMARY>",
        )
        .with_id("2"),
    ];

    let grader = Grader::new();
    let report = GradeReport::new(grader.grade_all(samples));
    println!("{}", report.summary_table());

    // Example 2: Load from JSONL file if provided
    if let Some(path) = std::env::args().nth(1) {
        let content = std::fs::read_to_string(&path)?;
        let report = GradeReport::new(grader.grade_all(parse_jsonl(&content)?));
        println!("{}", report.summary_table());
    }

    Ok(())
}
