use qygrade_types::GradeReport;
use anyhow::Result;

/// Helper to assert a graded batch reaches an average score.
///
/// # Example
/// ```ignore
/// let report = GradeReport::new(Grader::new().grade_all(samples));
/// assert_report_avg_score(&report, 0.8)?;
/// ```
pub fn assert_report_avg_score(report: &GradeReport, min_avg_score: f64) -> Result<()> {
    if report.summary.avg_score < min_avg_score {
        anyhow::bail!(
            "Grading failed: avg score {:.3} is below threshold {:.3}\n{}",
            report.summary.avg_score,
            min_avg_score,
            report.summary_table()
        );
    }
    Ok(())
}

/// Helper to assert every sample received full credit.
pub fn assert_report_all_passed(report: &GradeReport) -> Result<()> {
    if report.summary.passed != report.summary.total {
        anyhow::bail!(
            "Grading failed: {}/{} samples passed\n{}",
            report.summary.passed,
            report.summary.total,
            report.summary_table()
        );
    }
    Ok(())
}
