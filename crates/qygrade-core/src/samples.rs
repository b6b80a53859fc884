use qygrade_types::Sample;

use crate::error::{Error, Result};

/// Parse JSONL where each line is
/// `{"id"?: "...", "data_source": "...", "model_output": "...", "extra_info": {"label": "..."}}`.
///
/// Blank lines are skipped.
pub fn parse_jsonl(content: &str) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let sample: Sample = serde_json::from_str(line).map_err(|e| Error::MalformedSample {
            line: idx + 1,
            message: e.to_string(),
        })?;
        samples.push(sample);
    }
    Ok(samples)
}
