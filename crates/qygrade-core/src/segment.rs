/// Split `text` on `sep`, trim every piece and drop the empty ones.
pub fn segment(text: &str, sep: char) -> Vec<String> {
	text.split(sep)
		.map(str::trim)
		.filter(|piece| !piece.is_empty())
		.map(str::to_string)
		.collect()
}

/// `.`-terminated sentences.
pub fn sentences(text: &str) -> Vec<String> {
	segment(text, '.')
}

/// Comma-separated tokens.
pub fn tokens(text: &str) -> Vec<String> {
	segment(text, ',')
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_sentences() {
		assert_eq!(
			sentences("The hero wakes up. He fights the dragon.  He wins the gold."),
			vec!["The hero wakes up", "He fights the dragon", "He wins the gold"]
		);
	}

	#[test]
	fn test_drops_blank_pieces() {
		assert_eq!(tokens(" a, ,b,,\n c ,"), vec!["a", "b", "c"]);
		assert!(sentences("...").is_empty());
		assert!(sentences("   ").is_empty());
		assert!(tokens("").is_empty());
	}
}
