//! Levenshtein distance over arbitrary sequences.
//!
//! The same routine serves two purposes: comparing sentences char by char
//! while matching, and comparing the matched sentence order against the
//! canonical `0..n` order.

/// Minimum number of unit-cost insertions, deletions and substitutions
/// turning `a` into `b`. Works on any borrowed sequence (`Vec`, array).
pub fn edit_distance<'a, 'b, S1, S2, T>(a: &'a S1, b: &'b S2) -> usize
where
	&'a S1: IntoIterator<Item = &'a T>,
	&'b S2: IntoIterator<Item = &'b T>,
	T: PartialEq + 'a + 'b,
{
	strsim::generic_levenshtein(a, b)
}

/// Edit distance between two strings counted in chars, not bytes.
pub fn char_distance(a: &str, b: &str) -> usize {
	strsim::levenshtein(a, b)
}

/// Normalised similarity in `[0, 1]`; `1.0` for identical strings.
pub fn similarity(a: &str, b: &str) -> f64 {
	strsim::normalized_levenshtein(a, b)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_index_sequences() {
		assert_eq!(edit_distance(&[0, 1, 2], &[0, 1, 2]), 0);
		assert_eq!(edit_distance(&[0, 1, 2], &[0, 2, 1]), 2);
		assert_eq!(edit_distance(&Vec::<usize>::new(), &vec![0, 1]), 2);
		assert_eq!(edit_distance(&vec![0usize, 1, 2], &Vec::new()), 3);
		assert_eq!(edit_distance(&Vec::<usize>::new(), &Vec::<usize>::new()), 0);
	}

	#[test]
	fn test_duplicates_and_gaps() {
		// [0, 1, 2] -> [0, 0, 2]: one substitution
		assert_eq!(edit_distance(&[0, 1, 2], &[0, 0, 2]), 1);
		// [0, 1, 2, 3] -> [0, 3]: two deletions
		assert_eq!(edit_distance(&[0, 1, 2, 3], &[0, 3]), 2);
	}

	#[test]
	fn test_char_distance() {
		assert_eq!(char_distance("kitten", "sitting"), 3);
		assert_eq!(char_distance("", "abc"), 3);
		assert_eq!(char_distance("extraordinary", "extraordinry"), 1);
		// multi-byte chars count once
		assert_eq!(char_distance("café", "cafe"), 1);
	}

	#[test]
	fn test_similarity() {
		assert_eq!(similarity("same", "same"), 1.0);
		assert_eq!(similarity("", ""), 1.0);
		assert_eq!(similarity("abc", "xyz"), 0.0);
		assert!((similarity("kitten", "sitting") - (1.0 - 3.0 / 7.0)).abs() < 1e-9);
	}

	#[test]
	fn test_long_unsegmented_output() {
		let sentence = "x".repeat(300);
		let output = "y".repeat(100_000);
		assert_eq!(char_distance(&sentence, &output), 100_000);
	}
}
