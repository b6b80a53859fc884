use crate::distance::char_distance;

/// Closest candidate unit for one reference unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
	pub reference: usize,
	pub candidate: usize,
	pub distance: usize,
}

/// Nearest-neighbour match of every reference unit against the candidates.
///
/// Each reference unit is matched independently, so one candidate may be
/// picked several times. Ties go to the lowest candidate index. An empty
/// candidate list yields no matches at all.
pub fn best_matches<S: AsRef<str>>(reference: &[S], candidate: &[S]) -> Vec<Match> {
	if candidate.is_empty() {
		return Vec::new();
	}
	reference
		.iter()
		.enumerate()
		.filter_map(|(i, r)| {
			candidate
				.iter()
				.enumerate()
				.map(|(j, c)| (j, char_distance(r.as_ref(), c.as_ref())))
				// min_by_key keeps the first of equal minima
				.min_by_key(|&(_, d)| d)
				.map(|(j, distance)| Match { reference: i, candidate: j, distance })
		})
		.collect()
}

/// Candidate indices in reference order: the "matched order".
pub fn match_order<S: AsRef<str>>(reference: &[S], candidate: &[S]) -> Vec<usize> {
	best_matches(reference, candidate).into_iter().map(|m| m.candidate).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_identity() {
		let units = ["A", "B", "C"];
		assert_eq!(match_order(&units, &units), vec![0, 1, 2]);
	}

	#[test]
	fn test_swapped() {
		let reference = ["The hero wakes up", "He fights the dragon", "He wins the gold"];
		let candidate = ["The hero wakes up", "He wins the gold", "He fights the dragon"];
		assert_eq!(match_order(&reference, &candidate), vec![0, 2, 1]);
	}

	#[test]
	fn test_duplicates_allowed() {
		let reference = ["He fights the dragon", "He fights the dragons"];
		let candidate = ["He fights the dragon", "Something else entirely"];
		assert_eq!(match_order(&reference, &candidate), vec![0, 0]);
	}

	#[test]
	fn test_ties_take_first() {
		let reference = ["ab"];
		let candidate = ["ax", "ay", "ab2"];
		let matches = best_matches(&reference, &candidate);
		assert_eq!(matches, vec![Match { reference: 0, candidate: 0, distance: 1 }]);
	}

	#[test]
	fn test_empty_candidate() {
		let reference = ["A", "B"];
		let candidate: [&str; 0] = [];
		assert!(match_order(&reference, &candidate).is_empty());
	}
}
