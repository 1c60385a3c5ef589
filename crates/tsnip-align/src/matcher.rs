//! Best-overlap window search over tokenized transcript segments.

use std::collections::{HashMap, HashSet};

/// Candidate eligibility policy for the matcher.
///
/// A candidate segment is only scanned for windows if enough of the target's
/// distinct tokens appear anywhere in it. The two policies are not
/// equivalent: `Subset` rejects candidates `Majority` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EligibilityGate {
    /// Strictly more than half of the target's distinct tokens must appear
    /// in the candidate. The default, and the more permissive policy.
    #[default]
    Majority,
    /// Every distinct target token must appear in the candidate.
    Subset,
}

impl EligibilityGate {
    fn admits(&self, target_distinct: &HashSet<&str>, candidate_counts: &HashMap<&str, usize>) -> bool {
        let present = target_distinct
            .iter()
            .filter(|token| candidate_counts.contains_key(*token))
            .count();
        match self {
            EligibilityGate::Majority => present as f64 / target_distinct.len() as f64 > 0.5,
            EligibilityGate::Subset => present == target_distinct.len(),
        }
    }
}

/// Location of the best-overlapping window for a section.
///
/// Token indices are positions within the matched segment's token sequence
/// and, by the transcript invariant, equally valid indices into its timed
/// words. `end_token` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionMatch {
    /// Index of the matched segment in the candidate list
    pub segment_index: usize,
    /// First token of the window (inclusive)
    pub start_token: usize,
    /// Last token of the window (inclusive)
    pub end_token: usize,
    /// Overlap score of the window
    pub score: u32,
}

/// Finds the best-overlapping contiguous window for a target phrase.
#[derive(Debug, Clone, Default)]
pub struct SectionMatcher {
    gate: EligibilityGate,
}

impl SectionMatcher {
    /// Create a matcher with the default (majority) eligibility gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher with an explicit eligibility gate.
    pub fn with_gate(gate: EligibilityGate) -> Self {
        Self { gate }
    }

    /// Find the single best window for `target` across `candidates`.
    ///
    /// Candidates are scanned in order and windows left-to-right, tracking
    /// the strictly highest score seen so far, so the first-seen window wins
    /// ties. Returns `None` when no window scores above zero; callers skip
    /// the section in that case, it is not an error.
    ///
    /// A target longer than every eligible candidate has no window and
    /// yields `None`.
    pub fn find_best_window(&self, target: &[&str], candidates: &[Vec<&str>]) -> Option<SectionMatch> {
        if target.is_empty() {
            return None;
        }

        let target_distinct: HashSet<&str> = target.iter().copied().collect();
        let target_counts = token_counts(target);

        let mut best: Option<SectionMatch> = None;
        let mut max_score = 0u32;

        for (segment_index, candidate) in candidates.iter().enumerate() {
            let candidate_counts = token_counts(candidate);
            if !self.gate.admits(&target_distinct, &candidate_counts) {
                continue;
            }
            if candidate.len() < target.len() {
                continue;
            }

            for (start_token, window) in candidate.windows(target.len()).enumerate() {
                let score = overlap_score(window, &target_counts);
                if score > max_score {
                    max_score = score;
                    best = Some(SectionMatch {
                        segment_index,
                        start_token,
                        end_token: start_token + target.len() - 1,
                        score,
                    });
                }
            }
        }

        best
    }
}

fn token_counts<'a>(tokens: &[&'a str]) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(*token).or_insert(0) += 1;
    }
    counts
}

/// Overlap score of one window against the target.
///
/// `matched_elements` is the distinct-token intersection cardinality;
/// `matched_counts` is the multiset intersection size (sum of per-token
/// minimum counts), so duplicate tokens are weighted correctly.
fn overlap_score(window: &[&str], target_counts: &HashMap<&str, usize>) -> u32 {
    let window_counts = token_counts(window);

    let mut matched_elements = 0u32;
    let mut matched_counts = 0u32;
    for (token, window_count) in &window_counts {
        if let Some(target_count) = target_counts.get(token) {
            matched_elements += 1;
            matched_counts += (*window_count).min(*target_count) as u32;
        }
    }

    matched_elements + matched_counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    #[test]
    fn test_verbatim_subsequence_scores_twice_target_length() {
        let target = tokens("quick brown fox");
        let candidates = vec![tokens("the quick brown fox jumps over")];

        let matcher = SectionMatcher::new();
        let best = matcher.find_best_window(&target, &candidates).unwrap();

        assert_eq!(best.segment_index, 0);
        assert_eq!(best.start_token, 1);
        assert_eq!(best.end_token, 3);
        assert_eq!(best.score, 2 * target.len() as u32);
    }

    #[test]
    fn test_tie_break_prefers_earliest_segment_and_window() {
        // Both segments contain the identical phrase, and segment 0 contains
        // it twice; the first-seen window must win.
        let target = tokens("a b");
        let candidates = vec![tokens("a b x a b"), tokens("a b")];

        let best = SectionMatcher::new()
            .find_best_window(&target, &candidates)
            .unwrap();

        assert_eq!(best.segment_index, 0);
        assert_eq!(best.start_token, 0);
        assert_eq!(best.end_token, 1);
    }

    #[test]
    fn test_multiset_scoring() {
        // target [a,a,b] vs window [a,b,b]:
        // matched_elements = 2, matched_counts = min(1,2) + min(2,1) = 2,
        // overlap_score = 4.
        let target = tokens("a a b");
        let candidates = vec![tokens("a b b")];

        let best = SectionMatcher::new()
            .find_best_window(&target, &candidates)
            .unwrap();

        assert_eq!(best.score, 4);
    }

    #[test]
    fn test_no_shared_vocabulary_returns_none() {
        let target = tokens("x y z");
        let candidates = vec![tokens("a b c d"), tokens("e f g")];

        assert!(SectionMatcher::new()
            .find_best_window(&target, &candidates)
            .is_none());
    }

    #[test]
    fn test_target_longer_than_every_candidate_returns_none() {
        let target = tokens("a b c d e");
        let candidates = vec![tokens("a b c"), tokens("a b c d")];

        assert!(SectionMatcher::new()
            .find_best_window(&target, &candidates)
            .is_none());
    }

    #[test]
    fn test_selects_later_segment_when_only_it_qualifies() {
        let target = tokens("hello world");
        let candidates = vec![tokens("something else entirely"), tokens("well hello world friends")];

        let best = SectionMatcher::new()
            .find_best_window(&target, &candidates)
            .unwrap();

        assert_eq!(best.segment_index, 1);
        assert_eq!(best.start_token, 1);
        assert_eq!(best.end_token, 2);
    }

    #[test]
    fn test_majority_gate_requires_strict_majority() {
        // Exactly half of the distinct target tokens present: not admitted.
        let target = tokens("a b");
        let candidates = vec![tokens("a x y z")];

        assert!(SectionMatcher::new()
            .find_best_window(&target, &candidates)
            .is_none());

        // Two of three distinct tokens present: admitted.
        let target = tokens("a b c");
        let candidates = vec![tokens("a b x y")];
        let best = SectionMatcher::new()
            .find_best_window(&target, &candidates)
            .unwrap();
        assert_eq!(best.segment_index, 0);
    }

    #[test]
    fn test_subset_gate_rejects_partial_candidates() {
        // Majority admits a candidate with two of three distinct tokens;
        // Subset does not.
        let target = tokens("a b c");
        let candidates = vec![tokens("a b x y")];

        assert!(SectionMatcher::new()
            .find_best_window(&target, &candidates)
            .is_some());
        assert!(SectionMatcher::with_gate(EligibilityGate::Subset)
            .find_best_window(&target, &candidates)
            .is_none());
    }

    #[test]
    fn test_subset_gate_accepts_full_candidates() {
        let target = tokens("a b");
        let candidates = vec![tokens("x a b y")];

        let best = SectionMatcher::with_gate(EligibilityGate::Subset)
            .find_best_window(&target, &candidates)
            .unwrap();
        assert_eq!(best.start_token, 1);
        assert_eq!(best.end_token, 2);
    }

    #[test]
    fn test_empty_target_returns_none() {
        let target: Vec<&str> = Vec::new();
        let candidates = vec![tokens("a b c")];

        assert!(SectionMatcher::new()
            .find_best_window(&target, &candidates)
            .is_none());
    }

    #[test]
    fn test_reworded_phrase_still_matches_best_window() {
        // Partial overlap under paraphrase: the window sharing the most
        // vocabulary wins even though no window is verbatim.
        let target = tokens("the market crashed hard today");
        let candidates = vec![
            tokens("we talked about sports results"),
            tokens("and then the market crashed quite hard this morning"),
        ];

        let best = SectionMatcher::new()
            .find_best_window(&target, &candidates)
            .unwrap();
        assert_eq!(best.segment_index, 1);
        // Window length always equals the target length.
        assert_eq!(best.end_token - best.start_token + 1, 5);
    }
}
