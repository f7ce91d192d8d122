//! Prefix × suffix candidate generation

use super::validator::CandidateValidator;
use crate::types::{Candidate, TLD};
use crate::words::WordList;

/// Generates `prefix + suffix + ".com"` candidates.
///
/// Order is prefix-major: for prefixes `[a, b]` and suffixes `[x, y]` the
/// sequence is `ax, ay, bx, by`. Nothing is filtered or de-duplicated; labels
/// that fail validation are still yielded with `rejection` set.
pub struct CombinationGenerator<'a> {
    prefixes: &'a WordList,
    suffixes: &'a WordList,
    validator: CandidateValidator,
    current_index: u64,
    total: u64,
}

impl<'a> CombinationGenerator<'a> {
    pub fn new(prefixes: &'a WordList, suffixes: &'a WordList, validator: CandidateValidator) -> Self {
        let total = (prefixes.len() as u64).saturating_mul(suffixes.len() as u64);
        Self {
            prefixes,
            suffixes,
            validator,
            current_index: 0,
            total,
        }
    }

    /// Total number of candidates (`N × M`)
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn current_index(&self) -> u64 {
        self.current_index
    }

    /// Candidate at a specific position in generation order
    pub fn candidate_at(&self, index: u64) -> Option<Candidate> {
        if index >= self.total {
            return None;
        }

        let width = self.suffixes.len() as u64;
        let prefix = self.prefixes.get((index / width) as usize)?;
        let suffix = self.suffixes.get((index % width) as usize)?;
        let domain = format!("{}{}.{}", prefix, suffix, TLD);
        let rejection = self.validator.rejection(&domain);

        Some(Candidate {
            index,
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            domain,
            rejection,
        })
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_index >= self.total
    }

    pub fn remaining(&self) -> u64 {
        self.total.saturating_sub(self.current_index)
    }
}

impl Iterator for CombinationGenerator<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Self::Item> {
        let candidate = self.candidate_at(self.current_index)?;
        self.current_index += 1;
        Some(candidate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}
