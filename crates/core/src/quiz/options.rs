use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::Flashcard;

/// Upper bound on answer choices for one question.
pub const MAX_OPTIONS: usize = 4;

/// Builds the answer choices for a question: the correct answer plus up to
/// `MAX_OPTIONS - 1` distinct distractors drawn from `candidates`, in random
/// order.
///
/// Fewer options are returned when `candidates` holds fewer distinct answers.
pub fn build_options<'a, R>(correct: &'a str, candidates: &'a [Flashcard], rng: &mut R) -> Vec<String>
where
    R: Rng + ?Sized,
{
    let mut seen: HashSet<&'a str> = HashSet::with_capacity(candidates.len() + 1);
    seen.insert(correct);

    let mut distractors: Vec<&'a str> = candidates
        .iter()
        .map(Flashcard::answer)
        .filter(|answer| seen.insert(*answer))
        .collect();
    distractors.shuffle(rng);
    distractors.truncate(MAX_OPTIONS - 1);

    let mut options = Vec::with_capacity(distractors.len() + 1);
    options.push(correct.to_owned());
    options.extend(distractors.into_iter().map(str::to_owned));
    options.shuffle(rng);
    options
}
