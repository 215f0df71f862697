//! Move selection: a deterministic ranking over legal candidates.
//!
//! Candidates are compared by the policy's criteria in order; the first
//! criterion that separates two candidates decides. A fixed tie-break closes
//! the order (higher `(high, low)` pair first, then left before right), so
//! the winner is unique for any input.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::bone::Bone;
use super::error::{EngineError, EngineResult};
use super::moves::Candidate;

/// A single ranking rule. For every rule the "greater" candidate wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Heavier bones first.
    PipSum,
    /// Doubles first.
    Double,
    /// Placements whose exposed value is held most often in the rest of the hand.
    HandFrequency,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPolicy {
    criteria: Vec<Criterion>,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            criteria: vec![Criterion::PipSum, Criterion::Double, Criterion::HandFrequency],
        }
    }
}

/// Outcome of one decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Pass { player: i32 },
    Play { player: i32, candidate: Candidate },
}

impl Decision {
    pub fn player(&self) -> i32 {
        match self {
            Decision::Pass { player } | Decision::Play { player, .. } => *player,
        }
    }
}

/// Remaining-hand bones (other than `played`) that carry any of the values
/// the placement leaves open.
fn hand_frequency(candidate: &Candidate, hand: &[Bone]) -> usize {
    let played = candidate.bone;
    let open: [Option<u8>; 2] = match candidate.exposed() {
        Some(v) => [Some(v), None],
        None => {
            let (x, y) = played.pips();
            [Some(x), Some(y)]
        }
    };
    hand.iter()
        .filter(|&&b| b != played)
        .filter(|b| open.iter().flatten().any(|&v| b.matches(v)))
        .count()
}

fn tie_break(a: &Candidate, b: &Candidate) -> Ordering {
    let rank = |c: &Candidate| (c.bone.high(), c.bone.low());
    rank(a)
        .cmp(&rank(b))
        .then_with(|| b.side.cmp(&a.side))
}

impl SelectionPolicy {
    pub fn new(criteria: Vec<Criterion>) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// `Greater` when `a` should be played rather than `b`.
    pub fn compare(&self, a: &Candidate, b: &Candidate, hand: &[Bone]) -> Ordering {
        for criterion in &self.criteria {
            let ord = match criterion {
                Criterion::PipSum => a.bone.pip_sum().cmp(&b.bone.pip_sum()),
                Criterion::Double => a.bone.is_double().cmp(&b.bone.is_double()),
                Criterion::HandFrequency => hand_frequency(a, hand).cmp(&hand_frequency(b, hand)),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        tie_break(a, b)
    }

    /// Best candidate, or `None` when there is nothing to play.
    pub fn best(&self, candidates: &[Candidate], hand: &[Bone]) -> Option<Candidate> {
        candidates
            .iter()
            .copied()
            .max_by(|a, b| self.compare(a, b, hand))
    }

    /// Pick the move for `player`, or pass when no candidate is legal.
    pub fn select(
        &self,
        player: i32,
        hand: &[Bone],
        candidates: &[Candidate],
    ) -> EngineResult<Decision> {
        let Some(candidate) = self.best(candidates, hand) else {
            return Ok(Decision::Pass { player });
        };
        if !hand.contains(&candidate.bone) {
            return Err(EngineError::Internal(format!(
                "selected bone {:#} is not in the hand",
                candidate.bone
            )));
        }
        Ok(Decision::Play { player, candidate })
    }
}
