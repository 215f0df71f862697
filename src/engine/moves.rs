//! Legal-move enumeration: hand × open ends → placement candidates.

use serde::{Deserialize, Serialize};

use super::bone::Bone;

/// Which end of the chain a bone extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "esquerda")]
    Left,
    #[serde(rename = "direita")]
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Lenient label parsing: anything starting with `d` is right, the rest left.
    pub fn from_label(label: &str) -> Side {
        if label.trim_start().to_lowercase().starts_with('d') {
            Side::Right
        } else {
            Side::Left
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "esquerda",
            Side::Right => "direita",
        }
    }
}

/// The chain's open ends with their side labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEnds {
    Start,
    Open { left: u8, right: u8 },
}

impl TableEnds {
    pub fn value(self, side: Side) -> Option<u8> {
        match (self, side) {
            (TableEnds::Start, _) => None,
            (TableEnds::Open { left, .. }, Side::Left) => Some(left),
            (TableEnds::Open { right, .. }, Side::Right) => Some(right),
        }
    }
}

/// One legal placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub bone: Bone,
    pub side: Side,
    /// Value of the end the bone attaches to; `None` for the opening play.
    pub end: Option<u8>,
    /// The written order `(x, y)` runs against the chain's left-to-right
    /// reading once placed: on the left end the chain reads `exposed|end`,
    /// on the right end `end|exposed`.
    pub reversed: bool,
}

impl Candidate {
    fn opening(bone: Bone) -> Self {
        Self {
            bone,
            side: Side::Left,
            end: None,
            reversed: false,
        }
    }

    /// Value left open once the bone is placed (`None` for the opening play,
    /// which leaves both of its values open).
    pub fn exposed(&self) -> Option<u8> {
        self.end.and_then(|e| self.bone.other(e))
    }

    /// The bone with its pips in the order the chain reads them after placement.
    pub fn oriented(&self) -> Bone {
        if self.reversed {
            self.bone.flipped()
        } else {
            self.bone
        }
    }
}

/// Every (bone, side) placement the hand allows against `ends`.
///
/// Candidates come out in hand order, left before right. When both ends show
/// the same value a matching bone yields one candidate per side.
pub fn legal_moves(hand: &[Bone], ends: TableEnds) -> Vec<Candidate> {
    match ends {
        TableEnds::Start => hand.iter().copied().map(Candidate::opening).collect(),
        TableEnds::Open { .. } => {
            let mut candidates = Vec::new();
            for &bone in hand {
                for side in Side::BOTH {
                    let Some(end) = ends.value(side) else {
                        continue;
                    };
                    if !bone.matches(end) {
                        continue;
                    }
                    let (x, y) = bone.pips();
                    let reversed = match side {
                        Side::Left => y != end,
                        Side::Right => x != end,
                    };
                    candidates.push(Candidate {
                        bone,
                        side,
                        end: Some(end),
                        reversed,
                    });
                }
            }
            candidates
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bone(x: u8, y: u8) -> Bone {
        Bone::new(x, y).unwrap()
    }

    #[test]
    fn test_start_allows_whole_hand() {
        let hand = vec![bone(1, 2), bone(6, 6), bone(0, 3)];
        let moves = legal_moves(&hand, TableEnds::Start);
        assert_eq!(moves.len(), 3);
        for (m, b) in moves.iter().zip(&hand) {
            assert_eq!(m.bone, *b);
            assert_eq!(m.end, None);
            assert_eq!(m.exposed(), None);
        }
    }

    #[test]
    fn test_matches_each_end() {
        let hand = vec![bone(5, 5), bone(1, 2), bone(6, 0)];
        let moves = legal_moves(&hand, TableEnds::Open { left: 2, right: 5 });
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].bone, bone(5, 5));
        assert_eq!(moves[0].side, Side::Right);
        assert_eq!(moves[1].bone, bone(1, 2));
        assert_eq!(moves[1].side, Side::Left);
        assert!(!moves[1].reversed);
        assert_eq!(moves[1].exposed(), Some(1));
        assert_eq!(moves[1].oriented().pips(), (1, 2));
    }

    #[test]
    fn test_left_end_orientation_flips_written_order() {
        // chain starts at 2 on the left: 2|1 must read 1|2
        let moves = legal_moves(&[bone(2, 1)], TableEnds::Open { left: 2, right: 5 });
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].side, Side::Left);
        assert!(moves[0].reversed);
        assert_eq!(moves[0].oriented().pips(), (1, 2));
    }

    #[test]
    fn test_right_end_orientation() {
        let ends = TableEnds::Open { left: 2, right: 5 };
        // chain ends at 5 on the right: 5|3 already reads 5|3
        let natural = legal_moves(&[bone(5, 3)], ends);
        assert_eq!(natural[0].side, Side::Right);
        assert!(!natural[0].reversed);
        assert_eq!(natural[0].oriented().pips(), (5, 3));

        let flipped = legal_moves(&[bone(3, 5)], ends);
        assert_eq!(flipped[0].side, Side::Right);
        assert!(flipped[0].reversed);
        assert_eq!(flipped[0].oriented().pips(), (5, 3));
    }

    #[test]
    fn test_double_never_reversed() {
        let moves = legal_moves(&[bone(5, 5), bone(2, 2)], TableEnds::Open { left: 2, right: 5 });
        assert!(moves.iter().all(|m| !m.reversed));
    }

    #[test]
    fn test_bone_matching_both_ends() {
        let moves = legal_moves(&[bone(2, 5)], TableEnds::Open { left: 2, right: 5 });
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].exposed(), Some(5));
        assert_eq!(moves[1].exposed(), Some(2));
    }

    #[test]
    fn test_equal_ends_yield_two_placements() {
        let moves = legal_moves(&[bone(3, 4)], TableEnds::Open { left: 3, right: 3 });
        assert_eq!(moves.len(), 2);
        assert_ne!(moves[0].side, moves[1].side);
    }

    #[test]
    fn test_no_match() {
        let moves = legal_moves(&[bone(0, 1), bone(3, 4)], TableEnds::Open { left: 2, right: 5 });
        assert!(moves.is_empty());
    }

    #[test]
    fn test_side_labels() {
        assert_eq!(Side::from_label("Direita"), Side::Right);
        assert_eq!(Side::from_label("d"), Side::Right);
        assert_eq!(Side::from_label("esquerda"), Side::Left);
        assert_eq!(Side::from_label(""), Side::Left);
        assert_eq!(Side::Right.label(), "direita");
    }
}
