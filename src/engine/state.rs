//! Per-request game state: parsed hand, table graph and play history.
//!
//! Built fresh from each request, validated as a whole, then consumed by the
//! move finder and selector. Nothing here outlives the request.

use std::collections::HashSet;

use super::bone::Bone;
use super::error::{EngineError, EngineResult};
use super::layout::{Layout, OpenEnds};
use super::models::GameStateRequest;
use super::moves::{legal_moves, Candidate, Side, TableEnds};
use super::selector::{Decision, SelectionPolicy};

/// One entry of the play history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub player: i32,
    pub bone: Bone,
    pub side: Side,
}

#[derive(Debug, Clone)]
pub struct GameState {
    player: i32,
    hand: Vec<Bone>,
    table: Layout,
    plays: Vec<Play>,
    ends: TableEnds,
}

fn parse_bone(field: &str, text: &str) -> EngineResult<Bone> {
    text.parse::<Bone>().map_err(|e| match e {
        EngineError::MalformedInput(msg) => EngineError::malformed(format!("{field}: {msg}")),
        other => other,
    })
}

fn parse_bones(field: &str, texts: &[String]) -> EngineResult<Vec<Bone>> {
    texts.iter().map(|t| parse_bone(field, t)).collect()
}

impl GameState {
    pub fn new(player: i32, hand: Vec<Bone>, table: &[Bone], plays: Vec<Play>) -> EngineResult<Self> {
        if hand.is_empty() {
            return Err(EngineError::malformed("hand is empty"));
        }
        let mut seen = HashSet::with_capacity(hand.len());
        for bone in &hand {
            if !seen.insert(*bone) {
                return Err(EngineError::malformed(format!(
                    "bone {:#} appears more than once in the hand",
                    bone
                )));
            }
        }

        let table = Layout::from_bones(table)?;
        if let Some(bone) = hand.iter().find(|b| table.contains(**b)) {
            return Err(EngineError::malformed(format!(
                "bone {:#} is both in the hand and on the table",
                bone
            )));
        }

        let mut played = HashSet::with_capacity(plays.len());
        for play in &plays {
            if !table.contains(play.bone) {
                return Err(EngineError::malformed(format!(
                    "played bone {:#} is not on the table",
                    play.bone
                )));
            }
            if !played.insert(play.bone) {
                return Err(EngineError::malformed(format!(
                    "bone {:#} is played more than once",
                    play.bone
                )));
            }
        }

        let ends = resolve_ends(&table, &plays)?;
        Ok(Self {
            player,
            hand,
            table,
            plays,
            ends,
        })
    }

    pub fn player(&self) -> i32 {
        self.player
    }

    pub fn hand(&self) -> &[Bone] {
        &self.hand
    }

    pub fn table(&self) -> &Layout {
        &self.table
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn ends(&self) -> TableEnds {
        self.ends
    }

    pub fn candidates(&self) -> Vec<Candidate> {
        legal_moves(&self.hand, self.ends)
    }

    pub fn decide(&self, policy: &SelectionPolicy) -> EngineResult<Decision> {
        policy.select(self.player, &self.hand, &self.candidates())
    }
}

impl TryFrom<&GameStateRequest> for GameState {
    type Error = EngineError;

    fn try_from(request: &GameStateRequest) -> EngineResult<Self> {
        let hand = parse_bones("hand", &request.hand)?;
        let table = parse_bones("table", &request.table)?;
        let plays = request
            .plays
            .iter()
            .map(|p| {
                Ok(Play {
                    player: p.player,
                    bone: parse_bone("plays", &p.bone)?,
                    side: Side::from_label(&p.side),
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;
        GameState::new(request.player, hand, &table, plays)
    }
}

/// Walk a history that covers the whole table and return `(left, right)`.
///
/// The first bone fixes left and right as written; each later bone must
/// share a value with the end on its side.
fn replay(plays: &[Play]) -> EngineResult<(u8, u8)> {
    let Some((first, rest)) = plays.split_first() else {
        return Err(EngineError::Internal("replay of an empty history".into()));
    };
    let (mut left, mut right) = first.bone.pips();
    for play in rest {
        let end = match play.side {
            Side::Left => &mut left,
            Side::Right => &mut right,
        };
        let current = *end;
        *end = play.bone.other(current).ok_or_else(|| {
            EngineError::malformed(format!(
                "bone {:#} cannot be played on the {} end showing {current}",
                play.bone,
                play.side.label(),
            ))
        })?;
    }
    Ok((left, right))
}

/// Label the graph-derived open ends as left/right.
///
/// A history covering every table bone is replayed and must agree with the
/// graph. Otherwise the lower value is taken as the left end. A closed chain
/// has no graph-derived ends and requires the full history.
fn resolve_ends(table: &Layout, plays: &[Play]) -> EngineResult<TableEnds> {
    let graph = table.open_ends()?;
    let replayed = if !plays.is_empty() && plays.len() == table.len() {
        Some(replay(plays)?)
    } else {
        None
    };

    match (graph, replayed) {
        (OpenEnds::Start, _) => Ok(TableEnds::Start),
        (OpenEnds::Pair(a, b), Some((left, right))) => {
            let same = (left, right) == (a, b) || (left, right) == (b, a);
            if !same {
                return Err(EngineError::invalid_layout(format!(
                    "play history ends at {left} and {right} but the table is open at {a} and {b}"
                )));
            }
            Ok(TableEnds::Open { left, right })
        }
        (OpenEnds::Pair(a, b), None) => Ok(TableEnds::Open { left: a, right: b }),
        (OpenEnds::Closed, Some((left, right))) => {
            if left != right || table.incidence(left) == 0 {
                return Err(EngineError::invalid_layout(format!(
                    "play history ends at {left} and {right} but the table is a closed chain"
                )));
            }
            Ok(TableEnds::Open { left, right })
        }
        (OpenEnds::Closed, None) => Err(EngineError::invalid_layout(
            "the chain closes on itself; its ends need the complete play history",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bone(x: u8, y: u8) -> Bone {
        Bone::new(x, y).unwrap()
    }

    fn play(x: u8, y: u8, side: Side) -> Play {
        Play {
            player: 1,
            bone: bone(x, y),
            side,
        }
    }

    #[test]
    fn test_empty_table() {
        let state = GameState::new(2, vec![bone(1, 2)], &[], vec![]).unwrap();
        assert_eq!(state.ends(), TableEnds::Start);
        assert_eq!(state.candidates().len(), 1);
    }

    #[test]
    fn test_ends_by_value_without_history() {
        let state = GameState::new(1, vec![bone(0, 0)], &[bone(5, 3), bone(3, 2)], vec![]).unwrap();
        assert_eq!(state.ends(), TableEnds::Open { left: 2, right: 5 });
    }

    #[test]
    fn test_ends_from_history() {
        // 3|5 first, then 2|3 on the left: chain reads 2|3 3|5
        let plays = vec![play(3, 5, Side::Left), play(2, 3, Side::Left)];
        let state =
            GameState::new(1, vec![bone(0, 0)], &[bone(5, 3), bone(3, 2)], plays).unwrap();
        assert_eq!(state.ends(), TableEnds::Open { left: 2, right: 5 });

        let plays = vec![play(5, 3, Side::Left), play(3, 2, Side::Right)];
        let state =
            GameState::new(1, vec![bone(0, 0)], &[bone(5, 3), bone(3, 2)], plays).unwrap();
        assert_eq!(state.ends(), TableEnds::Open { left: 5, right: 2 });
    }

    #[test]
    fn test_closed_chain_needs_history() {
        let table = [bone(1, 2), bone(2, 3), bone(3, 1)];
        let err = GameState::new(1, vec![bone(1, 4)], &table, vec![]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidLayout(_)));

        let plays = vec![
            play(1, 2, Side::Left),
            play(2, 3, Side::Right),
            play(3, 1, Side::Right),
        ];
        let state = GameState::new(1, vec![bone(1, 4)], &table, plays).unwrap();
        assert_eq!(state.ends(), TableEnds::Open { left: 1, right: 1 });
        assert_eq!(state.candidates().len(), 2);
    }

    #[test]
    fn test_history_side_mismatch() {
        let plays = vec![play(3, 5, Side::Left), play(2, 3, Side::Right)];
        let err =
            GameState::new(1, vec![bone(0, 0)], &[bone(3, 5), bone(2, 3)], plays).unwrap_err();
        assert!(matches!(err, EngineError::MalformedInput(_)));
    }

    #[test]
    fn test_rejects_empty_hand() {
        let err = GameState::new(1, vec![], &[], vec![]).unwrap_err();
        assert!(matches!(err, EngineError::MalformedInput(_)));
    }

    #[test]
    fn test_rejects_bone_in_hand_and_table() {
        let err = GameState::new(1, vec![bone(2, 4)], &[bone(4, 2)], vec![]).unwrap_err();
        assert!(matches!(err, EngineError::MalformedInput(_)));
    }

    #[test]
    fn test_rejects_duplicate_in_hand() {
        let err = GameState::new(1, vec![bone(2, 4), bone(4, 2)], &[], vec![]).unwrap_err();
        assert!(matches!(err, EngineError::MalformedInput(_)));
    }

    #[test]
    fn test_rejects_history_bone_off_table() {
        let plays = vec![play(6, 6, Side::Left)];
        let err = GameState::new(1, vec![bone(0, 1)], &[bone(5, 5)], plays).unwrap_err();
        assert!(matches!(err, EngineError::MalformedInput(_)));
    }

    #[test]
    fn test_from_request() {
        let request: GameStateRequest = serde_json::from_value(serde_json::json!({
            "jogador": 3,
            "mao": ["5-5", "1-2", "6-0"],
            "mesa": ["2-5"],
            "jogadas": [{"jogador": 2, "pedra": "2-5", "lado": "esquerda"}]
        }))
        .unwrap();
        let state = GameState::try_from(&request).unwrap();
        assert_eq!(state.player(), 3);
        assert_eq!(state.plays().len(), 1);
        assert_eq!(state.table().len(), 1);
        assert_eq!(state.ends(), TableEnds::Open { left: 2, right: 5 });
    }

    #[test]
    fn test_from_request_bad_bone() {
        let request: GameStateRequest = serde_json::from_value(serde_json::json!({
            "jogador": 1,
            "mao": ["9-9"]
        }))
        .unwrap();
        let err = GameState::try_from(&request).unwrap_err();
        assert_eq!(
            err,
            EngineError::malformed("hand: pip value 9 out of range in \"9-9\"")
        );
    }
}
