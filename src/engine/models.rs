//! Wire types for the decision endpoint. Field names follow the external
//! JSON contract (`jogador`, `mao`, `mesa`, `jogadas`, `pedra`, `lado`).

use serde::{Deserialize, Serialize};

use super::moves::Side;
use super::selector::Decision;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStateRequest {
    #[serde(rename = "jogador")]
    pub player: i32,
    #[serde(rename = "mao", default)]
    pub hand: Vec<String>,
    #[serde(rename = "mesa", default)]
    pub table: Vec<String>,
    #[serde(rename = "jogadas", default)]
    pub plays: Vec<PlayRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayRecord {
    #[serde(rename = "jogador")]
    pub player: i32,
    #[serde(rename = "pedra")]
    pub bone: String,
    #[serde(rename = "lado", default)]
    pub side: String,
}

/// `{"jogador", "pedra", "lado"}` for a play, `{"jogador"}` alone for a pass.
/// The bone glyph is drawn in the order the chain reads it after placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayResponse {
    #[serde(rename = "jogador")]
    pub player: i32,
    #[serde(rename = "pedra", default, skip_serializing_if = "Option::is_none")]
    pub bone: Option<String>,
    #[serde(rename = "lado", default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
}

impl From<&Decision> for PlayResponse {
    fn from(decision: &Decision) -> Self {
        match decision {
            Decision::Pass { player } => PlayResponse {
                player: *player,
                bone: None,
                side: None,
            },
            Decision::Play { player, candidate } => PlayResponse {
                player: *player,
                bone: Some(candidate.oriented().to_string()),
                side: Some(candidate.side),
            },
        }
    }
}

/// Error payload returned with every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub status: String,
    pub code: u16,
}
