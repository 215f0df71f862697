pub mod bone;
pub mod error;
pub mod layout;
pub mod models;
pub mod moves;
pub mod profiles;
pub mod selector;
pub mod state;

use error::EngineResult;
use models::GameStateRequest;
use selector::{Decision, SelectionPolicy};
use state::GameState;

/// Run the whole pipeline for one request: assemble the state, derive the
/// open ends, enumerate legal moves and pick one (or pass).
pub fn decide(request: &GameStateRequest, policy: &SelectionPolicy) -> EngineResult<Decision> {
    GameState::try_from(request)?.decide(policy)
}
