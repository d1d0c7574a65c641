use thiserror::Error;

use crate::PlayerId;

/// Errors surfaced to callers of the bots and of the simulation driver.
///
/// Dead-end playouts inside a search are not errors: they are absorbed by the
/// search and simply contribute no reward.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MctsError{
    /// A decision was requested for a state where the player has no legal action.
    #[error("no legal action available for player {0}")]
    NoLegalActions(PlayerId),

    /// The search budget must allow at least one iteration.
    #[error("iterations must be strictly positive")]
    ZeroIterations,

    /// The exploration coefficient must be finite and non-negative.
    #[error("invalid exploration coefficient {0}")]
    InvalidExplorationCoef(f64),

    /// The driver needed an agent for a player nobody registered.
    #[error("no agent registered for player {0}")]
    UnknownPlayer(PlayerId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages(){
        assert_eq!(MctsError::NoLegalActions(1).to_string(), "no legal action available for player 1");
        assert_eq!(MctsError::UnknownPlayer(3).to_string(), "no agent registered for player 3");
        assert_eq!(MctsError::ZeroIterations.to_string(), "iterations must be strictly positive");
    }
}
