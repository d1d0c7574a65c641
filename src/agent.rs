//! The capability shared by every bot: choosing an action for a state.

use tracing::trace;

use crate::{utils, Enumerate, GameState, MctsError, PlayerId, RandomSource, SearchTree, SeededRandom};

/// Outcome of a decision.
///
/// # Type Parameters
/// - `P`: The game payload.
/// - `A`: The action type.
#[derive(Clone, Debug)]
pub struct Decision<P, A>{
    /// The chosen action, always one that was enumerated for the decided state.
    pub action: A,
    /// The search tree built to reach the decision, when the agent searches.
    pub tree: Option<SearchTree<P, A>>
}

/// Trait implemented by every bot.
///
/// The simulation driver only knows agents through this trait, so bots of
/// different kinds can be seated at the same game.
pub trait Agent<P, A>{
    /// The player this agent acts for.
    fn player_id(&self) -> PlayerId;

    /// Chooses an action for the given state.
    ///
    /// # Returns
    /// `Ok(decision)` holding a legal action.
    /// `Err(MctsError::NoLegalActions(_))` if there was nothing to choose from.
    fn decide(&mut self, state: &GameState<P>) -> Result<Decision<P, A>, MctsError>;
}

/// A bot choosing uniformly at random among the legal actions of its player.
///
/// # Examples
/// ```rust
/// use reducer_mcts::{Agent, Game, RandomAgent};
/// use reducer_mcts::test_utils::{tictactoe_moves, TicTacToe};
///
/// let state = TicTacToe.setup();
/// let mut bot = RandomAgent::new(tictactoe_moves, 0, Some(42));
///
/// let decision = bot.decide(&state).unwrap();
/// assert!(decision.tree.is_none());
/// ```
pub struct RandomAgent<E, R = SeededRandom>{
    player_id: PlayerId,
    enumerate: E,
    random: R
}

impl<E> RandomAgent<E>{
    /// Creates a random bot.
    ///
    /// # Parameters
    /// - `enumerate`: Lists the legal actions of a player.
    /// - `player_id`: The player this bot acts for.
    /// - `seed`: Optional seed of its private random source.
    pub fn new(enumerate: E, player_id: PlayerId, seed: Option<u64>) -> Self{
        RandomAgent { player_id, enumerate, random: SeededRandom::new(seed) }
    }
}

impl<E, R: RandomSource> RandomAgent<E, R>{
    /// Replaces the random source of this bot.
    pub fn with_random<S: RandomSource>(self, random: S) -> RandomAgent<E, S>{
        RandomAgent { player_id: self.player_id, enumerate: self.enumerate, random }
    }

    /// Gives access to the random source, e.g. to reseed it between games.
    #[inline]
    pub fn random_mut(&mut self) -> &mut R{
        &mut self.random
    }
}

impl<P, A, E, R> Agent<P, A> for RandomAgent<E, R>
where
    E: Enumerate<P, A>,
    R: RandomSource
{
    #[inline]
    fn player_id(&self) -> PlayerId{
        self.player_id
    }

    fn decide(&mut self, state: &GameState<P>) -> Result<Decision<P, A>, MctsError>{
        let mut actions = self.enumerate.enumerate(&state.payload, &state.ctx, self.player_id);

        if actions.is_empty(){
            return Err(MctsError::NoLegalActions(self.player_id));
        }

        let index = utils::uniform_index(actions.len(), &mut self.random);
        trace!(player = self.player_id, index, candidates = actions.len(), "random decision");

        Ok(Decision { action: actions.swap_remove(index), tree: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{stalled_moves, tictactoe_moves, ClickCell, ScriptedRandom, Stalled, TicTacToe};
    use crate::Game;

    #[test]
    fn test_random_agent_picks_legal() -> Result<(), MctsError>{
        let game = TicTacToe;
        let mut state = game.setup();
        state = game.apply(&state, &ClickCell { cell: 0, player: 0 });
        state = game.apply(&state, &ClickCell { cell: 4, player: 1 });

        let mut bot = RandomAgent::new(tictactoe_moves, 0, Some(11));

        for _ in 0..20{
            let decision = bot.decide(&state)?;
            assert!(tictactoe_moves(&state.payload, &state.ctx, 0).contains(&decision.action));
            assert!(decision.tree.is_none());
        }
        Ok(())
    }

    #[test]
    fn test_random_agent_scripted() -> Result<(), MctsError>{
        let state = TicTacToe.setup();
        let mut bot = RandomAgent::new(tictactoe_moves, 0, None)
            .with_random(ScriptedRandom::new(vec![0.0, 0.999, 0.5]));

        assert_eq!(bot.decide(&state)?.action, ClickCell { cell: 0, player: 0 });
        assert_eq!(bot.decide(&state)?.action, ClickCell { cell: 8, player: 0 });
        assert_eq!(bot.decide(&state)?.action, ClickCell { cell: 4, player: 0 });
        Ok(())
    }

    #[test]
    fn test_random_agent_deterministic() -> Result<(), MctsError>{
        let state = TicTacToe.setup();
        let mut a = RandomAgent::new(tictactoe_moves, 0, Some(5));
        let mut b = RandomAgent::new(tictactoe_moves, 0, Some(5));

        for _ in 0..10{
            assert_eq!(a.decide(&state)?.action, b.decide(&state)?.action);
        }
        Ok(())
    }

    #[test]
    fn test_random_agent_no_actions(){
        let state = Stalled.setup();
        let mut bot = RandomAgent::new(stalled_moves, 0, Some(1));

        let result: Result<Decision<(), ()>, MctsError> = bot.decide(&state);
        assert_eq!(result.err(), Some(MctsError::NoLegalActions(0)));
    }
}
