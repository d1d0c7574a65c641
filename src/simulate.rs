//! Simulation driver: lets bots play a game against the reducer.
//!
//! The driver asks the agent owning the player to move for a decision,
//! applies the chosen action, and repeats until the game concludes, nobody
//! can act, or the step budget runs out.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::{Agent, Game, GameState, MctsError, PlayerId, SearchTree};

/// The agents seated at a game.
pub enum Bots<P, A>{
    /// One agent deciding for every player.
    Shared(Box<dyn Agent<P, A>>),
    /// One agent per player, keyed by player identifier.
    PerPlayer(HashMap<PlayerId, Box<dyn Agent<P, A>>>)
}

impl<P, A> Bots<P, A>{
    /// Seats a single agent deciding for every player.
    pub fn shared<B: Agent<P, A> + 'static>(agent: B) -> Self{
        Bots::Shared(Box::new(agent))
    }

    /// Creates an empty table of per-player agents.
    pub fn per_player() -> Self{
        Bots::PerPlayer(HashMap::new())
    }

    /// Seats an agent for the player it reports through [`Agent::player_id`].
    ///
    /// On a [`Bots::Shared`] table the shared agent is replaced.
    pub fn with<B: Agent<P, A> + 'static>(mut self, agent: B) -> Self{
        self.insert(agent);
        self
    }

    /// In-place version of [`Bots::with`].
    pub fn insert<B: Agent<P, A> + 'static>(&mut self, agent: B){
        match self{
            Bots::Shared(shared) => *shared = Box::new(agent),
            Bots::PerPlayer(agents) => {
                let _ = agents.insert(agent.player_id(), Box::new(agent));
            }
        }
    }

    /// Gets the agent deciding for `player`.
    ///
    /// # Returns
    /// `Err(MctsError::UnknownPlayer(_))` if no agent was seated for `player`.
    pub fn agent_mut(&mut self, player: PlayerId) -> Result<&mut (dyn Agent<P, A> + 'static), MctsError>{
        match self{
            Bots::Shared(agent) => Ok(&mut **agent),
            Bots::PerPlayer(agents) => match agents.get_mut(&player){
                Some(agent) => Ok(&mut **agent),
                None => Err(MctsError::UnknownPlayer(player))
            }
        }
    }
}

/// Configuration parameters of [`simulate`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationConfig{
    /// Maximum number of applied actions. `None` runs the game to its end,
    /// which the caller must guarantee to be finite.
    pub max_steps: Option<usize>
}

impl SimulationConfig{
    /// No step limit.
    pub const DEFAULT: SimulationConfig = SimulationConfig { max_steps: None };
}

impl Default for SimulationConfig{
    fn default() -> Self{
        Self::DEFAULT
    }
}

/// Result of a single [`step`].
#[derive(Clone, Debug)]
pub struct Step<P, A>{
    /// The state after the step.
    pub state: GameState<P>,
    /// The search tree of the deciding agent, if it searches.
    pub tree: Option<SearchTree<P, A>>,
    /// `false` when the step was a no-op.
    pub advanced: bool
}

/// Asks the agent to move for a decision and applies it.
///
/// # Returns
/// `Ok(None)` when nothing can happen: the game is over, nobody can act,
/// or the player to move has no legal action.
fn advance<T: Game>(
    game: &T,
    bots: &mut Bots<T::Payload, T::Action>,
    state: &GameState<T::Payload>
) -> Result<Option<(GameState<T::Payload>, Option<SearchTree<T::Payload, T::Action>>)>, MctsError>{
    if state.ctx.is_over(){
        return Ok(None);
    }

    let Some(player) = state.ctx.player_to_move() else{
        return Ok(None);
    };

    match bots.agent_mut(player)?.decide(state){
        Ok(decision) => {
            trace!(turn = state.ctx.turn, player, action = ?decision.action, "step");
            Ok(Some((game.apply(state, &decision.action), decision.tree)))
        }
        Err(MctsError::NoLegalActions(player)) => {
            warn!(turn = state.ctx.turn, player, "player to move has no legal action, simulation stalled");
            Ok(None)
        }
        Err(error) => Err(error)
    }
}

/// Performs at most one decision and applies it.
///
/// Returns the input state unchanged (with no tree) when the game is over or
/// nobody can act, so calling it again at the end of a game is a no-op.
///
/// # Returns
/// `Err(MctsError::UnknownPlayer(_))` if the player to move has no agent.
pub fn step<T: Game>(
    game: &T,
    bots: &mut Bots<T::Payload, T::Action>,
    state: GameState<T::Payload>
) -> Result<Step<T::Payload, T::Action>, MctsError>{
    match advance(game, bots, &state)?{
        Some((next, tree)) => Ok(Step { state: next, tree, advanced: true }),
        None => Ok(Step { state, tree: None, advanced: false })
    }
}

/// Plays the game until it concludes, nobody can act, or `config.max_steps`
/// actions were applied.
///
/// # Examples
/// ```rust
/// use reducer_mcts::{simulate, Bots, Game, MctsAgent, MctsConfig, MctsError, RandomAgent, SimulationConfig};
/// use reducer_mcts::test_utils::{tictactoe_moves, TicTacToe};
///
/// fn main() -> Result<(), MctsError> {
///     let config = MctsConfig { iterations: 100, seed: Some(1), ..MctsConfig::DEFAULT };
///     let mut bots = Bots::per_player()
///         .with(RandomAgent::new(tictactoe_moves, 0, Some(2)))
///         .with(MctsAgent::from_config(TicTacToe, tictactoe_moves, 1, &config)?);
///
///     let end = simulate(&TicTacToe, &mut bots, TicTacToe.setup(), &SimulationConfig::DEFAULT)?;
///     assert!(end.ctx.gameover.is_some());
///     Ok(())
/// }
/// ```
pub fn simulate<T: Game>(
    game: &T,
    bots: &mut Bots<T::Payload, T::Action>,
    state: GameState<T::Payload>,
    config: &SimulationConfig
) -> Result<GameState<T::Payload>, MctsError>{
    let mut state = state;
    let mut steps = 0;

    loop{
        if config.max_steps.is_some_and(|max| steps >= max){
            debug!(steps, "simulation stopped by step limit");
            break;
        }

        match advance(game, bots, &state)?{
            Some((next, _)) => {
                state = next;
                steps += 1;
            }
            None => break
        }
    }

    info!(steps, gameover = ?state.ctx.gameover, "simulation finished");
    Ok(state)
}
