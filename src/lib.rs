//! Monte Carlo Tree Search bots for turn-based games expressed as pure reducers.
//!
//! The rules of a game are supplied by the caller as a reducer
//! (`(state, action) -> state`, see [`Game`]) and an action enumerator
//! (see [`Enumerate`]). This library provides bots choosing actions for such
//! games, and a driver letting them play until the game concludes.
//!
//! # Modules
//! - `game`: Contracts of the reducer and the action enumerator.
//! - `random`: The deterministic random source owned by each bot.
//! - `tree`: Arena tree data structure used by the search.
//! - `agent`: The [`Agent`] capability and the uniformly random bot.
//! - `mcts`: The Monte Carlo Tree Search bot and its inspectable search tree.
//! - `simulate`: The [`simulate`] and [`step`] driver entry points.
//! - `utils`: Random index sampling and first-maximum selection.
//! - `test_utils`: Small fixture games used by tests and examples.
//!
//! # Examples
//! ```rust
//! use reducer_mcts::{step, Bots, Game, MctsAgent, MctsConfig, MctsError};
//! use reducer_mcts::test_utils::{tictactoe_moves, TicTacToe};
//!
//! fn main() -> Result<(), MctsError> {
//!     let config = MctsConfig { iterations: 300, seed: Some(42), ..MctsConfig::DEFAULT };
//!     let mut bots = Bots::per_player()
//!         .with(MctsAgent::from_config(TicTacToe, tictactoe_moves, 0, &config)?)
//!         .with(MctsAgent::from_config(TicTacToe, tictactoe_moves, 1, &MctsConfig { seed: Some(43), ..config.clone() })?);
//!
//!     // Play one move and look at the tree that produced it.
//!     let result = step(&TicTacToe, &mut bots, TicTacToe.setup())?;
//!     if let Some(tree) = &result.tree {
//!         println!("{}", tree.describe(1));
//!     }
//!     assert_eq!(result.state.ctx.current_player, 1);
//!     Ok(())
//! }
//! ```

mod tree;
mod game;
mod error;
mod random;
mod agent;
mod mcts;
mod simulate;
pub mod utils;

#[doc(hidden)]
pub mod test_utils;

pub use tree::*;
pub use game::*;
pub use error::*;
pub use random::*;
pub use agent::*;
pub use mcts::*;
pub use simulate::*;
