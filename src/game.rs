//! Module defining the contracts between the bots and the game they play.
//!
//! The rules of a game live outside of this crate. They are expressed as a
//! pure reducer (`(state, action) -> state`) implementing [`Game`] and an
//! action enumerator implementing [`Enumerate`]. The bots only ever look at
//! the control metadata ([`Ctx`]) of a [`GameState`]; the game payload is
//! passed through untouched.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a player seated at the game.
pub type PlayerId = usize;

/// Terminal result of a game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameOver{
    /// The game was won by the given player.
    Winner(PlayerId),
    /// Nobody won.
    Draw
}

/// Control metadata maintained by the reducer alongside the game payload.
///
/// `gameover` is `None` while the game continues. Once the reducer sets it,
/// it never changes again.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ctx{
    /// Number of seated players.
    pub num_players: usize,
    /// Turn counter, starting at zero.
    pub turn: usize,
    /// Player whose turn it currently is.
    pub current_player: PlayerId,
    /// Ordered players expected to act. Empty once nobody can act.
    pub action_players: Vec<PlayerId>,
    /// Result of the game once it is decided.
    pub gameover: Option<GameOver>
}

impl Ctx{
    /// Creates the metadata of a fresh game where player `0` moves first.
    ///
    /// # Parameters
    /// - `num_players`: The number of seated players.
    pub fn new(num_players: usize) -> Self{
        Ctx {
            num_players,
            turn: 0,
            current_player: 0,
            action_players: vec![0],
            gameover: None
        }
    }

    /// Returns the player expected to act next, if any.
    #[inline]
    pub fn player_to_move(&self) -> Option<PlayerId>{
        self.action_players.first().copied()
    }

    /// Checks whether the game has concluded.
    #[inline]
    pub fn is_over(&self) -> bool{
        self.gameover.is_some()
    }
}

/// Full state of a game: the game specific payload and its control metadata.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameState<P>{
    /// Game specific payload. Never inspected by the bots.
    pub payload: P,
    /// Control metadata.
    pub ctx: Ctx
}

impl<P> GameState<P>{
    /// Bundles a payload with its control metadata.
    #[inline]
    pub fn new(payload: P, ctx: Ctx) -> Self{
        GameState { payload, ctx }
    }
}

/// Trait defining the reducer of a turn-based game.
///
/// Implementations enforce legal moves, turn order and end-of-game detection.
/// The bots never construct actions on their own: every action given to
/// [`Game::apply`] was previously returned by the [`Enumerate`] collaborator
/// for the same state.
///
/// # Examples
/// ```rust
/// use reducer_mcts::Game;
/// use reducer_mcts::test_utils::{ClickCell, TicTacToe};
///
/// let game = TicTacToe;
/// let state = game.setup();
/// let next = game.apply(&state, &ClickCell { cell: 4, player: 0 });
/// assert_eq!(next.payload.cells[4], Some(0));
/// assert_eq!(next.ctx.current_player, 1);
/// ```
pub trait Game{
    /// The game specific payload carried by every state.
    type Payload: Clone;

    /// The directive accepted by the reducer.
    type Action: Clone + std::fmt::Debug;

    /// Creates the initial state of the game.
    fn setup(&self) -> GameState<Self::Payload>;

    /// Applies an action to a state, producing the successor state.
    ///
    /// This function must be pure: the same inputs always yield the same output.
    ///
    /// # Parameters
    /// - `state`: The state to advance.
    /// - `action`: A legal action for `state`.
    ///
    /// # Returns
    /// The successor state.
    fn apply(&self, state: &GameState<Self::Payload>, action: &Self::Action) -> GameState<Self::Payload>;
}

/// Trait listing the legal actions of a player at a given state.
///
/// Implementations must return an empty list, never fail, when no action is legal.
/// Any `Fn(&P, &Ctx, PlayerId) -> Vec<A>` closure implements this trait.
pub trait Enumerate<P, A>{
    /// Lists the legal actions of `player` for the given payload and metadata.
    fn enumerate(&self, payload: &P, ctx: &Ctx, player: PlayerId) -> Vec<A>;
}

impl<P, A, F> Enumerate<P, A> for F
where
    F: Fn(&P, &Ctx, PlayerId) -> Vec<A>
{
    #[inline]
    fn enumerate(&self, payload: &P, ctx: &Ctx, player: PlayerId) -> Vec<A>{
        self(payload, ctx, player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctx_new(){
        let ctx = Ctx::new(2);

        assert_eq!(ctx.num_players, 2);
        assert_eq!(ctx.current_player, 0);
        assert_eq!(ctx.player_to_move(), Some(0));
        assert!(!ctx.is_over());
    }

    #[test]
    fn test_ctx_nobody_to_move(){
        let mut ctx = Ctx::new(2);
        ctx.action_players.clear();

        assert_eq!(ctx.player_to_move(), None);
    }

    #[test]
    fn test_closure_enumerator(){
        let enumerate = |payload: &Vec<u8>, _ctx: &Ctx, player: PlayerId| -> Vec<(u8, PlayerId)>{
            payload.iter().map(|x| (*x, player)).collect()
        };

        let actions = enumerate.enumerate(&vec![3, 5], &Ctx::new(2), 1);
        assert_eq!(actions, vec![(3, 1), (5, 1)]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_ctx_serde(){
        let mut ctx = Ctx::new(2);
        ctx.gameover = Some(GameOver::Winner(1));

        let json = serde_json::to_string(&ctx).unwrap();
        let back: Ctx = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);
    }
}
