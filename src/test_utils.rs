//! Test utilities: small games and a scripted random source

use crate::{Ctx, Game, GameOver, GameState, PlayerId, RandomSource};

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6]
];

/// Payload of a 3x3 tic-tac-toe game: the owner of each cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board{
    pub cells: [Option<PlayerId>; 9]
}

impl Board{
    fn is_victory(&self) -> bool{
        LINES.iter().any(|line|{
            let first = self.cells[line[0]];
            first.is_some() && line.iter().all(|cell| self.cells[*cell] == first)
        })
    }

    fn is_full(&self) -> bool{
        self.cells.iter().all(Option::is_some)
    }
}

/// Action of the tic-tac-toe game: `player` marks `cell`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickCell{
    pub cell: usize,
    pub player: PlayerId
}

/// Two player tic-tac-toe, player `0` moves first
#[derive(Clone, Copy, Debug, Default)]
pub struct TicTacToe;

impl Game for TicTacToe{
    type Payload = Board;
    type Action = ClickCell;

    fn setup(&self) -> GameState<Board>{
        GameState::new(Board { cells: [None; 9] }, Ctx::new(2))
    }

    fn apply(&self, state: &GameState<Board>, action: &ClickCell) -> GameState<Board>{
        if state.ctx.is_over() || action.cell >= 9 || state.payload.cells[action.cell].is_some(){
            return state.clone();
        }

        let mut next = state.clone();
        next.payload.cells[action.cell] = Some(state.ctx.current_player);

        if next.payload.is_victory(){
            next.ctx.gameover = Some(GameOver::Winner(state.ctx.current_player));
            next.ctx.action_players.clear();
        }
        else if next.payload.is_full(){
            next.ctx.gameover = Some(GameOver::Draw);
            next.ctx.action_players.clear();
        }
        else{
            next.ctx.turn += 1;
            next.ctx.current_player = next.ctx.turn % next.ctx.num_players;
            next.ctx.action_players = vec![next.ctx.current_player];
        }

        next
    }
}

/// Lists the empty cells of the board.
pub fn tictactoe_moves(board: &Board, _ctx: &Ctx, player: PlayerId) -> Vec<ClickCell>{
    (0..9)
        .filter(|cell| board.cells[*cell].is_none())
        .map(|cell| ClickCell { cell, player })
        .collect()
}

/// A game that never ends and where nobody can ever act
#[derive(Clone, Copy, Debug, Default)]
pub struct Stalled;

impl Game for Stalled{
    type Payload = ();
    type Action = ();

    fn setup(&self) -> GameState<()>{
        GameState::new((), Ctx::new(2))
    }

    fn apply(&self, state: &GameState<()>, _action: &()) -> GameState<()>{
        state.clone()
    }
}

/// Enumerator of [`Stalled`]: always empty.
pub fn stalled_moves(_payload: &(), _ctx: &Ctx, _player: PlayerId) -> Vec<()>{
    Vec::new()
}

/// A random source replaying a fixed list of values in a loop
#[derive(Clone, Debug)]
pub struct ScriptedRandom{
    values: Vec<f64>,
    cursor: usize
}

impl ScriptedRandom{
    /// # Panics
    /// If `values` is empty.
    pub fn new(values: Vec<f64>) -> Self{
        assert!(!values.is_empty(), "a scripted random source needs values");
        ScriptedRandom { values, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom{
    fn random(&mut self) -> f64{
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }

    fn reseed(&mut self, _seed: u64){
        self.cursor = 0;
    }
}
