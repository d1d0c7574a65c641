//! Implementation of Monte Carlo Tree Search (MCTS) bots.
//!
//! Each decision builds a fresh tree rooted at the state to decide for, runs
//! a fixed number of select / expand / playout / backpropagate iterations
//! against the reducer, then plays the root child with the best win ratio.
//! The tree is handed back alongside the action for inspection.

use std::{fmt::{self, Write}, time::{Duration, Instant}};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{utils, Agent, Decision, Enumerate, Game, GameOver, GameState, MctsError, NodeId, PlayerId, RandomSource, SeededRandom, Tree};

/// Data stored in each node of the search tree.
///
/// `wins` are always counted from the perspective of the player who was to
/// move at the root of the tree.
#[derive(Clone, Debug)]
pub struct SearchNode<P, A>{
    state: GameState<P>,
    incoming_action: Option<A>,
    untried_actions: Vec<A>,
    visits: usize,
    wins: usize
}

impl<P, A> SearchNode<P, A>{
    /// The game state this node represents.
    #[inline]
    pub fn state(&self) -> &GameState<P>{
        &self.state
    }

    /// The action that produced this node from its parent (`None` for the root).
    #[inline]
    pub fn incoming_action(&self) -> Option<&A>{
        self.incoming_action.as_ref()
    }

    /// Legal actions of this node that have not been expanded yet.
    #[inline]
    pub fn untried_actions(&self) -> &[A]{
        &self.untried_actions
    }

    /// Number of playouts that passed through this node.
    #[inline]
    pub fn visits(&self) -> usize{
        self.visits
    }

    /// Reward accumulated by this node.
    #[inline]
    pub fn wins(&self) -> usize{
        self.wins
    }

    /// Average reward per visit, `0.0` for a node never visited.
    #[inline]
    pub fn ratio(&self) -> f64{
        if self.visits != 0 { self.wins as f64 / self.visits as f64 } else { 0.0 }
    }

    /// Upper Confidence bound applied to Trees.
    ///
    /// `w/n + c * sqrt(ln(parent_n) / n)`. A node is always visited once
    /// before being compared to its siblings; an unvisited node scores `+inf`.
    ///
    /// # Parameters
    /// - `parent_visits`: Visits of the parent node.
    /// - `exploration_coef`: The exploration coefficient `c`.
    #[inline]
    pub fn uct(&self, parent_visits: usize, exploration_coef: f64) -> f64{
        if self.visits == 0{
            return f64::INFINITY;
        }

        let n = self.visits as f64;
        self.ratio() + exploration_coef * ((parent_visits as f64).ln() / n).sqrt()
    }
}

/// The tree built by a single [`MctsAgent`] decision.
pub type SearchTree<P, A> = Tree<SearchNode<P, A>>;

/// Statistics of a node as shown by tree inspection tools.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSummary{
    /// Accumulated reward.
    pub wins: usize,
    /// Visit count.
    pub visits: usize,
    /// `wins / visits`.
    pub ratio: f64,
    /// UCT score against the parent, `None` for the root.
    pub uct: Option<f64>
}

impl<P, A> Tree<SearchNode<P, A>>{
    /// Checks whether a node has neither untried actions nor children.
    ///
    /// Such a node had no legal action at creation time. This does not imply
    /// that the game itself is over.
    pub fn is_dead_end(&self, id: NodeId) -> bool{
        let node = self.get(id);
        node.children().is_empty() && node.get().untried_actions.is_empty()
    }

    /// Summarizes the statistics of a node.
    ///
    /// # Parameters
    /// - `id`: The node to summarize.
    /// - `exploration_coef`: The coefficient used to compute the UCT score.
    pub fn summary(&self, id: NodeId, exploration_coef: f64) -> NodeSummary{
        let node = self.get(id);
        let data = node.get();

        NodeSummary {
            wins: data.wins,
            visits: data.visits,
            ratio: data.ratio(),
            uct: node.get_parent().map(|parent| data.uct(self.get(parent).get().visits, exploration_coef))
        }
    }
}

impl<P, A: fmt::Debug> Tree<SearchNode<P, A>>{
    /// Renders the tree as indented text, one node per line, down to `max_depth`.
    pub fn describe(&self, max_depth: usize) -> String{
        let mut out = String::new();
        let mut stack = vec![self.root()];

        while let Some(id) = stack.pop(){
            let depth = self.depth(id);
            let summary = self.summary(id, MctsConfig::DEFAULT.exploration_coef);
            let indent = "  ".repeat(depth);

            let _ = match (self.get(id).get().incoming_action(), summary.uct){
                (Some(action), Some(uct)) => writeln!(
                    out, "{indent}{action:?} ratio {:.2} uct {uct:.2} w {} n {}",
                    summary.ratio, summary.wins, summary.visits
                ),
                _ => writeln!(out, "{indent}root ratio {:.2} w {} n {}", summary.ratio, summary.wins, summary.visits)
            };

            if depth < max_depth{
                stack.extend(self.get(id).children().iter().rev());
            }
        }

        out
    }
}

/// Configuration parameters of an [`MctsAgent`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MctsConfig{
    /// Number of search iterations per decision.
    pub iterations: usize,
    /// The exploration coefficient `c` of the UCT formula.
    pub exploration_coef: f64,
    /// Optional seed of the agent's random source. `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Optional wall-clock budget per decision.
    ///
    /// Checked between whole iterations only, so no backpropagation is ever
    /// left half done. At least one iteration always runs.
    pub time_limit: Option<Duration>
}

impl MctsConfig{
    /// The default MCTS configuration.
    ///
    /// - `iterations`: 500.
    /// - `exploration_coef`: 1.41, close to `sqrt(2)`.
    /// - no seed, no time limit.
    pub const DEFAULT: MctsConfig = MctsConfig{
        iterations: 500,
        exploration_coef: 1.41,
        seed: None,
        time_limit: None
    };

    /// Checks the configuration.
    ///
    /// # Returns
    /// `Err(MctsError::ZeroIterations)` if `iterations` is zero.
    /// `Err(MctsError::InvalidExplorationCoef(_))` if the coefficient is negative or not finite.
    pub fn validate(&self) -> Result<(), MctsError>{
        if self.iterations == 0{
            return Err(MctsError::ZeroIterations);
        }

        if !self.exploration_coef.is_finite() || self.exploration_coef < 0.0{
            return Err(MctsError::InvalidExplorationCoef(self.exploration_coef));
        }

        Ok(())
    }
}

impl Default for MctsConfig{
    fn default() -> Self{
        Self::DEFAULT
    }
}

/// A bot choosing its actions with Monte Carlo Tree Search.
///
/// # Type Parameters
/// - `T`: The game reducer.
/// - `E`: The action enumerator.
/// - `R`: The random source, [`SeededRandom`] by default.
///
/// # Examples
/// ```rust
/// use reducer_mcts::{Agent, Game, MctsAgent, MctsConfig, MctsError};
/// use reducer_mcts::test_utils::{tictactoe_moves, TicTacToe};
///
/// fn main() -> Result<(), MctsError> {
///     let config = MctsConfig { iterations: 200, seed: Some(7), ..MctsConfig::DEFAULT };
///     let mut bot = MctsAgent::from_config(TicTacToe, tictactoe_moves, 0, &config)?;
///
///     let decision = bot.decide(&TicTacToe.setup())?;
///     let tree = decision.tree.expect("searching bots return their tree");
///     assert_eq!(tree.get(tree.root()).get().visits(), 200);
///     Ok(())
/// }
/// ```
pub struct MctsAgent<T, E, R = SeededRandom>{
    game: T,
    enumerate: E,
    player_id: PlayerId,
    iterations: usize,
    exploration_coef: f64,
    time_limit: Option<Duration>,
    random: R
}

impl<T: Game, E: Enumerate<T::Payload, T::Action>> MctsAgent<T, E>{
    /// Creates a new MCTS bot with the default configuration.
    ///
    /// # Parameters
    /// - `game`: The reducer used to advance hypothetical states.
    /// - `enumerate`: Lists the legal actions of a player.
    /// - `player_id`: The player this bot acts for.
    pub fn new(game: T, enumerate: E, player_id: PlayerId) -> Self{
        let config = MctsConfig::DEFAULT;

        MctsAgent {
            game,
            enumerate,
            player_id,
            iterations: config.iterations,
            exploration_coef: config.exploration_coef,
            time_limit: config.time_limit,
            random: SeededRandom::new(config.seed)
        }
    }

    /// Creates a new MCTS bot from a specified configuration.
    ///
    /// # Returns
    /// `Err(_)` if the configuration does not pass [`MctsConfig::validate`].
    pub fn from_config(game: T, enumerate: E, player_id: PlayerId, config: &MctsConfig) -> Result<Self, MctsError>{
        config.validate()?;

        Ok(MctsAgent {
            game,
            enumerate,
            player_id,
            iterations: config.iterations,
            exploration_coef: config.exploration_coef,
            time_limit: config.time_limit,
            random: SeededRandom::new(config.seed)
        })
    }
}

impl<T, E, R> MctsAgent<T, E, R>{
    /// Replaces the random source of this bot.
    pub fn with_random<S: RandomSource>(self, random: S) -> MctsAgent<T, E, S>{
        MctsAgent {
            game: self.game,
            enumerate: self.enumerate,
            player_id: self.player_id,
            iterations: self.iterations,
            exploration_coef: self.exploration_coef,
            time_limit: self.time_limit,
            random
        }
    }

    /// Gives access to the random source, e.g. to reseed it between games.
    #[inline]
    pub fn random_mut(&mut self) -> &mut R{
        &mut self.random
    }

    /// Search budget per decision.
    #[inline]
    pub fn iterations(&self) -> usize{
        self.iterations
    }

    /// The exploration coefficient of the UCT formula.
    #[inline]
    pub fn exploration_coef(&self) -> f64{
        self.exploration_coef
    }
}

impl<T, E, R> MctsAgent<T, E, R>
where
    T: Game,
    E: Enumerate<T::Payload, T::Action>,
    R: RandomSource
{
    /// Builds a node, listing its legal actions once and for all.
    fn create_node(&self, state: GameState<T::Payload>, incoming_action: Option<T::Action>) -> SearchNode<T::Payload, T::Action>{
        let untried_actions = match state.ctx.player_to_move(){
            Some(player) => self.enumerate.enumerate(&state.payload, &state.ctx, player),
            None => Vec::new()
        };

        SearchNode { state, incoming_action, untried_actions, visits: 0, wins: 0 }
    }

    /// Descends from the root following the best UCT child until a node
    /// with untried actions, or without children, is reached.
    fn select(&self, tree: &SearchTree<T::Payload, T::Action>) -> NodeId{
        let mut id = tree.root();

        loop{
            let node = tree.get(id);

            if !node.get().untried_actions.is_empty() || node.children().is_empty(){
                return id;
            }

            let parent_visits = node.get().visits;
            let best = utils::first_max_by(node.children().iter().copied(), |child|{
                tree.get(*child).get().uct(parent_visits, self.exploration_coef)
            });

            match best{
                Some(child) => id = child,
                None => return id
            }
        }
    }

    /// Expands one untried action of `id`, chosen uniformly at random.
    ///
    /// # Returns
    /// The new child, or `id` itself when it has nothing left to expand.
    fn expand(&mut self, tree: &mut SearchTree<T::Payload, T::Action>, id: NodeId) -> NodeId{
        let untried = &mut tree.get_mut(id).get_mut().untried_actions;

        if untried.is_empty(){
            return id;
        }

        let index = utils::uniform_index(untried.len(), &mut self.random);
        let action = untried.remove(index);

        let child_state = self.game.apply(&tree.get(id).get().state, &action);
        let child = self.create_node(child_state, Some(action));

        tree.add_child(id, child)
    }

    /// Plays uniformly random actions from `state` until the game is over.
    ///
    /// # Returns
    /// The result of the game, or `None` if a state without any legal action
    /// was reached before the game concluded.
    fn playout(&mut self, state: &GameState<T::Payload>) -> Option<GameOver>{
        let mut state = state.clone();

        loop{
            if let Some(result) = &state.ctx.gameover{
                return Some(result.clone());
            }

            let Some(player) = state.ctx.player_to_move() else{
                trace!(turn = state.ctx.turn, "playout stopped: nobody to move");
                return None;
            };

            let actions = self.enumerate.enumerate(&state.payload, &state.ctx, player);
            if actions.is_empty(){
                trace!(turn = state.ctx.turn, player, "playout stopped: no legal action");
                return None;
            }

            let index = utils::uniform_index(actions.len(), &mut self.random);
            state = self.game.apply(&state, &actions[index]);
        }
    }

    /// Credits a playout result to `id` and every ancestor up to the root.
    ///
    /// A draw is rewarded exactly like a win of `root_player`.
    fn backpropagate(tree: &mut SearchTree<T::Payload, T::Action>, id: NodeId, result: Option<&GameOver>, root_player: PlayerId){
        let reward = match result{
            Some(GameOver::Winner(winner)) if *winner == root_player => 1,
            Some(GameOver::Draw) => 1,
            _ => 0
        };

        let mut current = Some(id);
        while let Some(id) = current{
            let node = tree.get_mut(id);
            node.get_mut().visits += 1;
            node.get_mut().wins += reward;
            current = node.get_parent();
        }
    }

    /// Builds the search tree for `state`.
    ///
    /// Runs the configured number of iterations, or fewer if the time limit
    /// expires first. The root of the returned tree is visited once per
    /// iteration that ran.
    pub fn search(&mut self, state: &GameState<T::Payload>) -> SearchTree<T::Payload, T::Action>{
        let started = Instant::now();
        let root_player = state.ctx.current_player;
        let mut tree = Tree::new_root(self.create_node(state.clone(), None));

        for iteration in 0..self.iterations{
            if let Some(limit) = self.time_limit{
                if iteration > 0 && started.elapsed() >= limit{
                    debug!(iteration, ?limit, "search stopped by time limit");
                    break;
                }
            }

            let leaf = self.select(&tree);
            let child = self.expand(&mut tree, leaf);
            let result = self.playout(&tree.get(child).get().state);
            Self::backpropagate(&mut tree, child, result.as_ref(), root_player);
        }

        tree
    }

    /// Picks the root child with the best win ratio, first one on ties.
    fn best_child(tree: &SearchTree<T::Payload, T::Action>) -> Option<NodeId>{
        let root = tree.get(tree.root());
        utils::first_max_by(root.children().iter().copied(), |child| tree.get(*child).get().ratio())
    }
}

impl<T, E, R> Agent<T::Payload, T::Action> for MctsAgent<T, E, R>
where
    T: Game,
    E: Enumerate<T::Payload, T::Action>,
    R: RandomSource
{
    #[inline]
    fn player_id(&self) -> PlayerId{
        self.player_id
    }

    fn decide(&mut self, state: &GameState<T::Payload>) -> Result<Decision<T::Payload, T::Action>, MctsError>{
        let tree = self.search(state);

        let best = Self::best_child(&tree).ok_or(MctsError::NoLegalActions(self.player_id))?;
        let node = tree.get(best).get();
        let action = node.incoming_action.clone().ok_or(MctsError::NoLegalActions(self.player_id))?;

        debug!(
            player = self.player_id,
            iterations = tree.get(tree.root()).get().visits,
            nodes = tree.len(),
            ratio = node.ratio(),
            ?action,
            "mcts decision"
        );

        Ok(Decision { action, tree: Some(tree) })
    }
}
