//! Decision throughput of the MCTS bot.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use reducer_mcts::test_utils::{tictactoe_moves, ClickCell, TicTacToe};
use reducer_mcts::{simulate, Agent, Bots, Game, MctsAgent, MctsConfig, SimulationConfig};

fn bench_decide_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("decide_iterations");
    let state = TicTacToe.setup();

    for iterations in [100, 500, 1000, 2000] {
        group.throughput(Throughput::Elements(iterations as u64));
        group.bench_with_input(BenchmarkId::new("tictactoe", iterations), &iterations, |b, &iterations| {
            let config = MctsConfig { iterations, seed: Some(42), ..MctsConfig::DEFAULT };
            let mut bot = MctsAgent::from_config(TicTacToe, tictactoe_moves, 0, &config).unwrap();

            b.iter(|| black_box(bot.decide(black_box(&state)).unwrap().action));
        });
    }

    group.finish();
}

fn bench_decide_midgame(c: &mut Criterion) {
    let game = TicTacToe;
    let state = [4, 0, 8].iter().fold(game.setup(), |state, cell| {
        let player = state.ctx.current_player;
        game.apply(&state, &ClickCell { cell: *cell, player })
    });

    let config = MctsConfig { iterations: 500, seed: Some(7), ..MctsConfig::DEFAULT };
    let mut bot = MctsAgent::from_config(game, tictactoe_moves, 1, &config).unwrap();

    c.bench_function("decide_midgame_500", |b| {
        b.iter(|| black_box(bot.decide(black_box(&state)).unwrap().action))
    });
}

fn bench_full_game(c: &mut Criterion) {
    let config = MctsConfig { iterations: 200, seed: Some(1), ..MctsConfig::DEFAULT };

    c.bench_function("simulate_mcts_vs_mcts_200", |b| {
        b.iter(|| {
            let mut bots = Bots::per_player()
                .with(MctsAgent::from_config(TicTacToe, tictactoe_moves, 0, &config).unwrap())
                .with(MctsAgent::from_config(TicTacToe, tictactoe_moves, 1, &MctsConfig { seed: Some(2), ..config.clone() }).unwrap());

            black_box(simulate(&TicTacToe, &mut bots, TicTacToe.setup(), &SimulationConfig::DEFAULT).unwrap())
        })
    });
}

criterion_group!(benches, bench_decide_iterations, bench_decide_midgame, bench_full_game);
criterion_main!(benches);
