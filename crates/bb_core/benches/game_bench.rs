//! Game and day throughput benchmarks

use bb_core::engine::day::ScheduledGame;
use bb_core::models::FieldPosition;
use bb_core::{
    simulate_day, simulate_game, BatterStats, DayPlan, EngineConfig, GamePlan, LeagueBaseline,
    PitcherStats, PlayerId, TeamSetup,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn batter(id: u32) -> BatterStats {
    BatterStats {
        id: PlayerId(id),
        name: format!("Batter {}", id),
        position: FieldPosition::DesignatedHitter,
        obp: 0.300 + f64::from(id % 7) * 0.01,
        walk_rate: 0.2,
        hbp_rate: 0.03,
        home_run_rate: 0.07,
        triple_rate: 0.006,
        double_rate: 0.12,
        strikeout_rate: 0.32,
        gidp_rate: 0.02,
        steal_attempt_rate: 0.05,
        steal_success_rate: 0.75,
        condition: 100.0,
    }
}

fn pitcher(id: u32, avg_batters_faced: f64) -> PitcherStats {
    PitcherStats {
        id: PlayerId(id),
        name: format!("Pitcher {}", id),
        obp_allowed: 0.31,
        walk_rate: 0.2,
        hbp_rate: 0.03,
        home_run_rate: 0.07,
        strikeout_rate: 0.32,
        avg_batters_faced,
        condition: 100.0,
        rotation_index: None,
    }
}

fn team(name: &str, id_base: u32) -> TeamSetup {
    TeamSetup {
        name: name.to_string(),
        lineup: (1..=9).map(|i| batter(id_base + i)).collect(),
        starting_pitcher: pitcher(id_base + 50, 25.0),
        closers: vec![pitcher(id_base + 60, 5.0), pitcher(id_base + 61, 5.0)],
        middle_relievers: (0..12).map(|i| pitcher(id_base + 70 + i, 12.0)).collect(),
    }
}

fn bench_single_game(c: &mut Criterion) {
    let config = EngineConfig::default();
    let plan = GamePlan {
        away: team("Away", 100),
        home: team("Home", 200),
        league: LeagueBaseline::default(),
        seed: 42,
        game_number: 1,
        play_by_play: false,
    };

    c.bench_function("simulate_game", |b| {
        b.iter(|| simulate_game(black_box(plan.clone()), &config))
    });
}

fn bench_full_day(c: &mut Criterion) {
    let config = EngineConfig::default();
    let plan = DayPlan {
        season_seed: 2024,
        day: 1,
        games: (0..15)
            .map(|i| ScheduledGame {
                away: team(&format!("Away{}", i), 1000 * (2 * i + 1)),
                home: team(&format!("Home{}", i), 1000 * (2 * i + 2)),
            })
            .collect(),
        league: LeagueBaseline::default(),
        play_by_play: false,
    };

    c.bench_function("simulate_day_15_games", |b| {
        b.iter(|| simulate_day(black_box(&plan), &config))
    });
}

criterion_group!(benches, bench_single_game, bench_full_day);
criterion_main!(benches);
