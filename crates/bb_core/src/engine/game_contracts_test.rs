// crates/bb_core/src/engine/game_contracts_test.rs

#[cfg(test)]
mod ci_gates {
    use crate::engine::config::EngineConfig;
    use crate::engine::game::{simulate_game, GameEngine};
    use crate::error::GameError;
    use crate::models::team::fixtures::team;
    use crate::models::{BoxScore, GamePlan, GameResult, LeagueBaseline, Side};

    const SEEDS: u64 = 60;

    fn plan(seed: u64) -> GamePlan {
        GamePlan {
            away: team("Away", 100),
            home: team("Home", 200),
            league: LeagueBaseline::default(),
            seed,
            game_number: 1,
            play_by_play: false,
        }
    }

    fn games(config: &EngineConfig) -> Vec<GameResult> {
        (0..SEEDS)
            .map(|seed| simulate_game(plan(seed), config).unwrap())
            .collect()
    }

    fn runs(box_score: &BoxScore) -> u32 {
        box_score.batting.iter().map(|row| row.r).sum()
    }

    fn earned_runs(box_score: &BoxScore) -> u32 {
        box_score.pitching.iter().map(|row| row.er).sum()
    }

    // ============================================
    // CI_GATE_RUNS_BALANCE
    // Contract: score == runs scored == line score == opponent runs allowed
    // ============================================

    #[test]
    fn ci_gate_runs_balance() {
        for result in games(&EngineConfig::default()) {
            for side in [Side::Away, Side::Home] {
                let score = result.score(side);
                let line: u32 = result.line_score.side(side).iter().sum();
                assert_eq!(line, score, "seed {}", result.seed);
                assert_eq!(runs(result.box_score(side)), score, "seed {}", result.seed);
                assert_eq!(
                    earned_runs(result.box_score(side.opponent())),
                    score,
                    "seed {}",
                    result.seed
                );
            }
        }
    }

    // ============================================
    // CI_GATE_NEVER_TIED
    // Contract: a finished game has a winner and at least 9 innings
    // ============================================

    #[test]
    fn ci_gate_never_tied() {
        for result in games(&EngineConfig::default()) {
            assert_ne!(result.away_score, result.home_score);
            assert!(result.innings[0] >= 9);
            let expected = if result.home_score > result.away_score {
                Side::Home
            } else {
                Side::Away
            };
            assert_eq!(result.winner, expected);
            // 9회말은 홈팀이 앞서면 생략
            assert!(result.innings[1] == result.innings[0] || result.innings[1] + 1 == result.innings[0]);
            assert_eq!(result.line_score.away.len(), usize::from(result.innings[0]));
            assert_eq!(result.line_score.home.len(), usize::from(result.innings[1]));
        }
    }

    // ============================================
    // CI_GATE_OUTS_PER_INNING
    // Contract: the away half always ends on the third out
    // ============================================

    #[test]
    fn ci_gate_outs_per_inning() {
        for result in games(&EngineConfig::default()) {
            let home_outs = result.home_box.total_outs_recorded();
            assert_eq!(home_outs, 3 * u32::from(result.innings[0]), "seed {}", result.seed);
            // walk-off ends the bottom half early
            let away_outs = result.away_box.total_outs_recorded();
            assert!(away_outs <= 3 * u32::from(result.innings[1]));
            assert!(away_outs + 3 >= 3 * u32::from(result.innings[1]));
        }
    }

    // ============================================
    // CI_GATE_DECISIONS
    // Contract: exactly one W and one L, at most one save, never to the winner,
    // one BS row per blown save
    // ============================================

    #[test]
    fn ci_gate_decisions() {
        for result in games(&EngineConfig::default()) {
            let winner = result.box_score(result.winner);
            let loser = result.box_score(result.winner.opponent());
            let wins: u32 = winner.pitching.iter().map(|p| p.w).sum();
            let losses: u32 = loser.pitching.iter().map(|p| p.l).sum();
            assert_eq!(wins, 1, "seed {}", result.seed);
            assert_eq!(losses, 1, "seed {}", result.seed);
            assert_eq!(loser.pitching.iter().map(|p| p.w).sum::<u32>(), 0);
            assert_eq!(winner.pitching.iter().map(|p| p.l).sum::<u32>(), 0);

            let d = &result.decisions;
            assert_eq!(winner.pitching_line(d.winning_pitcher).map(|p| p.w), Some(1));
            assert_eq!(loser.pitching_line(d.losing_pitcher).map(|p| p.l), Some(1));

            let saves: u32 = winner.pitching.iter().map(|p| p.sv).sum();
            assert!(saves <= 1);
            assert_eq!(saves, u32::from(d.save.is_some()));
            if let Some(closer) = d.save {
                assert_ne!(closer, d.winning_pitcher);
                for hold in &d.holds {
                    assert_ne!(*hold, closer);
                    assert_eq!(winner.pitching_line(*hold).map(|p| p.hld), Some(1));
                }
            } else {
                assert!(d.holds.is_empty());
            }
            assert_eq!(loser.pitching.iter().map(|p| p.sv).sum::<u32>(), 0);

            let bs: u32 = [winner, loser]
                .iter()
                .flat_map(|b| b.pitching.iter())
                .map(|p| p.bs)
                .sum();
            assert_eq!(bs as usize, d.blown_saves.len(), "seed {}", result.seed);
            if let Some(closer) = d.save {
                assert!(!d.blown_saves.contains(&closer));
            }
        }
    }

    // ============================================
    // CI_GATE_WALK_OFF
    // Contract: a home win in the final bottom half stops on the go-ahead play
    // ============================================

    #[test]
    fn ci_gate_walk_off() {
        let mut walk_offs = 0;
        for result in games(&EngineConfig::default()) {
            if result.winner != Side::Home || result.innings[1] != result.innings[0] {
                continue;
            }
            // 마지막 말 공격 전에는 동점이거나 뒤짐
            let last = *result.line_score.home.last().unwrap();
            assert!(last > 0, "seed {}", result.seed);
            assert!(result.home_score - last <= result.away_score, "seed {}", result.seed);
            // 3아웃 전에 종료
            let away_outs = result.away_box.total_outs_recorded();
            assert!(away_outs < 3 * u32::from(result.innings[1]), "seed {}", result.seed);
            walk_offs += 1;
        }
        assert!(walk_offs > 0);
    }

    // ============================================
    // CI_GATE_BOX_MIRROR
    // Contract: one team's batting mirrors the other team's pitching
    // ============================================

    #[test]
    fn ci_gate_box_mirror() {
        for result in games(&EngineConfig::default()) {
            for side in [Side::Away, Side::Home] {
                let bat = result.box_score(side).batting_totals.as_ref().unwrap();
                let pit = result.box_score(side.opponent()).pitching_totals.as_ref().unwrap();
                assert_eq!(bat.h, pit.h);
                assert_eq!(bat.hr, pit.hr);
                assert_eq!(bat.bb, pit.bb);
                assert_eq!(bat.so, pit.so);
                assert_eq!(bat.hbp, pit.hbp);
                assert_eq!(bat.doubles, pit.doubles);
                assert_eq!(bat.triples, pit.triples);
                assert_eq!(bat.ab + bat.bb + bat.hbp + bat.sf, pit.batters_faced);
            }
        }
    }

    // ============================================
    // CI_GATE_BATTING_ORDER
    // Contract: plate appearances follow the order 1..9 and wrap
    // ============================================

    #[test]
    fn ci_gate_batting_order() {
        for result in games(&EngineConfig::default()) {
            for side in [Side::Away, Side::Home] {
                let pa: Vec<u32> = result
                    .box_score(side)
                    .batting
                    .iter()
                    .map(|row| row.ab + row.bb + row.hbp + row.sf)
                    .collect();
                assert_eq!(pa.len(), 9);
                for pair in pa.windows(2) {
                    assert!(pair[0] >= pair[1], "seed {} {:?}", result.seed, pa);
                }
                assert!(pa[0] - pa[8] <= 1);
            }
        }
    }

    // ============================================
    // CI_GATE_DETERMINISM
    // Contract: same plan + config => identical result
    // ============================================

    #[test]
    fn ci_gate_determinism() {
        let config = EngineConfig::default();
        for seed in [0, 7, 12345, u64::MAX] {
            let a = serde_json::to_string(&simulate_game(plan(seed), &config).unwrap()).unwrap();
            let b = serde_json::to_string(&simulate_game(plan(seed), &config).unwrap()).unwrap();
            assert_eq!(a, b);
        }
        let a = simulate_game(plan(1), &config).unwrap();
        let b = simulate_game(plan(2), &config).unwrap();
        assert_ne!(
            serde_json::to_string(&a.line_score).unwrap(),
            serde_json::to_string(&b.line_score).unwrap()
        );
    }

    // ============================================
    // CI_GATE_EXTRA_INNING_RUNNER
    // Contract: runner on 2nd from the 10th only when the rule is on
    // ============================================

    fn first_extra_inning_game(config: &EngineConfig) -> GameResult {
        (0..500)
            .filter_map(|seed| {
                let mut p = plan(seed);
                p.play_by_play = true;
                // 긴 연장은 불펜 소진 가능: 건너뜀
                GameEngine::new(p, config.clone()).ok()?.simulate().ok()
            })
            .find(|result| result.is_extra_innings())
            .unwrap()
    }

    #[test]
    fn ci_gate_extra_inning_runner_realistic() {
        let result = first_extra_inning_game(&EngineConfig::realistic());
        let log = result.play_by_play.as_ref().unwrap();
        let placed = log.iter().filter(|l| l.ends_with("starts the inning on 2nd")).count();
        // one per extra half-inning played
        let extra_halves = usize::from(result.innings[0] - 9) + usize::from(result.innings[1] - 9);
        assert_eq!(placed, extra_halves);
        assert!(result.summary().ends_with(&format!("({})", result.innings[0])));
    }

    #[test]
    fn ci_gate_extra_inning_runner_classic() {
        let result = first_extra_inning_game(&EngineConfig::classic());
        let log = result.play_by_play.as_ref().unwrap();
        assert!(!log.iter().any(|l| l.contains("starts the inning on 2nd")));
    }

    #[test]
    fn ci_gate_no_runner_in_regulation() {
        let mut p = plan(3);
        p.play_by_play = true;
        let result = simulate_game(p, &EngineConfig::default()).unwrap();
        if !result.is_extra_innings() {
            let log = result.play_by_play.unwrap();
            assert!(!log.iter().any(|l| l.contains("starts the inning on 2nd")));
        }
    }

    // ============================================
    // CI_GATE_ERRORS
    // ============================================

    #[test]
    fn ci_gate_roster_exhausted() {
        let mut p = plan(9);
        p.home.closers.clear();
        p.home.middle_relievers.clear();
        p.home.starting_pitcher.avg_batters_faced = 3.0;
        assert_eq!(
            simulate_game(p, &EngineConfig::default()).unwrap_err(),
            GameError::RosterExhausted {
                team: "Home".to_string()
            }
        );
    }

    #[test]
    fn ci_gate_invalid_statistic() {
        let mut p = plan(9);
        p.away.lineup[0].home_run_rate = -0.1;
        let err = simulate_game(p, &EngineConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidStatistic {
                name: "home_run_rate",
                ..
            }
        ));
        assert!(err.is_game_local());
    }

    #[test]
    fn ci_gate_duplicate_pitcher() {
        let mut p = plan(9);
        p.home.closers[0].id = p.home.starting_pitcher.id;
        assert!(matches!(
            simulate_game(p, &EngineConfig::default()),
            Err(GameError::InvalidLineup { .. })
        ));
    }

    #[test]
    fn ci_gate_no_steals_when_disabled() {
        let config = EngineConfig::deterministic();
        for seed in 0..20 {
            let result = simulate_game(plan(seed), &config).unwrap();
            for side in [Side::Away, Side::Home] {
                let totals = result.box_score(side).batting_totals.as_ref().unwrap();
                assert_eq!(totals.sb + totals.cs, 0);
            }
        }
    }
}
