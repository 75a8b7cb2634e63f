//! Difficulty and score bookkeeping between rounds.

use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    Success,
    Failure,
}

/// Counters carried from one round to the next.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub difficulty: u32,
    pub level: u32,
}

/// Result of applying a round outcome to the current standing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub standing: Standing,
    pub score_delta: u32,
}

pub fn next_difficulty(current: u32, outcome: RoundOutcome, floor: u32) -> u32 {
    match outcome {
        RoundOutcome::Success => current.saturating_add(1),
        RoundOutcome::Failure => current.saturating_sub(1).max(floor),
    }
}

pub fn next_level(progression: LevelProgression, level: u32, next_difficulty: u32) -> u32 {
    match progression {
        LevelProgression::FollowsDifficulty => next_difficulty,
        LevelProgression::EveryRound => level.saturating_add(1),
    }
}

/// Points for one correct click, awarded immediately.
pub fn click_reward(scoring: &Scoring, level: u32) -> u32 {
    scoring.per_click.saturating_mul(level)
}

/// Points for finishing a round, `rows` being the height of the grid it was played on.
pub fn round_reward(scoring: &Scoring, outcome: RoundOutcome, level: u32, rows: Dim) -> u32 {
    match outcome {
        RoundOutcome::Success => scoring
            .per_round
            .saturating_mul(level)
            .saturating_add(scoring.per_row.saturating_mul(rows.into())),
        RoundOutcome::Failure => 0,
    }
}

pub fn settle(rules: &Rules, standing: Standing, outcome: RoundOutcome, rows: Dim) -> Settlement {
    let difficulty = next_difficulty(standing.difficulty, outcome, rules.difficulty_floor);
    let level = next_level(rules.level, standing.level, difficulty);
    Settlement {
        standing: Standing { difficulty, level },
        score_delta: round_reward(&rules.scoring, outcome, standing.level, rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RoundOutcome::*;

    #[test]
    fn success_always_adds_exactly_one() {
        for floor in 1..=2 {
            for difficulty in floor..50 {
                assert_eq!(next_difficulty(difficulty, Success, floor), difficulty + 1);
            }
        }
    }

    #[test]
    fn failure_never_goes_below_floor() {
        for floor in 1..=2 {
            for difficulty in floor..50 {
                let next = next_difficulty(difficulty, Failure, floor);
                assert!(next >= floor);
                assert_eq!(next, (difficulty - 1).max(floor));
            }
        }
    }

    #[test]
    fn sprint_round_pays_ten_per_difficulty() {
        let rules = Rules::sequence_sprint();
        let standing = Standing {
            difficulty: 3,
            level: 3,
        };

        let won = settle(&rules, standing, Success, 5);
        assert_eq!(won.score_delta, 30);
        assert_eq!(won.standing, Standing { difficulty: 4, level: 4 });

        let lost = settle(&rules, standing, Failure, 5);
        assert_eq!(lost.score_delta, 0);
        assert_eq!(lost.standing, Standing { difficulty: 2, level: 2 });
    }

    #[test]
    fn memory_grid_level_advances_even_on_failure() {
        let rules = Rules::memory_grids();
        let standing = Standing {
            difficulty: 2,
            level: 4,
        };

        let lost = settle(&rules, standing, Failure, 2);
        assert_eq!(lost.standing, Standing { difficulty: 2, level: 5 });
        assert_eq!(lost.score_delta, 0);

        let won = settle(&rules, standing, Success, 2);
        assert_eq!(won.standing, Standing { difficulty: 3, level: 5 });
        assert_eq!(won.score_delta, 100);
        assert_eq!(click_reward(&rules.scoring, standing.level), 40);
    }
}
