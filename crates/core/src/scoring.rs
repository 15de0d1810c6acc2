//! Scoring module - line points, speed steps and level transitions
//!
//! Every 500 points the in-level score is banked, the speed goes up by one and
//! the gravity interval shrinks by 50 ms. Once the interval reaches the flash
//! duration the level is the last one.

use crate::types::{FLASH_TIME, INIT_TIME, LEVEL_SCORE, LINE_SCORES, MAX_LEVEL, TIME_SLICE};

/// Points for clearing `rows` rows in one placement
pub fn line_score(rows: usize) -> u32 {
    LINE_SCORES.get(rows).copied().unwrap_or(0)
}

/// Gravity interval a level starts at, in ms
pub fn base_sleep(level: u8) -> u32 {
    let level = level.clamp(1, MAX_LEVEL) as u32;
    (MAX_LEVEL as u32 - level + 1) * INIT_TIME / MAX_LEVEL as u32
}

/// Speed a level starts at
pub fn base_speed(level: u8) -> u32 {
    (INIT_TIME - base_sleep(level)) / TIME_SLICE
}

/// What a line clear did to the level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    /// Score stayed below the threshold
    Continue,
    /// Threshold crossed, another level follows
    NextLevel,
    /// Threshold crossed at the fastest interval
    LastLevel,
}

/// Score and speed of the level being played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Points since the last threshold crossing
    pub score: u32,
    /// Points converted at threshold crossings this game
    pub banked: u32,
    pub speed: u32,
    /// Gravity interval in ms
    pub sleep_ms: u32,
}

impl Progress {
    /// Fresh progress at the start of `level`
    pub fn start(level: u8) -> Self {
        Self {
            score: 0,
            banked: 0,
            speed: base_speed(level),
            sleep_ms: base_sleep(level),
        }
    }

    /// Add the points for `rows` cleared rows
    pub fn add_lines(&mut self, rows: usize) -> LevelOutcome {
        self.score += line_score(rows);
        if self.score < LEVEL_SCORE {
            return LevelOutcome::Continue;
        }

        self.score -= LEVEL_SCORE;
        self.banked += LEVEL_SCORE;
        self.speed += 1;
        self.sleep_ms = self.sleep_ms.saturating_sub(TIME_SLICE);
        if self.sleep_ms <= FLASH_TIME {
            LevelOutcome::LastLevel
        } else {
            LevelOutcome::NextLevel
        }
    }

    /// Banked points plus the running score
    pub fn total(&self) -> u32 {
        self.banked + self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_table() {
        assert_eq!(line_score(0), 0);
        assert_eq!(line_score(1), 10);
        assert_eq!(line_score(2), 30);
        assert_eq!(line_score(3), 50);
        assert_eq!(line_score(4), 100);
        assert_eq!(line_score(5), 0);
    }

    #[test]
    fn test_level_bases() {
        assert_eq!((base_speed(1), base_sleep(1)), (0, 900));
        assert_eq!((base_speed(2), base_sleep(2)), (6, 600));
        assert_eq!((base_speed(3), base_sleep(3)), (12, 300));
    }

    #[test]
    fn test_threshold_banks_points() {
        let mut p = Progress::start(1);
        p.score = 490;
        assert_eq!(p.add_lines(1), LevelOutcome::NextLevel);
        assert_eq!(p.score, 0);
        assert_eq!(p.banked, 500);
        assert_eq!(p.speed, 1);
        assert_eq!(p.sleep_ms, 850);
        assert_eq!(p.total(), 500);
    }

    #[test]
    fn test_overflow_carries_into_next_step() {
        let mut p = Progress::start(1);
        p.score = 450;
        p.add_lines(4);
        assert_eq!(p.score, 50);
    }

    #[test]
    fn test_fastest_interval_is_last_level() {
        let mut p = Progress::start(3);
        p.score = 490;
        assert_eq!(p.add_lines(1), LevelOutcome::NextLevel);
        p.score = 490;
        assert_eq!(p.add_lines(1), LevelOutcome::LastLevel);
        assert_eq!(p.sleep_ms, 200);
        assert_eq!(p.banked, 1000);
    }

    #[test]
    fn test_each_crossing_is_one_step() {
        let mut p = Progress::start(1);
        for step in 1..=2 {
            p.score = 490;
            assert_eq!(p.add_lines(1), LevelOutcome::NextLevel);
            assert_eq!((p.speed, p.sleep_ms), (step, 900 - 50 * step));
        }
    }

    proptest::proptest! {
        #[test]
        fn total_is_conserved(level in 1u8..=3, clears in proptest::collection::vec(0usize..=4, 0..300)) {
            let mut p = Progress::start(level);
            let mut points = 0;
            for rows in clears {
                points += line_score(rows);
                let before = p.sleep_ms;
                let outcome = p.add_lines(rows);
                proptest::prop_assert!(p.score < LEVEL_SCORE);
                proptest::prop_assert_eq!(p.total(), points);
                if outcome != LevelOutcome::Continue {
                    proptest::prop_assert_eq!(p.sleep_ms, before.saturating_sub(TIME_SLICE));
                }
            }
        }
    }
}
