use std::fmt;

use crate::day::PART_COUNT;

pub const TIMING_DECIMALS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveTimings {
    pub part1_ms: f64,
    pub part2_ms: f64,
    pub total_ms: f64,
}

impl SolveTimings {
    pub fn from_marks(start_ms: f64, end_times: [Option<f64>; PART_COUNT], finished_ms: f64) -> Self {
        let part1_end = end_times[0].unwrap_or(start_ms);
        let part2_end = end_times[1].unwrap_or(part1_end);
        Self {
            part1_ms: part1_end - start_ms,
            part2_ms: part2_end - part1_end,
            total_ms: finished_ms - start_ms,
        }
    }
}

impl fmt::Display for SolveTimings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Part\u{a0}1: {:.prec$}\u{a0}ms | Part\u{a0}2: {:.prec$}\u{a0}ms | Total {:.prec$}\u{a0}ms",
            self.part1_ms,
            self.part2_ms,
            self.total_ms,
            prec = TIMING_DECIMALS
        )
    }
}
