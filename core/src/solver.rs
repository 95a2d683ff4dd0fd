use crate::day::Day;

#[derive(Debug, Clone, PartialEq)]
pub struct SolutionDelivery {
    pub day: i32,
    pub part: i32,
    pub solution: Option<String>,
    pub received_at_ms: f64,
}

pub trait SolutionSink {
    fn receive_solution(&mut self, delivery: SolutionDelivery);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Success,
    Failure(i32),
}

impl SolveStatus {
    pub fn from_exit_code(code: i32) -> Self {
        if code == 0 {
            SolveStatus::Success
        } else {
            SolveStatus::Failure(code)
        }
    }
}

// `solve` delivers zero or more results into `sink` before it returns.
pub trait Solver {
    fn has_implementation(&self, day: Day) -> bool;
    fn solve(&self, day: Day, input: &str, sink: &mut dyn SolutionSink) -> SolveStatus;
}

pub trait Clock {
    fn now_ms(&self) -> f64;
}
