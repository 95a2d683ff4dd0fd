pub mod config;
pub mod controller;
pub mod day;
pub mod input_file;
pub mod solver;
pub mod timing;

pub use config::{ConfigError, UiConfig};
pub use controller::{
    Controller, Evaluation, FileDecision, InputSnapshot, PageView, SlotUpdate, TimingMode,
    COMPUTING_TEXT, FAILED_TEXT,
};
pub use day::{parse_day_value, Day, DayError, ImplementedDays, FIRST_DAY, LAST_DAY, PART_COUNT};
pub use input_file::{day_hint, is_puzzle_input_name, resolve_drop, DropSource, INPUT_FILE_SUFFIX};
pub use solver::{Clock, SolutionDelivery, SolutionSink, SolveStatus, Solver};
pub use timing::SolveTimings;
