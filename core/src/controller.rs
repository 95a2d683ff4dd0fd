use crate::day::{parse_day_value, part_slot, Day, ImplementedDays, FIRST_DAY, LAST_DAY, PART_COUNT};
use crate::input_file::{day_hint, is_puzzle_input_name};
use crate::solver::{Clock, SolutionDelivery, SolutionSink, SolveStatus, Solver};
use crate::timing::SolveTimings;

pub const COMPUTING_TEXT: &str = "computing…";
pub const FAILED_TEXT: &str = "failed";

pub trait PageView {
    fn result_slot_count(&self) -> usize;
    fn set_result_text(&mut self, slot: usize, text: &str);
    fn set_timings_text(&mut self, text: &str);
    fn add_day_option(&mut self, day: Day);
    fn day_value(&self) -> String;
    fn set_day_value(&mut self, day: Day);
    fn puzzle_text(&self) -> String;
    fn set_puzzle_text(&mut self, text: &str);
    fn set_drag_indicator(&mut self, active: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingMode {
    Tracked,
    Untracked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSnapshot {
    pub day: Option<i32>,
    pub text: String,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            day: Some(0),
            text: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Unchanged,
    Cleared,
    Solved {
        day: Day,
        status: SolveStatus,
        timings: Option<SolveTimings>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDecision {
    Ignored,
    Read { day_hint: Option<Day> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotUpdate {
    Ignored,
    Failed { slot: usize },
    Solved { slot: usize },
}

pub struct Controller<V, C> {
    view: V,
    clock: C,
    timing: TimingMode,
    implemented: ImplementedDays,
    last_input: InputSnapshot,
    end_times: [Option<f64>; PART_COUNT],
}

impl<V: PageView, C: Clock> Controller<V, C> {
    pub fn start<S: Solver + ?Sized>(mut view: V, clock: C, solver: &S, timing: TimingMode) -> Self {
        let implemented = ImplementedDays::probe(|day| solver.has_implementation(day));
        for day in implemented.as_slice() {
            view.add_day_option(*day);
        }
        Self {
            view,
            clock,
            timing,
            implemented,
            last_input: InputSnapshot::default(),
            end_times: [None; PART_COUNT],
        }
    }

    pub fn implemented_days(&self) -> &ImplementedDays {
        &self.implemented
    }

    pub fn last_input(&self) -> &InputSnapshot {
        &self.last_input
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn evaluate<S: Solver + ?Sized>(&mut self, solver: &S) -> Evaluation {
        let next = InputSnapshot {
            day: parse_day_value(&self.view.day_value()),
            text: self.view.puzzle_text(),
        };
        if next == self.last_input {
            return Evaluation::Unchanged;
        }
        self.last_input = next;

        let day = match self.last_input.day.map(Day::new) {
            Some(Ok(day)) if !self.last_input.text.is_empty() => day,
            _ => {
                self.fill_results("");
                return Evaluation::Cleared;
            }
        };

        self.fill_results(COMPUTING_TEXT);
        self.end_times = [None; PART_COUNT];
        let text = self.last_input.text.clone();
        let start_ms = self.clock.now_ms();
        let status = solver.solve(day, &text, self);
        let finished_ms = self.clock.now_ms();

        let timings = match self.timing {
            TimingMode::Tracked => {
                let timings = SolveTimings::from_marks(start_ms, self.end_times, finished_ms);
                self.view.set_timings_text(&timings.to_string());
                Some(timings)
            }
            TimingMode::Untracked => None,
        };
        Evaluation::Solved { day, status, timings }
    }

    pub fn accept_file(&mut self, name: &str) -> FileDecision {
        if !is_puzzle_input_name(name) {
            return FileDecision::Ignored;
        }
        let day_hint = day_hint(name).and_then(|value| self.implemented.find(value));
        if let Some(day) = day_hint {
            self.view.set_day_value(day);
        }
        FileDecision::Read { day_hint }
    }

    // Continuation of a file read. `None` means the content was not text.
    pub fn finish_file_load<S: Solver + ?Sized>(
        &mut self,
        contents: Option<String>,
        solver: &S,
    ) -> Option<Evaluation> {
        let text = contents?;
        self.view.set_puzzle_text(&text);
        Some(self.evaluate(solver))
    }

    pub fn receive_solution(&mut self, delivery: SolutionDelivery) -> SlotUpdate {
        let slot_count = self.view.result_slot_count();
        let Some(slot) = part_slot(delivery.part, slot_count) else {
            return SlotUpdate::Ignored;
        };
        if !(FIRST_DAY..=LAST_DAY).contains(&delivery.day) {
            self.view.set_result_text(slot, FAILED_TEXT);
            return SlotUpdate::Failed { slot };
        }
        // end times are reset per solve, so only deliveries made during one count
        if let Some(end) = self.end_times.get_mut(slot) {
            *end = Some(delivery.received_at_ms);
        }
        match delivery.solution.as_deref() {
            Some(solution) if !solution.is_empty() => {
                self.view.set_result_text(slot, solution);
                SlotUpdate::Solved { slot }
            }
            _ => {
                self.view.set_result_text(slot, FAILED_TEXT);
                SlotUpdate::Failed { slot }
            }
        }
    }

    pub fn set_drag_indicator(&mut self, active: bool) {
        self.view.set_drag_indicator(active);
    }

    fn fill_results(&mut self, text: &str) {
        for slot in 0..self.view.result_slot_count() {
            self.view.set_result_text(slot, text);
        }
    }
}

impl<V: PageView, C: Clock> SolutionSink for Controller<V, C> {
    fn receive_solution(&mut self, delivery: SolutionDelivery) {
        Controller::receive_solution(self, delivery);
    }
}
