use std::cell::{Cell, RefCell};

use aoc_web_core::{
    Clock, Controller, Day, Evaluation, FileDecision, PageView, SlotUpdate, SolutionDelivery,
    SolutionSink, SolveStatus, Solver, TimingMode, COMPUTING_TEXT, FAILED_TEXT,
};

#[derive(Default)]
struct FakePage {
    slots: usize,
    results: Vec<String>,
    timings: Option<String>,
    options: Vec<Day>,
    day_value: String,
    text: String,
    dragover: bool,
}

impl FakePage {
    fn with_slots(slots: usize) -> Self {
        Self {
            slots,
            results: vec![String::new(); slots],
            ..Self::default()
        }
    }
}

impl PageView for FakePage {
    fn result_slot_count(&self) -> usize {
        self.slots
    }

    fn set_result_text(&mut self, slot: usize, text: &str) {
        self.results[slot] = text.to_string();
    }

    fn set_timings_text(&mut self, text: &str) {
        self.timings = Some(text.to_string());
    }

    fn add_day_option(&mut self, day: Day) {
        self.options.push(day);
    }

    fn day_value(&self) -> String {
        self.day_value.clone()
    }

    fn set_day_value(&mut self, day: Day) {
        self.day_value = day.to_string();
    }

    fn puzzle_text(&self) -> String {
        self.text.clone()
    }

    fn set_puzzle_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_drag_indicator(&mut self, active: bool) {
        self.dragover = active;
    }
}

#[derive(Default)]
struct StepClock {
    now: Cell<f64>,
}

impl Clock for StepClock {
    fn now_ms(&self) -> f64 {
        let now = self.now.get() + 1.0;
        self.now.set(now);
        now
    }
}

struct ScriptedSolver {
    days: Vec<i32>,
    calls: RefCell<Vec<(i32, String)>>,
    replies: Vec<(i32, i32, Option<&'static str>)>,
    probes: RefCell<Vec<i32>>,
}

impl ScriptedSolver {
    fn new(days: &[i32]) -> Self {
        Self {
            days: days.to_vec(),
            calls: RefCell::new(Vec::new()),
            replies: Vec::new(),
            probes: RefCell::new(Vec::new()),
        }
    }

    fn replying(mut self, replies: &[(i32, i32, Option<&'static str>)]) -> Self {
        self.replies = replies.to_vec();
        self
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Solver for ScriptedSolver {
    fn has_implementation(&self, day: Day) -> bool {
        self.probes.borrow_mut().push(day.get());
        self.days.contains(&day.get())
    }

    fn solve(&self, day: Day, input: &str, sink: &mut dyn SolutionSink) -> SolveStatus {
        self.calls.borrow_mut().push((day.get(), input.to_string()));
        for (index, (reply_day, part, solution)) in self.replies.iter().enumerate() {
            sink.receive_solution(SolutionDelivery {
                day: *reply_day,
                part: *part,
                solution: solution.map(str::to_string),
                received_at_ms: 100.0 + index as f64 * 10.0,
            });
        }
        SolveStatus::Success
    }
}

fn start(solver: &ScriptedSolver) -> Controller<FakePage, StepClock> {
    Controller::start(
        FakePage::with_slots(2),
        StepClock::default(),
        solver,
        TimingMode::Tracked,
    )
}

fn delivery(day: i32, part: i32, solution: Option<&str>) -> SolutionDelivery {
    SolutionDelivery {
        day,
        part,
        solution: solution.map(str::to_string),
        received_at_ms: 0.0,
    }
}

#[test]
fn startup_lists_exactly_supported_days() {
    let solver = ScriptedSolver::new(&[3, 1, 10]);
    let controller = start(&solver);
    assert_eq!(*solver.probes.borrow(), (1..=25).collect::<Vec<_>>());
    let options: Vec<i32> = controller.view().options.iter().map(|day| day.get()).collect();
    assert_eq!(options, vec![1, 3, 10]);
    for value in 1..=25 {
        assert_eq!(
            controller.implemented_days().contains(value),
            [1, 3, 10].contains(&value)
        );
    }
}

#[test]
fn repeated_input_solves_once() {
    let solver = ScriptedSolver::new(&[1]);
    let mut controller = start(&solver);
    controller.view_mut().day_value = "1".into();
    controller.view_mut().text = "1000\n2000".into();

    assert!(matches!(controller.evaluate(&solver), Evaluation::Solved { .. }));
    assert_eq!(controller.evaluate(&solver), Evaluation::Unchanged);
    assert_eq!(solver.call_count(), 1);
    assert_eq!(solver.calls.borrow()[0], (1, "1000\n2000".to_string()));

    controller.view_mut().text.push('\n');
    assert!(matches!(controller.evaluate(&solver), Evaluation::Solved { .. }));
    assert_eq!(solver.call_count(), 2);
}

#[test]
fn invalid_input_clears_results_without_solving() {
    let solver = ScriptedSolver::new(&[1]);
    let mut controller = start(&solver);
    controller.view_mut().results = vec!["old".into(), "old".into()];

    controller.view_mut().day_value = "1".into();
    controller.view_mut().text = String::new();
    assert_eq!(controller.evaluate(&solver), Evaluation::Cleared);
    assert_eq!(controller.view().results, vec!["", ""]);

    controller.view_mut().day_value = "".into();
    controller.view_mut().text = "abc".into();
    assert_eq!(controller.evaluate(&solver), Evaluation::Cleared);

    controller.view_mut().day_value = "0".into();
    assert_eq!(controller.evaluate(&solver), Evaluation::Cleared);

    controller.view_mut().day_value = "26".into();
    assert_eq!(controller.evaluate(&solver), Evaluation::Cleared);

    assert_eq!(solver.call_count(), 0);
}

#[test]
fn initial_blank_state_is_unchanged() {
    let solver = ScriptedSolver::new(&[1]);
    let mut controller = start(&solver);
    controller.view_mut().day_value = "0".into();
    assert_eq!(controller.evaluate(&solver), Evaluation::Unchanged);
    assert_eq!(controller.last_input().day, Some(0));
}

#[test]
fn solve_shows_results_and_timings() {
    let solver = ScriptedSolver::new(&[2]).replying(&[(2, 1, Some("15")), (2, 2, Some("12"))]);
    let mut controller = start(&solver);
    controller.view_mut().day_value = "2".into();
    controller.view_mut().text = "A Y\nB X\nC Z".into();

    let evaluation = controller.evaluate(&solver);
    let Evaluation::Solved { day, status, timings } = evaluation.clone() else {
        panic!("expected a solve, got {evaluation:?}");
    };
    assert_eq!(day.get(), 2);
    assert_eq!(status, SolveStatus::Success);
    assert_eq!(controller.view().results, vec!["15", "12"]);

    // clock reads 1.0 at start and 2.0 after return; deliveries are stamped 100 and 110
    let timings = timings.expect("timings tracked");
    assert_eq!(timings.part1_ms, 99.0);
    assert_eq!(timings.part2_ms, 10.0);
    assert_eq!(timings.total_ms, 1.0);
    assert_eq!(
        controller.view().timings.as_deref(),
        Some("Part\u{a0}1: 99.00000\u{a0}ms | Part\u{a0}2: 10.00000\u{a0}ms | Total 1.00000\u{a0}ms")
    );
}

#[test]
fn untracked_mode_never_writes_timings() {
    let solver = ScriptedSolver::new(&[2]).replying(&[(2, 1, Some("15"))]);
    let mut controller = Controller::start(
        FakePage::with_slots(2),
        StepClock::default(),
        &solver,
        TimingMode::Untracked,
    );
    controller.view_mut().day_value = "2".into();
    controller.view_mut().text = "x".into();
    let evaluation = controller.evaluate(&solver);
    assert!(matches!(evaluation, Evaluation::Solved { timings: None, .. }));
    assert_eq!(controller.view().timings, None);
    assert_eq!(controller.view().results, vec!["15", COMPUTING_TEXT]);
}

#[test]
fn late_delivery_updates_display_but_not_timing() {
    let solver = ScriptedSolver::new(&[2]).replying(&[(2, 1, Some("15"))]);
    let mut controller = start(&solver);
    controller.view_mut().day_value = "2".into();
    controller.view_mut().text = "first".into();
    controller.evaluate(&solver);
    let shown = controller.view().timings.clone();
    assert_eq!(controller.view().results, vec!["15", COMPUTING_TEXT]);

    controller.receive_solution(delivery(2, 2, Some("late")));
    assert_eq!(controller.view().results, vec!["15", "late"]);
    assert_eq!(controller.view().timings, shown);

    // the late stamp (0.0) must not leak into the next solve's part 2
    controller.view_mut().text = "second".into();
    let evaluation = controller.evaluate(&solver);
    let Evaluation::Solved { timings, .. } = evaluation.clone() else {
        panic!("expected a solve, got {evaluation:?}");
    };
    let timings = timings.expect("timings tracked");
    assert_eq!(timings.part1_ms, 97.0);
    assert_eq!(timings.part2_ms, 0.0);
    assert_eq!(timings.total_ms, 1.0);
}

#[test]
fn solution_callback_fills_slots() {
    let solver = ScriptedSolver::new(&[]);
    let mut controller = start(&solver);

    assert_eq!(
        controller.receive_solution(delivery(1, 1, Some("42"))),
        SlotUpdate::Solved { slot: 0 }
    );
    assert_eq!(controller.view().results[0], "42");

    assert_eq!(
        controller.receive_solution(delivery(1, 1, None)),
        SlotUpdate::Failed { slot: 0 }
    );
    assert_eq!(controller.view().results[0], FAILED_TEXT);

    assert_eq!(
        controller.receive_solution(delivery(1, 2, Some(""))),
        SlotUpdate::Failed { slot: 1 }
    );
    assert_eq!(controller.view().results[1], FAILED_TEXT);
}

#[test]
fn malformed_callbacks_degrade_quietly() {
    let solver = ScriptedSolver::new(&[]);
    let mut controller = start(&solver);
    controller.view_mut().results = vec!["a".into(), "b".into()];

    assert_eq!(controller.receive_solution(delivery(1, 3, Some("x"))), SlotUpdate::Ignored);
    assert_eq!(controller.receive_solution(delivery(1, 0, Some("x"))), SlotUpdate::Ignored);
    assert_eq!(controller.view().results, vec!["a", "b"]);

    assert_eq!(
        controller.receive_solution(delivery(26, 2, Some("x"))),
        SlotUpdate::Failed { slot: 1 }
    );
    assert_eq!(controller.view().results, vec!["a", FAILED_TEXT]);
}

#[test]
fn single_slot_page_ignores_part_two() {
    let solver = ScriptedSolver::new(&[4]).replying(&[(4, 1, Some("2")), (4, 2, Some("4"))]);
    let mut controller = Controller::start(
        FakePage::with_slots(1),
        StepClock::default(),
        &solver,
        TimingMode::Tracked,
    );
    controller.view_mut().day_value = "4".into();
    controller.view_mut().text = "2-4,6-8".into();
    controller.evaluate(&solver);
    assert_eq!(controller.view().results, vec!["2"]);
}

#[test]
fn dropped_txt_file_sets_day_and_evaluates() {
    let solver = ScriptedSolver::new(&[7]).replying(&[(7, 1, Some("95437"))]);
    let mut controller = start(&solver);

    let decision = controller.accept_file("day7.txt");
    assert_eq!(
        decision,
        FileDecision::Read {
            day_hint: Some(Day::new(7).unwrap())
        }
    );
    assert_eq!(controller.view().day_value, "7");

    let evaluation = controller.finish_file_load(Some("abc".to_string()), &solver);
    assert!(matches!(evaluation, Some(Evaluation::Solved { .. })));
    assert_eq!(controller.view().text, "abc");
    assert_eq!(*solver.calls.borrow(), vec![(7, "abc".to_string())]);
}

#[test]
fn unimplemented_day_hint_leaves_selector() {
    let solver = ScriptedSolver::new(&[1]);
    let mut controller = start(&solver);
    controller.view_mut().day_value = "1".into();
    assert_eq!(
        controller.accept_file("input09.txt"),
        FileDecision::Read { day_hint: None }
    );
    assert_eq!(controller.view().day_value, "1");
}

#[test]
fn non_txt_file_is_ignored() {
    let solver = ScriptedSolver::new(&[7]);
    let mut controller = start(&solver);
    assert_eq!(controller.accept_file("notes.md"), FileDecision::Ignored);
    assert_eq!(controller.view().day_value, "");
    assert_eq!(controller.view().text, "");
    assert_eq!(solver.call_count(), 0);
}

#[test]
fn unreadable_file_changes_nothing() {
    let solver = ScriptedSolver::new(&[7]);
    let mut controller = start(&solver);
    controller.view_mut().text = "keep".into();
    assert_eq!(controller.finish_file_load(None, &solver), None);
    assert_eq!(controller.view().text, "keep");
    assert_eq!(solver.call_count(), 0);
}

#[test]
fn drag_indicator_toggles() {
    let solver = ScriptedSolver::new(&[]);
    let mut controller = start(&solver);
    controller.set_drag_indicator(true);
    assert!(controller.view().dragover);
    controller.set_drag_indicator(false);
    assert!(!controller.view().dragover);
}
