use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::Instant;

use aoc_web_core::{Clock, Day, ImplementedDays, SolutionDelivery, SolutionSink, SolveStatus, Solver, PART_COUNT};

const RESULT_PREFIX: &str = "result of part ";
const STDIN_PATH: &str = "/dev/stdin";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ProcessSolverError {
    #[error("failed to start {program}: {source}")]
    Spawn { program: String, source: io::Error },
    #[error("solver i/o failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Clone, Copy)]
pub(crate) struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub(crate) fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for InstantClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

pub(crate) struct ProcessSolver {
    program: PathBuf,
    days: ImplementedDays,
    clock: InstantClock,
}

impl ProcessSolver {
    pub(crate) fn new(program: PathBuf, days: ImplementedDays, clock: InstantClock) -> Self {
        Self {
            program,
            days,
            clock,
        }
    }

    fn run(&self, day: Day, input: &str, sink: &mut dyn SolutionSink) -> Result<bool, ProcessSolverError> {
        let mut child = Command::new(&self.program)
            .arg(day.to_string())
            .arg(STDIN_PATH)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ProcessSolverError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        let mut delivered = [false; PART_COUNT];
        let streamed = self.stream(&mut child, day, input, sink, &mut delivered);
        drop(child.stdout.take());
        let status = child.wait();

        for (index, seen) in delivered.iter().enumerate() {
            if !seen {
                sink.receive_solution(SolutionDelivery {
                    day: day.get(),
                    part: index as i32 + 1,
                    solution: None,
                    received_at_ms: self.clock.now_ms(),
                });
            }
        }
        streamed?;
        Ok(status?.success())
    }

    fn stream(
        &self,
        child: &mut Child,
        day: Day,
        input: &str,
        sink: &mut dyn SolutionSink,
        delivered: &mut [bool; PART_COUNT],
    ) -> io::Result<()> {
        if let Some(mut stdin) = child.stdin.take() {
            // a solver that rejects the day exits before reading its input
            match stdin.write_all(input.as_bytes()) {
                Err(err) if err.kind() != io::ErrorKind::BrokenPipe => return Err(err),
                _ => {}
            }
        }

        let mut parser = ResultParser::default();
        let mut deliver = |(part, solution): (i32, String)| {
            if let Some(seen) = delivered.get_mut(part as usize - 1) {
                *seen = true;
            }
            sink.receive_solution(SolutionDelivery {
                day: day.get(),
                part,
                solution: Some(solution),
                received_at_ms: self.clock.now_ms(),
            });
        };
        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines() {
                if let Some(block) = parser.feed(&line?) {
                    deliver(block);
                }
            }
        }
        if let Some(block) = parser.finish() {
            deliver(block);
        }
        Ok(())
    }
}

impl Solver for ProcessSolver {
    fn has_implementation(&self, day: Day) -> bool {
        self.days.contains(day.get())
    }

    fn solve(&self, day: Day, input: &str, sink: &mut dyn SolutionSink) -> SolveStatus {
        match self.run(day, input, sink) {
            Ok(true) => SolveStatus::Success,
            Ok(false) => SolveStatus::Failure(1),
            Err(err) => {
                eprintln!("error: {err}");
                SolveStatus::Failure(-1)
            }
        }
    }
}

// Collects the lines under each `result of part N:` header. A block ends at
// the next header or at end of output.
#[derive(Default)]
struct ResultParser {
    current: Option<(i32, Vec<String>)>,
}

impl ResultParser {
    fn feed(&mut self, line: &str) -> Option<(i32, String)> {
        let Some(part) = header_part(line) else {
            if let Some((_, lines)) = self.current.as_mut() {
                lines.push(line.trim_end().to_string());
            }
            return None;
        };
        let finished = self.finish();
        self.current = (1..=PART_COUNT as i32)
            .contains(&part)
            .then(|| (part, Vec::new()));
        finished
    }

    fn finish(&mut self) -> Option<(i32, String)> {
        let (part, mut lines) = self.current.take()?;
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return None;
        }
        Some((part, lines.join("\n")))
    }
}

fn header_part(line: &str) -> Option<i32> {
    let header = line.trim().strip_prefix(RESULT_PREFIX)?;
    header.strip_suffix(':')?.trim().parse().ok()
}

pub(crate) fn parse_day_list(raw: &str) -> Result<ImplementedDays, String> {
    let mut days = Vec::new();
    for chunk in raw.split(',').map(str::trim).filter(|chunk| !chunk.is_empty()) {
        let (first, last) = match chunk.split_once('-') {
            Some((first, last)) => (first.trim(), last.trim()),
            None => (chunk, chunk),
        };
        let first: Day = first.parse().map_err(|err| format!("{chunk}: {err}"))?;
        let last: Day = last.parse().map_err(|err| format!("{chunk}: {err}"))?;
        if first > last {
            return Err(format!("{chunk}: range is reversed"));
        }
        days.extend(Day::all().filter(|day| *day >= first && *day <= last));
    }
    if days.is_empty() {
        return Err("no days given".to_string());
    }
    Ok(days.into_iter().collect())
}
