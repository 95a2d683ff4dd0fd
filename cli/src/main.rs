mod process_solver;
mod terminal;

use std::path::PathBuf;
use std::process::ExitCode;

use aoc_web_core::{Controller, Day, Evaluation, FileDecision, ImplementedDays, PageView, TimingMode};
use clap::Parser;

use process_solver::{parse_day_list, InstantClock, ProcessSolver};
use terminal::TerminalPage;

#[derive(Parser)]
#[command(name = "aoc-web-cli", version, about = "Run puzzle inputs through a native solver")]
struct Cli {
    input: PathBuf,
    #[arg(long)]
    day: Option<Day>,
    #[arg(long, env = "AOC_SOLVER", default_value = "aoc_cli")]
    solver: PathBuf,
    #[arg(long, value_parser = parse_day_list, help = "Implemented days, e.g. 1-10,12")]
    days: Option<ImplementedDays>,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let days = cli.days.unwrap_or_else(|| Day::all().collect());
    let clock = InstantClock::new();
    let solver = ProcessSolver::new(cli.solver, days, clock);
    let mut controller = Controller::start(
        TerminalPage::new(),
        clock,
        &solver,
        TimingMode::Tracked,
    );

    let name = cli
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if let FileDecision::Ignored = controller.accept_file(&name) {
        eprintln!("error: {name} is not a .txt puzzle input");
        return Ok(ExitCode::FAILURE);
    }
    if let Some(day) = cli.day {
        if !controller.view().offers(day) {
            eprintln!("sorry, no implementation for day {day}");
            return Ok(ExitCode::FAILURE);
        }
        controller.view_mut().set_day_value(day);
    }

    let contents = std::fs::read_to_string(&cli.input)?;
    let evaluation = controller.finish_file_load(Some(contents), &solver);
    let Some(Evaluation::Solved { day, .. }) = evaluation else {
        eprintln!("error: nothing to solve; pass --day or name the file after an implemented day");
        return Ok(ExitCode::FAILURE);
    };

    println!("==Advent of Code, {}==", day.label());
    let page = controller.view();
    for (index, result) in page.results().iter().enumerate() {
        println!("part {}: {}", index + 1, result);
    }
    if let Some(timings) = page.timings() {
        println!("{timings}");
    }
    Ok(if page.all_solved() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
