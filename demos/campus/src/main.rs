//! campus: compare lift dispatch policies in a residence hall.
//!
//! Simulates a week of student life in a 15-floor hall (1 100 residents,
//! three cars) once per dispatch policy.  Every run shares the same
//! generated timetables and seed, so the daily averages printed at the end
//! differ only by policy.
//!
//! ```text
//! campus [scenario.json]
//! RUST_LOG=debug campus        # per-car transitions
//! ```
//!
//! Per-policy CSV files (or `output.db` with `--features sqlite`) land in
//! `<output_dir>/<policy>/`.

mod scenario;
mod timetable;

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lift_core::Period;
use lift_dispatch::DispatchPolicy;
use lift_output::{AnalyticsObserver, OutputResult, PeriodSummaryRow};
use lift_schedule::WeeklySchedule;
use lift_sim::{SimBuilder, run_isolated};

use scenario::Scenario;

struct Report {
    policy:  DispatchPolicy,
    daily:   Vec<PeriodSummaryRow>,
    elapsed: Duration,
}

#[cfg(not(feature = "sqlite"))]
fn open_writer(dir: &Path) -> OutputResult<lift_output::CsvWriter> {
    lift_output::CsvWriter::new(dir)
}

#[cfg(feature = "sqlite")]
fn open_writer(dir: &Path) -> OutputResult<lift_output::SqliteWriter> {
    lift_output::SqliteWriter::new(dir)
}

fn run_policy(scenario: &Scenario, schedules: &[WeeklySchedule], policy: DispatchPolicy) -> Result<Report> {
    let dir = scenario.output_dir.join(policy.name());
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut sim = SimBuilder::new(scenario.sim.clone(), scenario.building.with_policy(policy))
        .schedules(schedules.to_vec())
        .build()?;
    let mut obs = AnalyticsObserver::new(open_writer(&dir)?, &scenario.sim);

    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        return Err(e).with_context(|| format!("writing output for {policy}"));
    }
    info!(%policy, secs = elapsed.as_secs_f64(), "run finished");

    Ok(Report {
        policy,
        daily: obs.summaries(Period::Daily).copied().collect(),
        elapsed,
    })
}

fn print_report(report: &Report) {
    println!("── {}  ({:.1} s) ──", report.policy, report.elapsed.as_secs_f64());
    println!(
        "{:<4} {:<3} {:>7} {:>8} {:>9} {:>10} {:>9} {:>9} {:>10}",
        "day", "wd", "idle%", "active%", "loading%", "returning%", "wait(s)", "ride(s)", "travelers"
    );
    for row in &report.daily {
        println!(
            "{:<4} {:<3} {:>7.2} {:>8.2} {:>9.2} {:>10.2} {:>9.1} {:>9.1} {:>10}",
            row.day,
            row.weekday.abbreviation(),
            row.share(row.idle_steps),
            row.share(row.active_steps),
            row.share(row.loading_steps),
            row.share(row.returning_steps),
            row.waiting_secs,
            row.riding_secs,
            row.travelers,
        );
    }
    println!();
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let scenario = match std::env::args_os().nth(1) {
        Some(path) => Scenario::load(Path::new(&path))?,
        None => Scenario::residence_hall(),
    };

    println!("=== campus: lift dispatch comparison ===");
    println!(
        "Floors: {}  |  Residents: {}  |  Cars: {}  |  Days: {}  |  Seed: {}",
        scenario.building.floor_count(),
        scenario.building.population(),
        scenario.building.elevators.len(),
        scenario.sim.total_days,
        scenario.sim.seed,
    );
    println!(
        "Step: {} s  |  {} steps/day  |  {} steps/hour  |  Checks: {}",
        scenario.sim.seconds_per_step,
        scenario.sim.steps_per_day,
        scenario.sim.steps_per_hour,
        if scenario.sim.verify_invariants { "every tick" } else { "off" },
    );
    println!();

    let t0 = Instant::now();
    let schedules = scenario.schedules();
    let events: usize = schedules.iter().map(WeeklySchedule::event_count).sum();
    info!(
        residents = schedules.len(),
        events,
        secs = t0.elapsed().as_secs_f64(),
        "timetables generated"
    );

    let reports = run_isolated(scenario.policies.clone(), |_, policy| {
        run_policy(&scenario, &schedules, policy)
    });

    for report in reports {
        print_report(&report?);
    }
    println!("Output written under {}", scenario.output_dir.display());
    Ok(())
}
