//! Integration tests for lift-output.

use lift_core::{FirstChoice, FloorId, Period, PeriodStamp, PersonId, SimConfig, Tick, Weekday};
use lift_dispatch::DispatchPolicy;
use lift_schedule::ActivitySpec;
use lift_sim::{BuildingConfig, ElevatorConfig, SimBuilder, Simulation};

use crate::row::{ElevatorPeriodRow, PeriodSummaryRow};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn tmp() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// One day of 24 ten-step hours.
fn config() -> SimConfig {
    SimConfig {
        seconds_per_step:  3.5,
        steps_per_day:     240,
        steps_per_hour:    10,
        total_days:        1,
        seed:              3,
        verify_invariants: true,
    }
}

fn sim(populations: &[u32], cars: usize) -> Simulation<FirstChoice> {
    let building = BuildingConfig {
        floor_populations: populations.to_vec(),
        activities:        vec![ActivitySpec::new("home", vec![], true)],
        policy:            DispatchPolicy::StayWhereStopped,
        elevators:         (0..cars).map(|_| ElevatorConfig::new(FloorId(0), 10, 2)).collect(),
    };
    SimBuilder::new(config(), building).build_with_rng(FirstChoice).unwrap()
}

fn summary_row(hour: Option<u32>) -> PeriodSummaryRow {
    PeriodSummaryRow {
        period:          if hour.is_some() { Period::Hourly } else { Period::Daily },
        day:             2,
        weekday:         Weekday::Tuesday,
        hour,
        ticks:           10,
        idle_steps:      4.0,
        active_steps:    3.0,
        loading_steps:   2.0,
        returning_steps: 1.0,
        waiting_steps:   0.5,
        riding_steps:    1.5,
        waiting_secs:    1.75,
        riding_secs:     5.25,
        travelers:       3,
    }
}

fn car_row(elevator: u32) -> ElevatorPeriodRow {
    ElevatorPeriodRow {
        period: Period::Hourly,
        day: 0,
        hour: Some(7),
        elevator,
        idle: 6,
        active: 2,
        loading: 2,
        returning: 0,
    }
}

fn read_csv(path: &std::path::Path) -> (Vec<String>, Vec<csv::StringRecord>) {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
    let rows = rdr.records().map(|r| r.unwrap()).collect();
    (headers, rows)
}

// ── Aggregation ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod row_tests {
    use super::*;

    #[test]
    fn quiet_building_is_all_idle() {
        let mut s = sim(&[2, 0, 0], 2);
        s.run_ticks(5, &mut lift_sim::NoopObserver).unwrap();

        let stamp = s.clock.stamp(Period::Hourly);
        let row = PeriodSummaryRow::summarize(&stamp, &s.building, 3.5);
        assert_eq!(row.hour, Some(0));
        assert_eq!(row.ticks, 10);
        assert_eq!(row.idle_steps, 5.0);
        assert_eq!(row.active_steps, 0.0);
        assert_eq!(row.share(row.idle_steps), 50.0);
        assert_eq!(row.waiting_steps, 0.0);
        assert_eq!(row.travelers, 0);
    }

    #[test]
    fn resident_means_divide_by_whole_population() {
        let mut s = sim(&[0, 1, 1], 1);
        assert!(s.building.send_waiting(PersonId(1), FloorId(0)));
        s.run_ticks(3, &mut lift_sim::NoopObserver).unwrap();

        let stamp = s.clock.stamp(Period::Daily);
        let row = PeriodSummaryRow::summarize(&stamp, &s.building, 2.0);
        let p = s.building.persons[1].counters.get(Period::Daily);
        let total = (p.waiting + p.riding) as f64;
        assert!(total > 0.0);
        assert_eq!(row.travelers, 1);
        assert_eq!(row.waiting_steps + row.riding_steps, total / 2.0);
        assert_eq!(row.waiting_secs, row.waiting_steps * 2.0);

        let car = s.building.elevators[0].counters.get(Period::Daily);
        assert_eq!(car.total(), 3);
    }

    #[test]
    fn one_elevator_row_per_car() {
        let mut s = sim(&[1, 1], 3);
        s.run_ticks(2, &mut lift_sim::NoopObserver).unwrap();
        let rows = ElevatorPeriodRow::collect(&s.clock.stamp(Period::Hourly), &s.building);
        assert_eq!(rows.iter().map(|r| r.elevator).collect::<Vec<_>>(), [0, 1, 2]);
        assert!(rows.iter().all(|r| r.idle == 2 && r.hour == Some(0)));
    }

    #[test]
    fn empty_period_has_zero_share() {
        let row = PeriodSummaryRow { ticks: 0, ..summary_row(None) };
        assert_eq!(row.share(5.0), 0.0);
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use crate::csv::CsvWriter;
    use crate::writer::OutputWriter;

    use super::*;

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("period_summaries.csv").exists());
        assert!(dir.path().join("elevator_periods.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let (headers, rows) = read_csv(&dir.path().join("elevator_periods.csv"));
        assert_eq!(headers, ["period", "day", "hour", "elevator", "idle", "active", "loading", "returning"]);
        assert!(rows.is_empty());

        let (headers, _) = read_csv(&dir.path().join("period_summaries.csv"));
        assert_eq!(headers.len(), 18);
        assert_eq!(headers[..5], ["period", "day", "weekday", "hour", "ticks"]);
        assert_eq!(headers[17], "travelers");
    }

    #[test]
    fn csv_summary_fields() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_period_summary(&summary_row(Some(7))).unwrap();
        w.write_period_summary(&summary_row(None)).unwrap();
        w.finish().unwrap();

        let (_, rows) = read_csv(&dir.path().join("period_summaries.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "hourly");
        assert_eq!(&rows[0][2], "T");
        assert_eq!(&rows[0][3], "7");
        assert_eq!(&rows[0][5], "4.000"); // idle_steps
        assert_eq!(&rows[0][9], "40.00"); // idle_pct
        assert_eq!(&rows[0][15], "1.750"); // waiting_secs
        assert_eq!(&rows[1][0], "daily");
        assert_eq!(&rows[1][3], "");
    }

    #[test]
    fn csv_elevator_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_elevator_periods(&[car_row(0), car_row(1)]).unwrap();
        w.write_elevator_periods(&[]).unwrap();
        w.finish().unwrap();

        let (_, rows) = read_csv(&dir.path().join("elevator_periods.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][3], "1");
        assert_eq!(&rows[1][4], "6");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_missing_dir_fails() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("absent")).is_err());
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use lift_sim::{Building, SimObserver};

    use crate::csv::CsvWriter;
    use crate::observer::AnalyticsObserver;
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    use super::*;

    /// Fails every write, counting attempts.
    struct Broken {
        attempts: u32,
    }

    impl OutputWriter for Broken {
        fn write_period_summary(&mut self, _row: &PeriodSummaryRow) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }

        fn write_elevator_periods(&mut self, _rows: &[ElevatorPeriodRow]) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other("still full")))
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    fn stamp(building_sim: &Simulation<FirstChoice>) -> PeriodStamp {
        building_sim.clock.stamp(Period::Daily)
    }

    #[test]
    fn one_day_writes_every_period() {
        let cfg = config();
        let mut s = sim(&[1, 2, 2], 2);
        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = AnalyticsObserver::new(writer, &cfg);
        s.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        assert_eq!(obs.history().len(), 25);
        assert_eq!(obs.summaries(Period::Hourly).count(), 24);
        let daily: Vec<_> = obs.summaries(Period::Daily).collect();
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].ticks, 240);
        assert_eq!(daily[0].idle_steps, 240.0);

        // The daily row follows hour 23.
        assert_eq!(obs.history()[23].hour, Some(23));
        assert_eq!(obs.history()[24].period, Period::Daily);

        let (_, rows) = read_csv(&dir.path().join("period_summaries.csv"));
        assert_eq!(rows.len(), 25);
        let (_, rows) = read_csv(&dir.path().join("elevator_periods.csv"));
        assert_eq!(rows.len(), 50);
        assert!(rows.iter().filter(|r| &r[0] == "hourly").all(|r| &r[4] == "10"));
    }

    #[test]
    fn first_error_is_kept() {
        let s = sim(&[1, 1], 1);
        let mut obs = AnalyticsObserver::new(Broken { attempts: 0 }, &config());
        obs.on_period_end(&stamp(&s), &s.building);
        obs.on_sim_end(Tick(0));

        let err = obs.take_error().expect("write error stored");
        assert!(err.to_string().contains("disk full"));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.history().len(), 1);
        assert_eq!(obs.into_writer().attempts, 2);
    }

    #[test]
    fn summaries_are_read_before_reset() {
        struct Probe(Vec<u64>);
        impl SimObserver for Probe {
            fn on_period_end(&mut self, stamp: &PeriodStamp, building: &Building) {
                self.0.push(building.elevators[0].counters.get(stamp.period).total());
            }
        }

        let mut s = sim(&[1, 1], 1);
        let mut probe = Probe(Vec::new());
        s.run(&mut probe).unwrap();
        assert_eq!(probe.0.len(), 25);
        assert!(probe.0[..24].iter().all(|&t| t == 10));
        assert_eq!(probe.0[24], 240);
    }
}

// ── SQLite ────────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    use super::*;

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_summary_stored() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_period_summary(&summary_row(Some(7))).unwrap();
        w.write_period_summary(&summary_row(None)).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (idle, secs): (f64, f64) = conn
            .query_row(
                "SELECT idle_steps, waiting_secs FROM period_summaries WHERE hour = 7",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(idle, 4.0);
        assert_eq!(secs, 1.75);

        let daily: i64 = conn
            .query_row("SELECT COUNT(*) FROM period_summaries WHERE hour IS NULL", [], |r| r.get(0))
            .unwrap();
        assert_eq!(daily, 1);
    }

    #[test]
    fn sqlite_elevator_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_elevator_periods(&[car_row(0), car_row(1), car_row(2)]).unwrap();
        w.write_elevator_periods(&[]).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM elevator_periods", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 3);
    }
}
