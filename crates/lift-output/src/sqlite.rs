//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `period_summaries` and `elevator_periods`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{ElevatorPeriodRow, OutputResult, PeriodSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS period_summaries (
                 period          TEXT    NOT NULL,
                 day             INTEGER NOT NULL,
                 weekday         TEXT    NOT NULL,
                 hour            INTEGER,
                 ticks           INTEGER NOT NULL,
                 idle_steps      REAL    NOT NULL,
                 active_steps    REAL    NOT NULL,
                 loading_steps   REAL    NOT NULL,
                 returning_steps REAL    NOT NULL,
                 waiting_steps   REAL    NOT NULL,
                 riding_steps    REAL    NOT NULL,
                 waiting_secs    REAL    NOT NULL,
                 riding_secs     REAL    NOT NULL,
                 travelers       INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS elevator_periods (
                 period    TEXT    NOT NULL,
                 day       INTEGER NOT NULL,
                 hour      INTEGER,
                 elevator  INTEGER NOT NULL,
                 idle      INTEGER NOT NULL,
                 active    INTEGER NOT NULL,
                 loading   INTEGER NOT NULL,
                 returning INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_period_summary(&mut self, row: &PeriodSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO period_summaries \
             (period, day, weekday, hour, ticks, idle_steps, active_steps, loading_steps, \
              returning_steps, waiting_steps, riding_steps, waiting_secs, riding_secs, travelers) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            rusqlite::params![
                row.period.name(),
                row.day as i64,
                row.weekday.abbreviation(),
                row.hour,
                row.ticks as i64,
                row.idle_steps,
                row.active_steps,
                row.loading_steps,
                row.returning_steps,
                row.waiting_steps,
                row.riding_steps,
                row.waiting_secs,
                row.riding_secs,
                row.travelers as i64,
            ],
        )?;
        Ok(())
    }

    fn write_elevator_periods(&mut self, rows: &[ElevatorPeriodRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO elevator_periods \
                 (period, day, hour, elevator, idle, active, loading, returning) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.period.name(),
                    row.day as i64,
                    row.hour,
                    row.elevator,
                    row.idle as i64,
                    row.active as i64,
                    row.loading as i64,
                    row.returning as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
