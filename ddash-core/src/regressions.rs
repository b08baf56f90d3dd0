use crate::error::{self, Error};
use crate::models;
use crate::schema;
use crate::Conn;

use ddash_types::data::Entity;
use ddash_types::requests::RegressionsDecl;
use ddash_types::TestResultStatus;

use diesel::prelude::*;

use std::collections::HashSet;

impl models::Regressions {
    pub fn create(conn: &mut Conn, decl: &RegressionsDecl) -> Result<Self, Error> {
        let new_regressions = models::NewRegressions {
            previous_run_id: decl.previous_run,
            current_run_id: decl.current_run,
            count: decl.count.into(),
        };
        let regressions = diesel::insert_into(schema::regressions::table)
            .values(&new_regressions)
            .get_result::<models::Regressions>(conn)
            .map_err(error::on_write(Entity::Regressions))?;
        tracing::debug!("created {} with {} regressions", regressions, regressions.count);
        Ok(regressions)
    }

    pub fn get(conn: &mut Conn, id: i32) -> Result<Self, Error> {
        schema::regressions::table
            .find(id)
            .first(conn)
            .optional()?
            .ok_or(Error::NotFound(Entity::Regressions, id))
    }

    pub fn count(&self) -> u32 {
        self.count as u32
    }

    /// Counts the distinct tests that passed in `previous_run` and fail
    /// in `current_run`, and records that count. The previous run must
    /// have been run strictly before the current one.
    pub fn compute(conn: &mut Conn, previous_run: i32, current_run: i32) -> Result<Self, Error> {
        conn.transaction::<models::Regressions, Error, _>(|conn| {
            let previous = Self::run(conn, previous_run)?;
            let current = Self::run(conn, current_run)?;
            if previous.date_run >= current.date_run {
                return Err(Error::InvalidRegression {
                    previous: previous_run,
                    current: current_run,
                });
            }

            let previous_results = models::TestResult::for_run(conn, previous_run)?;
            let current_results = models::TestResult::for_run(conn, current_run)?;
            let mut passed = HashSet::new();
            for result in &previous_results {
                if result.status_kind()? == TestResultStatus::Passed {
                    passed.insert(result.key());
                }
            }

            // a run may hold several rows for one test when test_mode is NULL
            let mut failing = HashSet::new();
            for result in &current_results {
                if result.status_kind()?.is_failing() {
                    failing.insert(result.key());
                }
            }
            let count = failing.intersection(&passed).count() as u32;
            tracing::debug!(
                "{} tests regressed between {} and {}",
                count,
                previous,
                current
            );

            Self::create(
                conn,
                &RegressionsDecl {
                    previous_run,
                    current_run,
                    count,
                },
            )
        })
    }

    fn run(conn: &mut Conn, id: i32) -> Result<models::TestRun, Error> {
        schema::test_runs::table
            .find(id)
            .first(conn)
            .optional()?
            .ok_or(Error::NotFound(Entity::TestRun, id))
    }
}
