use crate::error::{self, Error};
use crate::models;
use crate::schema;
use crate::storage::{self, LogStorage};
use crate::Conn;

use ddash_types::data::Entity;
use ddash_types::requests::TestRunResultDecl;
use ddash_types::{TestRunStatus, Vocabulary};

use diesel::prelude::*;

impl models::TestRunResult {
    pub fn create(
        conn: &mut Conn,
        storage: &dyn LogStorage,
        decl: &TestRunResultDecl,
    ) -> Result<Self, Error> {
        let result = conn.transaction::<models::TestRunResult, Error, _>(|conn| {
            let new_result = models::NewTestRunResult {
                dyninst_build_id: decl.dyninst_build,
                testsuite_build_id: decl.testsuite_build,
                test_run_status: decl.test_run_status.as_str(),
                is_single_step: decl.is_single_step,
                num_parallel_tests: decl.num_parallel_tests.into(),
                num_omp_threads: decl.num_omp_threads.into(),
                time: decl.time.into(),
                legacy_log: decl.legacy_log.as_deref(),
                test_log: "",
            };
            let result = diesel::insert_into(schema::test_run_results::table)
                .values(&new_result)
                .get_result::<models::TestRunResult>(conn)
                .map_err(error::on_write(Entity::TestRunResult))?;
            let Some(upload) = &decl.test_log else {
                return Ok(result);
            };
            let name = storage::upload_path(Entity::TestRunResult, result.id, &upload.file_name);
            let result = diesel::update(schema::test_run_results::table.find(result.id))
                .set(schema::test_run_results::test_log.eq(&name))
                .get_result::<models::TestRunResult>(conn)?;
            storage.save(&name, &upload.contents)?;
            Ok(result)
        })?;
        tracing::debug!("created {}", result);
        Ok(result)
    }

    pub fn get(conn: &mut Conn, id: i32) -> Result<Self, Error> {
        schema::test_run_results::table
            .find(id)
            .first(conn)
            .optional()?
            .ok_or(Error::NotFound(Entity::TestRunResult, id))
    }

    pub fn status_kind(&self) -> Result<TestRunStatus, Error> {
        Error::parse_choice(&self.test_run_status)
    }

    /// The library build and the test suite build, in that order.
    pub fn builds(
        &self,
        conn: &mut Conn,
    ) -> Result<(models::BuildResult, models::BuildResult), Error> {
        Ok((
            models::BuildResult::get(conn, self.dyninst_build_id)?,
            models::BuildResult::get(conn, self.testsuite_build_id)?,
        ))
    }

    pub fn read_test_log(&self, storage: &dyn LogStorage) -> Result<Option<Vec<u8>>, Error> {
        Ok(storage::read_log(storage, &self.test_log)?)
    }
}
