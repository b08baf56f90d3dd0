use crate::error::{self, Error};
use crate::models;
use crate::schema;
use crate::Conn;

use ddash_types::data::Entity;
use ddash_types::requests::TestRunDecl;

use diesel::prelude::*;
use time::OffsetDateTime;

/// Value the ingestion client sends when a run was not started from CI.
const UNKNOWN_CIRUN_URL: &str = "unknown";

/// A test run together with the rows its display helpers read.
#[derive(Clone, Debug)]
pub struct TestRun {
    pub run: models::TestRun,
    pub dyninst: models::RepositoryState,
    pub testsuite: models::RepositoryState,
    pub pull_request: Option<models::PullRequest>,
    pub compiler: Option<models::Compiler>,
}

impl TestRun {
    pub fn create(conn: &mut Conn, decl: &TestRunDecl) -> Result<Self, Error> {
        let new_run = models::NewTestRun {
            date_created: OffsetDateTime::now_utc().unix_timestamp(),
            date_run: decl.date_run.unix_timestamp(),
            dyninst_id: decl.dyninst,
            testsuite_id: decl.testsuite,
            environment_id: decl.environment,
            pull_request_id: decl.pull_request,
            cirun_url: decl.cirun_url.as_deref(),
            compiler_id: decl.compiler,
            result_id: decl.result,
            command: &decl.command,
        };
        let run = conn.transaction::<TestRun, Error, _>(|conn| {
            let run = diesel::insert_into(schema::test_runs::table)
                .values(&new_run)
                .get_result::<models::TestRun>(conn)
                .map_err(error::on_write(Entity::TestRun))?;
            Self::get(conn, run.id)
        })?;
        tracing::debug!("created {}", run.run);
        Ok(run)
    }

    pub fn get(conn: &mut Conn, id: i32) -> Result<Self, Error> {
        let (run, pull_request, compiler) = schema::test_runs::table
            .left_join(schema::pull_requests::table)
            .left_join(schema::compilers::table)
            .filter(schema::test_runs::id.eq(id))
            .first::<(
                models::TestRun,
                Option<models::PullRequest>,
                Option<models::Compiler>,
            )>(conn)
            .optional()?
            .ok_or(Error::NotFound(Entity::TestRun, id))?;
        let dyninst = models::RepositoryState::get(conn, run.dyninst_id)?;
        let testsuite = models::RepositoryState::get(conn, run.testsuite_id)?;
        Ok(Self {
            run,
            dyninst,
            testsuite,
            pull_request,
            compiler,
        })
    }

    pub fn date_run(&self) -> Result<OffsetDateTime, Error> {
        Ok(OffsetDateTime::from_unix_timestamp(self.run.date_run)?)
    }

    pub fn date_created(&self) -> Result<OffsetDateTime, Error> {
        Ok(OffsetDateTime::from_unix_timestamp(self.run.date_created)?)
    }

    pub fn environment(&self, conn: &mut Conn) -> Result<models::Environment, Error> {
        models::Environment::get(conn, self.run.environment_id)
    }

    pub fn result(&self, conn: &mut Conn) -> Result<models::TestRunResult, Error> {
        models::TestRunResult::get(conn, self.run.result_id)
    }

    pub fn results(&self, conn: &mut Conn) -> Result<Vec<models::TestResult>, Error> {
        models::TestResult::for_run(conn, self.run.id)
    }

    /// Regressions this run takes part in, either as the earlier or the
    /// later run.
    pub fn regressions(&self, conn: &mut Conn) -> Result<Vec<models::Regressions>, Error> {
        Ok(schema::regressions::table
            .filter(
                schema::regressions::previous_run_id
                    .eq(self.run.id)
                    .or(schema::regressions::current_run_id.eq(self.run.id)),
            )
            .order(schema::regressions::id)
            .load(conn)?)
    }

    pub fn testsuite_text(&self) -> String {
        self.source_link(&self.testsuite)
    }

    pub fn dyninst_text(&self) -> String {
        self.source_link(&self.dyninst)
    }

    /// The CI run wins over the pull request, which wins over the plain
    /// repository link.
    fn source_link(&self, state: &models::RepositoryState) -> String {
        match (self.run.cirun_url.as_deref(), &self.pull_request) {
            (Some(url), _) if !url.is_empty() && url != UNKNOWN_CIRUN_URL => {
                format!("<a href='{}'>CI run</a>", url)
            }
            (_, Some(pull_request)) => format!(
                "<a href='{}'>PR {}</a>",
                pull_request.url, pull_request.pr_id
            ),
            _ => state.link(),
        }
    }

    pub fn compiler_name(&self) -> String {
        self.compiler
            .as_ref()
            .map(models::Compiler::display_name)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for TestRun {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.run)
    }
}
