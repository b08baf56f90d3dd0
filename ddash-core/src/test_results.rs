use crate::error::{self, Error};
use crate::models;
use crate::schema;
use crate::Conn;

use ddash_types::data::Entity;
use ddash_types::requests::TestResultDecl;
use ddash_types::{TestResultStatus, Vocabulary};

use diesel::prelude::*;

/// The fields that identify the same test across two runs.
#[derive(Debug, Hash, PartialEq, Eq)]
pub(crate) struct TestKey<'a> {
    name: &'a str,
    compiler_id: i32,
    test_mode_id: Option<i32>,
    is_pic: bool,
    is_64bit: bool,
    is_dynamic: bool,
    optimization: &'a str,
    threading: &'a str,
}

impl models::TestResult {
    pub fn create(conn: &mut Conn, decl: &TestResultDecl) -> Result<Self, Error> {
        let new_result = models::NewTestResult {
            run_id: decl.run,
            name: &decl.name,
            compiler_id: decl.compiler,
            test_mode_id: decl.test_mode,
            is_pic: decl.is_pic,
            is_64bit: decl.is_64bit,
            is_dynamic: decl.is_dynamic,
            reason: &decl.reason,
            optimization: &decl.optimization,
            status: decl.status.as_str(),
            threading: &decl.threading,
        };
        let result = diesel::insert_into(schema::test_results::table)
            .values(&new_result)
            .get_result::<models::TestResult>(conn)
            .map_err(error::on_write(Entity::TestResult))?;
        tracing::trace!("created {}", result);
        Ok(result)
    }

    pub fn get(conn: &mut Conn, id: i32) -> Result<Self, Error> {
        schema::test_results::table
            .find(id)
            .first(conn)
            .optional()?
            .ok_or(Error::NotFound(Entity::TestResult, id))
    }

    pub fn for_run(conn: &mut Conn, run_id: i32) -> Result<Vec<Self>, Error> {
        Ok(schema::test_results::table
            .filter(schema::test_results::run_id.eq(run_id))
            .order(schema::test_results::id)
            .load(conn)?)
    }

    /// Static linking is the absence of dynamic linking; it has no
    /// column of its own.
    pub fn is_static(&self) -> bool {
        !self.is_dynamic
    }

    pub fn status_kind(&self) -> Result<TestResultStatus, Error> {
        Error::parse_choice(&self.status)
    }

    pub fn test_mode(&self, conn: &mut Conn) -> Result<Option<models::TestMode>, Error> {
        self.test_mode_id
            .map(|id| models::TestMode::get(conn, id))
            .transpose()
    }

    pub(crate) fn key(&self) -> TestKey<'_> {
        TestKey {
            name: &self.name,
            compiler_id: self.compiler_id,
            test_mode_id: self.test_mode_id,
            is_pic: self.is_pic,
            is_64bit: self.is_64bit,
            is_dynamic: self.is_dynamic,
            optimization: &self.optimization,
            threading: &self.threading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(is_dynamic: bool) -> models::TestResult {
        models::TestResult {
            id: 1,
            run_id: 1,
            name: "test1_1".to_string(),
            compiler_id: 1,
            test_mode_id: None,
            is_pic: false,
            is_64bit: true,
            is_dynamic,
            reason: String::new(),
            optimization: "none".to_string(),
            status: "PASSED".to_string(),
            threading: "ST".to_string(),
        }
    }

    #[test]
    fn static_is_not_dynamic() {
        assert!(result(false).is_static());
        assert!(!result(true).is_static());
    }

    #[test]
    fn key_ignores_run_and_status() {
        let a = result(true);
        let mut b = result(true);
        b.id = 2;
        b.run_id = 7;
        b.status = "FAILED".to_string();
        assert_eq!(a.key(), b.key());
        b.threading = "MT".to_string();
        assert_ne!(a.key(), b.key());
    }
}
