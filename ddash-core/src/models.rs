use crate::schema::build_results;
use crate::schema::compilers;
use crate::schema::dependencies;
use crate::schema::environment_dependencies;
use crate::schema::environments;
use crate::schema::pull_requests;
use crate::schema::regressions;
use crate::schema::repository_states;
use crate::schema::test_modes;
use crate::schema::test_results;
use crate::schema::test_run_results;
use crate::schema::test_runs;

use diesel::prelude::*;

#[derive(Clone, Debug, Queryable, Selectable, Identifiable, derive_more::Display)]
#[diesel(table_name = pull_requests)]
#[display("[pull_request|{url}]")]
pub struct PullRequest {
    pub id: i32,
    pub url: String,
    pub user: String,
    pub pr_id: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = pull_requests)]
pub struct NewPullRequest<'a> {
    pub url: &'a str,
    pub user: &'a str,
    pub pr_id: i64,
}

#[derive(Clone, Debug, Queryable, Selectable, Identifiable, derive_more::Display)]
#[diesel(table_name = compilers)]
#[display("[compiler:{name}@{version}]")]
pub struct Compiler {
    pub id: i32,
    pub name: String,
    pub version: String,
    pub path: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = compilers)]
pub struct NewCompiler<'a> {
    pub name: &'a str,
    pub version: &'a str,
    pub path: Option<&'a str>,
    pub language: Option<&'a str>,
}

#[derive(Clone, Debug, Queryable, Selectable, Identifiable, derive_more::Display)]
#[diesel(table_name = test_modes)]
#[display("[test-mode|{name}]")]
pub struct TestMode {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = test_modes)]
pub struct NewTestMode<'a> {
    pub name: &'a str,
}

#[derive(Clone, Debug, Queryable, Selectable, Identifiable, derive_more::Display)]
#[diesel(table_name = dependencies)]
#[display("[dependency|{name}@{version}]")]
pub struct Dependency {
    pub id: i32,
    pub name: String,
    pub version: String,
    pub path: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = dependencies)]
pub struct NewDependency<'a> {
    pub name: &'a str,
    pub version: &'a str,
    pub path: Option<&'a str>,
}

#[derive(Clone, Debug, Queryable, Selectable, Identifiable, derive_more::Display)]
#[diesel(table_name = build_results)]
#[display("[build-result|{id}]")]
pub struct BuildResult {
    pub id: i32,
    pub status: String,
    pub num_jobs: i64,
    pub time: i64,
    pub legacy_log: Option<String>,
    pub log: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = build_results)]
pub struct NewBuildResult<'a> {
    pub status: &'a str,
    pub num_jobs: i64,
    pub time: i64,
    pub legacy_log: Option<&'a str>,
    pub log: &'a str,
}

#[derive(Clone, Debug, Queryable, Selectable, Identifiable, derive_more::Display)]
#[diesel(table_name = test_run_results)]
#[display("[test-run-result|{id}]")]
pub struct TestRunResult {
    pub id: i32,
    pub dyninst_build_id: i32,
    pub testsuite_build_id: i32,
    pub test_run_status: String,
    pub is_single_step: Option<bool>,
    pub num_parallel_tests: i64,
    pub num_omp_threads: i64,
    pub time: i64,
    pub legacy_log: Option<String>,
    pub test_log: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = test_run_results)]
pub struct NewTestRunResult<'a> {
    pub dyninst_build_id: i32,
    pub testsuite_build_id: i32,
    pub test_run_status: &'a str,
    pub is_single_step: Option<bool>,
    pub num_parallel_tests: i64,
    pub num_omp_threads: i64,
    pub time: i64,
    pub legacy_log: Option<&'a str>,
    pub test_log: &'a str,
}

#[derive(Clone, Debug, Queryable, Selectable, Identifiable, derive_more::Display)]
#[diesel(table_name = environments)]
#[display("[environment|{arch}]")]
pub struct Environment {
    pub id: i32,
    pub hostname: String,
    pub arch: String,
    pub host_os: String,
    pub kernel: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = environments)]
pub struct NewEnvironment<'a> {
    pub hostname: &'a str,
    pub arch: &'a str,
    pub host_os: &'a str,
    pub kernel: &'a str,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = environment_dependencies)]
pub struct NewEnvironmentDependency {
    pub environment_id: i32,
    pub dependency_id: i32,
}

#[derive(Clone, Debug, Queryable, Selectable, Identifiable, derive_more::Display)]
#[diesel(table_name = repository_states)]
#[display("[repository:{name}|{commit}]")]
pub struct RepositoryState {
    pub id: i32,
    pub name: String,
    pub commit: String,
    pub branch: String,
    pub history: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = repository_states)]
pub struct NewRepositoryState<'a> {
    pub name: &'a str,
    pub commit: &'a str,
    pub branch: &'a str,
    pub history: Option<&'a str>,
}

#[derive(Clone, Debug, Queryable, Selectable, Identifiable, derive_more::Display)]
#[diesel(table_name = test_runs)]
#[display("[testrun:{id}]")]
pub struct TestRun {
    pub id: i32,
    pub date_created: i64,
    pub date_run: i64,
    pub dyninst_id: i32,
    pub testsuite_id: i32,
    pub environment_id: i32,
    pub pull_request_id: Option<i32>,
    pub cirun_url: Option<String>,
    pub compiler_id: Option<i32>,
    pub result_id: i32,
    pub command: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = test_runs)]
pub struct NewTestRun<'a> {
    pub date_created: i64,
    pub date_run: i64,
    pub dyninst_id: i32,
    pub testsuite_id: i32,
    pub environment_id: i32,
    pub pull_request_id: Option<i32>,
    pub cirun_url: Option<&'a str>,
    pub compiler_id: Option<i32>,
    pub result_id: i32,
    pub command: &'a str,
}

#[derive(Clone, Debug, Queryable, Selectable, Identifiable, derive_more::Display)]
#[diesel(table_name = test_results)]
#[display("[test-result for {run_id}:{name}]")]
pub struct TestResult {
    pub id: i32,
    pub run_id: i32,
    pub name: String,
    pub compiler_id: i32,
    pub test_mode_id: Option<i32>,
    pub is_pic: bool,
    pub is_64bit: bool,
    pub is_dynamic: bool,
    pub reason: String,
    pub optimization: String,
    pub status: String,
    pub threading: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = test_results)]
pub struct NewTestResult<'a> {
    pub run_id: i32,
    pub name: &'a str,
    pub compiler_id: i32,
    pub test_mode_id: Option<i32>,
    pub is_pic: bool,
    pub is_64bit: bool,
    pub is_dynamic: bool,
    pub reason: &'a str,
    pub optimization: &'a str,
    pub status: &'a str,
    pub threading: &'a str,
}

#[derive(Clone, Debug, Queryable, Selectable, Identifiable, derive_more::Display)]
#[diesel(table_name = regressions)]
#[display("[regressions:{previous_run_id} to {current_run_id}]")]
pub struct Regressions {
    pub id: i32,
    pub previous_run_id: i32,
    pub current_run_id: i32,
    pub count: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = regressions)]
pub struct NewRegressions {
    pub previous_run_id: i32,
    pub current_run_id: i32,
    pub count: i64,
}
