mod vocabulary;

pub use vocabulary::{BuildStatus, Language, TestModeName, TestResultStatus, TestRunStatus};
pub use vocabulary::Vocabulary;

pub mod data {
    use serde::{Deserialize, Serialize};

    /** Every kind of row the registry stores. */
    #[derive(
        Copy,
        Clone,
        Debug,
        Hash,
        PartialEq,
        Eq,
        Serialize,
        Deserialize,
        strum::Display,
        strum::EnumIter,
    )]
    #[serde(rename_all = "snake_case")]
    pub enum Entity {
        #[strum(serialize = "pull request")]
        PullRequest,
        #[strum(serialize = "compiler")]
        Compiler,
        #[strum(serialize = "test mode")]
        TestMode,
        #[strum(serialize = "dependency")]
        Dependency,
        #[strum(serialize = "build result")]
        BuildResult,
        #[strum(serialize = "test run result")]
        TestRunResult,
        #[strum(serialize = "environment")]
        Environment,
        #[strum(serialize = "repository state")]
        RepositoryState,
        #[strum(serialize = "test run")]
        TestRun,
        #[strum(serialize = "test result")]
        TestResult,
        #[strum(serialize = "regressions")]
        Regressions,
    }

    /** A stored row: its kind and its identity. */
    #[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Row {
        pub entity: Entity,
        pub id: i32,
    }

    impl std::fmt::Display for Row {
        fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "{} {}", self.entity, self.id)
        }
    }
}

pub mod requests {
    use crate::data::Entity;
    use crate::{BuildStatus, Language, TestModeName, TestResultStatus, TestRunStatus};

    use serde::{Deserialize, Serialize};
    use time::OffsetDateTime;

    /** An uploaded log: the client-side file name and its content. */
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LogUpload {
        pub file_name: String,
        pub contents: Vec<u8>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PullRequestDecl {
        pub url: String,
        pub user: String,
        #[serde(default)]
        pub pr_id: u32,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CompilerDecl {
        pub name: String,
        #[serde(default)]
        pub version: String,
        #[serde(default)]
        pub path: Option<String>,
        #[serde(default)]
        pub language: Option<Language>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DependencyDecl {
        pub name: String,
        pub version: String,
        #[serde(default)]
        pub path: Option<String>,
    }

    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct BuildResultDecl {
        #[serde(default)]
        pub status: BuildStatus,
        /// Number of make jobs
        #[serde(default)]
        pub num_jobs: u32,
        /// Build time in seconds
        #[serde(default)]
        pub time: u32,
        #[serde(default)]
        pub legacy_log: Option<String>,
        #[serde(default)]
        pub log: Option<LogUpload>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TestRunResultDecl {
        pub dyninst_build: i32,
        pub testsuite_build: i32,
        #[serde(default)]
        pub test_run_status: TestRunStatus,
        #[serde(default)]
        pub is_single_step: Option<bool>,
        #[serde(default)]
        pub num_parallel_tests: u32,
        #[serde(default)]
        pub num_omp_threads: u32,
        #[serde(default)]
        pub time: u32,
        #[serde(default)]
        pub legacy_log: Option<String>,
        #[serde(default)]
        pub test_log: Option<LogUpload>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct EnvironmentDecl {
        pub hostname: String,
        pub arch: String,
        pub host_os: String,
        pub kernel: String,
        /// Ids of already registered dependencies
        #[serde(default)]
        pub dependencies: Vec<i32>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct RepositoryStateDecl {
        pub name: String,
        pub commit: String,
        pub branch: String,
        #[serde(default)]
        pub history: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TestRunDecl {
        #[serde(with = "time::serde::timestamp")]
        pub date_run: OffsetDateTime,
        pub dyninst: i32,
        pub testsuite: i32,
        pub environment: i32,
        #[serde(default)]
        pub pull_request: Option<i32>,
        #[serde(default)]
        pub cirun_url: Option<String>,
        #[serde(default)]
        pub compiler: Option<i32>,
        pub result: i32,
        pub command: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TestResultDecl {
        pub run: i32,
        pub name: String,
        pub compiler: i32,
        #[serde(default)]
        pub test_mode: Option<i32>,
        #[serde(default)]
        pub is_pic: bool,
        #[serde(default)]
        pub is_64bit: bool,
        #[serde(default)]
        pub is_dynamic: bool,
        pub reason: String,
        pub optimization: String,
        #[serde(default)]
        pub status: TestResultStatus,
        pub threading: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct RegressionsDecl {
        pub previous_run: i32,
        pub current_run: i32,
        #[serde(default)]
        pub count: u32,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum Request {
        CreatePullRequest(PullRequestDecl),
        CreateCompiler(CompilerDecl),
        CreateTestMode(TestModeName),
        CreateDependency(DependencyDecl),
        CreateBuildResult(BuildResultDecl),
        CreateTestRunResult(TestRunResultDecl),
        CreateEnvironment(EnvironmentDecl),
        CreateRepositoryState(RepositoryStateDecl),
        CreateTestRun(TestRunDecl),
        CreateTestResult(TestResultDecl),
        CreateRegressions(RegressionsDecl),
        ComputeRegressions { previous_run: i32, current_run: i32 },
        Delete(Entity, i32),
    }

    impl std::fmt::Display for Request {
        fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            match self {
                Request::CreatePullRequest(decl) => {
                    write!(f, "Create pull request {} by {}", decl.pr_id, decl.user)
                }
                Request::CreateCompiler(decl) => {
                    write!(f, "Create compiler {}@{}", decl.name, decl.version)
                }
                Request::CreateTestMode(name) => write!(f, "Create test mode {}", name),
                Request::CreateDependency(decl) => {
                    write!(f, "Create dependency {}@{}", decl.name, decl.version)
                }
                Request::CreateBuildResult(decl) => {
                    write!(f, "Create build result with status {}", decl.status)
                }
                Request::CreateTestRunResult(decl) => write!(
                    f,
                    "Create test run result for builds {} and {}",
                    decl.dyninst_build, decl.testsuite_build
                ),
                Request::CreateEnvironment(decl) => {
                    write!(f, "Create environment {} ({})", decl.hostname, decl.arch)
                }
                Request::CreateRepositoryState(decl) => write!(
                    f,
                    "Create repository state {}@{} on {}",
                    decl.name, decl.commit, decl.branch
                ),
                Request::CreateTestRun(decl) => {
                    write!(f, "Create test run with result {}", decl.result)
                }
                Request::CreateTestResult(decl) => {
                    write!(f, "Create test result {} for run {}", decl.name, decl.run)
                }
                Request::CreateRegressions(decl) => write!(
                    f,
                    "Create regressions from run {} to run {}",
                    decl.previous_run, decl.current_run
                ),
                Request::ComputeRegressions {
                    previous_run,
                    current_run,
                } => write!(
                    f,
                    "Compute regressions from run {} to run {}",
                    previous_run, current_run
                ),
                Request::Delete(entity, id) => write!(f, "Delete {} {}", entity, id),
            }
        }
    }
}

pub mod responses {
    use crate::data::Row;

    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum Response {
        Ok,
        Created(Row),
        Regressions { row: Row, count: u32 },
    }
}

#[cfg(test)]
mod tests {
    use super::data::Entity;
    use super::requests::*;
    use super::*;

    #[test]
    fn ingestion_payload_uses_defaults() {
        let json = r#"{
            "CreateBuildResult": { "num_jobs": 8 }
        }"#;
        let req: Request = serde_json::from_str(json).unwrap();
        let Request::CreateBuildResult(decl) = req else {
            panic!("expected a build result request");
        };
        assert_eq!(decl.status, BuildStatus::Ok);
        assert_eq!(decl.num_jobs, 8);
        assert_eq!(decl.time, 0);
        assert_eq!(decl.log, None);
    }

    #[test]
    fn test_result_payload_rejects_unknown_status() {
        let json = r#"{
            "run": 1, "name": "test1_1", "compiler": 1,
            "reason": "", "optimization": "none", "threading": "ST",
            "status": "BROKEN"
        }"#;
        assert!(serde_json::from_str::<TestResultDecl>(json).is_err());
    }

    #[test]
    fn test_run_date_is_a_unix_timestamp() {
        let json = r#"{
            "date_run": 1600000000, "dyninst": 1, "testsuite": 2,
            "environment": 3, "result": 4, "command": "./runTests -all"
        }"#;
        let decl: TestRunDecl = serde_json::from_str(json).unwrap();
        assert_eq!(decl.date_run.unix_timestamp(), 1_600_000_000);
        assert_eq!(decl.pull_request, None);
        assert_eq!(decl.compiler, None);
    }

    #[test]
    fn request_display() {
        let req = Request::Delete(Entity::TestRun, 7);
        assert_eq!(req.to_string(), "Delete test run 7");
    }
}
