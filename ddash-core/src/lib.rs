mod build_results;
mod compilers;
mod dependencies;
mod environments;
mod pull_requests;
mod regressions;
mod repository_states;
mod test_modes;
mod test_results;
mod test_run_results;
mod test_runs;

pub mod error;
pub mod models;
pub mod schema;
pub mod storage;

pub use ddash_types::data;
pub use ddash_types::{requests, responses, responses::Response};

pub use crate::test_runs::TestRun;
use error::Error;
use storage::{LogStorage, OverwriteStorage};

use ddash_types::data::{Entity, Row};
use diesel::prelude::*;
use diesel::r2d2;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use std::path::PathBuf;
use std::sync::Arc;

/// Settings needed to open a registry.
#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub media_root: PathBuf,
    pub pool_size: u32,
}

impl Settings {
    pub const DEFAULT_MEDIA_ROOT: &'static str = "media";
    pub const DEFAULT_POOL_SIZE: u32 = 8;

    /// Reads `DATABASE_URL` (required), `DDASH_MEDIA_ROOT` (defaults to
    /// `media`) and `DDASH_POOL_SIZE` (defaults to 8).
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Settings::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let database_url =
            lookup("DATABASE_URL").ok_or(Error::MissingSetting("DATABASE_URL"))?;
        let media_root = lookup("DDASH_MEDIA_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_MEDIA_ROOT));
        let pool_size = match lookup("DDASH_POOL_SIZE") {
            None => Self::DEFAULT_POOL_SIZE,
            Some(value) => {
                let parsed = value.trim().parse::<u32>();
                match parsed {
                    Ok(size) if size > 0 => size,
                    _ => {
                        return Err(Error::InvalidSetting {
                            name: "DDASH_POOL_SIZE",
                            value,
                        })
                    }
                }
            }
        };
        Ok(Self {
            database_url,
            media_root,
            pool_size,
        })
    }
}

pub type DbPool = r2d2::Pool<r2d2::ConnectionManager<diesel::SqliteConnection>>;
pub type Conn =
    diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<diesel::SqliteConnection>>;

#[derive(Debug)]
pub struct ConnectionCustomizer {}

impl diesel::r2d2::CustomizeConnection<diesel::SqliteConnection, diesel::r2d2::Error>
    for ConnectionCustomizer
{
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        use diesel::connection::SimpleConnection;
        (|| {
            // cascades rely on this
            conn.batch_execute("PRAGMA foreign_keys = ON;")?;
            conn.batch_execute("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
            conn.batch_execute("PRAGMA busy_timeout = 10000;")?;
            Ok(())
        })()
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// The test result registry: a pool of SQLite connections with the
/// schema migrated, and the storage holding uploaded logs.
#[derive(Clone)]
pub struct Registry {
    pool: DbPool,
    storage: Arc<dyn LogStorage>,
}

impl Registry {
    pub fn open(settings: &Settings) -> Result<Self, Error> {
        let storage = Arc::new(OverwriteStorage::new(&settings.media_root));
        Self::with_storage(settings, storage)
    }

    pub fn with_storage(settings: &Settings, storage: Arc<dyn LogStorage>) -> Result<Self, Error> {
        let manager = r2d2::ConnectionManager::<SqliteConnection>::new(&settings.database_url);
        let pool = r2d2::Pool::builder()
            .max_size(settings.pool_size)
            .connection_customizer(Box::new(ConnectionCustomizer {}))
            .build(manager)?;

        let mut conn = pool.get()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| Error::MigrationError(e.to_string()))?;
        for version in applied {
            tracing::info!("applied migration {}", version);
        }

        Ok(Self { pool, storage })
    }

    pub fn conn(&self) -> Result<Conn, Error> {
        Ok(self.pool.get()?)
    }

    pub fn storage(&self) -> &dyn LogStorage {
        self.storage.as_ref()
    }

    /// Main entry point for ingestion requests
    pub fn handle_request(&self, req: &requests::Request) -> Result<Response, Error> {
        let mut conn = self.conn()?;
        tracing::trace!("handling request {}", req);
        handle_request_aux(&mut conn, self.storage(), req).map_err(|e| {
            if e.is_internal() {
                tracing::error!("request {} raised error: {:?}", req, e);
            } else {
                tracing::debug!("request {} raised error: {:?}", req, e);
            }
            e
        })
    }
}

fn created(entity: Entity, id: i32) -> Response {
    Response::Created(Row { entity, id })
}

pub fn handle_request_aux(
    conn: &mut Conn,
    storage: &dyn LogStorage,
    req: &requests::Request,
) -> Result<Response, Error> {
    use requests::Request;
    Ok(match req {
        Request::CreatePullRequest(decl) => {
            created(Entity::PullRequest, models::PullRequest::create(conn, decl)?.id)
        }
        Request::CreateCompiler(decl) => {
            created(Entity::Compiler, models::Compiler::create(conn, decl)?.id)
        }
        Request::CreateTestMode(name) => {
            created(Entity::TestMode, models::TestMode::create(conn, *name)?.id)
        }
        Request::CreateDependency(decl) => {
            created(Entity::Dependency, models::Dependency::create(conn, decl)?.id)
        }
        Request::CreateBuildResult(decl) => created(
            Entity::BuildResult,
            models::BuildResult::create(conn, storage, decl)?.id,
        ),
        Request::CreateTestRunResult(decl) => created(
            Entity::TestRunResult,
            models::TestRunResult::create(conn, storage, decl)?.id,
        ),
        Request::CreateEnvironment(decl) => {
            created(Entity::Environment, models::Environment::create(conn, decl)?.id)
        }
        Request::CreateRepositoryState(decl) => created(
            Entity::RepositoryState,
            models::RepositoryState::create(conn, decl)?.id,
        ),
        Request::CreateTestRun(decl) => {
            created(Entity::TestRun, TestRun::create(conn, decl)?.run.id)
        }
        Request::CreateTestResult(decl) => {
            created(Entity::TestResult, models::TestResult::create(conn, decl)?.id)
        }
        Request::CreateRegressions(decl) => {
            created(Entity::Regressions, models::Regressions::create(conn, decl)?.id)
        }
        Request::ComputeRegressions {
            previous_run,
            current_run,
        } => {
            let regressions = models::Regressions::compute(conn, *previous_run, *current_run)?;
            Response::Regressions {
                row: Row {
                    entity: Entity::Regressions,
                    id: regressions.id,
                },
                count: regressions.count(),
            }
        }
        Request::Delete(entity, id) => {
            delete(conn, *entity, *id)?;
            Response::Ok
        }
    })
}

/// Deletes one row. Rows referencing it, directly or transitively, are
/// deleted along with it.
pub fn delete(conn: &mut Conn, entity: Entity, id: i32) -> Result<(), Error> {
    conn.transaction::<(), Error, _>(|conn| {
        let deleted = match entity {
            Entity::PullRequest => {
                diesel::delete(schema::pull_requests::table.find(id)).execute(conn)?
            }
            Entity::Compiler => diesel::delete(schema::compilers::table.find(id)).execute(conn)?,
            Entity::TestMode => diesel::delete(schema::test_modes::table.find(id)).execute(conn)?,
            Entity::Dependency => {
                diesel::delete(schema::dependencies::table.find(id)).execute(conn)?
            }
            Entity::BuildResult => {
                diesel::delete(schema::build_results::table.find(id)).execute(conn)?
            }
            Entity::TestRunResult => {
                diesel::delete(schema::test_run_results::table.find(id)).execute(conn)?
            }
            Entity::Environment => {
                diesel::delete(schema::environments::table.find(id)).execute(conn)?
            }
            Entity::RepositoryState => {
                diesel::delete(schema::repository_states::table.find(id)).execute(conn)?
            }
            Entity::TestRun => diesel::delete(schema::test_runs::table.find(id)).execute(conn)?,
            Entity::TestResult => {
                diesel::delete(schema::test_results::table.find(id)).execute(conn)?
            }
            Entity::Regressions => {
                diesel::delete(schema::regressions::table.find(id)).execute(conn)?
            }
        };
        if deleted == 0 {
            return Err(Error::NotFound(entity, id));
        }
        Ok(())
    })?;
    tracing::debug!("deleted {} {}", entity, id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn settings_defaults() {
        let settings =
            Settings::from_lookup(lookup(&[("DATABASE_URL", "ddash.sqlite3")])).unwrap();
        assert_eq!(settings.database_url, "ddash.sqlite3");
        assert_eq!(settings.media_root, PathBuf::from("media"));
        assert_eq!(settings.pool_size, 8);
    }

    #[test]
    fn settings_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("DATABASE_URL", "ddash.sqlite3"),
            ("DDASH_MEDIA_ROOT", "/srv/ddash/media"),
            ("DDASH_POOL_SIZE", "3"),
        ]))
        .unwrap();
        assert_eq!(settings.media_root, PathBuf::from("/srv/ddash/media"));
        assert_eq!(settings.pool_size, 3);
    }

    #[test]
    fn settings_errors() {
        assert!(matches!(
            Settings::from_lookup(lookup(&[])),
            Err(Error::MissingSetting("DATABASE_URL"))
        ));
        for bad in ["eight", "0", "-2", ""] {
            match Settings::from_lookup(lookup(&[
                ("DATABASE_URL", "ddash.sqlite3"),
                ("DDASH_POOL_SIZE", bad),
            ])) {
                Err(Error::InvalidSetting { name, value }) => {
                    assert_eq!(name, "DDASH_POOL_SIZE");
                    assert_eq!(value, bad);
                }
                other => panic!("unexpected {:?}", other.map(|s| s.pool_size)),
            }
        }
    }
}
