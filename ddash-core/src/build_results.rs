use crate::error::{self, Error};
use crate::models;
use crate::schema;
use crate::storage::{self, LogStorage};
use crate::Conn;

use ddash_types::data::Entity;
use ddash_types::requests::BuildResultDecl;
use ddash_types::{BuildStatus, Vocabulary};

use diesel::prelude::*;

impl models::BuildResult {
    /// Records a build outcome. An uploaded log is stored under a name
    /// carrying the new row's id, in the same transaction as the row, so
    /// a failed write leaves no row behind.
    pub fn create(
        conn: &mut Conn,
        storage: &dyn LogStorage,
        decl: &BuildResultDecl,
    ) -> Result<Self, Error> {
        let build = conn.transaction::<models::BuildResult, Error, _>(|conn| {
            let new_build = models::NewBuildResult {
                status: decl.status.as_str(),
                num_jobs: decl.num_jobs.into(),
                time: decl.time.into(),
                legacy_log: decl.legacy_log.as_deref(),
                log: "",
            };
            let build = diesel::insert_into(schema::build_results::table)
                .values(&new_build)
                .get_result::<models::BuildResult>(conn)
                .map_err(error::on_write(Entity::BuildResult))?;
            let Some(upload) = &decl.log else {
                return Ok(build);
            };
            let name = storage::upload_path(Entity::BuildResult, build.id, &upload.file_name);
            let build = diesel::update(schema::build_results::table.find(build.id))
                .set(schema::build_results::log.eq(&name))
                .get_result::<models::BuildResult>(conn)?;
            storage.save(&name, &upload.contents)?;
            Ok(build)
        })?;
        tracing::debug!("created {}", build);
        Ok(build)
    }

    pub fn get(conn: &mut Conn, id: i32) -> Result<Self, Error> {
        schema::build_results::table
            .find(id)
            .first(conn)
            .optional()?
            .ok_or(Error::NotFound(Entity::BuildResult, id))
    }

    pub fn status_kind(&self) -> Result<BuildStatus, Error> {
        Error::parse_choice(&self.status)
    }

    pub fn read_log(&self, storage: &dyn LogStorage) -> Result<Option<Vec<u8>>, Error> {
        Ok(storage::read_log(storage, &self.log)?)
    }
}
