use crate::error::{self, Error};
use crate::models;
use crate::schema;
use crate::Conn;

use ddash_types::data::Entity;
use ddash_types::requests::EnvironmentDecl;

use diesel::prelude::*;

impl models::Environment {
    /// Records a host and links it to already registered dependencies.
    /// The row and its links are written atomically: an unknown
    /// dependency id leaves nothing behind.
    pub fn create(conn: &mut Conn, decl: &EnvironmentDecl) -> Result<Self, Error> {
        let mut dependency_ids = decl.dependencies.clone();
        dependency_ids.sort_unstable();
        dependency_ids.dedup();

        let environment = conn.transaction::<models::Environment, Error, _>(|conn| {
            let new_environment = models::NewEnvironment {
                hostname: &decl.hostname,
                arch: &decl.arch,
                host_os: &decl.host_os,
                kernel: &decl.kernel,
            };
            let environment = diesel::insert_into(schema::environments::table)
                .values(&new_environment)
                .get_result::<models::Environment>(conn)
                .map_err(error::on_write(Entity::Environment))?;
            for dependency_id in dependency_ids {
                diesel::insert_into(schema::environment_dependencies::table)
                    .values(&models::NewEnvironmentDependency {
                        environment_id: environment.id,
                        dependency_id,
                    })
                    .execute(conn)
                    .map_err(error::on_write(Entity::Environment))?;
            }
            Ok(environment)
        })?;
        tracing::debug!("created {}", environment);
        Ok(environment)
    }

    pub fn get(conn: &mut Conn, id: i32) -> Result<Self, Error> {
        schema::environments::table
            .find(id)
            .first(conn)
            .optional()?
            .ok_or(Error::NotFound(Entity::Environment, id))
    }

    pub fn find(conn: &mut Conn, decl: &EnvironmentDecl) -> Result<Option<Self>, Error> {
        Ok(schema::environments::table
            .filter(schema::environments::hostname.eq(&decl.hostname))
            .filter(schema::environments::arch.eq(&decl.arch))
            .filter(schema::environments::host_os.eq(&decl.host_os))
            .filter(schema::environments::kernel.eq(&decl.kernel))
            .first(conn)
            .optional()?)
    }

    pub fn dependencies(&self, conn: &mut Conn) -> Result<Vec<models::Dependency>, Error> {
        Ok(schema::environment_dependencies::table
            .inner_join(schema::dependencies::table)
            .filter(schema::environment_dependencies::environment_id.eq(self.id))
            .select(models::Dependency::as_select())
            .order(schema::dependencies::id)
            .load(conn)?)
    }
}
