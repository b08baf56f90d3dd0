use crate::error::{self, Error};
use crate::models;
use crate::schema;
use crate::Conn;

use ddash_types::data::Entity;
use ddash_types::requests::DependencyDecl;

use diesel::prelude::*;

impl models::Dependency {
    pub fn create(conn: &mut Conn, decl: &DependencyDecl) -> Result<Self, Error> {
        let new_dependency = models::NewDependency {
            name: &decl.name,
            version: &decl.version,
            path: decl.path.as_deref(),
        };
        let dependency = diesel::insert_into(schema::dependencies::table)
            .values(&new_dependency)
            .get_result::<models::Dependency>(conn)
            .map_err(error::on_write(Entity::Dependency))?;
        tracing::debug!("created {}", dependency);
        Ok(dependency)
    }

    pub fn get(conn: &mut Conn, id: i32) -> Result<Self, Error> {
        schema::dependencies::table
            .find(id)
            .first(conn)
            .optional()?
            .ok_or(Error::NotFound(Entity::Dependency, id))
    }

    pub fn find(conn: &mut Conn, decl: &DependencyDecl) -> Result<Option<Self>, Error> {
        let mut query = schema::dependencies::table
            .filter(schema::dependencies::name.eq(&decl.name))
            .filter(schema::dependencies::version.eq(&decl.version))
            .into_boxed();
        query = match &decl.path {
            Some(path) => query.filter(schema::dependencies::path.eq(path)),
            None => query.filter(schema::dependencies::path.is_null()),
        };
        Ok(query.first(conn).optional()?)
    }
}
