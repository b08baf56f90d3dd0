use crate::error::{self, Error};
use crate::models;
use crate::schema;
use crate::Conn;

use ddash_types::data::Entity;
use ddash_types::requests::RepositoryStateDecl;

use diesel::prelude::*;

impl models::RepositoryState {
    pub fn create(conn: &mut Conn, decl: &RepositoryStateDecl) -> Result<Self, Error> {
        let new_state = models::NewRepositoryState {
            name: &decl.name,
            commit: &decl.commit,
            branch: &decl.branch,
            history: decl.history.as_deref(),
        };
        let state = diesel::insert_into(schema::repository_states::table)
            .values(&new_state)
            .get_result::<models::RepositoryState>(conn)
            .map_err(error::on_write(Entity::RepositoryState))?;
        tracing::debug!("created {}", state);
        Ok(state)
    }

    pub fn get(conn: &mut Conn, id: i32) -> Result<Self, Error> {
        schema::repository_states::table
            .find(id)
            .first(conn)
            .optional()?
            .ok_or(Error::NotFound(Entity::RepositoryState, id))
    }

    pub fn find(
        conn: &mut Conn,
        name: &str,
        commit: &str,
        branch: &str,
    ) -> Result<Option<Self>, Error> {
        Ok(schema::repository_states::table
            .filter(schema::repository_states::name.eq(name))
            .filter(schema::repository_states::commit.eq(commit))
            .filter(schema::repository_states::branch.eq(branch))
            .first(conn)
            .optional()?)
    }

    /// Link to the repository, labelled with the branch.
    pub fn link(&self) -> String {
        format!("<a href='{}'>{}</a>", self.name, self.branch)
    }
}
