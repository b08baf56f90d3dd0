use crate::error::{self, Error};
use crate::models;
use crate::schema;
use crate::Conn;

use ddash_types::data::Entity;
use ddash_types::requests::PullRequestDecl;

use diesel::prelude::*;

impl models::PullRequest {
    pub fn create(conn: &mut Conn, decl: &PullRequestDecl) -> Result<Self, Error> {
        let new_pull_request = models::NewPullRequest {
            url: &decl.url,
            user: &decl.user,
            pr_id: decl.pr_id.into(),
        };
        let pull_request = diesel::insert_into(schema::pull_requests::table)
            .values(&new_pull_request)
            .get_result::<models::PullRequest>(conn)
            .map_err(error::on_write(Entity::PullRequest))?;
        tracing::debug!("created {}", pull_request);
        Ok(pull_request)
    }

    pub fn get(conn: &mut Conn, id: i32) -> Result<Self, Error> {
        schema::pull_requests::table
            .find(id)
            .first(conn)
            .optional()?
            .ok_or(Error::NotFound(Entity::PullRequest, id))
    }

    pub fn find(conn: &mut Conn, decl: &PullRequestDecl) -> Result<Option<Self>, Error> {
        Ok(schema::pull_requests::table
            .filter(schema::pull_requests::url.eq(&decl.url))
            .filter(schema::pull_requests::user.eq(&decl.user))
            .filter(schema::pull_requests::pr_id.eq(i64::from(decl.pr_id)))
            .first(conn)
            .optional()?)
    }

    pub fn number(&self) -> u32 {
        self.pr_id as u32
    }
}
