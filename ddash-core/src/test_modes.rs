use crate::error::{self, Error};
use crate::models;
use crate::schema;
use crate::Conn;

use ddash_types::data::Entity;
use ddash_types::{TestModeName, Vocabulary};

use diesel::prelude::*;

impl models::TestMode {
    pub fn create(conn: &mut Conn, name: TestModeName) -> Result<Self, Error> {
        let test_mode = diesel::insert_into(schema::test_modes::table)
            .values(&models::NewTestMode {
                name: name.as_str(),
            })
            .get_result::<models::TestMode>(conn)
            .map_err(error::on_write(Entity::TestMode))?;
        tracing::debug!("created {}", test_mode);
        Ok(test_mode)
    }

    pub fn get(conn: &mut Conn, id: i32) -> Result<Self, Error> {
        schema::test_modes::table
            .find(id)
            .first(conn)
            .optional()?
            .ok_or(Error::NotFound(Entity::TestMode, id))
    }

    pub fn find(conn: &mut Conn, name: TestModeName) -> Result<Option<Self>, Error> {
        Ok(schema::test_modes::table
            .filter(schema::test_modes::name.eq(name.as_str()))
            .first(conn)
            .optional()?)
    }

    pub fn name_kind(&self) -> Result<TestModeName, Error> {
        Error::parse_choice(&self.name)
    }
}
