use crate::error::{self, Error};
use crate::models;
use crate::schema;
use crate::Conn;

use ddash_types::data::Entity;
use ddash_types::requests::CompilerDecl;
use ddash_types::{Language, Vocabulary};

use diesel::prelude::*;

/// Placeholder the ingestion client reports when it could not detect a
/// compiler's name or version.
pub(crate) const UNKNOWN: &str = "Unknown";

impl models::Compiler {
    pub fn create(conn: &mut Conn, decl: &CompilerDecl) -> Result<Self, Error> {
        let new_compiler = models::NewCompiler {
            name: &decl.name,
            version: &decl.version,
            path: decl.path.as_deref(),
            language: decl.language.map(Vocabulary::as_str),
        };
        let compiler = diesel::insert_into(schema::compilers::table)
            .values(&new_compiler)
            .get_result::<models::Compiler>(conn)
            .map_err(error::on_write(Entity::Compiler))?;
        tracing::debug!("created {}", compiler);
        Ok(compiler)
    }

    pub fn get(conn: &mut Conn, id: i32) -> Result<Self, Error> {
        schema::compilers::table
            .find(id)
            .first(conn)
            .optional()?
            .ok_or(Error::NotFound(Entity::Compiler, id))
    }

    pub fn find(conn: &mut Conn, decl: &CompilerDecl) -> Result<Option<Self>, Error> {
        let mut query = schema::compilers::table
            .filter(schema::compilers::name.eq(&decl.name))
            .filter(schema::compilers::version.eq(&decl.version))
            .into_boxed();
        query = match &decl.path {
            Some(path) => query.filter(schema::compilers::path.eq(path)),
            None => query.filter(schema::compilers::path.is_null()),
        };
        query = match decl.language {
            Some(language) => query.filter(schema::compilers::language.eq(language.as_str())),
            None => query.filter(schema::compilers::language.is_null()),
        };
        Ok(query.first(conn).optional()?)
    }

    pub fn language_kind(&self) -> Result<Option<Language>, Error> {
        self.language.as_deref().map(Error::parse_choice).transpose()
    }

    /// Name and version joined by a space, leaving out whichever is
    /// blank or unknown.
    pub fn display_name(&self) -> String {
        [self.name.as_str(), self.version.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty() && *part != UNKNOWN)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiler(name: &str, version: &str) -> models::Compiler {
        models::Compiler {
            id: 1,
            name: name.to_string(),
            version: version.to_string(),
            path: None,
            language: None,
        }
    }

    #[test]
    fn display_name_skips_placeholders() {
        assert_eq!(compiler("gcc", "9.0").display_name(), "gcc 9.0");
        assert_eq!(compiler("gcc", "Unknown").display_name(), "gcc");
        assert_eq!(compiler("Unknown", "9.0").display_name(), "9.0");
        assert_eq!(compiler("gcc", "").display_name(), "gcc");
        assert_eq!(compiler("", "").display_name(), "");
        assert_eq!(compiler("Unknown", "Unknown").display_name(), "");
    }

    #[test]
    fn language_is_read_back() {
        let mut c = compiler("g++", "11.2");
        assert_eq!(c.language_kind().unwrap(), None);
        c.language = Some("C++".to_string());
        assert_eq!(c.language_kind().unwrap(), Some(Language::Cxx));
        c.language = Some("Go".to_string());
        assert!(matches!(
            c.language_kind(),
            Err(Error::EnumValidationError { .. })
        ));
    }
}
