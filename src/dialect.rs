//! Backend dialect profile and connection adaptor.
//!
//! Vendor quirks the session table has to tolerate are captured once, when
//! the adaptor is built, in an immutable [`DialectProfile`]. Statement
//! builders take the profile as a parameter instead of probing the backend
//! lazily, so they can be exercised without a live connection.

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, QueryResult};

/// Vendor capabilities relevant to the session table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialectProfile {
    backend: DatabaseBackend,
    db_name: String,
    row_id_reserved: bool,
    empty_string_is_null: bool,
    blob_type: String,
    long_type: String,
}

impl DialectProfile {
    /// Profile with the defaults for one of SeaORM's backends.
    pub fn for_backend(backend: DatabaseBackend) -> Self {
        let (db_name, blob_type) = match backend {
            DatabaseBackend::Postgres => ("postgresql", "bytea"),
            DatabaseBackend::MySql => ("mysql", "longblob"),
            _ => ("sqlite", "blob"),
        };

        Self {
            backend,
            db_name: db_name.to_string(),
            row_id_reserved: false,
            empty_string_is_null: false,
            blob_type: blob_type.to_string(),
            long_type: "bigint".to_string(),
        }
    }

    /// Overrides the product name used for DDL branches. Stored lower-case.
    pub fn with_db_name(mut self, db_name: impl Into<String>) -> Self {
        self.db_name = db_name.into().to_lowercase();
        self
    }

    /// Marks the default row identifier column name as a reserved word.
    pub fn with_row_id_reserved(mut self, reserved: bool) -> Self {
        self.row_id_reserved = reserved;
        self
    }

    /// Declares that the backend stores an empty string as NULL.
    pub fn with_empty_string_null(mut self, empty_is_null: bool) -> Self {
        self.empty_string_is_null = empty_is_null;
        self
    }

    pub fn with_blob_type(mut self, blob_type: impl Into<String>) -> Self {
        self.blob_type = blob_type.into();
        self
    }

    pub fn with_long_type(mut self, long_type: impl Into<String>) -> Self {
        self.long_type = long_type.into();
        self
    }

    pub fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    pub fn db_name(&self) -> &str {
        &self.db_name
    }

    pub fn is_row_id_reserved(&self) -> bool {
        self.row_id_reserved
    }

    pub fn is_empty_string_null(&self) -> bool {
        self.empty_string_is_null
    }

    pub fn blob_type(&self) -> &str {
        &self.blob_type
    }

    pub fn long_type(&self) -> &str {
        &self.long_type
    }

    /// Quotes an identifier for this backend, doubling embedded quote characters.
    pub fn quote_identifier(&self, name: &str) -> String {
        let quote = match self.backend {
            DatabaseBackend::MySql => '`',
            _ => '"',
        };
        let escaped = name.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }
}

/// Connection to the session backend together with its dialect profile.
///
/// Every operation borrows a pooled connection for the duration of one call
/// and gives it back when the call returns, including on error.
#[derive(Clone, Debug)]
pub struct DatabaseAdaptor {
    conn: DatabaseConnection,
    profile: DialectProfile,
}

impl DatabaseAdaptor {
    /// Wraps a connection, profiling it from its backend type.
    pub fn new(conn: DatabaseConnection) -> Self {
        let profile = DialectProfile::for_backend(conn.get_database_backend());
        Self { conn, profile }
    }

    /// Replaces the detected profile, e.g. to describe a vendor quirk.
    pub fn with_profile(mut self, profile: DialectProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    pub fn profile(&self) -> &DialectProfile {
        &self.profile
    }

    /// Reads a binary column; SQL NULL yields `None`.
    pub fn read_blob(row: &QueryResult, column: &str) -> Result<Option<Vec<u8>>, DbErr> {
        row.try_get::<Option<Vec<u8>>>("", column)
    }
}
