//! Session table layout and statement generation.
//!
//! [`SessionTableSchema`] holds the configurable table and column names and
//! turns them into parameterized [`Statement`]s for a given
//! [`DialectProfile`]. Nothing here executes a query except
//! [`SessionTableSchema::prepare`], the startup bootstrap.

use sea_orm::sea_query::{Alias, ColumnDef, Expr, Index, IndexCreateStatement, Query, SimpleExpr, Table, TableCreateStatement, Value};
use sea_orm::{ConnectionTrait, DbErr, Statement};
use sea_orm_migration::SchemaManager;
use tracing::{info, warn};

use crate::dialect::DialectProfile;
use crate::error::{Error, Result};
use crate::key::{SessionContext, SessionKey};
use crate::record::{SessionRecord, MAX_INTERVAL_NOT_SET};

/// Default name of the synthetic primary key column.
pub const DEFAULT_ROW_ID_COLUMN: &str = "rowId";

/// Row identifier column used when the backend reserves [`DEFAULT_ROW_ID_COLUMN`].
pub const RESERVED_ROW_ID_SUBSTITUTE: &str = "srowId";

/// Room for a full-width id, context path and virtual host with their
/// length prefixes and separators.
const ROW_ID_LENGTH: u32 = 255;

/// How a key's context path is matched in a WHERE clause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContextMatch {
    /// `contextPath IS NULL`: an empty path on a backend that stores `''` as NULL.
    IsNull,
    /// `contextPath = ?`
    Equals(String),
}

impl ContextMatch {
    /// Chooses the match for a context path. Depends only on the profile's
    /// null handling and on whether the path is empty.
    pub fn for_path(profile: &DialectProfile, canonical_context_path: &str) -> Self {
        if canonical_context_path.is_empty() && profile.is_empty_string_null() {
            Self::IsNull
        } else {
            Self::Equals(canonical_context_path.to_string())
        }
    }

    fn condition(&self, column: &str) -> SimpleExpr {
        match self {
            Self::IsNull => Expr::col(Alias::new(column)).is_null(),
            Self::Equals(path) => Expr::col(Alias::new(column)).eq(path.as_str()),
        }
    }

    /// Value bound for the context path column when inserting.
    fn bind_value(&self) -> Value {
        match self {
            Self::IsNull => Value::String(None),
            Self::Equals(path) => path.as_str().into(),
        }
    }
}

/// Names of the session table and its columns.
///
/// Every setter rejects an empty name. The row identifier column defaults to
/// [`DEFAULT_ROW_ID_COLUMN`] and silently becomes [`RESERVED_ROW_ID_SUBSTITUTE`]
/// on backends that reserve it; setting the reserved name explicitly fails
/// [`validate`](Self::validate) on such a backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionTableSchema {
    table_name: String,
    row_id_column: Option<String>,
    id_column: String,
    context_path_column: String,
    virtual_host_column: String,
    last_node_column: String,
    access_time_column: String,
    last_access_time_column: String,
    create_time_column: String,
    cookie_time_column: String,
    last_saved_time_column: String,
    expiry_time_column: String,
    max_interval_column: String,
    map_column: String,
}

impl Default for SessionTableSchema {
    fn default() -> Self {
        Self {
            table_name: "tower_sessions_data".to_string(),
            row_id_column: None,
            id_column: "sessionId".to_string(),
            context_path_column: "contextPath".to_string(),
            virtual_host_column: "virtualHost".to_string(),
            last_node_column: "lastNode".to_string(),
            access_time_column: "accessTime".to_string(),
            last_access_time_column: "lastAccessTime".to_string(),
            create_time_column: "createTime".to_string(),
            cookie_time_column: "cookieTime".to_string(),
            last_saved_time_column: "lastSavedTime".to_string(),
            expiry_time_column: "expiryTime".to_string(),
            max_interval_column: "maxInterval".to_string(),
            map_column: "map".to_string(),
        }
    }
}

fn checked(what: &str, name: impl Into<String>) -> Result<String> {
    let name = name.into();
    if name.trim().is_empty() {
        return Err(Error::configuration(format!("{what} must not be empty")));
    }
    Ok(name)
}

impl SessionTableSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom table name.
    ///
    /// ```
    /// use tower_sessions_seaorm_cluster_store::SessionTableSchema;
    ///
    /// let mut schema = SessionTableSchema::new();
    /// schema.set_table_name("production_sessions").unwrap();
    /// assert!(schema.set_table_name("").is_err());
    /// ```
    pub fn set_table_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.table_name = checked("table name", name)?;
        Ok(())
    }

    pub fn set_row_id_column(&mut self, name: impl Into<String>) -> Result<()> {
        self.row_id_column = Some(checked("row id column", name)?);
        Ok(())
    }

    pub fn set_id_column(&mut self, name: impl Into<String>) -> Result<()> {
        self.id_column = checked("id column", name)?;
        Ok(())
    }

    pub fn set_context_path_column(&mut self, name: impl Into<String>) -> Result<()> {
        self.context_path_column = checked("context path column", name)?;
        Ok(())
    }

    pub fn set_virtual_host_column(&mut self, name: impl Into<String>) -> Result<()> {
        self.virtual_host_column = checked("virtual host column", name)?;
        Ok(())
    }

    pub fn set_last_node_column(&mut self, name: impl Into<String>) -> Result<()> {
        self.last_node_column = checked("last node column", name)?;
        Ok(())
    }

    pub fn set_access_time_column(&mut self, name: impl Into<String>) -> Result<()> {
        self.access_time_column = checked("access time column", name)?;
        Ok(())
    }

    pub fn set_last_access_time_column(&mut self, name: impl Into<String>) -> Result<()> {
        self.last_access_time_column = checked("last access time column", name)?;
        Ok(())
    }

    pub fn set_create_time_column(&mut self, name: impl Into<String>) -> Result<()> {
        self.create_time_column = checked("create time column", name)?;
        Ok(())
    }

    pub fn set_cookie_time_column(&mut self, name: impl Into<String>) -> Result<()> {
        self.cookie_time_column = checked("cookie time column", name)?;
        Ok(())
    }

    pub fn set_last_saved_time_column(&mut self, name: impl Into<String>) -> Result<()> {
        self.last_saved_time_column = checked("last saved time column", name)?;
        Ok(())
    }

    pub fn set_expiry_time_column(&mut self, name: impl Into<String>) -> Result<()> {
        self.expiry_time_column = checked("expiry time column", name)?;
        Ok(())
    }

    pub fn set_max_interval_column(&mut self, name: impl Into<String>) -> Result<()> {
        self.max_interval_column = checked("max interval column", name)?;
        Ok(())
    }

    pub fn set_map_column(&mut self, name: impl Into<String>) -> Result<()> {
        self.map_column = checked("map column", name)?;
        Ok(())
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// The row identifier column as it applies to `profile`.
    pub fn row_id_column(&self, profile: &DialectProfile) -> &str {
        match &self.row_id_column {
            Some(name) => name,
            None if profile.is_row_id_reserved() => RESERVED_ROW_ID_SUBSTITUTE,
            None => DEFAULT_ROW_ID_COLUMN,
        }
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    pub fn context_path_column(&self) -> &str {
        &self.context_path_column
    }

    pub fn virtual_host_column(&self) -> &str {
        &self.virtual_host_column
    }

    pub fn last_node_column(&self) -> &str {
        &self.last_node_column
    }

    pub fn access_time_column(&self) -> &str {
        &self.access_time_column
    }

    pub fn last_access_time_column(&self) -> &str {
        &self.last_access_time_column
    }

    pub fn create_time_column(&self) -> &str {
        &self.create_time_column
    }

    pub fn cookie_time_column(&self) -> &str {
        &self.cookie_time_column
    }

    pub fn last_saved_time_column(&self) -> &str {
        &self.last_saved_time_column
    }

    pub fn expiry_time_column(&self) -> &str {
        &self.expiry_time_column
    }

    pub fn max_interval_column(&self) -> &str {
        &self.max_interval_column
    }

    pub fn map_column(&self) -> &str {
        &self.map_column
    }

    /// Rejects names the backend cannot use.
    pub fn validate(&self, profile: &DialectProfile) -> Result<()> {
        if let Some(name) = &self.row_id_column {
            if profile.is_row_id_reserved() && name.eq_ignore_ascii_case(DEFAULT_ROW_ID_COLUMN) {
                return Err(Error::configuration(format!(
                    "{name} is a reserved word for {}",
                    profile.db_name()
                )));
            }
        }
        Ok(())
    }

    pub fn expiry_index_name(&self) -> String {
        format!("idx_{}_expiry", self.table_name)
    }

    pub fn session_index_name(&self) -> String {
        format!("idx_{}_session", self.table_name)
    }

    fn key_matches(
        &self,
        profile: &DialectProfile,
        key: &SessionKey,
    ) -> [SimpleExpr; 3] {
        let context = ContextMatch::for_path(profile, key.canonical_context_path());
        [
            Expr::col(Alias::new(&self.id_column)).eq(key.id()),
            context.condition(&self.context_path_column),
            Expr::col(Alias::new(&self.virtual_host_column)).eq(key.virtual_host()),
        ]
    }

    fn data_columns(&self) -> Vec<Alias> {
        [
            &self.id_column,
            &self.context_path_column,
            &self.virtual_host_column,
            &self.last_node_column,
            &self.access_time_column,
            &self.last_access_time_column,
            &self.create_time_column,
            &self.cookie_time_column,
            &self.last_saved_time_column,
            &self.expiry_time_column,
            &self.max_interval_column,
            &self.map_column,
        ]
        .into_iter()
        .map(Alias::new)
        .collect()
    }

    /// Selects the full row of one session.
    pub fn load_statement(&self, profile: &DialectProfile, key: &SessionKey) -> Statement {
        let mut select = Query::select();
        select
            .columns(self.data_columns())
            .from(Alias::new(&self.table_name));
        for condition in self.key_matches(profile, key) {
            select.and_where(condition);
        }
        profile.backend().build(&select)
    }

    /// Selects only the expiry time of one session.
    pub fn exists_statement(&self, profile: &DialectProfile, key: &SessionKey) -> Statement {
        let mut select = Query::select();
        select
            .column(Alias::new(&self.expiry_time_column))
            .from(Alias::new(&self.table_name));
        for condition in self.key_matches(profile, key) {
            select.and_where(condition);
        }
        profile.backend().build(&select)
    }

    /// Inserts a fresh row. `map` is the encoded attribute map and
    /// `last_saved` the commit time recorded in the row.
    pub fn insert_statement(
        &self,
        profile: &DialectProfile,
        key: &SessionKey,
        record: &SessionRecord,
        map: Vec<u8>,
        last_saved: i64,
    ) -> Statement {
        let context = ContextMatch::for_path(profile, key.canonical_context_path());
        let mut columns = vec![Alias::new(self.row_id_column(profile))];
        columns.extend(self.data_columns());

        let insert = Query::insert()
            .into_table(Alias::new(&self.table_name))
            .columns(columns)
            .values_panic([
                key.row_id().into(),
                key.id().into(),
                context.bind_value().into(),
                key.virtual_host().into(),
                record.last_node.as_str().into(),
                record.accessed.into(),
                record.last_accessed.into(),
                record.created.into(),
                record.cookie_set.into(),
                last_saved.into(),
                record.expiry.into(),
                record.max_inactive_ms.into(),
                map.into(),
            ])
            .to_owned();
        profile.backend().build(&insert)
    }

    /// Rewrites the mutable fields of an existing row.
    pub fn update_statement(
        &self,
        profile: &DialectProfile,
        key: &SessionKey,
        record: &SessionRecord,
        map: Vec<u8>,
        last_saved: i64,
    ) -> Statement {
        let mut update = Query::update();
        update
            .table(Alias::new(&self.table_name))
            .value(Alias::new(&self.last_node_column), record.last_node.as_str())
            .value(Alias::new(&self.access_time_column), record.accessed)
            .value(Alias::new(&self.last_access_time_column), record.last_accessed)
            .value(Alias::new(&self.cookie_time_column), record.cookie_set)
            .value(Alias::new(&self.last_saved_time_column), last_saved)
            .value(Alias::new(&self.expiry_time_column), record.expiry)
            .value(Alias::new(&self.max_interval_column), record.max_inactive_ms)
            .value(Alias::new(&self.map_column), map);
        for condition in self.key_matches(profile, key) {
            update.and_where(condition);
        }
        profile.backend().build(&update)
    }

    pub fn delete_statement(&self, profile: &DialectProfile, key: &SessionKey) -> Statement {
        let mut delete = Query::delete();
        delete.from_table(Alias::new(&self.table_name));
        for condition in self.key_matches(profile, key) {
            delete.and_where(condition);
        }
        profile.backend().build(&delete)
    }

    /// Ids of sessions last written by `node` in `context` whose expiry lies
    /// in `(0, upper_bound]`.
    pub fn own_node_expiry_statement(
        &self,
        profile: &DialectProfile,
        node: &str,
        context: &SessionContext,
        upper_bound: i64,
    ) -> Statement {
        let context_match = ContextMatch::for_path(profile, context.canonical_context_path());
        let expiry = || Expr::col(Alias::new(&self.expiry_time_column));
        let select = Query::select()
            .column(Alias::new(&self.id_column))
            .from(Alias::new(&self.table_name))
            .and_where(Expr::col(Alias::new(&self.last_node_column)).eq(node))
            .and_where(context_match.condition(&self.context_path_column))
            .and_where(Expr::col(Alias::new(&self.virtual_host_column)).eq(context.virtual_host()))
            .and_where(expiry().gt(0i64))
            .and_where(expiry().lte(upper_bound))
            .to_owned();
        profile.backend().build(&select)
    }

    /// Full keys of sessions of any node or context whose expiry lies in
    /// `(0, upper_bound]`.
    pub fn ancient_expiry_statement(&self, profile: &DialectProfile, upper_bound: i64) -> Statement {
        let expiry = || Expr::col(Alias::new(&self.expiry_time_column));
        let select = Query::select()
            .columns([
                Alias::new(&self.id_column),
                Alias::new(&self.context_path_column),
                Alias::new(&self.virtual_host_column),
            ])
            .from(Alias::new(&self.table_name))
            .and_where(expiry().gt(0i64))
            .and_where(expiry().lte(upper_bound))
            .to_owned();
        profile.backend().build(&select)
    }

    pub fn create_table_statement(&self, profile: &DialectProfile) -> TableCreateStatement {
        let long = || Alias::new(profile.long_type());
        Table::create()
            .table(Alias::new(&self.table_name))
            .col(
                ColumnDef::new(Alias::new(self.row_id_column(profile)))
                    .string_len(ROW_ID_LENGTH)
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(Alias::new(&self.id_column)).string_len(120))
            .col(ColumnDef::new(Alias::new(&self.context_path_column)).string_len(60))
            .col(ColumnDef::new(Alias::new(&self.virtual_host_column)).string_len(60))
            .col(ColumnDef::new(Alias::new(&self.last_node_column)).string_len(60))
            .col(ColumnDef::new(Alias::new(&self.access_time_column)).custom(long()))
            .col(ColumnDef::new(Alias::new(&self.last_access_time_column)).custom(long()))
            .col(ColumnDef::new(Alias::new(&self.create_time_column)).custom(long()))
            .col(ColumnDef::new(Alias::new(&self.cookie_time_column)).custom(long()))
            .col(ColumnDef::new(Alias::new(&self.last_saved_time_column)).custom(long()))
            .col(ColumnDef::new(Alias::new(&self.expiry_time_column)).custom(long()))
            .col(ColumnDef::new(Alias::new(&self.max_interval_column)).custom(long()))
            .col(ColumnDef::new(Alias::new(&self.map_column)).custom(Alias::new(profile.blob_type())))
            .to_owned()
    }

    pub fn expiry_index_statement(&self) -> IndexCreateStatement {
        Index::create()
            .name(self.expiry_index_name())
            .table(Alias::new(&self.table_name))
            .col(Alias::new(&self.expiry_time_column))
            .to_owned()
    }

    pub fn session_index_statement(&self) -> IndexCreateStatement {
        Index::create()
            .name(self.session_index_name())
            .table(Alias::new(&self.table_name))
            .col(Alias::new(&self.id_column))
            .col(Alias::new(&self.context_path_column))
            .to_owned()
    }

    /// DDL adding the max interval column to a table created before it existed.
    pub fn add_max_interval_column_sql(&self, profile: &DialectProfile) -> String {
        let stem = format!(
            "ALTER TABLE {} ADD {} {}",
            profile.quote_identifier(&self.table_name),
            profile.quote_identifier(&self.max_interval_column),
            profile.long_type()
        );
        // Oracle wants the default before the constraint.
        if profile.db_name().contains("oracle") {
            format!("{stem} DEFAULT {MAX_INTERVAL_NOT_SET} NOT NULL")
        } else {
            format!("{stem} NOT NULL DEFAULT {MAX_INTERVAL_NOT_SET}")
        }
    }

    /// Creates the table and its indexes if absent and adds the max interval
    /// column to older tables. Safe to run repeatedly; any failure is fatal.
    pub async fn prepare(&self, manager: &SchemaManager<'_>, profile: &DialectProfile) -> Result<()> {
        self.validate(profile)?;
        let table = self.table_name.as_str();

        let table_exists = manager
            .has_table(table)
            .await
            .map_err(|e| Error::bootstrap(format!("checking for table {table}"), e))?;

        if !table_exists {
            manager
                .create_table(self.create_table_statement(profile))
                .await
                .map_err(|e| Error::bootstrap(format!("creating table {table}"), e))?;
            info!(table, "Created session table");
        } else {
            let has_max_interval = manager
                .has_column(table, &self.max_interval_column)
                .await
                .map_err(|e| self.max_interval_problem("checking for", e))?;

            if !has_max_interval {
                let alter = Statement::from_string(
                    profile.backend(),
                    self.add_max_interval_column_sql(profile),
                );
                manager
                    .get_connection()
                    .execute(alter)
                    .await
                    .map_err(|e| self.max_interval_problem("adding", e))?;
                info!(table, column = %self.max_interval_column, "Added max interval column");
            }
        }

        let expiry_index = self.expiry_index_name();
        if !manager
            .has_index(table, &expiry_index)
            .await
            .map_err(|e| Error::bootstrap(format!("checking for index {expiry_index}"), e))?
        {
            manager
                .create_index(self.expiry_index_statement())
                .await
                .map_err(|e| Error::bootstrap(format!("creating index {expiry_index}"), e))?;
        }

        let session_index = self.session_index_name();
        if !manager
            .has_index(table, &session_index)
            .await
            .map_err(|e| Error::bootstrap(format!("checking for index {session_index}"), e))?
        {
            manager
                .create_index(self.session_index_statement())
                .await
                .map_err(|e| Error::bootstrap(format!("creating index {session_index}"), e))?;
        }

        Ok(())
    }

    fn max_interval_problem(&self, action: &str, source: DbErr) -> Error {
        warn!(
            "Problem {} column {} of table {}. Ensure table contains column definition: \"{} long not null default {}\"",
            action,
            self.max_interval_column,
            self.table_name,
            self.max_interval_column,
            MAX_INTERVAL_NOT_SET
        );
        Error::bootstrap(
            format!("{action} column {} of {}", self.max_interval_column, self.table_name),
            source,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DatabaseBackend;

    fn sqlite() -> DialectProfile {
        DialectProfile::for_backend(DatabaseBackend::Sqlite)
    }

    fn null_context() -> DialectProfile {
        sqlite().with_empty_string_null(true)
    }

    fn bound_values(stmt: &Statement) -> Vec<Value> {
        stmt.values.clone().map(|v| v.0).unwrap_or_default()
    }

    #[test]
    fn test_context_match_is_pure_function_of_flag_and_emptiness() {
        assert_eq!(ContextMatch::for_path(&null_context(), ""), ContextMatch::IsNull);
        assert_eq!(
            ContextMatch::for_path(&null_context(), "_app"),
            ContextMatch::Equals("_app".into())
        );
        assert_eq!(
            ContextMatch::for_path(&sqlite(), ""),
            ContextMatch::Equals(String::new())
        );
    }

    #[test]
    fn test_empty_context_on_null_backend_uses_is_null_everywhere() {
        let schema = SessionTableSchema::new();
        let profile = null_context();
        let key = SessionKey::new("s1", None::<&str>, "host1");
        let record = SessionRecord::new(1, 1, 1, 1);

        let load = schema.load_statement(&profile, &key);
        let update = schema.update_statement(&profile, &key, &record, vec![], 5);
        let delete = schema.delete_statement(&profile, &key);

        for stmt in [&load, &update, &delete] {
            assert!(stmt.sql.contains("\"contextPath\" IS NULL"), "{}", stmt.sql);
        }
        assert_eq!(bound_values(&load).len(), 2);
        assert_eq!(bound_values(&delete).len(), 2);
        // eight assignments plus id and virtual host
        assert_eq!(bound_values(&update).len(), 10);
    }

    #[test]
    fn test_explicit_empty_context_matches_absent_context() {
        let schema = SessionTableSchema::new();
        let profile = null_context();
        let absent = SessionKey::new("s1", None::<&str>, "host1");
        let empty = SessionKey::new("s1", Some(""), "host1");

        let absent = schema.load_statement(&profile, &absent);
        let empty = schema.load_statement(&profile, &empty);
        assert_eq!(absent.sql, empty.sql);
        assert_eq!(bound_values(&absent), bound_values(&empty));
    }

    #[test]
    fn test_empty_context_on_regular_backend_binds_empty_string() {
        let schema = SessionTableSchema::new();
        let key = SessionKey::new("s1", None::<&str>, "host1");

        let load = schema.load_statement(&sqlite(), &key);
        assert!(!load.sql.contains("IS NULL"));
        assert_eq!(
            bound_values(&load),
            vec![Value::from("s1"), Value::from(""), Value::from("host1")]
        );
    }

    #[test]
    fn test_insert_binds_null_context_on_null_backend() {
        let schema = SessionTableSchema::new();
        let key = SessionKey::new("s1", None::<&str>, "host1");
        let record = SessionRecord::new(1, 2, 3, 4);

        let insert = schema.insert_statement(&null_context(), &key, &record, vec![1, 2], 99);
        let values = bound_values(&insert);

        assert_eq!(values.len(), 13);
        assert_eq!(values[0], Value::from("0:_5:host1_s1"));
        assert_eq!(values[2], Value::String(None));
        assert_eq!(values[9], Value::from(99i64));
    }

    #[test]
    fn test_row_id_substituted_on_reserving_backend() {
        let schema = SessionTableSchema::new();
        let reserving = sqlite().with_row_id_reserved(true);

        assert_eq!(schema.row_id_column(&sqlite()), DEFAULT_ROW_ID_COLUMN);
        assert_eq!(schema.row_id_column(&reserving), RESERVED_ROW_ID_SUBSTITUTE);
        assert!(schema.validate(&reserving).is_ok());
    }

    #[test]
    fn test_forcing_reserved_row_id_is_rejected() {
        let mut schema = SessionTableSchema::new();
        schema.set_row_id_column("rowId").unwrap();

        let reserving = sqlite().with_row_id_reserved(true);
        assert!(matches!(
            schema.validate(&reserving),
            Err(Error::Configuration(_))
        ));
        assert!(schema.validate(&sqlite()).is_ok());
    }

    #[test]
    fn test_setters_reject_empty_names() {
        let mut schema = SessionTableSchema::new();

        assert!(schema.set_table_name("").is_err());
        assert!(schema.set_map_column("  ").is_err());
        assert!(schema.set_row_id_column("").is_err());
        assert_eq!(schema, SessionTableSchema::new());

        schema.set_map_column("attributes").unwrap();
        assert_eq!(schema.map_column(), "attributes");
    }

    #[test]
    fn test_sweep_statements_bound_expiry() {
        let schema = SessionTableSchema::new();
        let context = SessionContext::new("_app", "host1");

        let own = schema.own_node_expiry_statement(&sqlite(), "node0", &context, 500);
        assert!(own.sql.contains("\"expiryTime\" > ?"), "{}", own.sql);
        assert!(own.sql.contains("\"expiryTime\" <= ?"), "{}", own.sql);
        assert_eq!(
            bound_values(&own),
            vec![
                Value::from("node0"),
                Value::from("_app"),
                Value::from("host1"),
                Value::from(0i64),
                Value::from(500i64),
            ]
        );

        let ancient = schema.ancient_expiry_statement(&sqlite(), 100);
        assert_eq!(bound_values(&ancient), vec![Value::from(0i64), Value::from(100i64)]);

        let root = SessionContext::new("", "host1");
        let own_root = schema.own_node_expiry_statement(&null_context(), "node0", &root, 500);
        assert!(own_root.sql.contains("\"contextPath\" IS NULL"), "{}", own_root.sql);
        assert_eq!(
            bound_values(&own_root),
            vec![
                Value::from("node0"),
                Value::from("host1"),
                Value::from(0i64),
                Value::from(500i64),
            ]
        );
    }

    #[test]
    fn test_row_id_column_fits_widest_key() {
        let key = SessionKey::new("i".repeat(120), Some("c".repeat(60)), "h".repeat(60));
        assert!(key.row_id().len() <= ROW_ID_LENGTH as usize);

        let ddl = SessionTableSchema::new()
            .create_table_statement(&sqlite())
            .to_string(sea_orm::sea_query::SqliteQueryBuilder);
        assert!(ddl.contains(&format!("varchar({ROW_ID_LENGTH})")), "{ddl}");
    }

    #[test]
    fn test_max_interval_ddl_ordering() {
        let schema = SessionTableSchema::new();

        let standard = schema.add_max_interval_column_sql(&sqlite());
        assert_eq!(
            standard,
            "ALTER TABLE \"tower_sessions_data\" ADD \"maxInterval\" bigint NOT NULL DEFAULT -999"
        );

        let oracle = schema.add_max_interval_column_sql(&sqlite().with_db_name("Oracle"));
        assert!(oracle.ends_with("DEFAULT -999 NOT NULL"));
    }

    #[test]
    fn test_index_names() {
        let schema = SessionTableSchema::new();
        assert_eq!(schema.expiry_index_name(), "idx_tower_sessions_data_expiry");
        assert_eq!(schema.session_index_name(), "idx_tower_sessions_data_session");
    }
}
