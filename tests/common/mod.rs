#![allow(dead_code)]

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement};
use tower_sessions_seaorm_cluster_store::{DatabaseAdaptor, DialectProfile, SessionContext, SessionDataStore};

pub const TABLE: &str = "tower_sessions_data";

/// A private in-memory database. One pooled connection, so every query sees
/// the same database.
pub async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    Database::connect(options)
        .await
        .expect("in-memory sqlite should open")
}

pub fn app_context() -> SessionContext {
    SessionContext::new("_app", "host1")
}

pub fn store_for(conn: &DatabaseConnection, context: SessionContext, node: &str) -> SessionDataStore {
    let mut store = SessionDataStore::new(DatabaseAdaptor::new(conn.clone()), context);
    store.set_node(node).unwrap();
    store
}

pub fn store_with_profile(
    conn: &DatabaseConnection,
    profile: DialectProfile,
    context: SessionContext,
    node: &str,
) -> SessionDataStore {
    let adaptor = DatabaseAdaptor::new(conn.clone()).with_profile(profile);
    let mut store = SessionDataStore::new(adaptor, context);
    store.set_node(node).unwrap();
    store
}

pub async fn started(mut store: SessionDataStore) -> SessionDataStore {
    store.start().await.expect("store should start");
    store
}

pub async fn exec(conn: &DatabaseConnection, sql: &str) {
    conn.execute_unprepared(sql).await.expect("raw statement should run");
}

pub async fn count(conn: &DatabaseConnection, filter: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) AS n FROM \"{TABLE}\" {filter}");
    let row = conn
        .query_one(Statement::from_string(DbBackend::Sqlite, sql))
        .await
        .expect("count should run")
        .expect("count returns a row");
    row.try_get::<i64>("", "n").unwrap()
}
