//! Migration entry point for applications that manage their schema with
//! `sea-orm-migration` instead of letting [`SessionDataStore::start`](crate::SessionDataStore::start)
//! bootstrap it.
//!
//! The migration creates the table with the default [`SessionTableSchema`]
//! and the connection's default [`DialectProfile`]. Stores using custom names
//! or vendor overrides should rely on `start` instead.

use sea_orm_migration::prelude::*;

use crate::dialect::DialectProfile;
use crate::error::Error;
use crate::schema::SessionTableSchema;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    // Override the name of migration table to avoid conflicts
    fn migration_table_name() -> sea_orm::DynIden {
        Alias::new("tower_sessions_cluster_migrations").into_iden()
    }

    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateSessionTable)]
    }
}

struct CreateSessionTable;

impl MigrationName for CreateSessionTable {
    fn name(&self) -> &str {
        "m20251017_000001_create_session_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateSessionTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let profile = DialectProfile::for_backend(manager.get_database_backend());
        SessionTableSchema::default()
            .prepare(manager, &profile)
            .await
            .map_err(|err| match err {
                Error::SchemaBootstrap { source, .. } => source,
                other => DbErr::Migration(other.to_string()),
            })
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Alias::new(SessionTableSchema::default().table_name()))
                    .to_owned(),
            )
            .await
    }
}
