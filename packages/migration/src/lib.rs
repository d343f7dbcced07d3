pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20250301_000001_documents; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250301_000001_documents::Migration)]
    }
}

/// Apply every pending migration against an open connection.
/// Used by the backend at startup and by the PostgreSQL test suite.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    let name = current_database(db).await?;
    let defined = Migrator::migrations().len();
    let applied_before = count_applied_migrations(db).await.unwrap_or(0);

    tracing::info!(
        database = %name,
        defined,
        applied = applied_before,
        "running migrations"
    );

    match Migrator::up(db, None).await {
        Ok(()) => {
            let applied_after = count_applied_migrations(db).await.unwrap_or(0);
            tracing::info!(applied = applied_after, "migrations finished");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "migrations failed");
            Err(e)
        }
    }
}

async fn current_database(db: &DatabaseConnection) -> Result<String, DbErr> {
    let stmt = Statement::from_string(
        db.get_database_backend(),
        String::from("select current_database() as name"),
    );
    match db.query_one(stmt).await? {
        Some(row) => row.try_get("", "name"),
        None => Ok("<unknown>".to_string()),
    }
}

/// Count the number of migrations that have been applied to the database.
/// Returns 0 if the migration table doesn't exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0), // Migration table doesn't exist yet
        Err(e) => Err(e),
    }
}
