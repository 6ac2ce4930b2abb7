use crate::storage::entity;
use log::info;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema, Statement,
};
use std::time::Duration;

pub async fn establish_connection(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());
    opt.max_connections(10)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Info);

    // Every pooled connection to an in-memory sqlite URL is a separate database.
    if db_url.contains(":memory:") {
        opt.max_connections(1).min_connections(1);
    }

    let db = Database::connect(opt).await?;

    let backend = db.get_database_backend();
    if backend == sea_orm::DatabaseBackend::Sqlite {
        db.execute(Statement::from_string(
            backend,
            "PRAGMA journal_mode=WAL;".to_string(),
        ))
        .await?;
    }

    init_schema(&db).await?;

    info!("database connection established, schema ready");

    Ok(db)
}

/// Creates the tables and unique indexes if they do not exist yet.
pub async fn init_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let stmt = builder.build(
        schema
            .create_table_from_entity(entity::User)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    let stmt = builder.build(
        schema
            .create_table_from_entity(entity::Dream)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    let stmt = builder.build(
        schema
            .create_table_from_entity(entity::Purchase)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    let stmt = builder.build(
        schema
            .create_table_from_entity(entity::Rating)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    // One purchase per (buyer, dream). The purchase flow pre-checks this, but
    // the index is what actually closes the double-purchase race.
    db.execute(Statement::from_string(
        builder,
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_purchases_buyer_dream ON purchases(buyer_id, dream_id);"
            .to_string(),
    ))
    .await?;

    // One rating per (rater, dream); the rating upsert targets this index.
    db.execute(Statement::from_string(
        builder,
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_ratings_rater_dream ON ratings(rater_id, dream_id);"
            .to_string(),
    ))
    .await?;

    Ok(())
}
