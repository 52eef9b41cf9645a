//! Database connection and schema setup
use entity::{picnic_registration, prelude::*};
use sea_orm::{
    sea_query::Index, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr,
    Schema, SqlErr,
};

const REGISTRATION_UNIQUE_INDEX: &str = "idx-picnic_registration-user_id-picnic_id";

/// Open a connection pool to `database_url`.
pub(crate) async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(true);

    Database::connect(options).await
}

/// Create any missing tables, plus the unique index guarding against double registrations.
pub(crate) async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    // referenced tables first
    let tables = [
        schema.create_table_from_entity(City).if_not_exists().to_owned(),
        schema.create_table_from_entity(User).if_not_exists().to_owned(),
        schema.create_table_from_entity(Picnic).if_not_exists().to_owned(),
        schema
            .create_table_from_entity(PicnicRegistration)
            .if_not_exists()
            .to_owned(),
    ];
    for table in tables.iter() {
        db.execute(backend.build(table)).await?;
    }

    let index = Index::create()
        .name(REGISTRATION_UNIQUE_INDEX)
        .table(PicnicRegistration)
        .col(picnic_registration::Column::UserId)
        .col(picnic_registration::Column::PicnicId)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&index)).await?;

    tracing::debug!("Database schema is in place");
    Ok(())
}

/// Whether `err` is the database refusing a row that breaks a unique constraint.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
