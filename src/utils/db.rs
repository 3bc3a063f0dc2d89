use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

use crate::models::{emission_record, user};

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Create the tables and indexes if they do not exist yet.
///
/// The unique (user_id, entry_date) index backs the one-record-per-day
/// upsert: racing inserts for the same key lose at the database level
/// instead of producing duplicate rows.
pub async fn init_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut users = schema.create_table_from_entity(user::Entity);
    users.if_not_exists();
    db.execute(backend.build(&users)).await?;

    let mut records = schema.create_table_from_entity(emission_record::Entity);
    records.if_not_exists();
    db.execute(backend.build(&records)).await?;

    let unique_day = Index::create()
        .name("ux_emission_records_user_id_entry_date")
        .table(emission_record::Entity)
        .col(emission_record::Column::UserId)
        .col(emission_record::Column::EntryDate)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&unique_day)).await?;

    Ok(())
}
