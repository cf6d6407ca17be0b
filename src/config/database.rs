use crate::domain::{
    gather_room::entity::{gather_room, gather_room_category, gather_room_image},
    reservation::entity::reservation,
    review::entity::review,
    user::entity::{country, personality_type, social_account, user},
};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Schema, Statement};
use std::env;
use tracing::info;

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    info!("Successfully connected to the database.");

    // Check if schema update is enabled
    let should_update_schema = env::var("DB_SCHEMA_UPDATE")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or_else(|_| {
            tracing::warn!(
                "Invalid DB_SCHEMA_UPDATE value, defaulting to false. Use 'true' or 'false'."
            );
            false
        });

    if should_update_schema {
        sync_schema(&db).await?;
    } else {
        info!("Skipping database schema synchronization (DB_SCHEMA_UPDATE is not true).");
    }

    Ok(db)
}

/// 엔티티 정의로부터 테이블과 인덱스를 생성합니다. 이미 있으면 건너뜁니다.
pub async fn sync_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    info!("Starting database schema synchronization...");

    // Order matters for foreign keys! (Parent first, then Child)

    // 1. Lookup tables
    create_table_if_not_exists(db, &schema, country::Entity).await?;
    create_table_if_not_exists(db, &schema, personality_type::Entity).await?;
    create_table_if_not_exists(db, &schema, gather_room_category::Entity).await?;

    // 2. Users
    create_table_if_not_exists(db, &schema, user::Entity).await?;
    create_table_if_not_exists(db, &schema, social_account::Entity).await?;

    // 3. Gather rooms
    create_table_if_not_exists(db, &schema, gather_room::Entity).await?;
    create_table_if_not_exists(db, &schema, gather_room_image::Entity).await?;

    // 4. Join tables
    create_table_if_not_exists(db, &schema, reservation::Entity).await?;
    create_table_if_not_exists(db, &schema, review::Entity).await?;

    // 사용자당 모임방 예약은 하나만 허용
    create_unique_index_if_not_exists(
        db,
        "uq_reservation_user_gather_room",
        "user_gather_room_reservation",
        &["user_id", "gather_room_id"],
    )
    .await?;
    create_index_if_not_exists(
        db,
        "idx_gather_room_review_gather_room",
        "gather_room_review",
        &["gather_room_id", "deleted_at"],
    )
    .await?;

    info!("Database schema synchronization completed.");
    Ok(())
}

async fn create_index_if_not_exists(
    db: &DatabaseConnection,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let cols = columns.join(", ");
    let sql = format!("CREATE INDEX {} ON {} ({})", index_name, table_name, cols);
    execute_ignoring_existing(db, index_name, sql).await
}

async fn create_unique_index_if_not_exists(
    db: &DatabaseConnection,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let cols = columns.join(", ");
    let sql = format!(
        "CREATE UNIQUE INDEX {} ON {} ({})",
        index_name, table_name, cols
    );
    execute_ignoring_existing(db, index_name, sql).await
}

async fn execute_ignoring_existing(
    db: &DatabaseConnection,
    index_name: &str,
    sql: String,
) -> Result<(), DbErr> {
    let stmt = Statement::from_string(db.get_database_backend(), sql);
    match db.execute(stmt).await {
        Ok(_) => Ok(()),
        Err(e) => {
            // Ignore duplicate index errors for idempotency.
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("duplicate") || err_str.contains("exists") {
                Ok(())
            } else {
                tracing::error!("Failed to create index {}: {}", index_name, e);
                Err(e)
            }
        }
    }
}

async fn create_table_if_not_exists<E>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr>
where
    E: sea_orm::EntityTrait,
{
    let backend = db.get_database_backend();
    let table_name = entity.table_name().to_string();
    let create_stmt: Statement =
        backend.build(schema.create_table_from_entity(entity).if_not_exists());

    db.execute(create_stmt).await.map(|_| ()).map_err(|e| {
        tracing::error!("Failed to create table {}: {}", table_name, e);
        e
    })
}
