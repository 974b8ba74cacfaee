//! Integration tests for skycast-db
//!
//! Tests database operations with a real SQLite in-memory database

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Set, SqlErr,
};
use skycast_db::{connect, entities::saved_city, entities::search, entities::user, migrate};
use uuid::Uuid;

/// Helper to create a test database
async fn setup_test_db() -> sea_orm::DatabaseConnection {
    let db = connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    migrate(&db).await.expect("Failed to run migrations");

    db
}

async fn insert_user(db: &sea_orm::DatabaseConnection, username: &str) -> user::Model {
    let now = Utc::now();
    user::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        password_hash: Set("$argon2id$v=19$m=19456,t=2,p=1$fake$fake".to_string()),
        name: Set(None),
        location: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to insert user")
}

#[tokio::test]
async fn test_database_connection() {
    let db = connect("sqlite::memory:").await.expect("Failed to connect");

    let backend = db.get_database_backend();
    assert!(matches!(backend, sea_orm::DatabaseBackend::Sqlite));
}

#[tokio::test]
async fn test_migrations_run_successfully() {
    let db = connect("sqlite::memory:").await.expect("Failed to connect");

    let result = migrate(&db).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_create_and_read_user() {
    let db = setup_test_db().await;

    let created = insert_user(&db, "alice").await;

    let found = user::Entity::find_by_id(created.id)
        .one(&db)
        .await
        .expect("Failed to query")
        .expect("User not found");

    assert_eq!(found.username, "alice");
    assert_eq!(found.name, None);
    assert!(found.password_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_duplicate_username_is_a_unique_violation() {
    let db = setup_test_db().await;

    insert_user(&db, "alice").await;

    let now = Utc::now();
    let duplicate = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set("alice".to_string()),
        password_hash: Set("$argon2id$v=19$m=19456,t=2,p=1$fake$fake".to_string()),
        name: Set(None),
        location: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&db)
    .await;

    let err = duplicate.expect_err("Duplicate username should fail");
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    // Exactly one user row remains
    let count = user::Entity::find().count(&db).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_saved_city_set_semantics() {
    let db = setup_test_db().await;

    let alice = insert_user(&db, "alice").await;

    saved_city::ActiveModel {
        user_id: Set(alice.id),
        city: Set("Denver".to_string()),
        created_at: Set(Utc::now()),
    }
    .insert(&db)
    .await
    .expect("First save should succeed");

    // Second insert of the same (user, city) pair hits the composite key
    let dup = saved_city::ActiveModel {
        user_id: Set(alice.id),
        city: Set("Denver".to_string()),
        created_at: Set(Utc::now()),
    }
    .insert(&db)
    .await;

    let err = dup.expect_err("Duplicate city should fail");
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    let count = saved_city::Entity::find()
        .filter(saved_city::Column::UserId.eq(alice.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_same_city_allowed_for_different_users() {
    let db = setup_test_db().await;

    let alice = insert_user(&db, "alice").await;
    let bob = insert_user(&db, "bob").await;

    for owner in [alice.id, bob.id] {
        saved_city::ActiveModel {
            user_id: Set(owner),
            city: Set("Denver".to_string()),
            created_at: Set(Utc::now()),
        }
        .insert(&db)
        .await
        .expect("Save should succeed");
    }

    let count = saved_city::Entity::find().count(&db).await.unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_remove_absent_city_is_a_no_op() {
    let db = setup_test_db().await;

    let alice = insert_user(&db, "alice").await;

    let result = saved_city::Entity::delete_many()
        .filter(saved_city::Column::UserId.eq(alice.id))
        .filter(saved_city::Column::City.eq("Nowhere"))
        .exec(&db)
        .await
        .expect("Delete should not error");

    assert_eq!(result.rows_affected, 0);
}

#[tokio::test]
async fn test_deleting_user_cascades_to_saved_cities() {
    let db = setup_test_db().await;

    let alice = insert_user(&db, "alice").await;
    saved_city::ActiveModel {
        user_id: Set(alice.id),
        city: Set("Denver".to_string()),
        created_at: Set(Utc::now()),
    }
    .insert(&db)
    .await
    .unwrap();

    alice.delete(&db).await.expect("Failed to delete user");

    let count = saved_city::Entity::find().count(&db).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_search_log_insert() {
    let db = setup_test_db().await;

    search::ActiveModel {
        id: Set(Uuid::new_v4()),
        city: Set("denver".to_string()),
        created_at: Set(Utc::now()),
    }
    .insert(&db)
    .await
    .expect("Failed to log search");

    let count = search::Entity::find().count(&db).await.unwrap();
    assert_eq!(count, 1);
}
