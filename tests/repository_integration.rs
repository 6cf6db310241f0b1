//! Integration tests for the MongoDB repository
//!
//! These tests verify that `MongoStudentRepository` correctly interacts with a
//! real MongoDB server: inserts, filtered listing, partial updates and
//! deletes. Each test works in its own throwaway database.
//!
//! Run with `MONGO_URI` set and `--ignored`.

use mongodb::{bson::oid::ObjectId, Client};
use student_records_api::domain::repositories::{StudentFilter, StudentRepository};
use student_records_api::domain::student::{Address, NewStudent, StudentId, StudentUpdate};
use student_records_api::infrastructure::repositories::MongoStudentRepository;

/// Connect and create a repository on a fresh database
async fn setup_test_db() -> (Client, String, MongoStudentRepository) {
    let uri = std::env::var("MONGO_URI").expect("MONGO_URI must be set for integration tests");

    let client = Client::with_uri_str(&uri)
        .await
        .expect("Failed to connect to test database");
    let database = format!("students_test_{}", ObjectId::new().to_hex());
    let repo = MongoStudentRepository::new(&client, &database);

    (client, database, repo)
}

/// Drop the throwaway database
async fn cleanup_test_db(client: &Client, database: &str) {
    client
        .database(database)
        .drop()
        .await
        .expect("Failed to drop test database");
}

fn student(name: &str, age: i64, country: &str) -> NewStudent {
    NewStudent::new(name, age, Address::new("City", country)).expect("valid student")
}

#[tokio::test]
#[ignore = "requires a MongoDB server at MONGO_URI"]
async fn test_connect_pings_server() {
    let uri = std::env::var("MONGO_URI").expect("MONGO_URI must be set for integration tests");

    MongoStudentRepository::connect(&uri, "students_test_ping")
        .await
        .expect("Ping should succeed");
}

#[tokio::test]
#[ignore = "requires a MongoDB server at MONGO_URI"]
async fn test_insert_and_find_by_id() {
    let (client, database, repo) = setup_test_db().await;

    let id = repo
        .insert(&student("Jane", 22, "Peru"))
        .await
        .expect("Failed to insert student");

    let found = repo
        .find_by_id(id)
        .await
        .expect("Failed to find student")
        .expect("Student should be found");

    assert_eq!(found.id(), id, "IDs should match");
    assert_eq!(found.name(), "Jane");
    assert_eq!(found.age(), 22);
    assert_eq!(found.address(), &Address::new("City", "Peru"));

    // Cleanup
    cleanup_test_db(&client, &database).await;
}

#[tokio::test]
#[ignore = "requires a MongoDB server at MONGO_URI"]
async fn test_find_by_id_missing_returns_none() {
    let (client, database, repo) = setup_test_db().await;

    let found = repo
        .find_by_id(StudentId::generate())
        .await
        .expect("Query should succeed");
    assert!(found.is_none());

    cleanup_test_db(&client, &database).await;
}

#[tokio::test]
#[ignore = "requires a MongoDB server at MONGO_URI"]
async fn test_find_with_filters() {
    let (client, database, repo) = setup_test_db().await;

    for (name, age, country) in [("A", 17, "USA"), ("B", 18, "USA"), ("C", 40, "Peru")] {
        repo.insert(&student(name, age, country))
            .await
            .expect("Failed to insert student");
    }

    let all = repo.find(&StudentFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    let adults = repo
        .find(&StudentFilter {
            country: None,
            min_age: Some(18),
        })
        .await
        .unwrap();
    let names: Vec<_> = adults.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["B", "C"]);

    let american_adults = repo
        .find(&StudentFilter {
            country: Some("USA".to_string()),
            min_age: Some(18),
        })
        .await
        .unwrap();
    assert_eq!(american_adults.len(), 1);
    assert_eq!(american_adults[0].name(), "B");

    cleanup_test_db(&client, &database).await;
}

#[tokio::test]
#[ignore = "requires a MongoDB server at MONGO_URI"]
async fn test_update_sets_only_given_fields() {
    let (client, database, repo) = setup_test_db().await;
    let id = repo.insert(&student("Jane", 22, "Peru")).await.unwrap();

    let matched = repo
        .update(
            id,
            &StudentUpdate {
                age: Some(30),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update student");
    assert!(matched);

    let found = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(found.name(), "Jane");
    assert_eq!(found.age(), 30);

    let matched = repo
        .update(
            StudentId::generate(),
            &StudentUpdate {
                age: Some(31),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(!matched, "Update of a missing student should match nothing");

    cleanup_test_db(&client, &database).await;
}

#[tokio::test]
#[ignore = "requires a MongoDB server at MONGO_URI"]
async fn test_delete() {
    let (client, database, repo) = setup_test_db().await;
    let id = repo.insert(&student("Jane", 22, "Peru")).await.unwrap();

    assert!(repo.delete(id).await.expect("Failed to delete student"));
    assert!(repo.find_by_id(id).await.unwrap().is_none());
    assert!(!repo.delete(id).await.unwrap(), "Second delete removes nothing");

    cleanup_test_db(&client, &database).await;
}
