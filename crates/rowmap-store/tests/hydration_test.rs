// Integration tests for row hydration
// Covers the row + descriptor -> instance path and registry-driven coercion

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rowmap_core::{Entity, EntityType, FieldDef, FieldKind, Value};
use rowmap_store::mapper::hydrate;
use rowmap_store::EntityMapper;
use rusqlite::Connection;

fn student_type() -> Arc<EntityType> {
    Arc::new(EntityType::new(
        "Student",
        vec![
            FieldDef::new("id", FieldKind::Integer),
            FieldDef::new("name", FieldKind::Text),
            FieldDef::new("grade", FieldKind::Integer),
        ],
    ))
}

#[test]
fn test_hydrate_row_into_instance() {
    // Given: A raw row and its table descriptor
    let ty = student_type();
    let row = vec![
        Value::Integer(1),
        Value::Text("Pat".to_string()),
        Value::Integer(12),
    ];
    let columns = vec!["id".to_string(), "name".to_string(), "grade".to_string()];

    // When: We hydrate it
    let student = hydrate(&ty, &row, &columns).unwrap();

    // Then: Every field is assigned and the instance is saved
    assert_eq!(student.id(), Some(1));
    assert_eq!(student.get("name"), Some(&Value::Text("Pat".to_string())));
    assert_eq!(student.get("grade"), Some(&Value::Integer(12)));
    assert!(student.is_saved());
}

#[test]
fn test_boolean_and_timestamp_round_trip() {
    // Given: A type with boolean and timestamp fields over integer columns
    let conn = rowmap_store::db::open_in_memory().unwrap();
    conn.execute(
        "CREATE TABLE songs (id INTEGER PRIMARY KEY, title TEXT, released INTEGER, recorded_at INTEGER)",
        [],
    )
    .unwrap();
    let ty = Arc::new(EntityType::new(
        "Song",
        vec![
            FieldDef::new("id", FieldKind::Integer),
            FieldDef::new("title", FieldKind::Text),
            FieldDef::new("released", FieldKind::Boolean),
            FieldDef::new("recorded_at", FieldKind::Timestamp),
        ],
    ));
    let recorded_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

    // When: We save and reload
    let mut song = Entity::with_attrs(
        &ty,
        &[
            ("title", "Hail to the Chief".into()),
            ("released", true.into()),
            ("recorded_at", recorded_at.into()),
        ],
    )
    .unwrap();
    EntityMapper::save(&conn, &mut song).unwrap();

    let reloaded = EntityMapper::find_by(&conn, &ty, &[("title", "Hail to the Chief".into())])
        .unwrap()
        .unwrap();

    // Then: The registry kinds recover the wire integers
    assert_eq!(reloaded.get("released"), Some(&Value::Boolean(true)));
    assert_eq!(
        reloaded.get("recorded_at"),
        Some(&Value::Timestamp(recorded_at))
    );
}

#[test]
fn test_hydrated_instance_can_be_updated() {
    // Given: A persisted row loaded back through find_by
    let conn = rowmap_store::db::open_in_memory().unwrap();
    conn.execute(
        "CREATE TABLE students (id INTEGER PRIMARY KEY, name TEXT, grade INTEGER)",
        [],
    )
    .unwrap();
    let ty = student_type();
    EntityMapper::create(&conn, &ty, &[("name", "Sam".into()), ("grade", 11.into())]).unwrap();

    let mut student = EntityMapper::find_by(&conn, &ty, &[("name", "Sam".into())])
        .unwrap()
        .unwrap();

    // When: We mutate and save the hydrated instance
    student.set("grade", 12.into()).unwrap();
    EntityMapper::save(&conn, &mut student).unwrap();

    // Then: The original row is updated, not duplicated
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);

    let grade: i64 = conn
        .query_row("SELECT grade FROM students WHERE id = 1", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(grade, 12);
}
