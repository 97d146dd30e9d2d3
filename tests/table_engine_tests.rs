// ============================================================================
// Integration Tests for the table engine
// ============================================================================
//
// Test Coverage:
// - Insert defaults, coercion and auto-increment
// - find / first / projection
// - order_by: multi-key, stable, locale-aware, invalid entries, NaN and
//   invalid dates
// - update and delete scoping
// - Pagination through Selection::limit
// - Table lifecycle
//
// ============================================================================

use jsontabledb::{
    ColumnSpec, ColumnType, DatabaseConfig, JsonDatabase, MemoryStorage, RowView, Value,
};
use serde_json::{Value as JsonValue, json};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

async fn database_with(document: JsonValue) -> JsonDatabase<MemoryStorage> {
    let mut db = JsonDatabase::new(MemoryStorage::new(), DatabaseConfig::new("test"));
    assert!(db.set(&document).await.unwrap());
    db
}

fn data(db: &JsonDatabase<MemoryStorage>, table: &str) -> JsonValue {
    db.get().to_json().unwrap()["tables"][table]["data"].clone()
}

fn num(value: &Value) -> f64 {
    value.as_f64().unwrap_or(f64::NAN)
}

async fn heroes() -> JsonDatabase<MemoryStorage> {
    database_with(json!({
        "version": "1.0",
        "tables": {
            "heroes": {
                "columns": [
                    {"name": "id", "type": "number", "ai": true},
                    {"name": "name", "type": "string"},
                    {"name": "age", "type": "number"}
                ],
                "data": [
                    [1, "Peter", 18],
                    [2, "Bruce", 40],
                    [3, "Clark", 35],
                    [4, "Diana", 35]
                ]
            }
        }
    }))
    .await
}

// ============================================================================
// INSERT
// ============================================================================

#[tokio::test]
async fn test_insert_empty_row_uses_defaults_and_next_id() {
    let mut db = database_with(json!({
        "version": "1.0",
        "tables": {
            "t": {
                "columns": [
                    {"name": "id", "type": "number", "ai": true},
                    {"name": "name", "type": "string", "default": "x"}
                ],
                "data": [[1, "a"], [2, "b"]]
            }
        }
    }))
    .await;

    assert!(db.table("t").unwrap().insert(RowView::new()));
    assert_eq!(data(&db, "t"), json!([[1, "a"], [2, "b"], [3, "x"]]));
}

#[tokio::test]
async fn test_insert_into_empty_table_starts_at_one() {
    let mut db = JsonDatabase::new(MemoryStorage::new(), DatabaseConfig::default());
    db.tables().add(
        "t",
        &[
            ColumnSpec::new("id", "number").auto_increment(),
            ColumnSpec::new("tags", "array"),
            ColumnSpec::new("born", "date"),
        ],
    );

    let mut t = db.table("t").unwrap();
    t.insert([
        ("tags", Value::from("ab")),
        ("born", Value::from("2024-01-02")),
    ]);

    assert_eq!(
        data(&db, "t"),
        json!([[1, ["a", "b"], "2024-01-02T00:00:00.000Z"]])
    );
}

#[tokio::test]
async fn test_insert_coerces_and_ignores_unknown_keys() {
    let mut db = heroes().await;
    db.table("heroes").unwrap().insert([
        ("name", Value::from(42)),
        ("age", Value::from(" 50 ")),
        ("cape", Value::from(true)),
    ]);

    let selection = db.table("heroes").unwrap().find(|r| r.get("id") == Some(&Value::from(5))).get(None);
    assert_eq!(
        selection.to_json(),
        json!([{"id": 5, "name": "42", "age": 50}])
    );
}

// ============================================================================
// FIND / PROJECTION
// ============================================================================

#[tokio::test]
async fn test_find_with_projection() {
    let mut db = heroes().await;
    let selection = db
        .table("heroes")
        .unwrap()
        .find(|r| r.get("age").map(num).is_some_and(|age| age > 30.0))
        .get(Some(&["name", "secret"]));

    assert_eq!(
        selection.to_json(),
        json!([{"name": "Bruce"}, {"name": "Clark"}, {"name": "Diana"}])
    );
}

#[tokio::test]
async fn test_first_without_match_is_empty() {
    let mut db = heroes().await;
    let selection = db.table("heroes").unwrap().find(|_| false).first(None);
    assert!(selection.is_empty());
}

#[tokio::test]
async fn test_unknown_table_is_none() {
    let mut db = heroes().await;
    assert!(db.table("villains").is_none());
}

// ============================================================================
// ORDER BY
// ============================================================================

#[tokio::test]
async fn test_order_by_is_stable() {
    let mut db = database_with(json!({
        "version": "1.0",
        "tables": {
            "t": {
                "columns": [{"name": "id", "type": "number"}, {"name": "a", "type": "string"}],
                "data": [[1, "b"], [2, "a"], [3, "a"]]
            }
        }
    }))
    .await;

    let ids = db
        .table("t")
        .unwrap()
        .all()
        .order_by([("a", "asc")])
        .get(Some(&["id"]));
    assert_eq!(ids.to_json(), json!([{"id": 2}, {"id": 3}, {"id": 1}]));
}

#[tokio::test]
async fn test_order_by_multiple_keys_and_directions() {
    let mut db = heroes().await;
    let names = db
        .table("heroes")
        .unwrap()
        .all()
        .order_by([("age", "DESC"), ("name", "desc")])
        .get(Some(&["name"]));
    assert_eq!(
        names.to_json(),
        json!([{"name": "Bruce"}, {"name": "Diana"}, {"name": "Clark"}, {"name": "Peter"}])
    );
}

#[tokio::test]
async fn test_order_by_locale_aware_text() {
    let mut db = database_with(json!({
        "version": "1.0",
        "tables": {
            "words": {
                "columns": [{"name": "id", "type": "number"}, {"name": "w", "type": "string"}],
                "data": [[1, "b"], [2, "É"], [3, "a"], [4, "B"], [5, "e"]]
            }
        }
    }))
    .await;

    let words = db
        .table("words")
        .unwrap()
        .all()
        .order_by([("w", "asc")])
        .get(Some(&["w"]));
    assert_eq!(
        words.to_json(),
        json!([{"w": "a"}, {"w": "b"}, {"w": "B"}, {"w": "e"}, {"w": "É"}])
    );
}

#[tokio::test]
async fn test_order_by_without_valid_keys_sorts_by_id() {
    let mut db = database_with(json!({
        "version": "1.0",
        "tables": {
            "t": {
                "columns": [{"name": "id", "type": "number"}],
                "data": [[3], [1], [2]]
            }
        }
    }))
    .await;

    let ids = db
        .table("t")
        .unwrap()
        .all()
        .order_by([("missing", "asc"), ("id", "sideways")])
        .get(None);
    assert_eq!(ids.to_json(), json!([{"id": 1}, {"id": 2}, {"id": 3}]));
}

#[tokio::test]
async fn test_order_by_number_column_with_nulls() {
    // every fourth age is null, which reads back as NaN
    let rows: Vec<JsonValue> = (1..=24)
        .map(|id| {
            let age = if id % 4 == 0 { JsonValue::Null } else { json!((id * 7) % 30) };
            json!([id, age])
        })
        .collect();
    let mut db = database_with(json!({
        "version": "1.0",
        "tables": {
            "people": {
                "columns": [{"name": "id", "type": "number"}, {"name": "age", "type": "number"}],
                "data": rows
            }
        }
    }))
    .await;
    let null_ids = vec![4.0, 8.0, 12.0, 16.0, 20.0, 24.0];

    let ascending = db
        .table("people")
        .unwrap()
        .all()
        .order_by([("age", "asc")])
        .get(None);
    let ages: Vec<f64> = ascending.rows().iter().map(|r| num(r.get("age").unwrap())).collect();
    let ids: Vec<f64> = ascending.rows().iter().map(|r| num(r.get("id").unwrap())).collect();
    assert_eq!(ages.len(), 24);
    assert!(ages[..18].windows(2).all(|w| w[0] <= w[1]));
    assert!(ages[18..].iter().all(|age| age.is_nan()));
    assert_eq!(ids[18..].to_vec(), null_ids);

    let descending = db
        .table("people")
        .unwrap()
        .all()
        .order_by([("age", "desc")])
        .get(None);
    let ages: Vec<f64> = descending.rows().iter().map(|r| num(r.get("age").unwrap())).collect();
    let ids: Vec<f64> = descending.rows().iter().map(|r| num(r.get("id").unwrap())).collect();
    assert!(ages[..6].iter().all(|age| age.is_nan()));
    assert_eq!(ids[..6].to_vec(), null_ids);
    assert!(ages[6..].windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_order_by_date_column_with_invalid_dates() {
    let mut db = database_with(json!({
        "version": "1.0",
        "tables": {
            "events": {
                "columns": [{"name": "id", "type": "number"}, {"name": "at", "type": "date"}],
                "data": [
                    [1, "2024-03-01"],
                    [2, "not a date"],
                    [3, "2023-01-15"],
                    [4, null],
                    [5, "2024-01-01T12:00:00Z"],
                    [6, "31/31/2031"]
                ]
            }
        }
    }))
    .await;

    let ascending = db
        .table("events")
        .unwrap()
        .all()
        .order_by([("at", "asc")])
        .get(Some(&["id"]));
    assert_eq!(
        ascending.to_json(),
        json!([{"id": 3}, {"id": 5}, {"id": 1}, {"id": 2}, {"id": 4}, {"id": 6}])
    );

    let descending = db
        .table("events")
        .unwrap()
        .all()
        .order_by([("at", "desc")])
        .get(Some(&["id"]));
    assert_eq!(
        descending.to_json(),
        json!([{"id": 2}, {"id": 4}, {"id": 6}, {"id": 1}, {"id": 5}, {"id": 3}])
    );
}

#[tokio::test]
async fn test_projection_follows_requested_key_order() {
    let mut db = heroes().await;
    let selection = db
        .table("heroes")
        .unwrap()
        .find(|r| r.get("id") == Some(&Value::from(1)))
        .get(Some(&["name", "id"]));

    let keys: Vec<&str> = selection.rows()[0].keys().collect();
    assert_eq!(keys, vec!["name", "id"]);
    assert_eq!(
        serde_json::to_string(&selection.to_json()).unwrap(),
        r#"[{"name":"Peter","id":1}]"#
    );
}

// ============================================================================
// UPDATE / DELETE
// ============================================================================

#[tokio::test]
async fn test_update_with_unknown_column_is_rejected() {
    let mut db = heroes().await;
    let before = data(&db, "heroes");

    let updated = db.table("heroes").unwrap().all().update([("unknownCol", "x")]);

    assert!(!updated);
    assert_eq!(data(&db, "heroes"), before);
}

#[tokio::test]
async fn test_update_only_touches_matching_rows() {
    let mut db = heroes().await;
    let updated = db
        .table("heroes")
        .unwrap()
        .find(|r| r.get("name") == Some(&Value::from("Clark")))
        .update([("age", "36")]);

    assert!(updated);
    assert_eq!(
        data(&db, "heroes"),
        json!([[1, "Peter", 18], [2, "Bruce", 40], [3, "Clark", 36], [4, "Diana", 35]])
    );
}

#[tokio::test]
async fn test_delete_matching_rows() {
    let mut db = database_with(json!({
        "version": "1.0",
        "tables": {
            "t": {
                "columns": [{"name": "id", "type": "number"}, {"name": "a", "type": "string"}],
                "data": [[0, "a"], [1, "b"], [2, "c"]]
            }
        }
    }))
    .await;

    db.table("t")
        .unwrap()
        .find(|r| r.get("id").map(num).is_some_and(|id| id > 0.0))
        .delete();

    assert_eq!(data(&db, "t"), json!([[0, "a"]]));
}

// ============================================================================
// PAGINATION
// ============================================================================

#[tokio::test]
async fn test_limit_pages_through_ordered_rows() {
    let mut db = heroes().await;
    let selection = db
        .table("heroes")
        .unwrap()
        .all()
        .order_by([("age", "asc"), ("id", "asc")])
        .get(Some(&["id"]));

    assert_eq!(selection.limit(1, Some(2)).to_json(), json!([{"id": 3}, {"id": 4}]));
    assert_eq!(selection.limit(3, Some(10)).to_json(), json!([{"id": 2}]));
    assert_eq!(selection.limit(2, None).row_count(), 2);
    assert!(selection.limit(9, None).is_empty());
}

// ============================================================================
// TABLE LIFECYCLE
// ============================================================================

#[tokio::test]
async fn test_table_lifecycle() {
    let mut db = JsonDatabase::new(MemoryStorage::new(), DatabaseConfig::default());

    assert!(db.tables().add(" users ", &[ColumnSpec::new("id", "Number").auto_increment()]));
    assert!(!db.tables().add("", &[ColumnSpec::new("id", "number")]));
    assert!(!db.tables().add("empty", &[]));
    assert_eq!(db.tables().get(), vec!["users".to_string()]);

    let columns = db.table("users").unwrap().columns();
    assert_eq!(columns.len(), 1);
    assert_eq!(columns[0].column_type, ColumnType::Number);
    assert!(columns[0].is_auto_increment());

    db.table("users").unwrap().delete();
    assert!(db.tables().get().is_empty());
}
