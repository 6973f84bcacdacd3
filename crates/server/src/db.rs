//! Database initialization and schema setup.

use aurora_db::{Aurora, FieldType};

/// Initialize the Aurora database with the identity collection.
pub fn init_database(db_path: &str) -> Aurora {
    let db = Aurora::open(db_path).expect("Failed to open database");

    // Reserved usernames. Presence is never persisted here; this collection
    // only answers "is this name claimed".
    let _ = db.new_collection(
        "users",
        vec![
            ("username", FieldType::String, true),
            ("created_at", FieldType::String, false),
        ],
    );

    db
}
