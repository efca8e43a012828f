//! Free-form info records. Whatever object the client posts is stored as-is,
//! with an `_id` and a creation timestamp added.

use mongodb::bson::{self, Bson, DateTime as BsonDateTime, Document};
use serde_json::{Map, Value};
use uuid::Uuid;

const CREATED_AT: &str = "created_at";

pub fn new_info(fields: Map<String, Value>) -> Result<Document, bson::ser::Error> {
    let mut document = bson::to_document(&fields)?;
    document.insert("_id", Uuid::new_v4().to_string());
    document.insert(CREATED_AT, BsonDateTime::now());
    Ok(document)
}

/// Renders a stored record as plain JSON; the BSON timestamp becomes an
/// RFC 3339 `createdAt` string.
pub fn info_to_json(mut document: Document) -> Value {
    let created_at = match document.remove(CREATED_AT) {
        Some(Bson::DateTime(dt)) => dt.try_to_rfc3339_string().ok(),
        _ => None,
    };

    let mut value = Bson::Document(document).into_relaxed_extjson();
    if let (Some(created_at), Some(object)) = (created_at, value.as_object_mut()) {
        object.insert("createdAt".to_string(), Value::String(created_at));
    }
    value
}
