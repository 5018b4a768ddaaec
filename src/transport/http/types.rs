use crate::domain::entry::{Entry, EntryFields};
use crate::storage::{EntryStore, StoreError};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntryStore>,
}

impl AppState {
    pub fn new(store: impl EntryStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Body of `POST /entries`.
///
/// Fields are optional on the wire so that a missing column reaches the store
/// and fails there, like a NOT NULL violation would.
#[derive(Deserialize, Debug, ToSchema)]
pub struct CreateEntryRequest {
    pub srno: Option<i32>,
    pub name: Option<String>,
    pub branch: Option<String>,
    pub rollno: Option<String>,
}

impl CreateEntryRequest {
    pub fn into_entry(self) -> Result<Entry, StoreError> {
        Ok(Entry {
            srno: self.srno.ok_or(StoreError::NullField("srno"))?,
            name: self.name.ok_or(StoreError::NullField("name"))?,
            branch: self.branch.ok_or(StoreError::NullField("branch"))?,
            rollno: self.rollno.ok_or(StoreError::NullField("rollno"))?,
        })
    }
}

/// Body of `PUT /entries/{srno}`. A `srno` in the body is ignored; the path wins.
#[derive(Deserialize, Debug, ToSchema)]
pub struct UpdateEntryRequest {
    pub name: Option<String>,
    pub branch: Option<String>,
    pub rollno: Option<String>,
}

impl UpdateEntryRequest {
    pub fn into_fields(self) -> Result<EntryFields, StoreError> {
        Ok(EntryFields {
            name: self.name.ok_or(StoreError::NullField("name"))?,
            branch: self.branch.ok_or(StoreError::NullField("branch"))?,
            rollno: self.rollno.ok_or(StoreError::NullField("rollno"))?,
        })
    }
}

/// `{message}` on success/not-found, `{message, error}` on store failures.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(MessageResponse {
            message: "Invalid JSON body".to_string(),
            error: Some(format!("{} (expected: {})", err, expected)),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_become_null_field_errors() {
        let req: CreateEntryRequest =
            serde_json::from_value(serde_json::json!({"srno": 1, "name": "Asha", "branch": "CSE"}))
                .unwrap();
        let err = req.into_entry().unwrap_err();
        assert!(matches!(err, StoreError::NullField("rollno")));

        let req: UpdateEntryRequest =
            serde_json::from_value(serde_json::json!({"branch": "CSE", "rollno": "4"})).unwrap();
        assert!(matches!(
            req.into_fields().unwrap_err(),
            StoreError::NullField("name")
        ));
    }

    #[test]
    fn message_response_omits_absent_error() {
        let body = serde_json::to_value(MessageResponse::new("Entry added successfully")).unwrap();
        assert_eq!(body, serde_json::json!({"message": "Entry added successfully"}));
    }
}
