// src/pipeline/lookup.rs

//! Menu lookups wrapped in the API response envelope.

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::storage::MenuStorage;

/// Outcome marker of an API response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Response envelope: the content's fields plus `status` and `status_code`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: ResponseStatus,
    pub status_code: u16,
    #[serde(flatten)]
    pub content: Map<String, Value>,
}

impl ApiResponse {
    pub fn success(content: Value) -> Self {
        let content = match content {
            Value::Object(map) => map,
            other => Map::from_iter([("content".to_string(), other)]),
        };
        Self {
            status: ResponseStatus::Success,
            status_code: StatusCode::OK.as_u16(),
            content,
        }
    }

    pub fn error(message: impl Into<String>, status: StatusCode) -> Self {
        let content = match json!({ "message": message.into() }) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            status: ResponseStatus::Error,
            status_code: status.as_u16(),
            content,
        }
    }
}

/// Look up a menu (or one of its days) and build the response.
///
/// `day` is 1-based, Monday first.
pub fn lookup(
    storage: &dyn MenuStorage,
    menu_id: &str,
    week: u32,
    year: i32,
    day: Option<u8>,
) -> ApiResponse {
    if let Some(number) = day {
        if !(1..=7).contains(&number) {
            return ApiResponse::error("Invalid day number (must be 1-7)", StatusCode::BAD_REQUEST);
        }
    }

    let record = match storage.load(menu_id, week, year) {
        Ok(Some(record)) => record,
        Ok(None) => {
            log::info!("Menu {menu_id} is not available for week {week}.");
            return ApiResponse::error(
                "Menu for requested week is not available.",
                StatusCode::NOT_FOUND,
            );
        }
        Err(e) => {
            log::error!("Failed to load menu {menu_id}, week {week}: {e}");
            return ApiResponse::error(
                "Internal server error.",
                StatusCode::INTERNAL_SERVER_ERROR,
            );
        }
    };

    let content = match day {
        None => serde_json::to_value(&record),
        Some(number) => match record.menu.day(number) {
            Some(day_record) => serde_json::to_value(day_record),
            None => {
                return ApiResponse::error(
                    "Requested day is not available.",
                    StatusCode::BAD_REQUEST,
                );
            }
        },
    };

    match content {
        Ok(value) => ApiResponse::success(value),
        Err(e) => {
            log::error!("Failed to serialize menu {menu_id}: {e}");
            ApiResponse::error("Internal server error.", StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
