use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse<()> {
    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
            count: None,
            error,
        }
    }
}

pub fn success<T>(data: T, message: impl Into<String>) -> impl IntoResponse
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        data: Some(data),
        message: message.into(),
        count: None,
        error: None,
    };
    (StatusCode::OK, Json(body))
}

/// Success envelope for collections, carrying the item count.
pub fn list<T>(items: Vec<T>, message: impl Into<String>) -> impl IntoResponse
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        count: Some(items.len()),
        data: Some(items),
        message: message.into(),
        error: None,
    };
    (StatusCode::OK, Json(body))
}

/// Search results together with the filters that produced them.
#[derive(Debug, Serialize)]
pub struct SearchResponse<T, F>
where
    T: Serialize,
    F: Serialize,
{
    #[serde(flatten)]
    pub envelope: ApiResponse<Vec<T>>,
    pub filters: F,
}

pub fn search<T, F>(items: Vec<T>, filters: F, message: impl Into<String>) -> impl IntoResponse
where
    T: Serialize,
    F: Serialize,
{
    let body = SearchResponse {
        envelope: ApiResponse {
            success: true,
            count: Some(items.len()),
            data: Some(items),
            message: message.into(),
            error: None,
        },
        filters,
    };
    (StatusCode::OK, Json(body))
}

pub fn error(status: StatusCode, message: impl Into<String>, detail: Option<String>) -> Response {
    (status, Json(ApiResponse::failure(message, detail))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_are_omitted() {
        let body = ApiResponse::failure("Event not found", None);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "message": "Event not found" })
        );
    }

    #[test]
    fn test_list_envelope_counts_items() {
        let body = ApiResponse {
            success: true,
            count: Some(2),
            data: Some(vec![1, 2]),
            message: "ok".to_string(),
            error: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["count"], 2);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_search_envelope_echoes_filters() {
        let body = SearchResponse {
            envelope: ApiResponse {
                success: true,
                count: Some(1),
                data: Some(vec!["a"]),
                message: "Search completed".to_string(),
                error: None,
            },
            filters: serde_json::json!({ "location": "park" }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "data": ["a"],
                "message": "Search completed",
                "count": 1,
                "filters": { "location": "park" }
            })
        );
    }
}
