use pinmap_shared::models::MarkerEntity;
use serde::Serialize;
use thiserror::Error;

use crate::config;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Body of the pin update call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinUpdate {
    pub pin_x: f64,
    pub pin_y: f64,
}

pub fn markers_url(base: &str) -> String {
    format!("{}/restaurants", base)
}

pub fn pin_url(base: &str, id: &str) -> String {
    format!("{}/restaurants/{}/pin", base, id)
}

/// Turn a non-2xx response into [`ApiError::Status`] carrying the body text.
async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

pub async fn fetch_markers() -> Result<Vec<MarkerEntity>, ApiError> {
    let resp = reqwest::Client::new()
        .get(markers_url(&config::api_base_url()))
        .send()
        .await?;
    let markers: Vec<MarkerEntity> = ensure_success(resp).await?.json().await?;
    tracing::info!(markers = markers.len(), "loaded markers");
    Ok(markers.into_iter().map(MarkerEntity::normalized).collect())
}

/// Persist a new pin position and return the server's copy of the marker.
/// Each call is independent; the last one to land wins.
pub async fn update_position(id: &str, x: f64, y: f64) -> Result<MarkerEntity, ApiError> {
    let body = PinUpdate { pin_x: x, pin_y: y };
    let resp = reqwest::Client::new()
        .patch(pin_url(&config::api_base_url(), id))
        .json(&body)
        .send()
        .await?;
    let marker: MarkerEntity = ensure_success(resp).await?.json().await?;
    Ok(marker.normalized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinmap_shared::models::MarkerCategory;

    #[test]
    fn test_urls() {
        let base = config::api_root("http://localhost:8080");
        assert_eq!(markers_url(&base), "http://localhost:8080/api/restaurants");
        assert_eq!(pin_url(&base, "42"), "http://localhost:8080/api/restaurants/42/pin");
    }

    #[test]
    fn test_pin_update_serializes_camel_case() {
        let json = serde_json::to_value(PinUpdate { pin_x: 12.5, pin_y: 80.0 }).unwrap();
        assert_eq!(json, serde_json::json!({ "pinX": 12.5, "pinY": 80.0 }));
    }

    #[test]
    fn test_marker_list_deserializes_backend_payload() {
        let json = r#"[
            {"id": 3, "nameTh": "ร้านกาแฟ", "nameEn": "Coffee", "descriptionTh": "", "descriptionEn": null,
             "category": "CAFE", "subDistrict": "SILOM", "pinX": 31.5, "pinY": 60.25,
             "createdAt": "2024-01-01T00:00:00"},
            {"id": "b7", "nameTh": "บาร์", "category": "BAR", "pinX": null}
        ]"#;
        let markers: Vec<MarkerEntity> = serde_json::from_str(json).unwrap();
        let markers: Vec<_> = markers.into_iter().map(MarkerEntity::normalized).collect();

        assert_eq!(markers[0].id, "3");
        assert_eq!(markers[0].category, MarkerCategory::Cafe);
        assert_eq!(markers[0].sub_district.as_deref(), Some("SILOM"));
        assert!((markers[0].normalized_x - 31.5).abs() < 1e-9);
        assert_eq!(markers[0].icon_ref, "/assets/pins/Pin_Cafe.png");

        assert_eq!(markers[1].id, "b7");
        assert_eq!((markers[1].normalized_x, markers[1].normalized_y), (50.0, 50.0));
    }

    #[test]
    fn test_status_error_message() {
        let err = ApiError::Status {
            status: 404,
            body: "Restaurant not found".into(),
        };
        assert_eq!(err.to_string(), "server returned 404: Restaurant not found");
    }
}
