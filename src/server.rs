use crate::datasources::{weather::city_coordinates, MockWeatherProvider};
use crate::error::{AdvisorError, Result};
use crate::logic::alerts::{build_alert_report, AlertOptions};
use crate::logic::{Resolver, RiskEngine};
use crate::models::AdvisoryQuery;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub struct AppState {
    pub resolver: Resolver,
    pub risk_engine: RiskEngine,
    /// The provider rewrites its cache and snapshot files whole; the lock
    /// serializes concurrent requests so no append is lost.
    pub weather: Mutex<MockWeatherProvider>,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/advise", post(advise))
        .route("/alerts", post(alerts))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>, bind: &str) -> Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(addr = %bind, "listening");
    axum::serve(listener, app)
        .await
        .map_err(AdvisorError::Io)?;
    Ok(())
}

async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "rules": state.resolver.table().len(),
    }))
}

async fn advise(
    State(state): State<Arc<AppState>>,
    Json(query): Json<AdvisoryQuery>,
) -> Response {
    match state.resolver.resolve(&query) {
        Ok(rec) => (StatusCode::OK, Json(rec)).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
struct AlertsRequest {
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    #[serde(default = "default_outlook_days")]
    days: u32,
}

fn default_outlook_days() -> u32 {
    7
}

async fn alerts(State(state): State<Arc<AppState>>, Json(req): Json<AlertsRequest>) -> Response {
    // City lookup only when explicit coordinates are absent.
    let coords = match (req.lat, req.lon, &req.city) {
        (Some(lat), Some(lon), _) => Some((lat, lon)),
        (_, _, Some(city)) => match city_coordinates(city) {
            Some(c) => Some(c),
            None => return error_response(AdvisorError::NotFound("City not found".into())),
        },
        _ => None,
    };

    let Some((lat, lon)) = coords else {
        return error_response(AdvisorError::Validation("Location required".into()));
    };

    // File-backed cache and snapshot writes are blocking; keep them off the
    // async workers.
    let city = req.city;
    let opts = AlertOptions::full(req.days);
    let task_state = state.clone();
    let report = tokio::task::spawn_blocking(move || {
        let weather = task_state
            .weather
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        build_alert_report(&task_state.risk_engine, &weather, lat, lon, city, &opts)
    })
    .await;

    match report {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => error_response(AdvisorError::Io(std::io::Error::other(e))),
    }
}

fn error_response(err: AdvisorError) -> Response {
    let status = match &err {
        AdvisorError::Validation(_) | AdvisorError::NotFound(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let message = match &err {
        AdvisorError::Validation(m) | AdvisorError::NotFound(m) => m.clone(),
        other => other.to_string(),
    };
    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::RuleTable;
    use crate::models::AdvisoryRule;
    use axum::body::to_bytes;

    fn app_state(dir: &std::path::Path, rules: Vec<AdvisoryRule>) -> Arc<AppState> {
        Arc::new(AppState {
            resolver: Resolver::new(Arc::new(RuleTable::new(rules))),
            risk_engine: RiskEngine::new(),
            weather: Mutex::new(MockWeatherProvider::new(dir, 30)),
        })
    }

    fn rule(soil: &str, crop: &str) -> AdvisoryRule {
        AdvisoryRule {
            soil: soil.into(),
            crop: crop.into(),
            sowing_time: "June".into(),
            irrigation: "Daily".into(),
            fertilizer: "Urea".into(),
            notes: None,
        }
    }

    fn alerts_request(lat: Option<f64>, lon: Option<f64>, city: Option<&str>) -> AlertsRequest {
        AlertsRequest {
            lat,
            lon,
            city: city.map(String::from),
            days: 7,
        }
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn advise_match_returns_recommendation() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(dir.path(), vec![rule("clay", "rice")]);

        let query = AdvisoryQuery::new("Clay", "RICE", Some("Punjab".into()));
        let resp = advise(State(state), Json(query)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["soilType"], "clay");
        assert_eq!(body["region"], "Punjab");
        assert_eq!(body["recommendation"]["sowingTime"], "June");
    }

    #[tokio::test]
    async fn advise_missing_field_is_bad_request_with_error_body() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(dir.path(), vec![rule("clay", "rice")]);

        let query = AdvisoryQuery::new("", "rice", None);
        let resp = advise(State(state), Json(query)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("soilType"));
    }

    #[tokio::test]
    async fn alerts_unknown_city_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(dir.path(), vec![]);

        let resp = alerts(State(state), Json(alerts_request(None, None, Some("Atlantis")))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "City not found");
    }

    #[tokio::test]
    async fn alerts_absent_location_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(dir.path(), vec![]);

        let resp = alerts(State(state), Json(alerts_request(None, None, None))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "Location required");
    }

    #[tokio::test]
    async fn alerts_partial_coordinates_without_city_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(dir.path(), vec![]);

        let resp = alerts(State(state), Json(alerts_request(Some(12.97), None, None))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn alerts_known_city_returns_full_document() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(dir.path(), vec![]);

        let resp = alerts(State(state), Json(alerts_request(None, None, Some("Delhi")))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["location"]["lat"], 28.6139);
        assert_eq!(body["risks"].as_array().unwrap().len(), 3);
        assert_eq!(body["outlook"].as_array().unwrap().len(), 7);
        assert!(body["historical"].is_array());
        assert!(body["prev_risk"].is_string());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_alerts_keep_every_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(dir.path(), vec![]);

        let a = alerts(
            State(state.clone()),
            Json(alerts_request(Some(12.9716), Some(77.5946), None)),
        );
        let b = alerts(
            State(state.clone()),
            Json(alerts_request(Some(12.9716), Some(77.5946), None)),
        );
        let (ra, rb) = tokio::join!(a, b);
        assert_eq!(ra.status(), StatusCode::OK);
        assert_eq!(rb.status(), StatusCode::OK);

        let weather = state.weather.lock().unwrap();
        assert_eq!(weather.historical(12.9716, 77.5946, 10).len(), 2);
    }
}
