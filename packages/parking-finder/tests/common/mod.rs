use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_test::TestServer;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

use parking_finder::{
    config::Config,
    handlers::{router, AppState},
    models::Catalog,
    services::LocationPoller,
};

pub const DEVICE_LAT: f64 = 0.3136;
pub const DEVICE_LNG: f64 = 32.5811;

/// Stand-in for the Google Maps Platform endpoints the service calls
pub fn fake_google(geolocation_fails: bool) -> Router {
    Router::new()
        .route(
            "/geolocation/v1/geolocate",
            post(move || async move {
                if geolocation_fails {
                    return Err(StatusCode::INTERNAL_SERVER_ERROR);
                }
                Ok(Json(json!({
                    "location": { "lat": DEVICE_LAT, "lng": DEVICE_LNG },
                    "accuracy": 850.0
                })))
            }),
        )
        .route(
            "/maps/api/directions/json",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                if query.get("alternatives").map(String::as_str) != Some("true") {
                    return Json(json!({ "status": "INVALID_REQUEST", "routes": [] }));
                }
                Json(json!({
                    "status": "OK",
                    "routes": [
                        {
                            "summary": "Ggaba Rd",
                            "legs": [{
                                "start_address": "Kibuye Roundabout, Kampala, Uganda",
                                "end_address": "Ggaba Road, Kampala, Uganda",
                                "distance": { "text": "6.1 km", "value": 6100 },
                                "duration": { "text": "17 mins", "value": 1020 }
                            }]
                        },
                        {
                            "summary": "Kabalagala Rd",
                            "legs": [{
                                "start_address": "Kibuye Roundabout, Kampala, Uganda",
                                "end_address": "Ggaba Road, Kampala, Uganda",
                                "distance": { "text": "7.4 km", "value": 7400 },
                                "duration": { "text": "21 mins", "value": 1260 }
                            }]
                        }
                    ]
                }))
            }),
        )
        .route(
            "/v1/*path",
            post(|Path(path): Path<String>, Json(body): Json<Value>| async move {
                if path != "places:autocomplete" {
                    return Err(StatusCode::NOT_FOUND);
                }
                let input = body["input"].as_str().unwrap_or_default().to_string();
                Ok(Json(json!({
                    "suggestions": [
                        { "placePrediction": { "placeId": "bugolobi", "text": { "text": format!("{} Bugolobi, Kampala", input) } } },
                        { "placePrediction": { "placeId": "ggaba", "text": { "text": format!("{} Ggaba, Kampala", input) } } }
                    ]
                })))
            })
            .get(|Path(path): Path<String>| async move {
                let location = match path.as_str() {
                    "places/bugolobi" => json!({ "latitude": 0.3400, "longitude": 32.5700 }),
                    "places/ggaba" => json!({ "latitude": 0.3550, "longitude": 32.6100 }),
                    _ => return Err(StatusCode::NOT_FOUND),
                };
                Ok(Json(json!({
                    "location": location,
                    "iconBackgroundColor": "#7B9EB0"
                })))
            }),
        )
}

pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub struct TestApp {
    pub server: TestServer,
    _poller: LocationPoller,
}

pub async fn spawn_app_with(catalog: Catalog, geolocation_fails: bool) -> TestApp {
    let base = serve(fake_google(geolocation_fails)).await;
    let config = Config {
        google_maps_api_key: "test-key".to_string(),
        // First poll is immediate; later ticks are not needed by these tests
        poll_interval_ms: 60_000,
        geolocation_url: format!("{}/geolocation/v1/geolocate", base),
        directions_url: format!("{}/maps/api/directions/json", base),
        places_url: format!("{}/v1", base),
        http_timeout_secs: 5,
        ..Default::default()
    };

    let (state, poller) = AppState::from_config(&config, catalog).unwrap();
    let server = TestServer::new(router(state)).unwrap();
    TestApp {
        server,
        _poller: poller,
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(Catalog::kampala(), false).await
}

/// Wait until the location poller has finished its first request
pub async fn wait_for_first_poll(app: &TestApp) -> Value {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let state: Value = app.server.get("/api/location").await.json();
            if state["is_loading"] == false || !state["location"].is_null() {
                return state;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("location poller never finished a request")
}
