use axum::Router;
use std::time::Duration;

use crate::config::ProviderConfig;

/// Serve a fake upstream API on an ephemeral port, returning its base URL
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn provider_config() -> ProviderConfig {
    ProviderConfig {
        api_key: "test-key".to_string(),
        timeout: Duration::from_secs(5),
    }
}
