use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::api::{log_data_quality, CombinedRequest, EntryInput, QualityRequest, RateResponse};
use crate::config::ServerConfig;
use crate::engagement::{build_report, EngagementQuality, EngagementReport, QualityClassifier};
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    classifier: Arc<QualityClassifier>,
}

impl AppState {
    pub fn new(classifier: QualityClassifier) -> Self {
        Self {
            classifier: Arc::new(classifier),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/health", get(health))
        .route("/api/engagement/rate", post(rate_handler))
        .route("/api/engagement/combined", post(combined_handler))
        .route("/api/engagement/quality", post(quality_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(server: &ServerConfig, classifier: QualityClassifier) -> AppResult<()> {
    let addr: SocketAddr = format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|err| AppError::Config(format!("invalid bind address: {}", err)))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| AppError::Server(format!("failed to bind {}: {}", addr, err)))?;
    info!("engagement API listening on {}", addr);

    axum::serve(listener, router(AppState::new(classifier)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Server(err.to_string()))?;

    info!("engagement API stopped");
    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn rate_handler(
    State(state): State<AppState>,
    Json(request): Json<EntryInput>,
) -> AppResult<Json<RateResponse>> {
    let entry = request.into_entry()?;
    log_data_quality(&entry);

    let result = entry.result();
    let quality = state.classifier.classify(result.rate, &result.platform);
    Ok(Json(RateResponse {
        result,
        quality: quality.quality,
        description: quality.description,
    }))
}

pub async fn combined_handler(
    State(state): State<AppState>,
    Json(request): Json<CombinedRequest>,
) -> AppResult<Json<EngagementReport>> {
    let entries = request.into_entries()?;
    for entry in &entries {
        log_data_quality(entry);
    }
    Ok(Json(build_report(&entries, &state.classifier)))
}

pub async fn quality_handler(
    State(state): State<AppState>,
    Json(request): Json<QualityRequest>,
) -> AppResult<Json<EngagementQuality>> {
    let (rate, platform) = request.validated()?;
    Ok(Json(state.classifier.classify(rate, &platform)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(err) => {
                error!("failed to install terminate handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
