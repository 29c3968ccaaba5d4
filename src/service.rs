use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::{
    advice::{AdviceGenerator, GroqModel},
    config::AppConfig,
    handlers::{AdvisorHandler, reset},
    models::{AdviceRequest, AdviceResponse, ResetState},
    videos::{VideoLookup, YouTubeSearch},
};

type ApiError = (StatusCode, Json<Value>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn upstream_error(message: &str, details: &str) -> ApiError {
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({
            "error": message,
            "details": details
        })),
    )
}

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<AdvisorHandler>,
}

pub fn create_app(config: &AppConfig) -> anyhow::Result<Router> {
    let app_state = create_app_state(config)?;
    Ok(build_router(app_state))
}

fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let model = Arc::new(GroqModel::new(&config.groq_api_key));
    let advice = AdviceGenerator::new(model, config.advice_timeout);

    let search = Arc::new(YouTubeSearch::new(
        config.youtube_api_key.clone(),
        config.video_timeout,
    )?);
    let videos = VideoLookup::new(search);

    Ok(AppState {
        handler: Arc::new(AdvisorHandler::new(advice, videos)),
    })
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/advice", post(get_advice))
        .route("/reset", post(reset_fields))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Safety Advisor Service",
        "version": "0.1.0",
        "description": "Age-tailored personal safety advice with related instructional videos",
        "endpoints": {
            "POST /advice": "Generate safety advice and video links for a situation",
            "POST /reset": "Return the default values for the input and output fields",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn get_advice(
    State(state): State<AppState>,
    Json(request): Json<AdviceRequest>,
) -> ApiResult<AdviceResponse> {
    info!("Received advice request for age range: {}", request.age_range);

    match state
        .handler
        .handle(&request.situation, &request.age_range)
        .await
    {
        Ok((advice, videos_html)) => Ok(Json(AdviceResponse {
            advice,
            videos_html,
        })),
        Err(e) => {
            error!("Advice generation failed: {}", e);
            Err(upstream_error(
                "Failed to generate safety advice",
                &e.to_string(),
            ))
        }
    }
}

async fn reset_fields() -> Json<ResetState> {
    Json(reset())
}
