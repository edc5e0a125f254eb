use axum::{
    Router,
    http::HeaderName,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{app_state::AppState, auth, entities, health, ingest, news};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(OpenApi)]
#[openapi(
    info(title = "newsfeel", description = "Google News ingestion with sentiment labels"),
    paths(
        auth::handlers::register,
        auth::handlers::login,
        news::handlers::fetch_news,
        news::handlers::list_news,
        news::handlers::get_news_detail,
        health::health_check,
    ),
    components(schemas(
        auth::dtos::RegisterRequest,
        auth::dtos::LoginRequest,
        auth::dtos::RegisterResponse,
        auth::dtos::TokenResponse,
        auth::dtos::UserOut,
        auth::dtos::ErrorResponse,
        news::dtos::FetchNewsRequest,
        news::dtos::FetchNewsResponse,
        news::dtos::ListNewsResponse,
        news::dtos::NewsDetailResponse,
        entities::ArticleRecord,
        entities::Article,
        entities::Publisher,
        entities::Sentiment,
        ingest::CandidateFailure,
        health::HealthResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "User", description = "Registration and login"),
        (name = "Google News", description = "News ingestion and retrieval"),
        (name = "health"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Full HTTP surface: API routes, health, Swagger UI, request ids and tracing.
pub fn build_router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/api/user/register", post(auth::handlers::register))
        .route("/api/user/login", post(auth::handlers::login))
        .route("/api/news/fetch", post(news::handlers::fetch_news))
        .route("/api/news/list", get(news::handlers::list_news))
        .route("/api/news", get(news::handlers::get_news_detail))
        .route("/healthz", get(health::health_check))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
        .with_state(state)
}
