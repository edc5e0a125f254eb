use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    auth::{dtos::ErrorResponse, middleware::AuthenticatedUser},
    ingest::IngestRequest,
    news::dtos::{
        FetchNewsRequest, FetchNewsResponse, ListNewsQuery, ListNewsResponse, NewsDetailQuery,
        NewsDetailResponse,
    },
    repositories::ListPage,
};

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

#[utoipa::path(
    post,
    path = "/api/news/fetch",
    tag = "Google News",
    description = "Fetch Google News based on keyword",
    request_body = FetchNewsRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Articles stored by this run", body = FetchNewsResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn fetch_news(
    auth_user: AuthenticatedUser,
    State(state): State<AppState>,
    payload: Result<Json<FetchNewsRequest>, JsonRejection>,
) -> Response {
    let received_at = Utc::now();
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            info!(username = %auth_user.username, error = %rejection, "fetch news body rejected");
            return error_response(StatusCode::BAD_REQUEST, &rejection.body_text());
        }
    };
    info!(username = %auth_user.username, query = %payload.query, "fetch news request");

    if let Err(error) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
    }

    let request = IngestRequest {
        query: payload.query.trim().to_string(),
        limit_per_day: payload.limit_per_day,
        start_date: payload.start_date,
        end_date: payload.end_date_or_today(),
        requested_by: Some(auth_user.username),
    };

    let cancel = CancellationToken::new();
    let deadline = {
        let cancel = cancel.clone();
        let timeout = state.ingest_timeout;
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            cancel.cancel();
        })
    };
    let report = state.ingest.ingest(&request, &cancel).await;
    deadline.abort();

    (
        StatusCode::OK,
        Json(FetchNewsResponse {
            received_at,
            result: report.stored,
            skipped: report.failures,
            unavailable_days: report.unavailable_days,
            cancelled: report.cancelled,
        }),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/api/news/list",
    tag = "Google News",
    description = "Get list of Google News",
    params(ListNewsQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Stored articles in insertion order", body = ListNewsResponse),
        (status = 400, description = "Invalid paging", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn list_news(
    auth_user: AuthenticatedUser,
    State(state): State<AppState>,
    Query(query): Query<ListNewsQuery>,
) -> Response {
    let received_at = Utc::now();
    info!(username = %auth_user.username, "list news request");

    if let Err(error) = query.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
    }

    let page = ListPage {
        limit: query.limit,
        offset: query.offset.unwrap_or(0),
    };
    match state.article_repo.list(page).await {
        Ok(result) => (
            StatusCode::OK,
            Json(ListNewsResponse {
                received_at,
                result,
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "article list failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/news",
    tag = "Google News",
    description = "Get news detail",
    params(NewsDetailQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The article", body = NewsDetailResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "No article with this id", body = ErrorResponse),
    )
)]
pub async fn get_news_detail(
    auth_user: AuthenticatedUser,
    State(state): State<AppState>,
    Query(query): Query<NewsDetailQuery>,
) -> Response {
    let received_at = Utc::now();
    info!(username = %auth_user.username, news_id = %query.news_id, "news detail request");

    // A malformed id cannot name a stored record
    let Ok(id) = Uuid::parse_str(query.news_id.trim()) else {
        return error_response(StatusCode::NOT_FOUND, "News not found");
    };

    match state.article_repo.find_by_id(id).await {
        Ok(Some(result)) => (
            StatusCode::OK,
            Json(NewsDetailResponse {
                received_at,
                result,
            }),
        )
            .into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "News not found"),
        Err(e) => {
            error!(error = %e, "article lookup failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}
