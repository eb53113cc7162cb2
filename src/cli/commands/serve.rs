//! HTTP API server for integration with other systems.
//!
//! Provides REST endpoints for uploading a ticket spreadsheet, searching it,
//! and generating insights.

use crate::analyzer::TicketAnalyzer;
use crate::cli::Output;
use crate::config::Settings;
use crate::corpus::{loader, CorpusStats, TicketFilter, TicketRecord};
use crate::error::TicketLensError;
use crate::search::enhance;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Largest accepted spreadsheet upload.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Shared application state.
struct AppState {
    analyzer: RwLock<TicketAnalyzer>,
}

/// Run the HTTP API server.
pub async fn run_serve(file: Option<&str>, host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let mut analyzer = TicketAnalyzer::new(&settings)?;

    if let Some(file) = file {
        let path = Settings::expand_path(file);
        let count = analyzer.load_file(&path).await?.len();
        Output::success(&format!("Loaded {} tickets from {}", count, path.display()));
    }

    let state = Arc::new(AppState {
        analyzer: RwLock::new(analyzer),
    });

    let app = router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("ticketlens API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Upload", "POST /upload (multipart field 'file')");
    Output::kv("Search", "POST /search");
    Output::kv("Ask", "POST /ask");
    Output::kv("Tickets", "GET  /tickets?priority=&status=");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/upload", post(upload))
        .route("/search", post(search))
        .route("/ask", post(ask))
        .route("/tickets", get(list_tickets))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct QueryRequest {
    query: String,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl QueryRequest {
    fn filter(&self) -> TicketFilter {
        TicketFilter::new(self.priority.clone(), self.status.clone())
    }
}

#[derive(Deserialize)]
struct TicketsQuery {
    priority: Option<String>,
    status: Option<String>,
}

#[derive(Serialize)]
struct UploadResponse {
    tickets: usize,
    stats: CorpusStats,
}

#[derive(Serialize)]
struct SearchResponse {
    enhanced_query: String,
    fallback: bool,
    tickets: Vec<TicketInfo>,
}

#[derive(Serialize)]
struct AskResponse {
    answer: String,
    enhanced_query: String,
    fallback: bool,
    tickets: Vec<TicketInfo>,
}

#[derive(Serialize)]
struct TicketInfo {
    #[serde(flatten)]
    record: TicketRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f32>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Maps library errors onto HTTP responses.
struct ApiError(TicketLensError);

impl From<TicketLensError> for ApiError {
    fn from(e: TicketLensError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TicketLensError::Schema { .. }
            | TicketLensError::Spreadsheet(_)
            | TicketLensError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            TicketLensError::NoCorpus => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self.0);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let bytes = extract_file(&mut multipart).await?;

    let table = tokio::task::spawn_blocking(move || loader::read_table_from_bytes(bytes))
        .await
        .map_err(|e| TicketLensError::Spreadsheet(e.to_string()))??;

    let mut analyzer = state.analyzer.write().await;
    let corpus = analyzer.load_table(&table).await?;
    info!("Uploaded corpus of {} tickets", corpus.len());

    Ok(Json(UploadResponse {
        tickets: corpus.len(),
        stats: corpus.stats(),
    }))
}

async fn extract_file(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| TicketLensError::InvalidInput(format!("Failed to parse multipart field: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| TicketLensError::InvalidInput(format!("Failed to read upload: {}", e)))?;
        return Ok(bytes.to_vec());
    }

    Err(TicketLensError::InvalidInput("Missing 'file' field".to_string()).into())
}

async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let analyzer = state.analyzer.read().await;
    let results = analyzer.find_similar(&req.query).await?;
    let filter = req.filter();

    Ok(Json(SearchResponse {
        enhanced_query: enhance(&req.query),
        fallback: results.fallback,
        tickets: results
            .filtered(&filter)
            .map(|h| TicketInfo {
                record: h.record.clone(),
                score: Some(h.score),
            })
            .collect(),
    }))
}

async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let analyzer = state.analyzer.read().await;
    let analysis = analyzer.analyze(&req.query).await?;
    let filter = req.filter();

    let tickets = analysis
        .results
        .filtered(&filter)
        .map(|h| TicketInfo {
            record: h.record.clone(),
            score: Some(h.score),
        })
        .collect();

    Ok(Json(AskResponse {
        answer: analysis.answer,
        enhanced_query: analysis.enhanced_query,
        fallback: analysis.results.fallback,
        tickets,
    }))
}

async fn list_tickets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TicketsQuery>,
) -> Result<Json<Vec<TicketInfo>>, ApiError> {
    let analyzer = state.analyzer.read().await;
    let corpus = analyzer.corpus().ok_or(TicketLensError::NoCorpus)?;
    let filter = TicketFilter::new(params.priority, params.status);

    Ok(Json(
        corpus
            .records()
            .iter()
            .filter(|r| filter.matches(r))
            .map(|r| TicketInfo {
                record: r.clone(),
                score: None,
            })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Prompts, SearchSettings};
    use crate::corpus::RawTable;
    use crate::embedding::MockEmbedder;
    use crate::insight::MockChat;

    async fn state_with_tickets() -> Arc<AppState> {
        let mut analyzer = TicketAnalyzer::with_components(
            SearchSettings::default(),
            Arc::new(MockEmbedder::keyword_axes(&[&["login", "signin"], &["timeout"]])),
            Arc::new(MockChat::replying("Check the SSO provider.")),
            Prompts::default(),
        );
        let table = RawTable::from_strings(
            &["Ticket ID", "Status", "Priority", "Customer", "Summary", "Comments"],
            &[
                &["T1", "Open", "High", "Acme", "Login fails", ""],
                &["T2", "Open", "Low", "Globex", "Timeout on checkout", ""],
            ],
        );
        analyzer.load_table(&table).await.unwrap();
        Arc::new(AppState {
            analyzer: RwLock::new(analyzer),
        })
    }

    #[tokio::test]
    async fn test_ask_handler() {
        let state = state_with_tickets().await;
        let Json(resp) = ask(
            State(state),
            Json(QueryRequest {
                query: "login".to_string(),
                priority: None,
                status: None,
            }),
        )
        .await
        .ok()
        .unwrap();

        assert_eq!(resp.answer, "Check the SSO provider.");
        assert_eq!(resp.tickets.len(), 1);
        assert_eq!(resp.tickets[0].record.id, "T1");
    }

    #[tokio::test]
    async fn test_search_filter_hides_rows() {
        let state = state_with_tickets().await;
        let Json(resp) = search(
            State(state),
            Json(QueryRequest {
                query: "login".to_string(),
                priority: Some("Low".to_string()),
                status: None,
            }),
        )
        .await
        .ok()
        .unwrap();

        assert!(resp.tickets.is_empty());
    }

    #[tokio::test]
    async fn test_list_tickets_filter() {
        let state = state_with_tickets().await;
        let Json(tickets) = list_tickets(
            State(state),
            Query(TicketsQuery {
                priority: Some("low".to_string()),
                status: None,
            }),
        )
        .await
        .ok()
        .unwrap();

        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].record.id, "T2");
    }

    #[test]
    fn test_error_status_codes() {
        let schema = ApiError(TicketLensError::Schema { missing: vec!["Status".to_string()] });
        assert_eq!(schema.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError(TicketLensError::NoCorpus).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError(TicketLensError::Provider("down".to_string())).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
