use axum::{
    extract::{Query, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use courtside::{
    chatbot,
    session::{token_from_cookie_header, SESSION_COOKIE},
    LookupEngine, NbaStatsProvider, SessionRegistry, SqliteUserStore, UserStore,
};

#[derive(Clone)]
struct AppState {
    engine: Arc<LookupEngine>,
    users: Arc<dyn UserStore>,
    sessions: Arc<SessionRegistry>,
}

#[derive(Debug, Deserialize)]
struct AutocompleteParams {
    #[serde(default)]
    q: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlayerParams {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompareParams {
    #[serde(default)]
    player1: Option<String>,
    #[serde(default)]
    player2: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CredentialsRequest {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    query: String,
}

#[derive(Debug, Serialize)]
struct ChatReply {
    response: String,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    username: String,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    roster_size: usize,
    active_sessions: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courtside_server=debug,courtside=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_path = std::env::var("DB_PATH").unwrap_or_else(|_| "courtside.db".to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8090);

    tracing::info!("🏀 Starting Courtside server");
    tracing::info!("📦 User database: {}", db_path);
    tracing::info!("🔌 Port: {}", port);

    // Roster load happens here, once; failure is fatal to startup
    let provider = Arc::new(NbaStatsProvider::new());
    let engine = LookupEngine::new(provider).await?;
    tracing::info!("Roster ready: {} players", engine.roster().len());

    let users = Arc::new(SqliteUserStore::new(&db_path).await?);
    let state = AppState {
        engine: Arc::new(engine),
        users,
        sessions: Arc::new(SessionRegistry::new()),
    };

    // Session-gated routes: the guard short-circuits to a login redirect
    // before any handler runs
    let gated = Router::new()
        .route("/autocomplete", get(autocomplete_handler))
        .route("/player", get(player_handler))
        .route("/compare", get(compare_handler))
        .route("/chat", post(chat_handler))
        .route("/logout", post(logout_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/signup", post(signup_handler))
        .route("/login", post(login_handler))
        .merge(gated)
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("🏀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Session guard: resolves the session cookie and redirects to the login
/// page when there is no live session
async fn require_session(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let username = state
        .sessions
        .authenticate(cookie_header(request.headers()))
        .await;

    match username {
        Some(_) => next.run(request).await,
        None => Redirect::to("/login").into_response(),
    }
}

fn cookie_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::COOKIE)?.to_str().ok()
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: courtside::VERSION.to_string(),
        roster_size: state.engine.roster().len(),
        active_sessions: state.sessions.active().await,
    })
}

/// Ranked suggestions for the search box. Missing or empty `q` is a normal
/// empty array, never an error status.
async fn autocomplete_handler(
    State(state): State<AppState>,
    Query(params): Query<AutocompleteParams>,
) -> Json<Vec<courtside::PlayerRecord>> {
    let query = params.q.unwrap_or_default();
    Json(state.engine.autocomplete(&query))
}

/// Direct player lookup. An empty name goes back to the home page; an
/// unmatched name surfaces the not-found message with a 404.
async fn player_handler(
    State(state): State<AppState>,
    Query(params): Query<PlayerParams>,
) -> Result<Response, AppError> {
    let name = params.name.unwrap_or_default();
    if name.trim().is_empty() {
        return Ok(Redirect::to("/").into_response());
    }

    let page = state.engine.player_page(&name).await?;
    tracing::info!(
        "✅ {} → {} ({:.1}ms)",
        name,
        page.profile.full_name,
        page.latency_ms
    );
    Ok(Json(page).into_response())
}

async fn compare_handler(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
) -> Result<Response, AppError> {
    let (first, second) = match (params.player1, params.player2) {
        (Some(a), Some(b)) if !a.trim().is_empty() && !b.trim().is_empty() => (a, b),
        _ => {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Please enter both player names.".to_string(),
                }),
            )
                .into_response())
        }
    };

    let comparison = state.engine.compare(&first, &second).await?;
    Ok(Json(comparison).into_response())
}

async fn chat_handler(Json(req): Json<ChatRequest>) -> Json<ChatReply> {
    Json(ChatReply {
        response: chatbot::reply(&req.query).to_string(),
    })
}

async fn signup_handler(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Response, AppError> {
    state.users.create(&req.username, &req.password).await?;
    tracing::info!("👤 New user '{}'", req.username.trim().to_lowercase());

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            username: req.username.trim().to_lowercase(),
        }),
    )
        .into_response())
}

async fn login_handler(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Response, AppError> {
    let valid = state.users.verify(&req.username, &req.password).await?;
    if !valid {
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Invalid credentials".to_string(),
            }),
        )
            .into_response());
    }

    let username = req.username.trim().to_lowercase();
    let token = state.sessions.issue(&username).await;

    let mut response = Json(SessionResponse { username }).into_response();
    let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token);
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).expect("session cookie is valid ASCII"),
    );
    Ok(response)
}

async fn logout_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = cookie_header(&headers).and_then(token_from_cookie_header) {
        state.sessions.revoke(&token).await;
    }

    let mut response = Json(StatusResponse {
        status: "logged out".to_string(),
    })
    .into_response();
    let cookie = format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE);
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).expect("session cookie is valid ASCII"),
    );
    response
}

// Error handling
struct AppError(courtside::LookupError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            courtside::LookupError::PlayerNotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            courtside::LookupError::Auth(_) => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            courtside::LookupError::UsernameTaken(_) => (StatusCode::CONFLICT, self.0.to_string()),
            courtside::LookupError::Provider { .. } | courtside::LookupError::HttpRequest(_) => {
                (StatusCode::BAD_GATEWAY, self.0.to_string())
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()),
        };

        tracing::error!("❌ Error: {} - {}", status, message);

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<courtside::LookupError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
