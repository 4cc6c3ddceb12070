use crate::{
    aula::handlers::{
        change_password, change_password::__path_change_password,
        current_user::__path_current_user, health::__path_health, user_login,
        user_login::__path_login, user_login::__path_logout, user_register,
        user_register::__path_register, users, users::__path_create_user,
        users::__path_delete_user, users::__path_list_users,
    },
    aula::session::{Sessions, SharedSessions},
    store::SharedStore,
};
use anyhow::Result;
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Method, Request,
    },
    response::Json,
    routing::{delete, get, post},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use utoipa::OpenApi;

pub mod handlers;
pub mod session;

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        login,
        logout,
        register,
        current_user,
        change_password,
        list_users,
        create_user,
        delete_user
    ),
    components(schemas(
        handlers::UserSummary,
        user_login::UserLogin,
        user_register::UserRegister,
        change_password::ChangePassword,
        users::UserCreate,
        crate::store::Role
    )),
    tags(
        (name = "aula", description = "User authentication and management API")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Build the application router around a store and a session table.
///
/// Split out of [`new`] so tests can drive the router in-process.
#[must_use]
pub fn app(store: SharedStore, sessions: SharedSessions) -> Router {
    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(|| async { "aula" }))
        .route("/api/login", post(handlers::login))
        .route("/api/logout", post(handlers::logout))
        .route("/api/register", post(handlers::register))
        .route("/api/current-user", get(handlers::current_user))
        .route("/api/change-password", post(handlers::change_password))
        .route(
            "/api/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route("/api/users/:username", delete(handlers::delete_user))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(store))
                .layer(Extension(sessions)),
        )
        .route("/health", get(handlers::health).options(handlers::health))
        .route("/openapi.json", get(|| async { Json(openapi()) }))
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, store: SharedStore) -> Result<()> {
    let sessions: SharedSessions = Arc::new(Sessions::new());

    let router = app(store, sessions);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
