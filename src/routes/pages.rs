//! Page shells. Each page is a minimal HTML document naming the view; the
//! interesting behaviour is which requests reach them at all.

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse},
    routing::get,
};

use crate::state::AppState;

/// Every page the app serves, with its title.
pub const PAGES: &[(&str, &str)] = &[
    ("/", "Welcome"),
    ("/login", "Sign in"),
    ("/register", "Create account"),
    ("/onboarding", "Set up your profile"),
    ("/dashboard", "Dashboard"),
    ("/log", "Food log"),
    ("/body", "Body and workouts"),
    ("/ingredient", "Ingredient check"),
    ("/insights", "Daily insights"),
    ("/chat", "Assistant"),
];

/// The page routes plus a 404 fallback, so unknown paths are guarded too.
pub fn routes() -> Router<AppState> {
    PAGES
        .iter()
        .fold(Router::new(), |router, (path, _)| router.route(path, get(page)))
        .fallback(not_found)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

async fn page(State(state): State<AppState>, uri: Uri) -> Html<String> {
    let title = PAGES
        .iter()
        .find(|(path, _)| *path == uri.path())
        .map(|(_, title)| *title)
        .unwrap_or("Page");
    Html(format!(
        "<!doctype html><html><head><title>{} | {}</title></head>\
         <body><main data-page=\"{}\"></main></body></html>",
        title,
        state.config.logging.service_name,
        uri.path()
    ))
}
