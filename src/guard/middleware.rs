use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use tracing::debug;

use super::GuardDecision;
use crate::metrics::MetricsRecorder;
use crate::state::AppState;

/// Redirects page requests according to [`RouteRules`], reading the auth cookie
/// named in `session.cookie_name`.
pub async fn route_guard(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let cookie = jar.get(&state.config.session.cookie_name).map(|c| c.value());
    let decision = state.rules.evaluate(&path, cookie);
    state.metrics.record_guard_decision(decision.outcome(&state.rules));

    match decision {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::Redirect(to) => {
            debug!(path = path.as_str(), to = to.as_str(), "route guard redirect");
            Redirect::temporary(&to).into_response()
        }
    }
}
