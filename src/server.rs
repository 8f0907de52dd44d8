use axum::{extract::FromRef, routing::any, Router};
use leptos::prelude::*;
use leptos_axum::{generate_route_list, LeptosRoutes};
use tower_http::compression::CompressionLayer;

use crate::app::{shell, App};
use crate::backend::{forward_to_backend, BackendClient};

/// Paths owned by the upstream backend.
pub const BACKEND_ROUTES: [&str; 3] = ["/api/{*path}", "/login", "/logout"];

#[derive(Clone, FromRef)]
pub struct ServerState {
    pub leptos_options: LeptosOptions,
    pub backend: BackendClient,
}

/// Leptos pages plus the forwarded backend paths.
#[must_use]
pub fn router(state: ServerState) -> Router {
    let routes = generate_route_list(App);

    let router = BACKEND_ROUTES
        .into_iter()
        .fold(Router::new(), |router, route| {
            router.route(route, any(forward_to_backend))
        });

    router
        .leptos_routes(&state, routes, {
            let leptos_options = state.leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler::<ServerState, _>(shell))
        .layer(CompressionLayer::new())
        .with_state(state)
}
