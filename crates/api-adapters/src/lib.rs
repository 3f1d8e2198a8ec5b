//! # api-adapters
//!
//! The web routing and orchestration layer for rusty-blog.

pub mod metrics;

#[cfg(feature = "web-axum")]
pub mod error;
#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod middleware;

#[cfg(feature = "web-axum")]
pub use router::{router, AppState};

#[cfg(feature = "web-axum")]
mod router {
    use std::sync::Arc;

    use axum::routing::{delete, get, post, put};
    use axum::response::Redirect;
    use axum::Router;
    use services::{AccountService, BlogService};
    use tower_http::cors::CorsLayer;
    use tower_http::trace::TraceLayer;

    use crate::handlers;
    use crate::metrics::Metrics;
    use crate::middleware::{require_auth, track_requests};

    /// State shared across all workers.
    #[derive(Clone)]
    pub struct AppState {
        pub accounts: Arc<AccountService>,
        pub blogs: Arc<BlogService>,
        pub metrics: Arc<Metrics>,
        /// Session lifetime, mirrored into the cookie Max-Age.
        pub token_ttl_secs: u64,
    }

    /// Assembles the full application router.
    ///
    /// The session middleware is attached per route group: everything that
    /// mutates a blog or touches an account goes through it, comment
    /// routes included.
    pub fn router(state: AppState) -> Router {
        let blogs = Router::new()
            .route("/", get(handlers::list_blogs))
            .merge(
                Router::new()
                    .route("/create_blog", post(handlers::create_blog))
                    .route(
                        "/blog/{blog_id}",
                        put(handlers::edit_blog).delete(handlers::delete_blog),
                    )
                    .route(
                        "/{blog_id}/comments",
                        post(handlers::add_comment).delete(handlers::remove_comment),
                    )
                    .route_layer(axum::middleware::from_fn_with_state(
                        state.clone(),
                        require_auth,
                    )),
            );

        let auth = Router::new()
            .route("/registration", post(handlers::register))
            .route("/login", post(handlers::login))
            .merge(
                Router::new()
                    .route("/logout", delete(handlers::logout))
                    .route(
                        "/account",
                        get(handlers::account)
                            .put(handlers::update_account)
                            .delete(handlers::delete_account),
                    )
                    .route_layer(axum::middleware::from_fn_with_state(
                        state.clone(),
                        require_auth,
                    )),
            );

        Router::new()
            .route("/", get(|| async { Redirect::temporary("/blogs") }))
            .route("/metrics", get(handlers::metrics))
            .nest("/blogs", blogs)
            .nest("/auth", auth)
            .fallback(handlers::not_found)
            .layer(axum::middleware::from_fn_with_state(
                state.clone(),
                track_requests,
            ))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }
}
