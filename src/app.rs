use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::TokenIssuer;
use crate::database::models::{ProjectType, Role, Team};
use crate::database::{Repository, Store};
use crate::handlers::{self, catalog, CatalogResource};
use crate::middleware::require_bearer;
use crate::resource::Resource;
use crate::services::Services;

/// Shared, immutable per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub services: Services,
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, tokens: TokenIssuer) -> Self {
        Self {
            services: Services::new(store.clone()),
            store,
            tokens: Arc::new(tokens),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let resources = Router::new()
        .merge(catalog_routes::<ProjectType>())
        .merge(catalog_routes::<Team>())
        .merge(catalog_routes::<Role>())
        .merge(developer_routes())
        .merge(project_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        // Public
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health))
        .route("/api/Auth/token", post(handlers::auth::token))
        // Reads open, writes guarded
        .merge(resources)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn catalog_routes<E>() -> Router<AppState>
where
    E: CatalogResource,
    dyn Store: Repository<E>,
{
    let resource = E::RESOURCE;
    let item = get(catalog::show::<E>).delete(catalog::delete::<E>);

    let router = Router::new().route(
        &resource.collection_path(),
        get(catalog::list::<E>).post(catalog::create::<E>),
    );

    if resource.update_route() == resource.item_route() {
        router.route(&resource.item_route(), item.put(catalog::update::<E>))
    } else {
        router
            .route(&resource.item_route(), item)
            .route(&resource.update_route(), put(catalog::update::<E>))
    }
}

fn developer_routes() -> Router<AppState> {
    use handlers::developers;

    let resource = Resource::Developer;
    Router::new()
        .route(
            &resource.collection_path(),
            get(developers::list).post(developers::create),
        )
        .route(
            &resource.item_route(),
            get(developers::show)
                .put(developers::update)
                .delete(developers::delete),
        )
}

fn project_routes() -> Router<AppState> {
    use handlers::projects;

    let resource = Resource::Project;
    Router::new()
        .route(
            &resource.collection_path(),
            get(projects::list).post(projects::create),
        )
        .route(
            &resource.item_route(),
            get(projects::show)
                .put(projects::update)
                .delete(projects::delete),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::SecurityConfig;
    use crate::database::MemoryStore;

    fn state() -> AppState {
        let security = SecurityConfig {
            jwt_secret: Some("router-test-key".to_string()),
            ..SecurityConfig::default()
        };
        let tokens = TokenIssuer::from_config(&security).unwrap();
        AppState::new(Arc::new(MemoryStore::new()), tokens)
    }

    fn post_team(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::post("/api/Team").header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(r#"{"name":"Core"}"#)).unwrap()
    }

    #[tokio::test]
    async fn guard_rejects_unauthenticated_writes() {
        let response = app(state()).oneshot(post_team(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn guard_admits_issued_tokens() {
        let state = state();
        let token = state.tokens.generate().unwrap();
        let response = app(state).oneshot(post_team(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/api/Team/1");
    }

    #[tokio::test]
    async fn reads_are_public() {
        let request = Request::get("/api/Developer").body(Body::empty()).unwrap();
        let response = app(state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_paths_are_not_found() {
        let request = Request::get("/api/Widget").body(Body::empty()).unwrap();
        let response = app(state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
