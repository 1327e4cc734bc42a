//! Wishlinker server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wishlinker_api::{middleware::AppState, router as api_router};
use wishlinker_common::{Config, LocalStorage, StorageBackend};
use wishlinker_core::{
    FriendService, PinService, PriorityService, ProfileService, PurchaseService, UserService,
    WishlistItemService, WishlistService,
};
use wishlinker_db::repositories::{
    FriendRepository, PinRepository, PriorityRepository, ProfileRepository, PurchaseRepository,
    UserRepository, WishlistItemRepository, WishlistRepository,
};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wishlinker=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting wishlinker server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = wishlinker_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    wishlinker_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let friend_repo = FriendRepository::new(Arc::clone(&db));
    let wishlist_repo = WishlistRepository::new(Arc::clone(&db));
    let item_repo = WishlistItemRepository::new(Arc::clone(&db));
    let priority_repo = PriorityRepository::new(Arc::clone(&db));
    let purchase_repo = PurchaseRepository::new(Arc::clone(&db));
    let pin_repo = PinRepository::new(Arc::clone(&db));
    let profile_repo = ProfileRepository::new(Arc::clone(&db));

    // Blob storage for profile images
    let storage: Arc<dyn StorageBackend> = Arc::new(LocalStorage::new(
        config.storage.base_path.clone(),
        config.storage.base_url.clone(),
    ));

    // Initialize services
    let user_service = UserService::new(user_repo.clone());
    let friend_service = FriendService::new(friend_repo.clone(), user_repo.clone());
    let wishlist_service = WishlistService::new(
        wishlist_repo.clone(),
        item_repo.clone(),
        priority_repo.clone(),
        purchase_repo.clone(),
        friend_repo.clone(),
    );
    let wishlist_item_service = WishlistItemService::new(
        item_repo.clone(),
        wishlist_repo.clone(),
        priority_repo.clone(),
        purchase_repo.clone(),
    );
    let priority_service = PriorityService::new(priority_repo);
    let purchase_service = PurchaseService::new(purchase_repo, item_repo, wishlist_repo.clone());
    let pin_service = PinService::new(pin_repo, wishlist_repo.clone(), user_repo.clone());
    let profile_service = ProfileService::new(
        profile_repo,
        user_repo,
        wishlist_repo,
        friend_repo,
        storage,
    );

    // Create app state
    let state = AppState {
        user_service,
        friend_service,
        wishlist_service,
        wishlist_item_service,
        priority_service,
        purchase_service,
        pin_service,
        profile_service,
    };

    // Build router
    let app = api_router()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            wishlinker_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
