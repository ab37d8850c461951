use lending_desk::{
    adapters::{http::RemoteBookSource, memory::FixedMemberDirectory},
    api::{handlers::AppState, router::create_router},
    application::{circulation::Library, loader},
};
use std::sync::{Arc, RwLock};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lending_desk=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initial catalog load: must complete (success or seed fallback)
    // before the first command is accepted
    let books_api_base =
        std::env::var("BOOKS_API_BASE").unwrap_or_else(|_| "http://localhost:8080".into());
    let book_source = RemoteBookSource::new(&books_api_base);

    tracing::info!("Book source: {}/api/books", books_api_base);

    let books = loader::load_initial_books(&book_source).await;
    let library = Library::from_books(books);
    tracing::info!(books = library.catalog.len(), "catalog ready");

    // Create application state
    let app_state = Arc::new(AppState {
        library: RwLock::new(library),
        members: Arc::new(FixedMemberDirectory::new()),
    });

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".into());
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
