use std::net::SocketAddr;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};

use expense_tracker_backend::db::DbConnection;
use expense_tracker_backend::domain::{ExpenseService, InsightsService};
use expense_tracker_backend::rest::{
    self, create_expense, dashboard_summary, delete_expense, list_categories, list_expenses,
    reset_expenses, spending_charts, update_expense,
};
use expense_tracker_backend::storage::SqliteExpenseStorage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Setting up expense database");
    let db = DbConnection::init().await?;
    let storage = SqliteExpenseStorage::new(db);

    // Load the persisted collection before serving anything
    let expense_service = ExpenseService::initialize(storage).await;
    let state = rest::AppState::new(expense_service, InsightsService::new());

    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .route(
            "/expenses",
            get(list_expenses)
                .post(create_expense)
                .delete(reset_expenses),
        )
        .route(
            "/expenses/:id",
            put(update_expense).delete(delete_expense),
        )
        .route("/dashboard", get(dashboard_summary))
        .route("/charts", get(spending_charts))
        .route("/categories", get(list_categories));

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state);

    // Start the server
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
