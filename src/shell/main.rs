use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use time_tracking::modules::time_tracking::adapters::outbound::observer_tracing::TracingObserver;
use time_tracking::modules::time_tracking::adapters::outbound::timesheet_store::TimesheetStore;
use time_tracking::modules::time_tracking::adapters::outbound::timesheet_store_in_memory::InMemoryTimesheetStore;
use time_tracking::modules::time_tracking::adapters::outbound::timesheet_store_rest::RestTimesheetStore;
use time_tracking::modules::time_tracking::use_cases::list_timesheet_entries::queries_port::TimesheetQueries;
use time_tracking::modules::time_tracking::use_cases::track_time::handler::TrackerSettings;
use time_tracking::modules::time_tracking::use_cases::track_time::registry::TimerRegistry;
use time_tracking::shared::core::clock::{Clock, SystemClock};
use time_tracking::shell::config::AppConfig;
use time_tracking::shell::graphql::{AppSchema, AppState, schema};
use time_tracking::shell::http::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env()?;

    let (store, queries): (Arc<dyn TimesheetStore>, Arc<dyn TimesheetQueries>) =
        match &config.timesheet_api_url {
            Some(url) => {
                tracing::info!(%url, "using remote timesheet store");
                let rest = Arc::new(RestTimesheetStore::with_timeout(
                    url.clone(),
                    config.timesheet_api_timeout,
                )?);
                (
                    rest.clone() as Arc<dyn TimesheetStore>,
                    rest as Arc<dyn TimesheetQueries>,
                )
            }
            None => {
                tracing::info!("using in-memory timesheet store");
                let memory = Arc::new(InMemoryTimesheetStore::new());
                (
                    memory.clone() as Arc<dyn TimesheetStore>,
                    memory as Arc<dyn TimesheetQueries>,
                )
            }
        };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let settings = TrackerSettings {
        tick_interval: config.tick_interval,
        date_convention: config.date_convention,
    };
    let timers = Arc::new(TimerRegistry::new(
        clock,
        store,
        Arc::new(TracingObserver),
        settings,
    ));

    let state = AppState { timers, queries };
    let schema: AppSchema = schema(state.clone());

    let app = Router::new()
        .route("/gql", get(graphiql).post(graphql))
        .layer(Extension(schema))
        .merge(router(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    tracing::info!("GraphQL endpoint: http://{}/gql", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn graphql(Extension(schema): Extension<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> axum::response::Html<String> {
    use async_graphql::http::GraphiQLSource;
    axum::response::Html(GraphiQLSource::build().endpoint("/gql").finish())
}
