mod errors;
mod logging;
mod initialization;
mod units;
mod forecast;
mod dashboard;
mod handlers;
mod manager_db;
mod manager_owm;

use actix_web::{web, App, HttpServer};
use tokio::sync::Mutex;
use log::info;
use crate::errors::UnrecoverableError;
use crate::initialization::{config, DashboardConfig};
use crate::manager_db::DB;
use crate::manager_owm::OWM;

/// State shared by all workers
///
/// Created once at startup and dropped at shutdown. The recent searches and the current city
/// are only changed through the methods and the store below.
struct AppState {
    db: Mutex<DB>,
    owm: OWM,
    settings: DashboardConfig,
    current_city: Mutex<String>,
}

impl AppState {
    fn new(db: DB, owm: OWM, settings: DashboardConfig) -> Self {
        let current_city = Mutex::new(settings.default_city.clone());

        Self {
            db: Mutex::new(db),
            owm,
            settings,
            current_city,
        }
    }

    /// City of the last successful lookup, the configured default until then
    async fn current_city(&self) -> String {
        self.current_city.lock().await.clone()
    }

    async fn set_current_city(&self, city: &str) {
        *self.current_city.lock().await = city.to_string();
    }
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;

    let db = DB::new(&config.db.db_path, config.dashboard.recent_limit)?;
    let owm = OWM::new(&config.open_weather.base_url, &config.open_weather.api_key, config.open_weather.timeout_secs)?;
    let state = web::Data::new(AppState::new(db, owm, config.dashboard));

    info!("listening on {}:{}", config.web_server.bind_address, config.web_server.bind_port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(handlers::routes)
    })
        .bind((config.web_server.bind_address, config.web_server.bind_port))?
        .run()
        .await?;

    info!("shutting down");
    Ok(())
}
