use actix_web::{delete, get, http::header, web, HttpResponse, Responder};
use actix_web::error::{InternalError, QueryPayloadError};
use log::{error, info};
use serde::{Deserialize, Serialize};
use crate::AppState;
use crate::dashboard::build_dashboard;
use crate::manager_owm::errors::OwmError;
use crate::manager_owm::icon_url;
use crate::units::TemperatureUnit;

#[derive(Deserialize, Debug)]
struct CityParams {
    city: String,
    #[serde(default)]
    unit: TemperatureUnit,
}

#[derive(Deserialize, Debug)]
struct UnitParams {
    #[serde(default)]
    unit: TemperatureUnit,
}

#[derive(Deserialize, Debug)]
struct LocationParams {
    lat: f64,
    lon: f64,
    #[serde(default)]
    unit: TemperatureUnit,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_body(message: &str) -> ErrorBody {
    ErrorBody { error: message.to_string() }
}

#[get("/weather")]
async fn weather(params: web::Query<CityParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    lookup(&data, &params.city, params.unit).await
}

#[get("/weather/refresh")]
async fn refresh(params: web::Query<UnitParams>, data: web::Data<AppState>) -> impl Responder {
    let city = data.current_city().await;
    info!("refreshing {}", city);

    lookup(&data, &city, params.unit).await
}

#[get("/location")]
async fn location(params: web::Query<LocationParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    match data.owm.current_weather_at(params.lat, params.lon).await {
        Ok(current) if !current.city.is_empty() => lookup(&data, &current.city, params.unit).await,
        Ok(_) => HttpResponse::NotFound()
            .json(error_body("Failed to get weather for your location. Please search manually.")),
        Err(e) => {
            error!("failed to resolve location: {}", e);
            match e {
                OwmError::Input(m) => HttpResponse::BadRequest().json(error_body(&m)),
                _ => HttpResponse::BadGateway()
                    .json(error_body("Failed to get weather for your location. Please search manually.")),
            }
        }
    }
}

#[get("/recent")]
async fn recent(data: web::Data<AppState>) -> impl Responder {
    match data.db.lock().await.recent_searches() {
        Ok(searches) => HttpResponse::Ok().json(searches),
        Err(e) => {
            error!("failed to get recent searches: {}", e);
            HttpResponse::InternalServerError().json(error_body("Failed to load recent searches."))
        }
    }
}

#[delete("/recent")]
async fn clear_recent(data: web::Data<AppState>) -> impl Responder {
    match data.db.lock().await.clear_recent_searches() {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(e) => {
            error!("failed to clear recent searches: {}", e);
            HttpResponse::InternalServerError().json(error_body("Failed to clear recent searches."))
        }
    }
}

#[get("/icon/{code}")]
async fn icon(code: web::Path<String>) -> impl Responder {
    HttpResponse::Found()
        .insert_header((header::LOCATION, icon_url(&code)))
        .finish()
}

/// Fetches current conditions and forecast for a city and builds the dashboard
///
/// On success the city is remembered as a recent search and becomes the current city.
///
/// # Arguments
///
/// * 'data' - application state
/// * 'city' - city to look up
/// * 'unit' - unit to show temperatures in
async fn lookup(data: &AppState, city: &str, unit: TemperatureUnit) -> HttpResponse {
    let city = city.trim();
    if city.is_empty() {
        return HttpResponse::BadRequest().json(error_body("Please enter a city name."));
    }

    let current = match data.owm.current_weather(city).await {
        Ok(current) => current,
        Err(e) => return upstream_error(e),
    };
    let forecast = match data.owm.forecast(city).await {
        Ok(forecast) => forecast,
        Err(e) => return upstream_error(e),
    };

    let dashboard = build_dashboard(&current, &forecast, unit, &data.settings);

    if let Err(e) = data.db.lock().await.add_recent_search(city) {
        error!("failed to record recent search: {}", e);
    }
    data.set_current_city(city).await;

    HttpResponse::Ok().json(dashboard)
}

fn upstream_error(e: OwmError) -> HttpResponse {
    error!("weather lookup failed: {}", e);

    match e {
        OwmError::Input(_) => HttpResponse::BadRequest().json(error_body(&e.user_message())),
        _ => HttpResponse::BadGateway().json(error_body(&e.user_message())),
    }
}

/// Turns a rejected query string into the json error body
fn query_error(err: QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    info!("rejected query: {}", err);
    let response = HttpResponse::BadRequest().json(error_body(&format!("Invalid request: {}", err)));

    InternalError::from_response(err, response).into()
}

/// Registers all endpoints
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error))
        .service(weather)
        .service(refresh)
        .service(location)
        .service(recent)
        .service(clear_recent)
        .service(icon);
}
