pub mod coordinates;
mod handler;
mod open_meteo;

pub use coordinates::{Coordinates, DEFAULT_COORDINATES};
pub use handler::WeatherMonitorHandler;
pub use open_meteo::{ForecastClient, ForecastResponse, parse_forecast};
