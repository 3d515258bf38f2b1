use super::{ForecastClient, coordinates};
use crate::{
    Result,
    config::WeatherApiConfig,
    schema::{TemperatureReading, WeatherMonitorService, WeatherRequest, WeatherServiceError},
};
use chrono::Utc;
use tarpc::context;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct WeatherMonitorHandler {
    forecast: ForecastClient,
}

impl WeatherMonitorHandler {
    pub fn new(config: &WeatherApiConfig) -> Result<Self> {
        Ok(Self::with_client(ForecastClient::new(config)?))
    }

    pub fn with_client(forecast: ForecastClient) -> Self {
        Self { forecast }
    }

    #[instrument(skip(self), fields(location = %request.location))]
    pub async fn temperature_for(
        &self,
        request: &WeatherRequest,
    ) -> std::result::Result<TemperatureReading, WeatherServiceError> {
        info!("Getting temperature for location: {}", request.location);

        if request.location.trim().is_empty() {
            return Err(WeatherServiceError::invalid_request(
                "location must not be empty",
            ));
        }

        let coordinates = coordinates::resolve(&request.location);
        info!(
            "Using coordinates: lat={:.6}, lon={:.6}",
            coordinates.latitude, coordinates.longitude
        );

        let temperature = self.forecast.current_temperature(coordinates).await?;
        info!("Received temperature: {:.2}°C", temperature);

        Ok(TemperatureReading {
            temperature,
            location: request.location.clone(),
            timestamp: Utc::now().timestamp(),
            unit: TemperatureReading::DEFAULT_UNIT.to_string(),
        })
    }
}

impl WeatherMonitorService for WeatherMonitorHandler {
    async fn get_temperature(
        self,
        _: context::Context,
        request: WeatherRequest,
    ) -> std::result::Result<TemperatureReading, WeatherServiceError> {
        self.temperature_for(&request).await
    }
}
