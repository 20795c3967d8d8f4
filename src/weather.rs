//! Weather client
//!
//! One OpenWeatherMap GET per analysis call, no retry, no caching. The
//! client never raises: every network, parsing, or missing-field problem
//! is folded into `WeatherReading::Failure`.

use crate::error::TomatoDoctorError;
use serde::{Deserialize, Serialize};

const WEATHER_API_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Current weather for a location. Either both fields are present or
/// neither is; there is no partial reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum WeatherReading {
    #[serde(rename_all = "camelCase")]
    Success { temperature_c: f64, humidity_pct: u8 },
    Failure { reason: String },
}

impl WeatherReading {
    pub fn is_success(&self) -> bool {
        matches!(self, WeatherReading::Success { .. })
    }

    /// Humidity for explanation purposes: 0 when the fetch failed, which
    /// always routes to the low-humidity narrative.
    pub fn humidity_or_default(&self) -> u8 {
        match self {
            WeatherReading::Success { humidity_pct, .. } => *humidity_pct,
            WeatherReading::Failure { .. } => 0,
        }
    }
}

pub struct WeatherClient {
    api_key: Option<String>,
    client: reqwest::Client,
}

impl WeatherClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Fetch current weather for a free-text location. The location is
    /// passed through unvalidated; matching ambiguity is the service's
    /// concern.
    pub async fn fetch(&self, location: &str) -> WeatherReading {
        match self.try_fetch(location).await {
            Ok(reading) => reading,
            Err(reason) => WeatherReading::Failure { reason },
        }
    }

    async fn try_fetch(&self, location: &str) -> std::result::Result<WeatherReading, String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TomatoDoctorError::MissingApiKey.to_string())?;

        let response = self
            .client
            .get(WEATHER_API_URL)
            .query(&[("q", location), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| format!("could not fetch weather for '{location}': {e}"))?;

        let body = response
            .text()
            .await
            .map_err(|e| format!("could not read weather response: {e}"))?;

        parse_weather_response(&body)
            .ok_or_else(|| format!("could not fetch weather for '{location}'"))
    }
}

/// Extract (temperature °C, humidity %) from an OpenWeatherMap response
/// body. Both `main.temp` and `main.humidity` must be present; anything
/// else is a miss, not a partial reading.
fn parse_weather_response(body: &str) -> Option<WeatherReading> {
    let data: serde_json::Value = serde_json::from_str(body).ok()?;
    let main = data.get("main")?;
    let temperature_c = main.get("temp")?.as_f64()?;
    let humidity = main.get("humidity")?.as_u64()?;
    let humidity_pct = u8::try_from(humidity.min(100)).ok()?;

    Some(WeatherReading::Success {
        temperature_c,
        humidity_pct,
    })
}
