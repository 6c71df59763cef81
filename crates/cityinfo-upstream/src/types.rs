use serde::{Deserialize, Serialize};

use crate::error::UpstreamError;

/// `[latitude, longitude]`, the one coordinate representation used past the
/// client boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates(pub f64, pub f64);

impl Coordinates {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }
}

/// Population as sent by the City API; integer or float, never rewritten.
pub type Population = serde_json::Number;

/// City metadata as returned by `GET /cities/{id}`, normalized.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CityData {
    pub coordinates: Option<Coordinates>,
    pub population: Option<Population>,
    pub known_for: Vec<String>,
}

/// Shapes the City API has been observed to use for coordinates.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCoordinates {
    Pair([f64; 2]),
    Object {
        #[serde(alias = "lat")]
        latitude: f64,
        #[serde(alias = "lon", alias = "lng")]
        longitude: f64,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCity {
    coordinates: Option<RawCoordinates>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    population: Option<Population>,
    known_for: Option<Vec<String>>,
}

impl CityData {
    /// Normalize a City API payload.
    ///
    /// `coordinates` wins over top-level `latitude`/`longitude` when both
    /// are present. A lone latitude or longitude counts as absent.
    pub fn from_json(value: serde_json::Value) -> Result<Self, UpstreamError> {
        let raw: RawCity = serde_json::from_value(value)
            .map_err(|e| UpstreamError::invalid(format!("city payload: {}", e)))?;

        let coordinates = match (raw.coordinates, raw.latitude, raw.longitude) {
            (Some(RawCoordinates::Pair([lat, lon])), _, _) => Some(Coordinates(lat, lon)),
            (Some(RawCoordinates::Object { latitude, longitude }), _, _) => {
                Some(Coordinates(latitude, longitude))
            }
            (None, Some(lat), Some(lon)) => Some(Coordinates(lat, lon)),
            _ => None,
        };

        Ok(Self {
            coordinates,
            population: raw.population,
            known_for: raw.known_for.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastDay {
    Today,
    Tomorrow,
}

/// One `{when, min, max}` entry of the aggregated response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherPrediction {
    pub when: ForecastDay,
    pub min: f64,
    pub max: f64,
}

/// Two-day forecast from `GET /weather/{id}`, normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherForecast {
    pub today: TemperatureRange,
    pub tomorrow: TemperatureRange,
}

// `List` must be tried before `Daily`: serde also accepts a struct from a
// positional array, which would read a prediction list as today/tomorrow.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawWeather {
    List(Vec<WeatherPrediction>),
    Daily {
        today: TemperatureRange,
        tomorrow: TemperatureRange,
    },
    Wrapped {
        #[serde(alias = "weatherPredictions")]
        predictions: Vec<WeatherPrediction>,
    },
}

impl WeatherForecast {
    /// Normalize a Weather API payload, either keyed by day or as a list of
    /// `{when, min, max}` entries.
    pub fn from_json(value: serde_json::Value) -> Result<Self, UpstreamError> {
        let raw: RawWeather = serde_json::from_value(value).map_err(|_| {
            UpstreamError::invalid("weather payload lacks today/tomorrow forecasts")
        })?;

        match raw {
            RawWeather::Daily { today, tomorrow } => Ok(Self { today, tomorrow }),
            RawWeather::List(entries) | RawWeather::Wrapped { predictions: entries } => {
                Self::from_predictions(&entries)
            }
        }
    }

    fn from_predictions(entries: &[WeatherPrediction]) -> Result<Self, UpstreamError> {
        let pick = |day: ForecastDay| {
            entries
                .iter()
                .find(|p| p.when == day)
                .map(|p| TemperatureRange { min: p.min, max: p.max })
                .ok_or_else(|| UpstreamError::invalid(format!("missing forecast for {:?}", day)))
        };

        Ok(Self {
            today: pick(ForecastDay::Today)?,
            tomorrow: pick(ForecastDay::Tomorrow)?,
        })
    }

    /// Predictions in response order: today, then tomorrow.
    pub fn predictions(&self) -> [WeatherPrediction; 2] {
        [
            WeatherPrediction {
                when: ForecastDay::Today,
                min: self.today.min,
                max: self.today.max,
            },
            WeatherPrediction {
                when: ForecastDay::Tomorrow,
                min: self.tomorrow.min,
                max: self.tomorrow.max,
            },
        ]
    }
}
