use super::api::CurrentWeather;

/// 16-point compass rose, clockwise from north
pub const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const KELVIN_OFFSET: f64 = 273.15;

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// Map a wind bearing in degrees to its 22.5° compass sector label
pub fn deg_to_card(degrees: f64) -> &'static str {
    let sector = ((degrees + 11.25) / 22.5).floor() as i64;
    COMPASS_POINTS[sector.rem_euclid(16) as usize]
}

/// Everything the weather panel shows for one city, already converted
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub city: String,
    pub description: Option<String>,
    /// (latitude, longitude)
    pub coordinates: (f64, f64),
    /// °C
    pub temperature: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    /// 0.0..=1.0
    pub humidity: f32,
    /// hPa
    pub pressure: i64,
    /// km
    pub visibility: f64,
    /// m/s
    pub wind_speed: f64,
    pub wind_direction: &'static str,
}

impl WeatherSnapshot {
    pub fn from_response(response: &CurrentWeather) -> Self {
        let main = &response.main;
        Self {
            city: response.name.clone(),
            description: response.weather.first().map(|w| w.description.clone()),
            coordinates: (response.coord.lat, response.coord.lon),
            temperature: kelvin_to_celsius(main.temp),
            min_temperature: kelvin_to_celsius(main.temp_min),
            max_temperature: kelvin_to_celsius(main.temp_max),
            humidity: (main.humidity as f32 / 100.0).clamp(0.0, 1.0),
            pressure: main.pressure,
            visibility: response.visibility as f64 / 1000.0,
            wind_speed: response.wind.speed,
            wind_direction: deg_to_card(response.wind.deg),
        }
    }

    pub fn latitude_label(&self) -> String {
        format!("{:.2}° N", self.coordinates.0)
    }

    pub fn longitude_label(&self) -> String {
        format!("{:.2}° E", self.coordinates.1)
    }

    pub fn wind_label(&self) -> String {
        format!("{:.2}m/s {}", self.wind_speed, self.wind_direction)
    }
}

/// `21.85°C`
pub fn celsius_label(value: f64) -> String {
    format!("{:.2}°C", value)
}
