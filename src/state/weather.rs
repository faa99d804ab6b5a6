//! Weather screen state

use crate::config::City;
use crate::weather::WeatherSnapshot;

/// What the right-hand panel is showing
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherView {
    /// Nothing selected yet
    Idle,
    Loading,
    Ready(WeatherSnapshot),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct WeatherState {
    pub cities: Vec<City>,
    pub selected: Option<usize>,
    pub view: WeatherView,
    /// Bumped per selection so a slow reply for an old city is ignored
    request_id: u64,
}

impl WeatherState {
    pub fn new(cities: Vec<City>) -> Self {
        Self {
            cities,
            selected: None,
            view: WeatherView::Idle,
            request_id: 0,
        }
    }

    pub fn selected_city(&self) -> Option<&City> {
        self.selected.and_then(|i| self.cities.get(i))
    }

    /// Select a city; returns the request id to tag the fetch with
    pub fn select(&mut self, index: usize) -> Option<(u64, City)> {
        let city = self.cities.get(index)?.clone();
        self.selected = Some(index);
        self.request_id += 1;
        self.view = WeatherView::Loading;
        Some((self.request_id, city))
    }

    /// Record a fetch result; stale replies are dropped
    pub fn finish(&mut self, request_id: u64, result: Result<WeatherSnapshot, String>) -> bool {
        if request_id != self.request_id {
            return false;
        }
        // The previous snapshot is discarded either way
        self.view = match result {
            Ok(snapshot) => WeatherView::Ready(snapshot),
            Err(message) => WeatherView::Failed(message),
        };
        true
    }

    pub fn unselect(&mut self) {
        self.selected = None;
        self.request_id += 1;
        self.view = WeatherView::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeatherSettings;
    use crate::weather::api::CurrentWeather;

    fn snapshot(name: &str) -> WeatherSnapshot {
        let mut response = CurrentWeather::default();
        response.name = name.to_string();
        WeatherSnapshot::from_response(&response)
    }

    #[test]
    fn test_select_then_finish() {
        let mut state = WeatherState::new(WeatherSettings::default().cities);
        let (id, city) = state.select(1).unwrap();
        assert_eq!(city.query, "noida");
        assert_eq!(state.view, WeatherView::Loading);

        assert!(state.finish(id, Ok(snapshot("Noida"))));
        assert!(matches!(state.view, WeatherView::Ready(ref s) if s.city == "Noida"));
    }

    #[test]
    fn test_stale_reply_is_ignored() {
        let mut state = WeatherState::new(WeatherSettings::default().cities);
        let (first, _) = state.select(0).unwrap();
        let (second, _) = state.select(2).unwrap();

        assert!(!state.finish(first, Ok(snapshot("Delhi"))));
        assert_eq!(state.view, WeatherView::Loading);

        assert!(state.finish(second, Err("request failed".into())));
        assert_eq!(state.view, WeatherView::Failed("request failed".into()));
        assert_eq!(state.selected_city().unwrap().name, "Mumbai");
    }

    #[test]
    fn test_out_of_range_selection() {
        let mut state = WeatherState::new(Vec::new());
        assert!(state.select(0).is_none());
        assert_eq!(state.view, WeatherView::Idle);
    }
}
