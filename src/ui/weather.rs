use iced::widget::{button, column, container, horizontal_rule, progress_bar, row, scrollable, text, Column};
use iced::{Alignment, Element, Length, Task, Theme};
use tracing::warn;

use crate::config::WeatherSettings;
use crate::state::weather::{WeatherState, WeatherView};
use crate::weather::{self, convert::celsius_label, WeatherSnapshot};

#[derive(Debug, Clone)]
pub enum Message {
    Select(usize),
    Unselect,
    Fetched(u64, Result<WeatherSnapshot, String>),
}

pub fn update(
    state: &mut WeatherState,
    client: &reqwest::Client,
    settings: &WeatherSettings,
    message: Message,
) -> Task<Message> {
    match message {
        Message::Select(index) => {
            let Some((request_id, city)) = state.select(index) else {
                return Task::none();
            };
            let client = client.clone();
            let settings = settings.clone();
            Task::perform(
                async move {
                    weather::fetch_current(client, settings, city.query)
                        .await
                        .map(|response| WeatherSnapshot::from_response(&response))
                        .map_err(|e| e.to_string())
                },
                move |result| Message::Fetched(request_id, result),
            )
        }
        Message::Unselect => {
            state.unselect();
            Task::none()
        }
        Message::Fetched(request_id, result) => {
            if let Err(e) = &result {
                warn!("⚠️  Weather fetch failed: {}", e);
            }
            state.finish(request_id, result);
            Task::none()
        }
    }
}

fn reading<'a>(label: &'a str, value: Element<'a, Message>) -> Element<'a, Message> {
    row![
        text(label).width(Length::FillPortion(1)),
        container(value).center_x(Length::FillPortion(1)),
    ]
    .align_y(Alignment::Center)
    .spacing(10)
    .into()
}

fn snapshot_view(snapshot: &WeatherSnapshot) -> Element<'_, Message> {
    let mut rows = column![text(&snapshot.city).size(24)].spacing(8);
    if let Some(description) = &snapshot.description {
        rows = rows.push(text(description).size(14));
    }

    rows.push(horizontal_rule(1))
        .push(reading("Latitude", text(snapshot.latitude_label()).into()))
        .push(reading("Longitude", text(snapshot.longitude_label()).into()))
        .push(reading("Temperature", text(celsius_label(snapshot.temperature)).into()))
        .push(reading("Min. Temp.", text(celsius_label(snapshot.min_temperature)).into()))
        .push(reading("Max. Temp.", text(celsius_label(snapshot.max_temperature)).into()))
        .push(reading("Humidity", progress_bar(0.0..=1.0, snapshot.humidity).height(16).into()))
        .push(reading("Pressure", text(format!("{}hPa", snapshot.pressure)).into()))
        .push(reading("Visibility", text(format!("{:.1}Km", snapshot.visibility)).into()))
        .push(reading("Wind", text(snapshot.wind_label()).into()))
        .into()
}

pub fn view(state: &WeatherState) -> Element<'_, Message> {
    let cities: Column<Message> = Column::with_children(state.cities.iter().enumerate().map(|(i, city)| {
        let selected = state.selected == Some(i);
        let style: fn(&Theme, button::Status) -> button::Style = if selected {
            button::primary
        } else {
            button::secondary
        };
        button(text(&city.name))
            .on_press(if selected { Message::Unselect } else { Message::Select(i) })
            .style(style)
            .width(Length::Fill)
            .padding(8)
            .into()
    }))
    .spacing(4)
    .width(160);

    let title = match state.selected_city() {
        Some(city) => format!("▸ {}", city.name),
        None => "☰ Select a city from the menu".to_string(),
    };

    let panel: Element<Message> = match &state.view {
        WeatherView::Idle => text("").into(),
        WeatherView::Loading => text("Loading…").into(),
        WeatherView::Ready(snapshot) => snapshot_view(snapshot),
        WeatherView::Failed(message) => text(format!("Could not load weather: {}", message)).into(),
    };

    row![
        scrollable(cities),
        column![text(title).size(18), scrollable(panel)]
            .spacing(12)
            .width(Length::Fill),
    ]
    .spacing(16)
    .padding(10)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::api::CurrentWeather;

    #[test]
    fn test_fetch_failure_is_shown_not_fatal() {
        let settings = WeatherSettings::default();
        let client = reqwest::Client::new();
        let mut state = WeatherState::new(settings.cities.clone());

        let _ = update(&mut state, &client, &settings, Message::Select(0));
        assert_eq!(state.view, WeatherView::Loading);

        let _ = update(
            &mut state,
            &client,
            &settings,
            Message::Fetched(1, Err("request failed: timeout".into())),
        );
        assert_eq!(state.view, WeatherView::Failed("request failed: timeout".into()));

        // A later success replaces the error
        let _ = update(&mut state, &client, &settings, Message::Select(2));
        let snapshot = WeatherSnapshot::from_response(&CurrentWeather::default());
        let _ = update(&mut state, &client, &settings, Message::Fetched(2, Ok(snapshot.clone())));
        assert_eq!(state.view, WeatherView::Ready(snapshot));

        let _ = update(&mut state, &client, &settings, Message::Unselect);
        assert_eq!(state.view, WeatherView::Idle);
        assert!(state.selected_city().is_none());
    }
}
