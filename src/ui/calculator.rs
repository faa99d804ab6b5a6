use iced::alignment::Horizontal;
use iced::widget::{button, column, container, horizontal_space, row, scrollable, text, text_input, Column, Row};
use iced::{Element, Length, Task};
use tracing::debug;

use crate::state::calculator::CalculatorState;

/// Calculator events
#[derive(Debug, Clone)]
pub enum Message {
    /// Typed directly into the entry field
    InputChanged(String),
    /// Keypad button
    Key(&'static str),
    Backspace,
    Clear,
    Evaluate,
    ToggleHistory,
}

/// Keypad rows below the History/Back row
const KEYPAD: [[&str; 4]; 5] = [
    ["C", "(", ")", "/"],
    ["7", "8", "9", "*"],
    ["4", "5", "6", "-"],
    ["1", "2", "3", "+"],
    ["0", ".", "%", "="],
];

pub fn input_id() -> text_input::Id {
    text_input::Id::new("calculator-input")
}

/// Focus the entry field (used when the screen opens)
pub fn focus_input() -> Task<Message> {
    text_input::focus(input_id())
}

pub fn update(state: &mut CalculatorState, message: Message) -> Task<Message> {
    match message {
        Message::InputChanged(value) => state.on_input_changed(value),
        Message::Key(token) => state.push_token(token),
        Message::Backspace => state.backspace(),
        Message::Clear => state.clear(),
        Message::Evaluate => {
            if let Err(e) = state.on_evaluate() {
                debug!(input = %state.input, "evaluation failed: {}", e);
            }
        }
        Message::ToggleHistory => state.toggle_history(),
    }
    Task::none()
}

fn key_message(label: &'static str) -> Message {
    match label {
        "C" => Message::Clear,
        "=" => Message::Evaluate,
        token => Message::Key(token),
    }
}

fn key<'a>(label: &'a str, message: Message) -> Element<'a, Message> {
    button(text(label).size(18).width(Length::Fill).align_x(Horizontal::Center))
        .on_press(message)
        .width(Length::Fill)
        .padding(10)
        .into()
}

pub fn view(state: &CalculatorState) -> Element<'_, Message> {
    let input = text_input("Enter an expression", &state.input)
        .id(input_id())
        .on_input(Message::InputChanged)
        .on_submit(Message::Evaluate)
        .size(22)
        .padding(8);

    let output = row![text(&state.output).size(20), horizontal_space()];

    let history_label = if state.show_history { "Hide History" } else { "History" };
    let controls = row![
        key(history_label, Message::ToggleHistory),
        key("⌫ Back", Message::Backspace),
    ]
    .spacing(5);

    let keypad: Column<Message> = Column::with_children(KEYPAD.iter().map(|keys| {
        Row::with_children(keys.iter().map(|&label| key(label, key_message(label))))
            .spacing(5)
            .into()
    }))
    .spacing(5);

    let mut content = column![input, output].spacing(8);

    if state.show_history {
        let entries: Column<Message> = Column::with_children(
            state
                .history
                .iter()
                .map(|entry| text(entry.to_string()).into()),
        )
        .spacing(2);
        content = content.push(container(scrollable(entries)).height(100).width(Length::Fill));
    }

    content = content.push(controls).push(keypad);

    container(content).padding(10).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypad_routes_through_state() {
        let mut state = CalculatorState::new();
        for label in ["2", "+", "3", "*", "4", "="] {
            let _ = update(&mut state, key_message(label));
        }
        assert_eq!(state.input, "14");
        assert_eq!(state.history.len(), 1);

        let _ = update(&mut state, key_message("C"));
        assert!(state.input.is_empty());
    }
}
