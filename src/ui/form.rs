//! Conversion Form UI
//!
//! Renders the two inputs of a field pair, the focused one with a cursor.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use balibuddy::logic::convert::{parse_amount, Unit};
use balibuddy::logic::field_sync::{Field, FieldPair};

pub fn render_form(f: &mut Frame, area: Rect, pair: &FieldPair, focused: Field) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Field A
            Constraint::Length(3), // Field B
            Constraint::Min(1),    // Hint
        ])
        .split(area);

    let units = pair.units();
    render_input(f, chunks[0], &units.a, pair.value(Field::A), focused == Field::A);
    render_input(f, chunks[1], &units.b, pair.value(Field::B), focused == Field::B);

    let hint = Paragraph::new(Line::from(Span::styled(
        hint_text(pair),
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(hint, chunks[2]);
}

fn render_input(f: &mut Frame, area: Rect, unit: &Unit, value: &str, focused: bool) {
    let border_color = if focused { Color::Cyan } else { Color::Gray };
    let title = format!(" {} ({}) ", unit.name, unit.symbol);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border_color));

    let text_style = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let input = Paragraph::new(Span::styled(value, text_style)).block(block);
    f.render_widget(input, area);

    if focused {
        // Place the cursor after the text, clamped inside the borders
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + 1).saturating_add(value.width() as u16).min(max_x);
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}

/// Line shown under the inputs
pub fn hint_text(pair: &FieldPair) -> String {
    let units = pair.units();

    let Some(factor) = pair.factor() else {
        return format!(
            "Waiting for the {} to {} exchange rate...",
            units.a.symbol, units.b.symbol
        );
    };

    let invalid = pair
        .state()
        .driver()
        .map(|field| parse_amount(pair.value(field)).is_err())
        .unwrap_or(false);
    if invalid {
        return "Please enter a valid number".to_string();
    }

    format!("1 {} = {} {}", units.a.symbol, factor.value(), units.b.symbol)
}
