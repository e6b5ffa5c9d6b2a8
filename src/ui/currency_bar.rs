use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use balibuddy::model::RateModel;

/// Offline banner shown while a saved rate is in use
pub const OFFLINE_BANNER: &str = "You are offline. Displaying last saved rate.";

/// Render the exchange rate footer: current rate, last update, refresh state
pub fn render_currency_bar(f: &mut Frame, area: Rect, rate: &RateModel) {
    let lines = build_lines(rate);

    let border_color = if rate.online { Color::Gray } else { Color::Yellow };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Exchange Rate ")
        .border_style(Style::default().fg(border_color));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Footer text (extracted for testability)
fn build_lines(rate: &RateModel) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            rate.status_line(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::raw(rate.last_updated_line())),
    ];

    let refresh_color = if rate.can_refresh() {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let mut third = vec![
        Span::styled("^R", Style::default().fg(refresh_color)),
        Span::raw(":"),
        Span::styled(rate.refresh_label(), Style::default().fg(refresh_color)),
    ];

    if rate.showing_saved_rate_offline() {
        third.push(Span::raw("  "));
        third.push(Span::styled(OFFLINE_BANNER, Style::default().fg(Color::Yellow)));
    }
    lines.push(Line::from(third));

    lines
}
