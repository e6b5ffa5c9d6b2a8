use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Render a toast notification (brief pop-up message)
pub fn render_toast(f: &mut Frame, area: Rect, message: &str) {
    let (toast_width, toast_height) = toast_size(area, message);

    let toast_x = (area.width.saturating_sub(toast_width)) / 2;
    let toast_y = 3; // Just below the tab strip
    if toast_width == 0 || area.height <= toast_y {
        return;
    }

    let toast_area = Rect {
        x: area.x + toast_x,
        y: area.y + toast_y,
        width: toast_width,
        height: toast_height.min(area.height.saturating_sub(toast_y)),
    };

    // Clear the area first to prevent background bleed-through
    f.render_widget(Clear, toast_area);

    // Detect error messages and use different styling
    let is_error = message.starts_with("Error:");
    let (icon, color) = if is_error {
        ("✗ ", Color::Red)
    } else {
        ("✓ ", Color::Green)
    };

    let toast_line = Line::from(vec![
        Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(message, Style::default()),
    ]);

    let toast_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

    let toast_text = Paragraph::new(vec![toast_line])
        .block(toast_block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(toast_text, toast_area);
}

/// Width and height of the toast box, wrapping long messages at 80 columns
fn toast_size(area: Rect, message: &str) -> (u16, u16) {
    // icon + padding + borders
    let content_width = message.width() + 6;
    let max_width = (area.width as usize).min(80);
    let toast_width = content_width.min(max_width);

    let inner_width = toast_width.saturating_sub(4).max(1);
    let text_lines = (message.width() + 2).div_ceil(inner_width).max(1);

    (toast_width as u16, (text_lines + 2) as u16)
}
