use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use balibuddy::Tab;

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(tab: Tab, can_refresh: bool) -> Vec<Span<'static>> {
    let mut hotkey_spans = vec![
        Span::styled("←/→", Style::default().fg(Color::Yellow)),
        Span::raw(":Tab  "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(":Field  "),
        Span::styled("Del/^U", Style::default().fg(Color::Yellow)),
        Span::raw(":Clear  "),
    ];

    // Refresh only applies to the exchange rate
    if tab == Tab::Currency {
        let color = if can_refresh {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        hotkey_spans.extend(vec![
            Span::styled("^R/F5", Style::default().fg(color)),
            Span::raw(":Refresh Rate  "),
        ]);
    }

    hotkey_spans.extend(vec![
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(":Quit"),
    ]);

    hotkey_spans
}

/// Render the hotkey legend
pub fn render_legend(f: &mut Frame, area: Rect, tab: Tab, can_refresh: bool, config_path: Option<&str>) {
    let hotkey_line = Line::from(build_hotkey_spans(tab, can_refresh));

    let title = match config_path {
        Some(path) => format!(" Hotkeys ({}) ", path),
        None => " Hotkeys ".to_string(),
    };

    let legend = Paragraph::new(vec![hotkey_line])
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });

    f.render_widget(legend, area);
}

/// Height needed to show the whole legend at `terminal_width`
pub fn calculate_legend_height(terminal_width: u16, tab: Tab, can_refresh: bool) -> u16 {
    // Count lines without the block; line_count() does not account for borders
    let hotkey_line = Line::from(build_hotkey_spans(tab, can_refresh));
    let paragraph_for_counting = Paragraph::new(vec![hotkey_line]).wrap(Wrap { trim: false });

    let available_width = terminal_width.saturating_sub(2);
    let line_count = paragraph_for_counting.line_count(available_width);

    // Add top + bottom borders, ensure minimum of 3
    (line_count as u16).saturating_add(2).max(3)
}
