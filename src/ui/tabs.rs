use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Tabs},
    Frame,
};

use balibuddy::Tab;

/// Render the tab strip with the active tab highlighted
pub fn render_tabs(f: &mut Frame, area: Rect, active: Tab) {
    let tabs = Tabs::new(Tab::ALL.iter().map(|tab| tab.as_str()))
        .select(active.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Bali Buddy "),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");

    f.render_widget(tabs, area);
}
