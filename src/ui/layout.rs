use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout information for rendering
pub struct LayoutInfo {
    /// Top tab strip
    pub tabs_area: Rect,
    /// Input fields
    pub form_area: Rect,
    /// Exchange rate footer (Currency tab only)
    pub currency_area: Option<Rect>,
    /// Hotkey legend area (full width)
    pub legend_area: Rect,
}

/// Height of the exchange rate footer (3 text lines plus borders)
const CURRENCY_BAR_HEIGHT: u16 = 5;

/// Calculate the screen layout for all UI components
pub fn calculate_layout(terminal_size: Rect, show_currency_bar: bool, legend_height: u16) -> LayoutInfo {
    let currency_height = if show_currency_bar {
        CURRENCY_BAR_HEIGHT
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // Tab strip
            Constraint::Min(8),                  // Two inputs plus hint
            Constraint::Length(currency_height), // Rate footer (0 when hidden)
            Constraint::Length(legend_height),   // Legend (exact fit for wrapped content)
        ])
        .split(terminal_size);

    LayoutInfo {
        tabs_area: chunks[0],
        form_area: chunks[1],
        currency_area: show_currency_bar.then_some(chunks[2]),
        legend_area: chunks[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_bar_only_when_requested() {
        let size = Rect::new(0, 0, 80, 30);
        assert!(calculate_layout(size, true, 3).currency_area.is_some());
        assert!(calculate_layout(size, false, 3).currency_area.is_none());
    }

    #[test]
    fn test_areas_stack_vertically() {
        let size = Rect::new(0, 0, 80, 30);
        let info = calculate_layout(size, true, 3);
        assert_eq!(info.tabs_area.y, 0);
        assert_eq!(info.tabs_area.height, 3);
        assert_eq!(info.legend_area.height, 3);
        assert_eq!(info.legend_area.y + info.legend_area.height, 30);
        let currency = info.currency_area.unwrap();
        assert_eq!(currency.height, CURRENCY_BAR_HEIGHT);
        assert_eq!(currency.y, info.legend_area.y - CURRENCY_BAR_HEIGHT);
    }
}
