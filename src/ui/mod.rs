// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - layout: Calculates screen layout (tabs, form, rate footer, legend)
// - render: Main orchestration function that coordinates all rendering
// - tabs: Renders the converter tab strip
// - form: Renders the two synchronized input fields
// - currency_bar: Renders the exchange rate footer on the Currency tab
// - legend: Renders hotkey legend
// - toast: Renders toast notifications (brief pop-up messages)

pub mod currency_bar;
pub mod form;
pub mod layout;
pub mod legend;
pub mod render;
pub mod tabs;
pub mod toast;

// Re-export main render function for convenience
pub use render::render;
