use crate::App;
use ratatui::Frame;

use balibuddy::Tab;

use super::{currency_bar, form, layout, legend, tabs, toast};

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();
    let model = &app.model;
    let tab = model.ui.active_tab;
    let can_refresh = model.rate.can_refresh();

    let legend_height = legend::calculate_legend_height(size.width, tab, can_refresh);
    let layout_info = layout::calculate_layout(size, tab == Tab::Currency, legend_height);

    tabs::render_tabs(f, layout_info.tabs_area, tab);
    form::render_form(f, layout_info.form_area, model.active_pair(), model.ui.focused_field);

    if let Some(area) = layout_info.currency_area {
        currency_bar::render_currency_bar(f, area, &model.rate);
    }

    legend::render_legend(
        f,
        layout_info.legend_area,
        tab,
        can_refresh,
        model.ui.config_path.as_deref(),
    );

    // Toast goes last so it sits on top
    if let Some((message, _)) = &model.ui.toast_message {
        toast::render_toast(f, size, message);
    }
}
