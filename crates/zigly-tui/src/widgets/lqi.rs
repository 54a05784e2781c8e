//! Link-quality indicator — LQI value plus ▂▄▆█ bars with color
//! thresholds over the 0–255 scale.

use ratatui::style::Style;
use ratatui::text::Span;

use crate::theme;

/// Returns a styled `Span` with the LQI value and signal bars.
///
/// | Bars    | LQI range | Color          |
/// |---------|-----------|----------------|
/// | `▂▄▆█` | >= 200    | Success Green  |
/// | `▂▄▆ ` | 150–199   | Mesh Teal      |
/// | `▂▄  ` | 100–149   | Warning Yellow |
/// | `▂   ` | 50–99     | Honey Amber    |
/// | `·   ` | < 50      | Error Red      |
pub fn lqi_span(lqi: Option<u16>) -> Span<'static> {
    let Some(lqi) = lqi else {
        return Span::styled("···", Style::default().fg(theme::BORDER_GRAY));
    };

    let (bars, color) = if lqi >= 200 {
        ("▂▄▆█", theme::SUCCESS_GREEN)
    } else if lqi >= 150 {
        ("▂▄▆ ", theme::MESH_TEAL)
    } else if lqi >= 100 {
        ("▂▄  ", theme::WARNING_YELLOW)
    } else if lqi >= 50 {
        ("▂   ", theme::HONEY_AMBER)
    } else {
        ("·   ", theme::ERROR_RED)
    };

    Span::styled(format!("{lqi:>3} {bars}"), Style::default().fg(color))
}
