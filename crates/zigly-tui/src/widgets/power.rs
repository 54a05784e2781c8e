//! Power-source cell — mains/DC label or battery level with the
//! low-battery flag driving the color.

use ratatui::style::Style;
use ratatui::text::Span;
use zigly_core::PowerSource;

use crate::theme;

/// Returns a styled `Span` describing how the device is powered.
///
/// Battery devices show the reported level when available; the
/// low-battery flag wins over the level for coloring.
pub fn power_span(
    source: PowerSource,
    battery: Option<f64>,
    battery_low: Option<bool>,
) -> Span<'static> {
    if source.is_battery() {
        let low = battery_low == Some(true);
        let text = match battery {
            Some(pct) => format!("⌁ {pct:.0}%"),
            None => "⌁ battery".to_owned(),
        };
        let color = if low {
            theme::ERROR_RED
        } else if battery.is_some_and(|pct| pct < 20.0) {
            theme::WARNING_YELLOW
        } else {
            theme::SUCCESS_GREEN
        };
        return Span::styled(text, Style::default().fg(color));
    }

    let (text, color) = match source {
        PowerSource::Unknown => ("─", theme::BORDER_GRAY),
        _ => (source.label(), theme::DIM_WHITE),
    };
    Span::styled(text, Style::default().fg(color))
}
