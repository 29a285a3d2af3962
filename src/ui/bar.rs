// ============================================================================
// Bar Chart : une barre par point, dans l'ordre
// ============================================================================
// CONCEPT RATATUI : BarChart
// - Les hauteurs sont des u64, relatives à la plus grande
// - text_value() affiche la vraie valeur au-dessus de la hauteur entière
// ============================================================================

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Paragraph},
    Frame,
};

use crate::models::{SeriesData, SeriesPoint};
use crate::ui::{chart_block, colors};

/// Facteur d'échelle : garde deux décimales de résolution dans les u64
const VALUE_SCALE: f64 = 100.0;

/// Convertit une valeur en hauteur de barre (les négatives tombent à 0)
fn bar_height(value: f64) -> u64 {
    (value.max(0.0) * VALUE_SCALE).round() as u64
}

/// Largeur d'une barre pour que `count` barres tiennent dans `width` colonnes
fn bar_width(width: u16, count: usize) -> u16 {
    if count == 0 {
        return 1;
    }
    let per_bar = width as usize / count;
    per_bar.saturating_sub(1).clamp(1, 12) as u16
}

fn build_bar<'a>(point: &'a SeriesPoint, hovered: bool) -> Bar<'a> {
    let color = colors::hex_to_color(colors::SERIES_COLOR);
    let style = if hovered {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };

    Bar::default()
        .value(bar_height(point.value))
        .text_value(format!("{}", point.value))
        .label(Line::from(point.name.as_str()))
        .style(style)
}

/// Dessine le graphique en barres
pub fn render_bar(frame: &mut Frame, area: Rect, data: &SeriesData, hovered: usize, focused: bool) {
    let block = chart_block("Bar Chart", focused);

    let points = match data.points() {
        Ok(points) => points,
        Err(_) => {
            frame.render_widget(Paragraph::new("Invalid data").block(block), area);
            return;
        }
    };

    let bars: Vec<Bar> = points
        .iter()
        .enumerate()
        .map(|(i, point)| build_bar(point, i == hovered))
        .collect();

    let width = bar_width(block.inner(area).width, points.len());
    let chart = BarChart::default()
        .block(block)
        .bar_width(width)
        .bar_gap(1)
        .value_style(Style::default().fg(Color::Black).bg(colors::hex_to_color(colors::SERIES_COLOR)))
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

// ============================================================================
// Tests unitaires
// ============================================================================
