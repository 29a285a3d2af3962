// ============================================================================
// Line Chart : valeurs reliées dans l'ordre des labels
// ============================================================================
// CONCEPT RATATUI : Chart + Dataset
// - X = index du point, Y = valeur
// - Un second dataset (Scatter) marque le point survolé
// ============================================================================

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::models::SeriesData;
use crate::ui::{chart_block, colors};

/// Bornes de l'axe Y avec 5 % de marge ; une série plate reçoit ±1
pub fn value_bounds(values: &[f64]) -> [f64; 2] {
    let (min, max) = values
        .iter()
        .fold((f64::MAX, f64::MIN), |(min, max), &v| (min.min(v), max.max(v)));

    if values.is_empty() {
        return [0.0, 1.0];
    }
    if max - min <= f64::EPSILON {
        return [min - 1.0, max + 1.0];
    }

    let margin = (max - min) * 0.05;
    [min - margin, max + margin]
}

/// Dessine le graphique ligne
pub fn render_line(frame: &mut Frame, area: Rect, data: &SeriesData, hovered: usize, focused: bool) {
    let block = chart_block("Line Chart", focused);

    let points = match data.points() {
        Ok(points) if !points.is_empty() => points,
        Ok(_) => {
            frame.render_widget(Paragraph::new("No data").block(block), area);
            return;
        }
        Err(_) => {
            frame.render_widget(Paragraph::new("Invalid data").block(block), area);
            return;
        }
    };

    let coords: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, point)| (i as f64, point.value))
        .collect();
    let marker: Vec<(f64, f64)> = coords.get(hovered).copied().into_iter().collect();

    let [y_min, y_max] = value_bounds(&data.data);
    let x_max = (coords.len() - 1).max(1) as f64;

    let datasets = vec![
        Dataset::default()
            .name("value")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(colors::hex_to_color(colors::SERIES_COLOR)))
            .data(&coords),
        Dataset::default()
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&marker),
    ];

    // Premier et dernier label sur l'axe X
    let first = points.first().map(|p| p.name.clone()).unwrap_or_default();
    let last = points.last().map(|p| p.name.clone()).unwrap_or_default();

    let x_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, x_max])
        .labels(vec![Span::raw(first), Span::raw(last)]);

    let y_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format!("{:.1}", y_min)),
            Span::raw(format!("{:.1}", y_max)),
        ]);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

// ============================================================================
// Tests unitaires
// ============================================================================
