// ============================================================================
// Candlestick Chart : chandeliers japonais sur Canvas
// ============================================================================
// La mise en page (candle_boxes) et la géométrie (CandleGeometry) travaillent
// en pixels avec y vers le bas. Le Canvas a y vers le haut : on retourne
// l'axe au moment du dessin (y_canvas = HEIGHT - y_pixel).
// ============================================================================

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{
        block::{Position, Title},
        canvas::{Canvas, Line as CanvasLine, Rectangle},
        Paragraph,
    },
    Frame,
};

use crate::models::{price_domain, shape_candles, CandleRecord};
use crate::ui::geometry::{candle_boxes, CandleColor, CandleGeometry};
use crate::ui::tooltip::format_date_tick;
use crate::ui::chart_block;

/// Hauteur de l'espace de dessin (unités arbitraires)
const PLOT_HEIGHT: f64 = 100.0;

/// Largeur de bande par chandelle
const BAND_WIDTH: f64 = 10.0;

fn candle_color(color: CandleColor, hovered: bool) -> Color {
    match (color, hovered) {
        (_, true) => Color::Yellow,
        (CandleColor::Green, false) => Color::Green,
        (CandleColor::Red, false) => Color::Red,
    }
}

/// Calcule la géométrie de chaque chandelle dans l'espace de dessin
pub fn layout_candles(candles: &[CandleRecord]) -> Vec<CandleGeometry> {
    let points = shape_candles(candles);
    let width = BAND_WIDTH * points.len() as f64;

    candle_boxes(&points, width, PLOT_HEIGHT)
        .into_iter()
        .zip(&points)
        .map(|(bar, point)| CandleGeometry::for_point(bar, point))
        .collect()
}

/// Dessine les chandeliers
pub fn render_candlestick(
    frame: &mut Frame,
    area: Rect,
    candles: &[CandleRecord],
    hovered: usize,
    focused: bool,
) {
    let mut block = chart_block("Candlestick Chart", focused);

    if candles.is_empty() {
        frame.render_widget(Paragraph::new("No data").block(block), area);
        return;
    }

    // Période et fourchette de prix en bas du bloc
    let points = shape_candles(candles);
    if let (Some(first), Some(last), Some((low, high))) =
        (points.first(), points.last(), price_domain(&points))
    {
        let caption = format!(
            " {} → {}  [{} - {}] ",
            format_date_tick(&first.x),
            format_date_tick(&last.x),
            low,
            high
        );
        block = block.title(Title::from(caption).position(Position::Bottom));
    }

    let geometries = layout_candles(candles);
    let width = BAND_WIDTH * geometries.len() as f64;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, PLOT_HEIGHT])
        .paint(|ctx| {
            for (i, geometry) in geometries.iter().enumerate() {
                let color = candle_color(geometry.color, i == hovered);

                for wick in [geometry.lower_wick, geometry.upper_wick] {
                    ctx.draw(&CanvasLine {
                        x1: wick.x,
                        y1: PLOT_HEIGHT - wick.y,
                        x2: wick.x,
                        y2: PLOT_HEIGHT - wick.end_y(),
                        color,
                    });
                }

                // Corps : coin bas-gauche en coordonnées Canvas
                let [(x, y0), (_, y1), (x_right, _), _] = geometry.body;
                let bottom_px = y0.max(y1);
                ctx.draw(&Rectangle {
                    x,
                    y: PLOT_HEIGHT - bottom_px,
                    width: x_right - x,
                    height: (y1 - y0).abs(),
                    color,
                });
            }
        });

    frame.render_widget(canvas, area);
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn sample() -> Vec<CandleRecord> {
        vec![
            CandleRecord::new("2024-01-01", 10.0, 24.0, 8.0, 20.0),
            CandleRecord::new("2024-01-02", 20.0, 24.0, 8.0, 10.0),
        ]
    }

    #[test]
    fn test_layout_candles() {
        let geometries = layout_candles(&sample());
        assert_eq!(geometries.len(), 2);
        assert_eq!(geometries[0].color, CandleColor::Green);
        assert_eq!(geometries[1].color, CandleColor::Red);

        // Les mèches restent dans l'espace de dessin
        for geometry in &geometries {
            for wick in [geometry.lower_wick, geometry.upper_wick] {
                assert!(wick.end_y() >= -1e-9 && wick.end_y() <= PLOT_HEIGHT + 1e-9);
            }
        }
    }

    #[test]
    fn test_render_candlestick_colors() {
        let mut terminal = Terminal::new(TestBackend::new(40, 14)).unwrap();

        // Survol sur une chandelle absente : les couleurs d'origine restent
        terminal
            .draw(|frame| render_candlestick(frame, frame.size(), &sample(), usize::MAX, false))
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert!(buffer.content().iter().any(|cell| cell.fg == Color::Green));
        assert!(buffer.content().iter().any(|cell| cell.fg == Color::Red));

        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Candlestick Chart"));
        assert!(text.contains("2024-01-01"));
    }

    #[test]
    fn test_render_candlestick_empty() {
        let mut terminal = Terminal::new(TestBackend::new(30, 6)).unwrap();
        terminal
            .draw(|frame| render_candlestick(frame, frame.size(), &[], 0, true))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("No data"));
    }
}
