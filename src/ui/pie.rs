// ============================================================================
// Pie Chart : répartition en camembert
// ============================================================================
// CONCEPTS RATATUI :
// 1. Canvas : surface de dessin en coordonnées flottantes
// 2. Un secteur = un éventail de rayons partant du centre
// 3. Légende à côté, dans l'ordre des points
// ============================================================================

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{self, Canvas},
        Paragraph,
    },
    Frame,
};

use crate::models::{SeriesData, SeriesPoint};
use crate::ui::{chart_block, colors};

/// Pas angulaire entre deux rayons d'un secteur (radians)
const RAY_STEP: f64 = 0.015;

/// Un secteur calculé
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// Index du point d'origine (pour le survol)
    pub index: usize,
    pub name: String,
    pub value: f64,
    /// Angle de départ en degrés (sens trigonométrique, 0 = 3 heures)
    pub start_angle: f64,
    /// Ouverture en degrés
    pub sweep: f64,
    pub percent: f64,
    pub color: &'static str,
}

impl PieSlice {
    /// Texte de légende : "<nom> <pourcentage arrondi>%"
    pub fn legend(&self) -> String {
        format!("{} {:.0}%", self.name, self.percent)
    }
}

/// Calcule les secteurs dans l'ordre des points
///
/// Les valeurs nulles ou négatives n'ont pas de secteur.
pub fn pie_slices(points: &[SeriesPoint]) -> Vec<PieSlice> {
    let total: f64 = points.iter().map(|p| p.value).filter(|v| *v > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start_angle = 0.0;
    points
        .iter()
        .enumerate()
        .filter(|(_, point)| point.value > 0.0)
        .map(|(index, point)| {
            let sweep = point.value / total * 360.0;
            let slice = PieSlice {
                index,
                name: point.name.clone(),
                value: point.value,
                start_angle,
                sweep,
                percent: point.value / total * 100.0,
                color: colors::resolve(&point.name),
            };
            start_angle += sweep;
            slice
        })
        .collect()
}

/// Dessine le camembert et sa légende
pub fn render_pie(frame: &mut Frame, area: Rect, data: &SeriesData, hovered: usize, focused: bool) {
    let block = chart_block("Pie Chart", focused);

    let points = match data.points() {
        Ok(points) => points,
        Err(_) => {
            frame.render_widget(Paragraph::new("Invalid data").block(block), area);
            return;
        }
    };
    let slices = pie_slices(&points);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            for slice in &slices {
                let color = colors::hex_to_color(slice.color);
                let start = slice.start_angle.to_radians();
                let end = (slice.start_angle + slice.sweep).to_radians();
                // Le secteur survolé dépasse légèrement
                let radius = if slice.index == hovered { 1.0 } else { 0.9 };

                let mut angle = start;
                while angle < end {
                    ctx.draw(&canvas::Line {
                        x1: 0.0,
                        y1: 0.0,
                        x2: radius * angle.cos(),
                        y2: radius * angle.sin(),
                        color,
                    });
                    angle += RAY_STEP;
                }
            }
        });
    frame.render_widget(canvas, chunks[0]);

    let legend: Vec<Line> = slices
        .iter()
        .map(|slice| {
            let mut style = Style::default().fg(colors::hex_to_color(slice.color));
            if slice.index == hovered {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            Line::from(vec![Span::styled("■ ", style), Span::styled(slice.legend(), style)])
        })
        .collect();
    frame.render_widget(Paragraph::new(legend), chunks[1]);
}

// ============================================================================
// Tests unitaires
// ============================================================================
