// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Trois écrans selon l'état du chargement :
// - Loading : "Loading charts..."
// - Failed  : message générique en rouge
// - Ready   : header, grille 2×2, panneau tooltip, footer
//
// CONCEPTS RATATUI :
// 1. Layout imbriqués : vertical puis horizontal pour la grille
// 2. Chaque graphique reçoit son Rect et son curseur
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, LoadState};
use crate::models::{ChartKind, DashboardData};
use crate::ui::{bar, candlestick, line, pie};

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Le compilateur force à gérer tous les états de chargement
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, chunks[0]);

    match &app.load_state {
        LoadState::Loading => render_message(frame, chunks[1], "Loading charts...", Color::Gray),
        LoadState::Failed(message) => render_message(frame, chunks[1], message, Color::Red),
        LoadState::Ready(data) => render_charts(frame, app, data, chunks[1]),
    }

    render_footer(frame, app, chunks[2]);
}

/// Crée le layout principal (header, content, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Graphiques
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

fn render_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Chartboard ")
        .title_alignment(Alignment::Center);

    let paragraph = Paragraph::new(Line::from(Span::styled(
        "Financial Dashboard",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )))
    .block(block)
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Message centré (chargement ou erreur)
fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Grille des graphiques
// ============================================================================

/// Grille 2×2 à gauche, tooltip du graphique actif à droite
fn render_charts(frame: &mut Frame, app: &App, data: &DashboardData, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(78), Constraint::Percentage(22)])
        .split(area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[0]);

    let cells: Vec<Rect> = rows
        .iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(*row)
                .to_vec()
        })
        .collect();

    // Ordre de la grille = ordre de ChartKind::all()
    for (kind, cell) in ChartKind::all().into_iter().zip(cells) {
        let hovered = app.cursor(kind);
        let focused = app.focus == kind;
        match kind {
            ChartKind::Pie => pie::render_pie(frame, cell, &data.pie, hovered, focused),
            ChartKind::Bar => bar::render_bar(frame, cell, &data.bar, hovered, focused),
            ChartKind::Line => line::render_line(frame, cell, &data.line, hovered, focused),
            ChartKind::Candlestick => {
                candlestick::render_candlestick(frame, cell, &data.candlestick, hovered, focused)
            }
        }
    }

    render_tooltip(frame, app, columns[1]);
}

/// Panneau tooltip : point survolé du graphique actif
fn render_tooltip(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(format!(" {} ", app.focus.title()));

    let text = match app.hovered_tooltip() {
        Some(tooltip) => {
            let mut lines = vec![Line::from(Span::styled(
                tooltip.title,
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            lines.extend(tooltip.lines.into_iter().map(Line::from));
            lines
        }
        None => vec![Line::from(Span::styled(
            "No data",
            Style::default().fg(Color::Gray),
        ))],
    };

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Footer : raccourcis
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let shortcuts = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "⚠  Press ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " again to quit, any other key to cancel ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("[q]", key_style),
            Span::raw(" Quit  "),
            Span::styled("[Tab / Shift-Tab]", key_style),
            Span::raw(" Chart  "),
            Span::styled("[← → / h l]", key_style),
            Span::raw(" Point"),
        ])
    };

    let paragraph = Paragraph::new(vec![shortcuts])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests unitaires
// ============================================================================
