// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders},
};

pub mod events;      // Gestion des événements clavier
pub mod dashboard;   // Routage des écrans + grille
pub mod colors;      // Couleurs des catégories
pub mod geometry;    // Géométrie des chandeliers
pub mod tooltip;     // Formatage des tooltips
pub mod pie;         // Camembert
pub mod bar;         // Barres
pub mod line;        // Ligne
pub mod candlestick; // Chandeliers japonais

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};
pub use dashboard::render;

/// Bloc commun aux quatre graphiques ; bordure jaune quand il a le focus
pub(crate) fn chart_block(title: &str, focused: bool) -> Block<'static> {
    let color = if focused { Color::Yellow } else { Color::White };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {} ", title))
}
