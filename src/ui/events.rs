// ============================================================================
// Gestion des événements
// ============================================================================
// Lit le clavier avec un timeout : la boucle principale reçoit un Tick
// régulier, ce qui lui permet de vérifier si le chargement est terminé.
//
// Raccourcis :
// - Tab / Shift-Tab : graphique suivant / précédent
// - ← → (h l)       : point survolé dans le graphique actif
// - q (deux fois)   : quitter
// - Esc             : annuler la demande de quit
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

/// Intervalle de poll du clavier (et donc du loader)
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Pas d'entrée pendant l'intervalle de poll
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            tick_rate: POLL_INTERVAL,
        }
    }

    /// Lit le prochain événement (bloquant au plus `tick_rate`)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    /// - Resize, souris, Release : aussi ramenés à Tick
    pub fn next(&self) -> Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }

        match event::read()? {
            // Sur certains OS, on reçoit Press ET Release
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
            _ => Ok(Event::Tick),
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : Convertir un Event en action
// ============================================================================

fn key_code(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(key) => Some(key.code),
        Event::Tick => None,
    }
}

/// Vérifie si l'événement est la touche 'q' (quitter)
pub fn is_quit_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('q') | KeyCode::Char('Q')))
}

/// Vérifie si l'événement est Échap
pub fn is_escape_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Esc))
}

/// Tab : graphique suivant
pub fn is_next_chart_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Tab))
}

/// Shift-Tab : graphique précédent
///
/// crossterm envoie BackTab pour Shift-Tab sur la plupart des terminaux
pub fn is_previous_chart_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::BackTab))
}

/// Flèche gauche ou 'h' (vim)
pub fn is_left_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Left | KeyCode::Char('h')))
}

/// Flèche droite ou 'l' (vim)
pub fn is_right_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Right | KeyCode::Char('l')))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key(KeyCode::Char('q'))));
        assert!(is_quit_event(&key(KeyCode::Char('Q'))));
        assert!(!is_quit_event(&key(KeyCode::Char('a'))));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_focus_events() {
        assert!(is_next_chart_event(&key(KeyCode::Tab)));
        assert!(is_previous_chart_event(&key(KeyCode::BackTab)));
        assert!(!is_next_chart_event(&key(KeyCode::BackTab)));
    }

    #[test]
    fn test_cursor_events() {
        assert!(is_left_event(&key(KeyCode::Left)));
        assert!(is_left_event(&key(KeyCode::Char('h'))));
        assert!(is_right_event(&key(KeyCode::Right)));
        assert!(is_right_event(&key(KeyCode::Char('l'))));
        assert!(!is_right_event(&key(KeyCode::Char('h'))));
        assert!(is_escape_event(&key(KeyCode::Esc)));
    }
}
