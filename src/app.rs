// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global du dashboard
//
// PATTERN : "Application State"
// - Tous les widgets lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// ============================================================================

use tracing::{debug, info};

use crate::models::{CandlePoint, ChartKind, DashboardData};
use crate::ui::events::{
    is_escape_event, is_left_event, is_next_chart_event, is_previous_chart_event, is_quit_event,
    is_right_event, Event,
};
use crate::ui::tooltip::{self, Tooltip, TooltipOptions};

// ============================================================================
// Enum : LoadState
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Loading → Ready   : les quatre requêtes ont réussi
// - Loading → Failed  : au moins une a échoué, rien n'est gardé
// - Ready et Failed sont terminaux (pas de retry)
// ============================================================================

/// État du chargement des données
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready(DashboardData),
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&DashboardData> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Données du dashboard (ou chargement / erreur)
    pub load_state: LoadState,

    /// Graphique qui a le focus (reçoit les flèches, alimente le tooltip)
    pub focus: ChartKind,

    /// Point survolé pour chaque graphique, indexé par ChartKind::index()
    pub cursors: [usize; 4],

    /// Indique si l'utilisateur a demandé à quitter (attend confirmation)
    /// - Première pression de 'q' : confirm_quit = true
    /// - Deuxième pression de 'q' : running = false
    /// - N'importe quelle autre touche : annulation
    pub confirm_quit: bool,

    /// Options de formatage des tooltips (décalage de date)
    pub tooltip_options: TooltipOptions,
}

impl App {
    /// Crée une App en état Loading
    pub fn new() -> Self {
        Self::with_tooltip_options(TooltipOptions::default())
    }

    pub fn with_tooltip_options(tooltip_options: TooltipOptions) -> Self {
        Self {
            running: true,
            load_state: LoadState::Loading,
            focus: ChartKind::default(),
            cursors: [0; 4],
            confirm_quit: false,
            tooltip_options,
        }
    }

    /// Applique le résultat du chargement
    ///
    /// CONCEPT : Transition unique
    /// - Seul Loading peut transitionner
    /// - Un résultat tardif est ignoré (retourne false)
    pub fn apply_load_result(&mut self, state: LoadState) -> bool {
        if !self.load_state.is_loading() || state.is_loading() {
            return false;
        }
        self.load_state = state;
        self.cursors = [0; 4];
        true
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    // ========================================================================
    // Clavier
    // ========================================================================

    /// Traite un événement et met à jour l'état de l'application
    ///
    /// CONCEPT RUST : Pattern matching avec guards
    /// - Le premier bras qui matche gagne
    /// - Toute touche autre que 'q' annule une demande de quit
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Tick => {}

            Event::Key(_) if is_quit_event(event) => {
                // Two-step : la deuxième pression quitte
                if self.is_awaiting_quit_confirmation() {
                    info!("User confirmed quit");
                    self.quit();
                } else {
                    info!("User requested quit (awaiting confirmation)");
                    self.request_quit();
                }
            }

            Event::Key(_) if self.is_awaiting_quit_confirmation() => {
                if is_escape_event(event) {
                    debug!("Quit cancelled with Esc");
                } else {
                    debug!("Quit cancelled");
                }
                self.cancel_quit();
            }

            Event::Key(_) if is_next_chart_event(event) => {
                self.focus_next();
                debug!(focus = self.focus.title(), "Focus changed");
            }

            Event::Key(_) if is_previous_chart_event(event) => {
                self.focus_previous();
                debug!(focus = self.focus.title(), "Focus changed");
            }

            Event::Key(_) if is_left_event(event) => self.cursor_left(),

            Event::Key(_) if is_right_event(event) => self.cursor_right(),

            Event::Key(_) => {}
        }
    }

    // ========================================================================
    // Focus et curseur de survol
    // ========================================================================

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Index du point survolé dans un graphique
    pub fn cursor(&self, kind: ChartKind) -> usize {
        self.cursors[kind.index()]
    }

    /// Déplace le curseur du graphique actif vers la gauche
    pub fn cursor_left(&mut self) {
        let slot = &mut self.cursors[self.focus.index()];
        *slot = slot.saturating_sub(1);
    }

    /// Déplace le curseur du graphique actif vers la droite
    ///
    /// Borné au dernier point ; saturating_sub gère le graphique vide.
    pub fn cursor_right(&mut self) {
        let len = self
            .load_state
            .data()
            .map(|data| data.len_of(self.focus))
            .unwrap_or(0);
        let max_index = len.saturating_sub(1);
        let slot = &mut self.cursors[self.focus.index()];
        *slot = (*slot + 1).min(max_index);
    }

    /// Tooltip du point survolé dans le graphique actif
    pub fn hovered_tooltip(&self) -> Option<Tooltip> {
        let data = self.load_state.data()?;
        let index = self.cursor(self.focus);

        match self.focus {
            ChartKind::Pie => {
                let points = data.pie.points().ok()?;
                Some(tooltip::pie_tooltip(points.get(index)?, &points))
            }
            ChartKind::Bar => {
                let points = data.bar.points().ok()?;
                Some(tooltip::series_tooltip(points.get(index)?))
            }
            ChartKind::Line => {
                let points = data.line.points().ok()?;
                Some(tooltip::series_tooltip(points.get(index)?))
            }
            ChartKind::Candlestick => {
                let candle = data.candlestick.get(index)?;
                Some(tooltip::candle_tooltip(
                    &CandlePoint::from(candle),
                    &self.tooltip_options,
                ))
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CandleRecord, SeriesData};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn sample_data() -> DashboardData {
        DashboardData {
            pie: SeriesData::new(vec!["Red".into(), "Blue".into()], vec![30.0, 70.0]),
            bar: SeriesData::new(vec!["Q1".into(), "Q2".into(), "Q3".into()], vec![5.0, 8.0, 3.0]),
            line: SeriesData::new(vec!["Jan".into()], vec![1.5]),
            candlestick: vec![
                CandleRecord::new("2024-01-01", 10.0, 24.0, 8.0, 20.0),
                CandleRecord::new("2024-01-02", 20.0, 24.0, 8.0, 10.0),
            ],
        }
    }

    #[test]
    fn test_app_creation() {
        let app = App::new();
        assert!(app.is_running());
        assert!(app.load_state.is_loading());
        assert_eq!(app.focus, ChartKind::Pie);
        assert!(app.hovered_tooltip().is_none());
    }

    #[test]
    fn test_load_transitions_once() {
        let mut app = App::new();
        assert!(app.apply_load_result(LoadState::Ready(sample_data())));
        assert!(app.load_state.data().is_some());

        // Un second résultat ne remplace pas le premier
        assert!(!app.apply_load_result(LoadState::Failed("boom".into())));
        assert!(app.load_state.error().is_none());
    }

    #[test]
    fn test_load_failure() {
        let mut app = App::new();
        assert!(app.apply_load_result(LoadState::Failed("boom".into())));
        assert_eq!(app.load_state.error(), Some("boom"));
        assert!(app.load_state.data().is_none());
    }

    #[test]
    fn test_quit_two_steps() {
        let mut app = App::new();
        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        app.cancel_quit();
        assert!(!app.is_awaiting_quit_confirmation());
        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_cursor_bounds() {
        let mut app = App::new();
        app.apply_load_result(LoadState::Ready(sample_data()));
        app.focus = ChartKind::Bar;

        app.cursor_right();
        app.cursor_right();
        app.cursor_right(); // reste sur le dernier point
        assert_eq!(app.cursor(ChartKind::Bar), 2);

        app.cursor_left();
        assert_eq!(app.cursor(ChartKind::Bar), 1);

        // Les autres graphiques gardent leur propre curseur
        assert_eq!(app.cursor(ChartKind::Pie), 0);

        app.focus = ChartKind::Line;
        app.cursor_right(); // une seule valeur
        assert_eq!(app.cursor(ChartKind::Line), 0);
        app.cursor_left();
        assert_eq!(app.cursor(ChartKind::Line), 0);
    }

    #[test]
    fn test_focus_cycle() {
        let mut app = App::new();
        app.focus_previous();
        assert_eq!(app.focus, ChartKind::Candlestick);
        app.focus_next();
        assert_eq!(app.focus, ChartKind::Pie);
    }

    #[test]
    fn test_hovered_tooltip_follows_focus() {
        let mut app = App::new();
        app.apply_load_result(LoadState::Ready(sample_data()));

        let pie = app.hovered_tooltip().unwrap();
        assert_eq!(pie.title, "Red");
        assert!(pie.lines.contains(&"Percentage: 30.00%".to_string()));

        app.focus = ChartKind::Candlestick;
        app.cursor_right();
        let candle = app.hovered_tooltip().unwrap();
        assert_eq!(candle.title, "Date: 2024-01-02");
        assert_eq!(candle.lines[0], "Open: 20");
    }

    #[test]
    fn test_handle_event_two_step_quit() {
        let mut app = App::new();

        app.handle_event(&key(KeyCode::Char('q')));
        assert!(app.is_awaiting_quit_confirmation());
        assert!(app.is_running());

        app.handle_event(&Event::Tick); // un tick n'annule rien
        assert!(app.is_awaiting_quit_confirmation());

        app.handle_event(&key(KeyCode::Char('q')));
        assert!(!app.is_running());
    }

    #[test]
    fn test_handle_event_cancels_quit() {
        let mut app = App::new();

        app.handle_event(&key(KeyCode::Char('q')));
        app.handle_event(&key(KeyCode::Esc));
        assert!(!app.is_awaiting_quit_confirmation());
        assert!(app.is_running());

        // N'importe quelle autre touche annule aussi, sans agir
        app.handle_event(&key(KeyCode::Char('q')));
        app.handle_event(&key(KeyCode::Tab));
        assert!(!app.is_awaiting_quit_confirmation());
        assert_eq!(app.focus, ChartKind::Pie);
    }

    #[test]
    fn test_handle_event_focus_and_cursor() {
        let mut app = App::new();
        app.apply_load_result(LoadState::Ready(sample_data()));

        app.handle_event(&key(KeyCode::Tab));
        assert_eq!(app.focus, ChartKind::Bar);

        app.handle_event(&key(KeyCode::Right));
        app.handle_event(&key(KeyCode::Char('l')));
        assert_eq!(app.cursor(ChartKind::Bar), 2);

        app.handle_event(&key(KeyCode::Left));
        assert_eq!(app.cursor(ChartKind::Bar), 1);
        app.handle_event(&key(KeyCode::Char('h')));
        assert_eq!(app.cursor(ChartKind::Bar), 0);

        app.handle_event(&key(KeyCode::BackTab));
        app.handle_event(&key(KeyCode::BackTab));
        assert_eq!(app.focus, ChartKind::Candlestick);

        // Touche sans effet
        app.handle_event(&key(KeyCode::Char('x')));
        assert_eq!(app.focus, ChartKind::Candlestick);
        assert!(app.is_running());
    }
}
