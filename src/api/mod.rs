// ============================================================================
// Module : api
// ============================================================================
// Client du backend des graphiques et chargement en arrière-plan
// ============================================================================

pub mod backend; // Client HTTP, endpoints, fan-out des quatre requêtes
pub mod loader;  // Tâche de chargement + annulation

// Re-export des types principaux
pub use backend::{Client, Endpoint};
pub use loader::{DashboardLoader, FETCH_FAILED_MESSAGE};
