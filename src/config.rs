// ============================================================================
// Configuration
// ============================================================================
// Lue depuis l'environnement (et un éventuel fichier .env)
//
// Variables :
// - CHARTBOARD_API_URL                  : base des endpoints (défaut http://localhost:8000/api)
// - CHARTBOARD_TIMEOUT_SECS             : timeout total d'une requête (défaut 30)
// - CHARTBOARD_CANDLE_DATE_OFFSET_DAYS  : décalage des dates du tooltip candlestick (défaut 0)
// ============================================================================

use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::debug;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_API_URL: &str = "CHARTBOARD_API_URL";
const ENV_TIMEOUT: &str = "CHARTBOARD_TIMEOUT_SECS";
const ENV_DATE_OFFSET: &str = "CHARTBOARD_CANDLE_DATE_OFFSET_DAYS";

/// Configuration de l'application
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// URL de base du backend, sans slash final
    pub api_base_url: String,

    /// Timeout appliqué à chaque requête HTTP
    pub request_timeout: Duration,

    /// Jours ajoutés à la date affichée dans le tooltip candlestick
    pub candle_date_offset_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            candle_date_offset_days: 0,
        }
    }
}

impl Config {
    /// Charge .env (si présent) puis lit les variables d'environnement
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenv::dotenv() {
            debug!(?path, "Loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Construit la config à partir d'une fonction de lecture
    ///
    /// CONCEPT : Injection de la source
    /// - from_env() passe std::env::var
    /// - Les tests passent une closure sur une liste fixe
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = lookup(ENV_API_URL) {
            let url = url.trim().trim_end_matches('/');
            if !url.is_empty() {
                config.api_base_url = url.to_string();
            }
        }

        if let Some(raw) = lookup(ENV_TIMEOUT) {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} invalide : {:?}", ENV_TIMEOUT, raw))?;
            if secs == 0 {
                bail!("{} doit être strictement positif", ENV_TIMEOUT);
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(ENV_DATE_OFFSET) {
            config.candle_date_offset_days = raw
                .trim()
                .parse()
                .with_context(|| format!("{} invalide : {:?}", ENV_DATE_OFFSET, raw))?;
        }

        Ok(config)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
