// ============================================================================
// API Client : backend des graphiques
// ============================================================================
// Récupère les quatre jeux de données du dashboard
//
// Endpoints (base configurable, défaut http://localhost:8000/api) :
// - GET /pie-chart-data/     → { labels: [...], data: [...] }
// - GET /bar-chart-data/     → { labels: [...], data: [...] }
// - GET /line-chart-data/    → { labels: [...], data: [...] }
// - GET /candlestick-data/   → [ {x, high, low, open, close} ] ou { data: [...] }
//
// CONCEPTS RUST :
// 1. async/await : les quatre requêtes tournent en parallèle
// 2. tokio::try_join! : fan-in, la première erreur annule le tout
// 3. Serde : désérialisation typée, normalisation à la frontière
// ============================================================================

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument};

use crate::config::Config;
use crate::models::{CandleRecord, CandlestickPayload, DashboardData, SeriesData};

/// Endpoints consommés par le dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    PieChart,
    BarChart,
    LineChart,
    Candlestick,
}

impl Endpoint {
    /// Chemin relatif à la base de l'API (slash final compris, comme le backend)
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::PieChart => "/pie-chart-data/",
            Endpoint::BarChart => "/bar-chart-data/",
            Endpoint::LineChart => "/line-chart-data/",
            Endpoint::Candlestick => "/candlestick-data/",
        }
    }
}

/// Client HTTP du backend
///
/// CONCEPT RUST : Clone bon marché
/// - reqwest::Client contient un Arc interne
/// - Cloner le Client partage le pool de connexions
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http: reqwest::Client,
}

impl Client {
    /// Crée un client à partir de la configuration
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("chartboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Échec de la création du client HTTP")?;

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL complète d'un endpoint
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// GET + vérification du statut + parsing JSON
    ///
    /// Réseau, statut non-2xx et JSON invalide sont tous des erreurs :
    /// l'appelant ne fait pas la différence.
    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T> {
        let url = self.url(endpoint);
        debug!(url = %url, "Sending HTTP request");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Échec de la requête HTTP vers {}", url))?;

        let status = response.status();
        debug!(url = %url, status = %status, "Received HTTP response");

        if !status.is_success() {
            error!(url = %url, status = %status, "Backend returned error status");
            anyhow::bail!("Le backend a retourné une erreur : HTTP {} ({})", status, url);
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Échec du parsing JSON de la réponse {}", url))
    }

    /// Récupère une série labels/valeurs (camembert, barres ou ligne)
    #[instrument(skip(self))]
    pub async fn fetch_series(&self, endpoint: Endpoint) -> Result<SeriesData> {
        let series: SeriesData = self.get_json(endpoint).await?;
        series
            .validate()
            .with_context(|| format!("Réponse invalide pour {}", endpoint.path()))?;

        debug!(points = series.len(), "Series fetched");
        Ok(series)
    }

    /// Récupère les chandelles, quelle que soit la forme de la réponse
    #[instrument(skip(self))]
    pub async fn fetch_candles(&self) -> Result<Vec<CandleRecord>> {
        let payload: CandlestickPayload = self.get_json(Endpoint::Candlestick).await?;
        let records = payload.into_records();

        for record in &records {
            record
                .validate()
                .context("Réponse invalide pour /candlestick-data/")?;
        }

        debug!(candles = records.len(), "Candles fetched");
        Ok(records)
    }

    /// Charge les quatre graphiques en parallèle
    ///
    /// CONCEPT : Fan-out / fan-in tout-ou-rien
    /// - Les quatre futures sont pollées ensemble
    /// - try_join! retourne dès la première erreur et drop les autres
    /// - Aucune donnée partielle n'est renvoyée
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_dashboard(&self) -> Result<DashboardData> {
        let (pie, bar, line, candlestick) = tokio::try_join!(
            self.fetch_series(Endpoint::PieChart),
            self.fetch_series(Endpoint::BarChart),
            self.fetch_series(Endpoint::LineChart),
            self.fetch_candles(),
        )?;

        let data = DashboardData {
            pie,
            bar,
            line,
            candlestick,
        };

        info!(
            pie = data.pie.len(),
            bar = data.bar.len(),
            line = data.line.len(),
            candles = data.candlestick.len(),
            "Dashboard data fetched successfully"
        );
        Ok(data)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
