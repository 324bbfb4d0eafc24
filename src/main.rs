// ============================================================================
// StockDash - Point d'entrée
// ============================================================================
// Deux sous-commandes :
// - serve  : héberge la fonction proxy (défaut)
// - render : exécute le dashboard sans navigateur et écrit la page HTML
//
// CONCEPTS RUST CLÉS :
// 1. clap derive : les arguments sont une structure typée
// 2. #[tokio::main] : main asynchrone
// 3. Arc<dyn Trait> : le dashboard ne connaît que FetchApi / View
// ============================================================================

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use stockdash::api::{FetchApi, ProxyClient};
use stockdash::config::{DashboardConfig, ProxyConfig};
use stockdash::proxy::{self, ProxyForwarder};
use stockdash::ui::StaticPage;
use stockdash::Dashboard;

#[derive(Debug, Parser)]
#[command(name = "stockdash", version, about = "Stock dashboard backed by Financial Modeling Prep")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Lance la fonction proxy (FMP_API_KEY requis)
    Serve {
        /// Adresse d'écoute (sinon STOCKDASH_BIND ou 127.0.0.1:8888)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },

    /// Exécute le dashboard et écrit la page obtenue
    Render {
        /// Texte saisi dans le champ de recherche
        #[arg(long)]
        search: Option<String>,

        /// Ticker à sélectionner
        #[arg(long)]
        symbol: Option<String>,

        /// Fichier HTML de sortie
        #[arg(long, default_value = "dashboard.html")]
        out: PathBuf,

        /// URL d'une fonction proxy déjà déployée
        /// (sinon l'API est appelée directement avec FMP_API_KEY)
        #[arg(long)]
        proxy_url: Option<String>,
    },
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : deux sorties
// - fichier avec rotation quotidienne (historique complet)
// - console (suivi du serveur en direct)
// ============================================================================

/// Initialise le système de logging
///
/// Les logs fichier sont écrits dans :
/// - Linux : ~/.local/share/stockdash/logs/stockdash.log
/// - macOS : ~/Library/Application Support/stockdash/logs/stockdash.log
/// - sinon : ./logs/stockdash.log
///
/// ```bash
/// RUST_LOG=stockdash=trace stockdash serve
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = dirs::data_local_dir()
        .map(|dir| dir.join("stockdash").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"));

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "stockdash.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_thread_ids(true) // Utile avec les tâches tokio
                .with_line_number(true),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            // Par défaut : debug pour stockdash, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockdash=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging().unwrap_or_else(|e| {
        eprintln!("Warning: failed to initialize logging: {e}");
    });

    let cli = Cli::parse();
    let result = match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => run_serve(bind).await,
        Command::Render {
            search,
            symbol,
            out,
            proxy_url,
        } => run_render(search, symbol, out, proxy_url).await,
    };

    if let Err(e) = &result {
        error!(error = ?e, "stockdash exited with error");
    }
    result
}

async fn run_serve(bind: Option<SocketAddr>) -> Result<()> {
    let mut config = ProxyConfig::from_env()?;
    if let Some(bind) = bind {
        config.bind_addr = bind;
    }
    proxy::serve(&config).await
}

// ============================================================================
// Commande render
// ============================================================================
// Même enchaînement qu'une session navigateur : démarrage, saisie éventuelle,
// clic éventuel, puis arrêt. La page statique enregistre chaque mise à jour.
// ============================================================================

async fn run_render(
    search: Option<String>,
    symbol: Option<String>,
    out: PathBuf,
    proxy_url: Option<String>,
) -> Result<()> {
    let api: Arc<dyn FetchApi> = match proxy_url {
        Some(url) => {
            info!(%url, "Using remote proxy");
            Arc::new(ProxyClient::new(url).context("Failed to build HTTP client")?)
        }
        None => {
            let config = ProxyConfig::from_env()?;
            Arc::new(ProxyForwarder::new(&config).context("Failed to build HTTP client")?)
        }
    };

    let page = Arc::new(StaticPage::new());
    let dashboard = Dashboard::new(api, page.clone(), page.clone(), DashboardConfig::default());

    dashboard.start().await;

    if let Some(term) = search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        page.set_search_value(term);
        dashboard.search(&term.to_uppercase()).await;
    }

    if let Some(symbol) = symbol.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        dashboard.select_ticker(&symbol.to_uppercase()).await;
    }

    let html = page.render_document();
    dashboard.shutdown();

    std::fs::write(&out, html).with_context(|| format!("Failed to write {}", out.display()))?;
    info!(path = %out.display(), "Dashboard written");
    println!("Dashboard written to {}", out.display());
    Ok(())
}
