// ============================================================================
// StaticPage : page du dashboard en mémoire
// ============================================================================
// Implémente View et ChartSurface sans navigateur : chaque appel du
// contrôleur met à jour l'état de la page, et render_document() produit un
// document HTML complet avec les identifiants fixes de la page et la config
// du graphique embarquée pour Chart.js.
//
// Utilisée par la commande `stockdash render`.
// ============================================================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::error::ChartError;
use crate::ui::chart::ChartConfig;
use crate::ui::ticker_list::with_selection;
use crate::ui::{escape_html, ChartInstance, ChartSurface, View};

/// Contenu courant de la page
#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub search_value: String,
    pub ticker_list: String,
    pub scrolling: bool,
    pub selected_symbol: Option<String>,
    pub detail_visible: bool,
    pub stock_header: String,
    pub stock_info: String,
    /// Graphique vivant : (identifiant, config sérialisée)
    pub chart: Option<(u64, String)>,
}

/// Page statique partagée entre le contrôleur et ses graphiques
#[derive(Debug, Default)]
pub struct StaticPage {
    state: Arc<Mutex<PageState>>,
    next_chart_id: AtomicU64,
}

impl StaticPage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Valeur affichée dans le champ de recherche
    pub fn set_search_value(&self, value: &str) {
        self.lock().search_value = value.to_string();
    }

    /// Copie de l'état courant
    pub fn snapshot(&self) -> PageState {
        self.lock().clone()
    }

    /// Produit le document HTML complet
    pub fn render_document(&self) -> String {
        let state = self.snapshot();

        let (default_class, detail_class) = if state.detail_visible {
            ("hidden", "")
        } else {
            ("", "hidden")
        };

        let scrolling_class = if state.scrolling { " scrolling" } else { "" };

        // "</" ne doit pas apparaître dans un <script> inline
        let chart_json = state
            .chart
            .as_ref()
            .map(|(_, json)| json.replace("</", "<\\/"))
            .unwrap_or_else(|| "null".to_string());

        let (title, ticker_list) = match &state.selected_symbol {
            Some(symbol) => (
                format!("{} | Stock Dashboard", escape_html(symbol)),
                with_selection(&state.ticker_list, symbol),
            ),
            None => ("Stock Dashboard".to_string(), state.ticker_list.clone()),
        };

        format!(
            r##"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<script src="https://cdn.tailwindcss.com"></script>
<script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
<script src="https://cdn.jsdelivr.net/npm/chartjs-adapter-date-fns/dist/chartjs-adapter-date-fns.bundle.min.js"></script>
</head>
<body class="bg-[#0d1117] text-[#c9d1d9]">
<div class="flex h-screen">
  <aside class="w-64 border-r border-[#21262d] flex flex-col">
    <input id="search-input" class="m-2 p-2 bg-[#161b22]" placeholder="Search symbol" value="{search}">
    <div id="ticker-list" class="overflow-hidden{scrolling_class}">{ticker_list}</div>
  </aside>
  <main class="flex-1 p-6">
    <div id="default-view" class="{default_class}">Select a ticker to see its details.</div>
    <div id="selected-stock-view" class="{detail_class}">
      <div id="stock-header">{header}</div>
      <div class="h-96"><canvas id="stock-chart"></canvas></div>
      <div id="stock-info">{info}</div>
    </div>
  </main>
</div>
<script>
const config = {chart_json};
if (config) {{
  const canvas = document.getElementById("stock-chart");
  const ctx = canvas.getContext("2d");
  for (const dataset of config.data.datasets) {{
    const spec = dataset.backgroundColor;
    const gradient = ctx.createLinearGradient(0, 0, 0, canvas.offsetHeight);
    for (const stop of spec.stops) gradient.addColorStop(stop.offset, stop.color);
    dataset.backgroundColor = gradient;
  }}
  new Chart(ctx, config);
}}
</script>
</body>
</html>
"##,
            title = title,
            search = escape_html(&state.search_value),
            scrolling_class = scrolling_class,
            ticker_list = ticker_list,
            default_class = default_class,
            detail_class = detail_class,
            header = state.stock_header,
            info = state.stock_info,
            chart_json = chart_json,
        )
    }
}

impl View for StaticPage {
    fn set_ticker_list(&self, html: &str) {
        self.lock().ticker_list = html.to_string();
    }

    fn set_ticker_scrolling(&self, scrolling: bool) {
        self.lock().scrolling = scrolling;
    }

    fn mark_selected(&self, symbol: &str) {
        self.lock().selected_symbol = Some(symbol.to_string());
    }

    fn show_detail_view(&self) {
        self.lock().detail_visible = true;
    }

    fn set_stock_header(&self, html: &str) {
        self.lock().stock_header = html.to_string();
    }

    fn set_stock_info(&self, html: &str) {
        self.lock().stock_info = html.to_string();
    }
}

impl ChartSurface for StaticPage {
    fn create_chart(&self, config: &ChartConfig) -> Result<Box<dyn ChartInstance>, ChartError> {
        let json = serde_json::to_string(config).map_err(|e| ChartError(e.to_string()))?;
        let id = self.next_chart_id.fetch_add(1, Ordering::Relaxed);

        let mut state = self.lock();
        if state.chart.is_some() {
            return Err(ChartError("a chart is already live on #stock-chart".to_string()));
        }
        state.chart = Some((id, json));
        debug!(chart_id = id, "Chart created");

        Ok(Box::new(PageChart {
            id,
            state: Arc::clone(&self.state),
        }))
    }
}

/// Graphique posé sur la page ; destroy() le retire
struct PageChart {
    id: u64,
    state: Arc<Mutex<PageState>>,
}

impl ChartInstance for PageChart {
    fn destroy(self: Box<Self>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.chart.as_ref().is_some_and(|(id, _)| *id == self.id) {
            state.chart = None;
            debug!(chart_id = self.id, "Chart destroyed");
        }
    }
}
