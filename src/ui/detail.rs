// ============================================================================
// Panneau de détail
// ============================================================================
// En-tête (nom, symbole, variations) et grille d'informations du ticker
// sélectionné, plus les états de chargement et d'erreur.
//
// Couleur et signe dépendent uniquement du signe de `change` :
// - change >= 0 : vert, préfixe "+"
// - change < 0  : rouge, pas de préfixe (le "-" vient du nombre)
// ============================================================================

use crate::models::{Profile, Quote};
use crate::ui::escape_html;

/// Texte affiché pendant le chargement des trois réponses
pub const FETCHING_DETAILS: &str = "Fetching details...";

/// Valeur affichée pour un champ texte absent de la fiche société
pub const NOT_AVAILABLE: &str = "N/A";

/// Traitement visuel d'une variation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeStyle {
    pub color_class: &'static str,
    pub sign: &'static str,
}

impl ChangeStyle {
    pub fn for_change(change: f64) -> Self {
        if change >= 0.0 {
            Self {
                color_class: "text-green-400",
                sign: "+",
            }
        } else {
            Self {
                color_class: "text-red-400",
                sign: "",
            }
        }
    }
}

/// Formate `value` avec `digits` décimales, les égalités exactes étant
/// arrondies en s'éloignant de zéro (12.125 -> "12.13", -0.125 -> "-0.13")
///
/// CONCEPT : égalités exactes en binaire
/// - `{:.2}` arrondit l'égalité au chiffre pair
/// - une égalité à `digits` décimales vaut forcément j / 2^(digits+1), j impair
/// - multiplier par une puissance de 2 est exact : le test ne se trompe pas
pub fn to_fixed(value: f64, digits: u32) -> String {
    let precision = digits as usize;
    let halves = value * f64::from(2u32.pow(digits + 1));
    let is_tie = halves.fract() == 0.0 && halves % 2.0 != 0.0;

    if is_tie {
        let scale = 10f64.powi(digits as i32);
        // f64::round arrondit déjà les égalités en s'éloignant de zéro
        let rounded = (value * scale).round() / scale;
        format!("{rounded:.precision$}")
    } else {
        format!("{value:.precision$}")
    }
}

pub fn render_loading_header(symbol: &str) -> String {
    format!(
        r#"<div class="text-2xl font-bold">Loading {}...</div>"#,
        escape_html(symbol)
    )
}

/// En-tête : "Nom (SYMBOLE)" + variation en % et en absolu
pub fn render_header(quote: &Quote, profile: &Profile) -> String {
    let style = ChangeStyle::for_change(quote.change);
    format!(
        r#"<div class="flex justify-between items-baseline">
    <h1 class="text-3xl lg:text-4xl font-bold text-white">{name} ({symbol})</h1>
    <div class="text-right">
        <p class="text-3xl font-bold {color}">{sign}{percent}%</p>
        <p class="text-lg {color}">{sign}{change}</p>
    </div>
</div>"#,
        name = escape_html(&profile.company_name),
        symbol = escape_html(&profile.symbol),
        color = style.color_class,
        sign = style.sign,
        percent = to_fixed(quote.changes_percentage, 2),
        change = to_fixed(quote.change, 2),
    )
}

/// Grille : description, prix, plus haut/bas, ouverture, volume, capi, secteur
pub fn render_info(quote: &Quote, profile: &Profile) -> String {
    let text = |value: &Option<String>| {
        escape_html(value.as_deref().unwrap_or(NOT_AVAILABLE)).into_owned()
    };

    format!(
        r#"<p class="mb-4 text-[#8b949e]">{description}</p>
<div class="grid grid-cols-2 lg:grid-cols-4 gap-4">
    <div><span class="font-bold text-white">Last Price:</span> ${price}</div>
    <div><span class="font-bold text-white">Day High:</span> ${high}</div>
    <div><span class="font-bold text-white">Day Low:</span> ${low}</div>
    <div><span class="font-bold text-white">Open:</span> ${open}</div>
    <div><span class="font-bold text-white">Volume:</span> {volume}M</div>
    <div><span class="font-bold text-white">Market Cap:</span> {cap}B</div>
    <div><span class="font-bold text-white">Sector:</span> {sector}</div>
    <div><span class="font-bold text-white">Industry:</span> {industry}</div>
</div>"#,
        description = text(&profile.description),
        price = to_fixed(quote.price, 2),
        high = to_fixed(quote.day_high, 2),
        low = to_fixed(quote.day_low, 2),
        open = to_fixed(quote.open, 2),
        volume = to_fixed(quote.volume_millions(), 2),
        cap = to_fixed(profile.market_cap_billions(), 2),
        sector = text(&profile.sector),
        industry = text(&profile.industry),
    )
}

pub fn render_error_header(symbol: &str) -> String {
    format!(
        r#"<h1 class="text-2xl font-bold text-red-500">Failed to load data for {}</h1>"#,
        escape_html(symbol)
    )
}

pub fn render_error_message(message: &str) -> String {
    format!(r#"<p class="text-red-400">{}</p>"#, escape_html(message))
}
