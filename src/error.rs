// ============================================================================
// Erreurs de la bibliothèque
// ============================================================================
// CONCEPT RUST : thiserror
// - #[derive(Error)] génère l'implémentation de std::error::Error
// - #[error("...")] définit le message Display
// - #[from] génère la conversion automatique utilisée par l'opérateur ?
//
// Le binaire (main.rs) et la configuration utilisent anyhow ; la
// bibliothèque expose des enums typés pour que l'appelant puisse matcher.
// ============================================================================

use thiserror::Error;

/// Erreur d'un appel à l'API (via le proxy ou en direct)
#[derive(Debug, Error)]
pub enum ApiError {
    /// Réponse non-succès : le message vient du champ `error` du corps JSON,
    /// sinon "API Error: <status>"
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Échec d'envoi, ou corps de réponse illisible
    #[error("failed to send the api request: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Statut HTTP associé, s'il y en a un
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// Le collaborateur graphique a refusé de créer un graphique
#[derive(Debug, Error)]
#[error("chart rendering failed: {0}")]
pub struct ChartError(pub String);

/// Erreur du flux d'affichage d'un ticker (panneau de détail)
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Une des trois réponses (quote, profile, historique) est incomplète
    #[error("Incomplete data for {symbol}. The API may be rate-limiting or the symbol is invalid.")]
    IncompleteData { symbol: String },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Chart(#[from] ChartError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_data_message_names_symbol() {
        let err = DisplayError::IncompleteData {
            symbol: "XYZ".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Incomplete data for XYZ. The API may be rate-limiting or the symbol is invalid."
        );
    }

    #[test]
    fn test_status_error_displays_message_only() {
        let err = ApiError::Status {
            status: 429,
            message: "Limit Reach".to_string(),
        };
        assert_eq!(err.to_string(), "Limit Reach");
        assert_eq!(err.status(), Some(429));
    }
}
