use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Contrato con el resolvedor de medios externo.
///
/// El motor no sabe cómo se busca una canción: entrega la consulta (URL o
/// texto libre) y recibe de vuelta una o varias pistas listas para encolar.
/// Una playlist se expande a varios elementos; un fallo bloquea únicamente
/// ese enqueue y nunca afecta la reproducción en curso.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaResolver: Send + Sync {
    /// Resuelve una consulta a una o más pistas.
    async fn resolve(&self, query: &str, requested_by: &str) -> Result<Vec<Track>>;
}

/// Representa una pista encolable
#[derive(Debug, Clone)]
pub struct Track {
    title: String,
    source_ref: String,
    requested_by: String,
    synthetic: bool,
    added_at: DateTime<Utc>,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        source_ref: impl Into<String>,
        requested_by: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            source_ref: source_ref.into(),
            requested_by: requested_by.into(),
            synthetic: false,
            added_at: Utc::now(),
        }
    }

    // Getters
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn source_ref(&self) -> &str {
        &self.source_ref
    }
    pub fn requested_by(&self) -> &str {
        &self.requested_by
    }
    /// Pista de relleno inyectada por el sistema; nunca anuncia "reproduciendo".
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }
    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    // Setters
    pub fn with_synthetic(mut self, synthetic: bool) -> Self {
        self.synthetic = synthetic;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn track_defaults_to_user_requested() {
        let track = Track::new("Lo-Fi Beats", "yt:abc123", "mango#0001");
        assert_eq!(track.title(), "Lo-Fi Beats");
        assert_eq!(track.source_ref(), "yt:abc123");
        assert_eq!(track.requested_by(), "mango#0001");
        assert!(!track.is_synthetic());
    }

    #[test]
    fn synthetic_flag_is_preserved() {
        let track = Track::new("Interludio", "fill:1", "sistema").with_synthetic(true);
        assert!(track.is_synthetic());
    }
}
