use thiserror::Error;

/// Resultado estándar de las operaciones del motor.
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Fallos nombrados que puede devolver la superficie de comandos.
///
/// Los errores de resolución y conexión se reportan una sola vez; los de
/// reproducción se reintentan localmente y solo se exponen al agotar los
/// reintentos. Ningún error deja una sesión en estado inconsistente.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Quien pidió la canción no está en un canal de voz alcanzable.
    #[error("El solicitante no está en un canal de voz")]
    NoVoicePresence,

    /// No se pudo establecer el enlace de voz; terminal para la sesión
    /// que se estaba creando.
    #[error("No se pudo conectar al canal de voz: {0}")]
    Connection(#[source] anyhow::Error),

    /// El elemento pedido no se pudo resolver; solo bloquea ese enqueue.
    #[error("No se pudo resolver la petición: {0}")]
    Resolution(#[source] anyhow::Error),

    /// Fallo del dispositivo al iniciar o a mitad de stream.
    #[error("Fallo de reproducción: {0}")]
    Playback(#[source] anyhow::Error),

    /// Página fuera de rango para el tamaño actual de la cola.
    #[error("Página inválida {page}: debe estar entre 1 y {total_pages}")]
    InvalidPage { page: usize, total_pages: usize },

    /// La cola está vacía; se señala antes de validar la página.
    #[error("La cola está vacía")]
    EmptyQueue,

    /// La cola alcanzó su capacidad máxima.
    #[error("La cola está llena (máximo {max} canciones)")]
    QueueFull { max: usize },

    /// Comando para una guild sin sesión activa; siempre inocuo.
    #[error("No hay una sesión activa para esta guild")]
    NoActiveSession,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn invalid_page_names_bounds() {
        let err = EngineError::InvalidPage {
            page: 7,
            total_pages: 2,
        };
        assert_eq!(
            err.to_string(),
            "Página inválida 7: debe estar entre 1 y 2"
        );
    }

    #[test]
    fn connection_error_preserves_source() {
        let err = EngineError::Connection(anyhow::anyhow!("handshake timeout"));
        assert!(err.to_string().contains("handshake timeout"));
    }
}
