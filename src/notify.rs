use anyhow::Result;
use async_trait::async_trait;

/// Contrato con el canal de avisos al usuario.
///
/// Es "fire and forget": un fallo al enviar se registra en el log y jamás
/// se propaga a la máquina de estados.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Envía un aviso de texto al canal de origen de la sesión.
    async fn send(&self, text: &str) -> Result<()>;
}
