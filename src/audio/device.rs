use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    sources::Track,
    types::{ChannelId, GuildId},
};

/// Eventos asíncronos que emite un dispositivo de reproducción.
///
/// Cada evento lleva el `source_ref` de la pista a la que se refiere para
/// poder descartar reportes obsoletos: un `Errored` que llega después de
/// que un skip ya sacó esa pista de la cabeza se ignora comparando
/// identidades.
#[derive(Debug, Clone)]
pub enum DeviceEvent {
    /// La pista empezó a sonar de verdad.
    Started { source_ref: String },
    /// La pista terminó por sí sola.
    Finished { source_ref: String },
    /// El dispositivo reportó un error a mitad de stream.
    Errored { source_ref: String, message: String },
}

impl DeviceEvent {
    /// `source_ref` de la pista referida por el evento.
    pub fn source_ref(&self) -> &str {
        match self {
            DeviceEvent::Started { source_ref }
            | DeviceEvent::Finished { source_ref }
            | DeviceEvent::Errored { source_ref, .. } => source_ref,
        }
    }
}

/// Contrato con el transporte de audio de una sesión.
///
/// El motor no sabe cómo llegan los bytes al canal de voz: solo pide
/// arrancar, pausar, reanudar o detener la pista en curso, y escucha los
/// eventos por una única suscripción de larga vida.
#[async_trait]
pub trait PlaybackDevice: Send + Sync {
    /// Pide al dispositivo arrancar `track` desde `offset_secs`.
    async fn start(&self, track: &Track, offset_secs: u64) -> Result<()>;

    /// Pausa la pista en curso.
    async fn pause(&self) -> Result<()>;

    /// Reanuda la pista pausada.
    async fn resume(&self) -> Result<()>;

    /// Detiene la pista en curso sin liberar el enlace.
    async fn stop(&self) -> Result<()>;

    /// Libera el enlace de voz; el dispositivo no se vuelve a usar.
    async fn release(&self);

    /// Suscripción única de por vida del dispositivo a sus eventos.
    ///
    /// El receptor se cierra cuando el dispositivo suelta su extremo
    /// emisor, lo que termina la tarea de reenvío de la sesión.
    fn subscribe(&self) -> flume::Receiver<DeviceEvent>;
}

/// Fábrica de dispositivos: un enlace de voz por sesión.
#[async_trait]
pub trait DeviceConnector: Send + Sync {
    /// Establece el enlace de voz para `guild` en `channel`.
    async fn connect(
        &self,
        guild: GuildId,
        channel: ChannelId,
    ) -> Result<Arc<dyn PlaybackDevice>>;
}
