//! Open Player: una sesión de reproducción continua por guild.
//!
//! El motor recibe peticiones de reproducción, mantiene la cola FIFO de
//! cada guild, conduce un único dispositivo de audio por sesión a través
//! de su ciclo conectar → reproducir → reposo → reproducir/desconectar,
//! reintenta fallos transitorios y se desmonta solo tras un periodo de
//! inactividad. La plataforma de chat, la resolución de medios y el
//! transporte de audio quedan detrás de los contratos de [`sources`],
//! [`audio::device`] y [`notify`].

pub mod audio;
pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
pub mod sources;
pub mod types;

pub use audio::{
    device::{DeviceConnector, DeviceEvent, PlaybackDevice},
    player::{EnqueueOutcome, RequestOrigin, SessionManager},
    queue::QueuePage,
    session::{PlaybackState, SessionSnapshot},
};
pub use config::Config;
pub use error::{EngineError, EngineResult};
pub use notify::NotificationSink;
pub use sources::{MediaResolver, Track};
pub use types::{ChannelId, GuildId};
