use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::debug;

use crate::{
    audio::{device::PlaybackDevice, queue::MusicQueue},
    notify::NotificationSink,
    types::GuildId,
};

/// Estados de reproducción de una sesión.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Sin audio activo; la cola puede estar vacía.
    Idle,
    /// Estableciendo el enlace de voz.
    Connecting,
    Playing,
    Paused,
    /// Fallo transitorio; a punto de reintentar la cabeza.
    Retrying,
    /// Absorbente: la sesión ya salió del registro.
    Terminated,
}

/// Sesión de reproducción de una guild.
///
/// Todo el estado mutable vive en `inner`, bajo un único mutex que hace de
/// ranura serializada: comandos y eventos del dispositivo de la misma
/// guild se aplican de a uno, en orden de llegada (el mutex de tokio
/// despierta a los que esperan en orden FIFO). Sesiones de guilds
/// distintas no comparten nada más que el registro.
pub struct Session {
    pub guild_id: GuildId,
    /// Canal de avisos adoptado al crear la sesión.
    pub notify: Arc<dyn NotificationSink>,
    pub(crate) inner: Mutex<SessionInner>,
}

/// Campos mutables de la sesión; solo se tocan con el mutex tomado.
pub(crate) struct SessionInner {
    pub state: PlaybackState,
    pub queue: MusicQueue,
    /// Intentos hechos con la cabeza actual; vuelve a 0 con cada cabeza nueva.
    pub retry_count: u8,
    /// Último arranque exitoso reportado por el dispositivo.
    pub last_started_at: Option<DateTime<Utc>>,
    /// Temporizador de inactividad pendiente, solo en `Idle`.
    pub idle_timer: Option<JoinHandle<()>>,
    /// Enlace de voz; presente en Connecting/Playing/Paused/Retrying.
    pub device: Option<Arc<dyn PlaybackDevice>>,
    /// Tarea que reenvía los eventos del dispositivo a la ranura serializada.
    pub event_task: Option<JoinHandle<()>>,
}

impl Session {
    pub(crate) fn new(
        guild_id: GuildId,
        notify: Arc<dyn NotificationSink>,
        max_queue_size: usize,
    ) -> Arc<Self> {
        Arc::new(Self {
            guild_id,
            notify,
            inner: Mutex::new(SessionInner {
                state: PlaybackState::Idle,
                queue: MusicQueue::new(max_queue_size),
                retry_count: 0,
                last_started_at: None,
                idle_timer: None,
                device: None,
                event_task: None,
            }),
        })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Última red: si la sesión muere con tareas vivas, abortarlas.
        if let Ok(mut inner) = self.inner.try_lock() {
            if let Some(timer) = inner.idle_timer.take() {
                timer.abort();
            }
            if let Some(task) = inner.event_task.take() {
                task.abort();
            }
        }
        debug!("Sesión de guild {} liberada", self.guild_id);
    }
}

/// Vista de solo lectura del estado de una sesión.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: PlaybackState,
    pub queue_len: usize,
    pub retry_count: u8,
    pub timer_armed: bool,
    pub connected: bool,
}

/// Registro guild → sesión.
///
/// `get_or_create` es un insert-si-ausente atómico del mapa; para una
/// misma guild siempre se invoca desde dentro de la ranura serializada,
/// así que no necesita más bloqueo que el del propio mapa.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<GuildId, Arc<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn get_or_create<F>(&self, guild_id: GuildId, factory: F) -> Arc<Session>
    where
        F: FnOnce() -> Arc<Session>,
    {
        self.sessions
            .entry(guild_id)
            .or_insert_with(factory)
            .clone()
    }

    pub fn get(&self, guild_id: GuildId) -> Option<Arc<Session>> {
        self.sessions.get(&guild_id).map(|s| s.clone())
    }

    pub fn remove(&self, guild_id: GuildId) {
        self.sessions.remove(&guild_id);
    }

    /// Elimina la entrada solo si sigue apuntando a `session`.
    ///
    /// Un teardown tardío no debe llevarse por delante una sesión nueva
    /// creada para la misma guild.
    pub fn remove_exact(&self, guild_id: GuildId, session: &Arc<Session>) {
        self.sessions
            .remove_if(&guild_id, |_, existing| Arc::ptr_eq(existing, session));
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Instantánea de todas las sesiones vivas (para el shutdown).
    pub fn all(&self) -> Vec<Arc<Session>> {
        self.sessions.iter().map(|e| e.value().clone()).collect()
    }
}
