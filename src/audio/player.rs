use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::{
    audio::{
        device::{DeviceConnector, DeviceEvent},
        queue::QueuePage,
        session::{PlaybackState, Session, SessionInner, SessionSnapshot, SessionStore},
    },
    config::Config,
    error::{EngineError, EngineResult},
    notify::NotificationSink,
    sources::{MediaResolver, Track},
    types::{ChannelId, GuildId},
};

/// Origen de un comando de reproducción.
///
/// Lleva el canal de voz del solicitante (ausente ⇒ `NoVoicePresence` si
/// hay que crear sesión) y el canal de avisos que adoptará una sesión
/// recién creada.
pub struct RequestOrigin {
    pub voice_channel: Option<ChannelId>,
    pub notify: Arc<dyn NotificationSink>,
}

/// Resultado estructurado de un enqueue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnqueueOutcome {
    /// Cuántas pistas se admitieron (una playlist puede recortarse).
    pub added: usize,
    pub queue_len: usize,
    pub state: PlaybackState,
}

/// Motor de sesiones: una sesión de reproducción continua por guild.
///
/// Cada comando entra por la ranura serializada de su guild (el mutex de
/// la sesión), igual que los eventos del dispositivo, así dos comandos
/// seguidos nunca se pisan entre sí. Guilds distintas avanzan en paralelo.
pub struct SessionManager {
    config: Arc<Config>,
    store: Arc<SessionStore>,
    connector: Arc<dyn DeviceConnector>,
    resolver: Arc<dyn MediaResolver>,
}

impl SessionManager {
    pub fn new(
        config: Config,
        connector: Arc<dyn DeviceConnector>,
        resolver: Arc<dyn MediaResolver>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(SessionStore::new()),
            connector,
            resolver,
        }
    }

    /// Cantidad de sesiones vivas.
    pub fn active_sessions(&self) -> usize {
        self.store.len()
    }

    /// Resuelve una consulta y la encola (el flujo del comando `play`).
    ///
    /// Un fallo de resolución bloquea solo este enqueue y no toca la
    /// reproducción en curso.
    pub async fn enqueue_query(
        &self,
        guild_id: GuildId,
        origin: RequestOrigin,
        requested_by: &str,
        query: &str,
    ) -> EngineResult<EnqueueOutcome> {
        let tracks = self
            .resolver
            .resolve(query, requested_by)
            .await
            .map_err(EngineError::Resolution)?;

        if tracks.is_empty() {
            return Err(EngineError::Resolution(anyhow::anyhow!(
                "sin resultados para la búsqueda"
            )));
        }

        self.enqueue(guild_id, origin, tracks).await
    }

    /// Encola una o más pistas ya resueltas.
    ///
    /// Si la guild no tiene sesión se crea una; la primera pista arranca
    /// de inmediato conectando el dispositivo. Con la sesión ya sonando
    /// solo se agrega al final de la cola.
    pub async fn enqueue(
        &self,
        guild_id: GuildId,
        origin: RequestOrigin,
        tracks: Vec<Track>,
    ) -> EngineResult<EnqueueOutcome> {
        if tracks.is_empty() {
            return Err(EngineError::Resolution(anyhow::anyhow!(
                "nada que encolar"
            )));
        }

        loop {
            let session = match self.store.get(guild_id) {
                Some(session) => session,
                None => {
                    // Crear una sesión exige presencia de voz del solicitante.
                    if origin.voice_channel.is_none() {
                        return Err(EngineError::NoVoicePresence);
                    }
                    self.store.get_or_create(guild_id, || {
                        Session::new(guild_id, origin.notify.clone(), self.config.max_queue_size)
                    })
                }
            };

            let mut inner = session.inner.lock().await;

            if inner.state == PlaybackState::Terminated {
                // Perdimos la carrera contra un teardown que ya sacó esta
                // sesión del registro; volver a buscar con el mapa limpio.
                drop(inner);
                continue;
            }

            let announceable = tracks.iter().filter(|t| !t.is_synthetic()).count();
            let single_title = (tracks.len() == 1 && announceable == 1)
                .then(|| tracks[0].title().to_string());
            let added = Self::append_tracks(&mut inner, tracks)?;

            match inner.state {
                PlaybackState::Idle => {
                    if inner.device.is_none() {
                        // Idle sin dispositivo: transición a Connecting.
                        let Some(channel) = origin.voice_channel else {
                            // Sin canal no hay enlace que crear; desmontar
                            // la sesión naciente sin dejar rastros.
                            self.teardown_locked(&session, &mut inner, None).await;
                            return Err(EngineError::NoVoicePresence);
                        };

                        inner.state = PlaybackState::Connecting;
                        info!("🔊 Conectando al canal de voz en guild {}", guild_id);

                        match self.connector.connect(guild_id, channel).await {
                            Ok(device) => {
                                let events = device.subscribe();
                                inner.device = Some(device);
                                inner.event_task =
                                    Some(self.spawn_event_pump(guild_id, events));
                                self.disarm_idle_timer(&mut inner);
                                self.start_head(&session, &mut inner).await;
                            }
                            Err(e) => {
                                // Terminal para la sesión que nacía.
                                error!(
                                    "❌ No se pudo conectar al canal de voz en guild {}: {e:#}",
                                    guild_id
                                );
                                self.teardown_locked(
                                    &session,
                                    &mut inner,
                                    Some("❌ No se pudo conectar al canal de voz"),
                                )
                                .await;
                                return Err(EngineError::Connection(e));
                            }
                        }
                    } else {
                        // La cola estaba vacía: la pista recién agregada es
                        // la cabeza y arranca ya.
                        self.disarm_idle_timer(&mut inner);
                        self.start_head(&session, &mut inner).await;
                    }
                }
                // Ya hay reproducción en marcha: solo se agrega a la cola.
                PlaybackState::Connecting
                | PlaybackState::Playing
                | PlaybackState::Paused
                | PlaybackState::Retrying => {}
                PlaybackState::Terminated => unreachable!("filtrado arriba"),
            }

            let outcome = EnqueueOutcome {
                added,
                queue_len: inner.queue.len(),
                state: inner.state,
            };
            drop(inner);

            self.announce_added(&origin, added.min(announceable), single_title, &outcome)
                .await;
            return Ok(outcome);
        }
    }

    /// Alterna pausa/reanudación de la pista en curso.
    pub async fn pause_toggle(&self, guild_id: GuildId) -> EngineResult<PlaybackState> {
        let session = self
            .store
            .get(guild_id)
            .ok_or(EngineError::NoActiveSession)?;
        let mut inner = session.inner.lock().await;

        match inner.state {
            PlaybackState::Playing => {
                let device = inner
                    .device
                    .as_ref()
                    .ok_or_else(|| {
                        EngineError::Playback(anyhow::anyhow!("sesión sin dispositivo"))
                    })?
                    .clone();
                device.pause().await.map_err(EngineError::Playback)?;
                inner.state = PlaybackState::Paused;
                self.send_notice(&session, "⏸️ Reproducción pausada").await;
                Ok(PlaybackState::Paused)
            }
            PlaybackState::Paused => {
                let device = inner
                    .device
                    .as_ref()
                    .ok_or_else(|| {
                        EngineError::Playback(anyhow::anyhow!("sesión sin dispositivo"))
                    })?
                    .clone();
                device.resume().await.map_err(EngineError::Playback)?;
                inner.state = PlaybackState::Playing;
                self.send_notice(&session, "▶️ Reproducción reanudada").await;
                Ok(PlaybackState::Playing)
            }
            state => {
                // Sesión viva pero sin nada activo: respuesta inocua.
                self.send_notice(&session, "❌ No hay nada reproduciéndose")
                    .await;
                Ok(state)
            }
        }
    }

    /// Salta la cabeza como si hubiera terminado naturalmente.
    pub async fn skip(&self, guild_id: GuildId) -> EngineResult<Option<Track>> {
        let session = self
            .store
            .get(guild_id)
            .ok_or(EngineError::NoActiveSession)?;
        let mut inner = session.inner.lock().await;

        match inner.state {
            PlaybackState::Playing | PlaybackState::Paused | PlaybackState::Retrying => {
                if let Some(device) = inner.device.clone() {
                    if let Err(e) = device.stop().await {
                        warn!("⚠️ Error al detener la pista saltada: {e:#}");
                    }
                }

                let skipped = inner.queue.pop_head();
                inner.retry_count = 0;
                inner.last_started_at = None;

                if let Some(ref track) = skipped {
                    info!("⏭️ Saltada en guild {}: {}", guild_id, track.title());
                }
                self.send_notice(&session, "⏭️ Canción saltada").await;

                self.start_head(&session, &mut inner).await;
                Ok(skipped)
            }
            _ => {
                self.send_notice(&session, "❌ No hay nada que saltar").await;
                Ok(None)
            }
        }
    }

    /// Vacía la cola dejando solo la pista en curso.
    pub async fn clear(&self, guild_id: GuildId) -> EngineResult<usize> {
        let session = self
            .store
            .get(guild_id)
            .ok_or(EngineError::NoActiveSession)?;
        let mut inner = session.inner.lock().await;

        if inner.state == PlaybackState::Idle {
            // Cola ya vacía: no-op.
            return Ok(0);
        }

        let removed = inner.queue.clear_pending();
        self.send_notice(&session, "🗑️ Cola limpiada").await;
        Ok(removed)
    }

    /// Desconecta la sesión y la elimina del registro.
    pub async fn disconnect(&self, guild_id: GuildId) -> EngineResult<()> {
        let session = self
            .store
            .get(guild_id)
            .ok_or(EngineError::NoActiveSession)?;
        let mut inner = session.inner.lock().await;

        if inner.state == PlaybackState::Terminated {
            return Ok(());
        }

        self.teardown_locked(&session, &mut inner, Some("👋 Desconectado del canal de voz"))
            .await;
        Ok(())
    }

    /// Página de la cola para mostrar; lectura pura.
    pub async fn queue_page(&self, guild_id: GuildId, page: usize) -> EngineResult<QueuePage> {
        let session = self
            .store
            .get(guild_id)
            .ok_or(EngineError::NoActiveSession)?;
        let inner = session.inner.lock().await;
        inner.queue.page(page, self.config.page_size)
    }

    /// Instantánea de solo lectura del estado de una sesión.
    pub async fn snapshot(&self, guild_id: GuildId) -> Option<SessionSnapshot> {
        let session = self.store.get(guild_id)?;
        let inner = session.inner.lock().await;
        Some(SessionSnapshot {
            state: inner.state,
            queue_len: inner.queue.len(),
            retry_count: inner.retry_count,
            timer_armed: inner.idle_timer.is_some(),
            connected: inner.device.is_some(),
        })
    }

    /// Cierra todas las sesiones vivas en paralelo.
    pub async fn shutdown(&self) {
        let sessions = self.store.all();
        if sessions.is_empty() {
            return;
        }

        info!("⚠️ Cerrando {} sesiones activas", sessions.len());

        futures::future::join_all(sessions.into_iter().map(|session| {
            let manager = self.clone();
            async move {
                let mut inner = session.inner.lock().await;
                if inner.state != PlaybackState::Terminated {
                    manager.teardown_locked(&session, &mut inner, None).await;
                }
            }
        }))
        .await;
    }

    // ---- Eventos del dispositivo -------------------------------------

    /// Punto de entrada serializado de los eventos del dispositivo.
    ///
    /// Un evento para una pista que ya no es la cabeza se descarta: el
    /// reporte llegó tarde (por ejemplo, un error después de un skip).
    pub(crate) async fn handle_device_event(&self, guild_id: GuildId, event: DeviceEvent) {
        let Some(session) = self.store.get(guild_id) else {
            debug!("Evento para guild {} sin sesión; descartado", guild_id);
            return;
        };
        let mut inner = session.inner.lock().await;

        if inner.state == PlaybackState::Terminated {
            return;
        }

        let head_ref = inner.queue.head().map(|t| t.source_ref().to_string());
        if head_ref.as_deref() != Some(event.source_ref()) {
            debug!(
                "Evento obsoleto en guild {} para {}; descartado",
                guild_id,
                event.source_ref()
            );
            return;
        }

        match event {
            DeviceEvent::Started { .. } => {
                let (synthetic, title) = match inner.queue.head() {
                    Some(head) => (head.is_synthetic(), head.title().to_string()),
                    None => return,
                };

                inner.last_started_at = Some(Utc::now());
                // Ya desarmado por el camino del enqueue/avance; idempotente.
                self.disarm_idle_timer(&mut inner);

                if !synthetic {
                    self.send_notice(&session, &format!("🎵 Reproduciendo: **{title}**"))
                        .await;
                }
            }
            DeviceEvent::Finished { .. } => {
                if !matches!(
                    inner.state,
                    PlaybackState::Playing | PlaybackState::Paused
                ) {
                    return;
                }

                inner.queue.pop_head();
                inner.retry_count = 0;
                inner.last_started_at = None;
                self.start_head(&session, &mut inner).await;
            }
            DeviceEvent::Errored { message, .. } => {
                if !matches!(
                    inner.state,
                    PlaybackState::Playing | PlaybackState::Retrying
                ) {
                    return;
                }

                let Some(head) = inner.queue.head().cloned() else {
                    return;
                };
                warn!(
                    "❌ Error del dispositivo en guild {} con {}: {}",
                    guild_id,
                    head.title(),
                    message
                );

                self.note_playback_failure(&session, &mut inner, &head)
                    .await;
                self.start_head(&session, &mut inner).await;
            }
        }
    }

    // ---- Máquina de estados ------------------------------------------

    /// Arranca la cabeza de la cola, aplicando la política de reintentos.
    ///
    /// Avanza sobre pistas que agotan sus intentos y, si la cola se vacía,
    /// pasa a `Idle` y arma el temporizador de inactividad. Al salir, los
    /// invariantes de la sesión quedan restaurados.
    async fn start_head(&self, session: &Arc<Session>, inner: &mut SessionInner) {
        loop {
            let Some(head) = inner.queue.head().cloned() else {
                inner.state = PlaybackState::Idle;
                inner.last_started_at = None;
                self.arm_idle_timer(session, inner);
                return;
            };

            let Some(device) = inner.device.clone() else {
                // Sin enlace no hay nada que arrancar; no debería pasar
                // fuera de un teardown a medias.
                error!("Sesión de guild {} sin dispositivo al arrancar", session.guild_id);
                inner.queue.clear_all();
                inner.state = PlaybackState::Idle;
                self.arm_idle_timer(session, inner);
                return;
            };

            let offset_secs = if inner.retry_count > 0 {
                Self::resume_offset_secs(inner)
            } else {
                0
            };

            match device.start(&head, offset_secs).await {
                Ok(()) => {
                    inner.state = PlaybackState::Playing;
                    debug!(
                        "▶️ Arranque pedido en guild {}: {} (+{}s)",
                        session.guild_id,
                        head.title(),
                        offset_secs
                    );
                    return;
                }
                Err(e) => {
                    warn!(
                        "❌ Fallo al arrancar {} en guild {}: {e:#}",
                        head.title(),
                        session.guild_id
                    );
                    // Vuelve al tope del bucle: la misma cabeza con
                    // offset si quedan intentos, o la siguiente pista.
                    self.note_playback_failure(session, inner, &head).await;
                }
            }
        }
    }

    /// Registra un fallo de la cabeza: o queda en `Retrying` para volver
    /// a intentarla, o agotó sus intentos y se descarta con aviso.
    async fn note_playback_failure(
        &self,
        session: &Arc<Session>,
        inner: &mut SessionInner,
        head: &Track,
    ) {
        inner.retry_count += 1;

        if inner.retry_count >= self.config.max_retry_attempts {
            let attempts = inner.retry_count;
            error!(
                "🚫 Descartando {} en guild {} tras {} intentos",
                head.title(),
                session.guild_id,
                attempts
            );
            self.send_notice(
                session,
                &format!(
                    "❌ No se pudo reproducir **{}** después de {} intentos",
                    head.title(),
                    attempts
                ),
            )
            .await;

            inner.queue.pop_head();
            inner.retry_count = 0;
            inner.last_started_at = None;
        } else {
            inner.state = PlaybackState::Retrying;
            warn!(
                "🔁 Reintento {}/{} para {} en guild {}",
                inner.retry_count,
                self.config.max_retry_attempts,
                head.title(),
                session.guild_id
            );
        }
    }

    /// Offset de reanudación: segundos de pared desde el último arranque
    /// exitoso, recortado a ≥ 0. Aproximación heredada del diseño
    /// original; sin cabeza arrancada vale 0.
    fn resume_offset_secs(inner: &SessionInner) -> u64 {
        inner
            .last_started_at
            .map(|t| (Utc::now() - t).num_seconds().max(0) as u64)
            .unwrap_or(0)
    }

    // ---- Temporizador de inactividad ---------------------------------

    fn arm_idle_timer(&self, session: &Arc<Session>, inner: &mut SessionInner) {
        self.disarm_idle_timer(inner);

        let manager = self.clone();
        let guild_id = session.guild_id;
        let timeout = self.config.inactivity_timeout();

        inner.idle_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            manager.handle_idle_timeout(guild_id).await;
        }));
        debug!("⏲️ Temporizador de inactividad armado en guild {}", guild_id);
    }

    fn disarm_idle_timer(&self, inner: &mut SessionInner) {
        if let Some(timer) = inner.idle_timer.take() {
            timer.abort();
        }
    }

    /// El temporizador expiró: entrar por la ranura serializada y, si la
    /// sesión sigue en reposo, desmontarla.
    async fn handle_idle_timeout(&self, guild_id: GuildId) {
        let Some(session) = self.store.get(guild_id) else {
            return;
        };
        let mut inner = session.inner.lock().await;

        if inner.state != PlaybackState::Idle {
            // Llegó actividad mientras esperábamos la ranura.
            return;
        }

        // El temporizador somos nosotros: soltar el handle sin abortarlo.
        inner.idle_timer = None;

        info!(
            "⏲️ Inactividad agotada en guild {}; desconectando",
            guild_id
        );
        self.teardown_locked(&session, &mut inner, None).await;
    }

    // ---- Teardown ----------------------------------------------------

    /// Desmonta la sesión con la ranura tomada: detiene y libera el
    /// dispositivo, aborta tareas, marca `Terminated` y saca la sesión
    /// del registro antes de soltar el mutex.
    async fn teardown_locked(
        &self,
        session: &Arc<Session>,
        inner: &mut SessionInner,
        notice: Option<&str>,
    ) {
        self.disarm_idle_timer(inner);

        if let Some(task) = inner.event_task.take() {
            task.abort();
        }

        if let Some(device) = inner.device.take() {
            if let Err(e) = device.stop().await {
                debug!("Stop durante teardown falló: {e:#}");
            }
            device.release().await;
        }

        inner.queue.clear_all();
        inner.state = PlaybackState::Terminated;
        self.store.remove_exact(session.guild_id, session);

        if let Some(text) = notice {
            self.send_notice(session, text).await;
        }

        info!("🔌 Sesión de guild {} terminada", session.guild_id);
    }

    // ---- Auxiliares --------------------------------------------------

    fn append_tracks(inner: &mut SessionInner, mut tracks: Vec<Track>) -> EngineResult<usize> {
        if tracks.len() == 1 {
            let track = tracks.remove(0);
            inner.queue.push(track)?;
            Ok(1)
        } else {
            Ok(inner.queue.push_many(tracks))
        }
    }

    /// Avisos de "agregado a la cola" por el canal del comando actual.
    ///
    /// Las pistas sintéticas no se anuncian.
    async fn announce_added(
        &self,
        origin: &RequestOrigin,
        added: usize,
        single_title: Option<String>,
        outcome: &EnqueueOutcome,
    ) {
        let text = match (added, single_title) {
            (0, _) => return,
            (1, Some(title)) => {
                format!("➕ **{title}** agregado a la cola ({} en total)", outcome.queue_len)
            }
            (n, _) => format!("🎶 {n} canciones agregadas a la cola"),
        };
        if let Err(e) = origin.notify.send(&text).await {
            warn!("⚠️ No se pudo enviar el aviso: {e:#}");
        }
    }

    async fn send_notice(&self, session: &Session, text: &str) {
        if let Err(e) = session.notify.send(text).await {
            warn!("⚠️ No se pudo enviar el aviso: {e:#}");
        }
    }

    fn spawn_event_pump(
        &self,
        guild_id: GuildId,
        events: flume::Receiver<DeviceEvent>,
    ) -> JoinHandle<()> {
        let manager = self.clone();
        tokio::spawn(async move {
            // Única suscripción de larga vida por dispositivo; termina
            // cuando el dispositivo suelta su extremo emisor.
            while let Ok(event) = events.recv_async().await {
                manager.handle_device_event(guild_id, event).await;
            }
            debug!("Canal de eventos de guild {} cerrado", guild_id);
        })
    }
}

// Implementar Clone manualmente para SessionManager
impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            store: self.store.clone(),
            connector: self.connector.clone(),
            resolver: self.resolver.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        audio::device::PlaybackDevice, notify::MockNotificationSink, sources::MockMediaResolver,
    };
    use pretty_assertions::assert_eq;

    /// Conector que nunca logra enlazar; suficiente para los caminos que
    /// no llegan a tocar el transporte.
    struct UnreachableConnector;

    #[async_trait::async_trait]
    impl DeviceConnector for UnreachableConnector {
        async fn connect(
            &self,
            _guild: GuildId,
            _channel: ChannelId,
        ) -> anyhow::Result<Arc<dyn PlaybackDevice>> {
            Err(anyhow::anyhow!("sin transporte en tests"))
        }
    }

    fn manager_with_resolver(resolver: MockMediaResolver) -> SessionManager {
        SessionManager::new(
            Config::default(),
            Arc::new(UnreachableConnector),
            Arc::new(resolver),
        )
    }

    #[tokio::test]
    async fn resolution_failure_blocks_only_that_enqueue() {
        let mut resolver = MockMediaResolver::new();
        resolver
            .expect_resolve()
            .returning(|_, _| Err(anyhow::anyhow!("video no disponible")));
        let manager = manager_with_resolver(resolver);

        // Sin expectativas: nadie debe recibir avisos.
        let origin = RequestOrigin {
            voice_channel: Some(ChannelId(7)),
            notify: Arc::new(MockNotificationSink::new()),
        };

        let err = manager
            .enqueue_query(GuildId(1), origin, "tester", "query rota")
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Resolution(_)));
        assert_eq!(manager.active_sessions(), 0);
    }

    #[tokio::test]
    async fn commands_without_session_are_safe_noops() {
        let manager = manager_with_resolver(MockMediaResolver::new());
        let guild = GuildId(9);

        assert!(matches!(
            manager.pause_toggle(guild).await,
            Err(EngineError::NoActiveSession)
        ));
        assert!(matches!(
            manager.skip(guild).await,
            Err(EngineError::NoActiveSession)
        ));
        assert!(matches!(
            manager.clear(guild).await,
            Err(EngineError::NoActiveSession)
        ));
        assert!(matches!(
            manager.disconnect(guild).await,
            Err(EngineError::NoActiveSession)
        ));
        assert!(matches!(
            manager.queue_page(guild, 1).await,
            Err(EngineError::NoActiveSession)
        ));
    }

    #[tokio::test]
    async fn enqueue_without_voice_presence_is_rejected() {
        let manager = manager_with_resolver(MockMediaResolver::new());
        let origin = RequestOrigin {
            voice_channel: None,
            notify: Arc::new(MockNotificationSink::new()),
        };

        let err = manager
            .enqueue(GuildId(2), origin, vec![Track::new("X", "src:x", "tester")])
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NoVoicePresence));
        assert_eq!(manager.active_sessions(), 0);
    }

    #[tokio::test]
    async fn connect_failure_terminates_the_nascent_session() {
        let manager = manager_with_resolver(MockMediaResolver::new());

        let mut sink = MockNotificationSink::new();
        sink.expect_send()
            .withf(|text| text.contains("No se pudo conectar"))
            .times(1)
            .returning(|_| Ok(()));

        let origin = RequestOrigin {
            voice_channel: Some(ChannelId(1)),
            notify: Arc::new(sink),
        };

        let err = manager
            .enqueue(GuildId(3), origin, vec![Track::new("X", "src:x", "tester")])
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Connection(_)));
        assert_eq!(manager.active_sessions(), 0);
        assert!(manager.snapshot(GuildId(3)).await.is_none());
    }
}
