use std::collections::VecDeque;
use tracing::{debug, info};

use crate::{
    error::{EngineError, EngineResult},
    sources::Track,
};

/// Cola FIFO de una sesión.
///
/// La cabeza es la pista en curso mientras la sesión reproduce; avanzar es
/// siempre `pop_head`. Sin shuffle, sin prioridades: primero en entrar,
/// primero en sonar.
#[derive(Debug, Default)]
pub struct MusicQueue {
    items: VecDeque<Track>,
    max_size: usize,
}

impl MusicQueue {
    pub fn new(max_size: usize) -> Self {
        Self {
            items: VecDeque::new(),
            max_size,
        }
    }

    /// Agrega una pista al final de la cola.
    pub fn push(&mut self, track: Track) -> EngineResult<()> {
        if self.items.len() >= self.max_size {
            return Err(EngineError::QueueFull { max: self.max_size });
        }

        info!("➕ Agregado a la cola: {}", track.title());
        self.items.push_back(track);

        Ok(())
    }

    /// Agrega varias pistas (playlist), recortando al espacio disponible.
    ///
    /// Devuelve cuántas se admitieron.
    pub fn push_many(&mut self, tracks: Vec<Track>) -> usize {
        let available_space = self.max_size.saturating_sub(self.items.len());
        let to_add = tracks.len().min(available_space);

        for track in tracks.into_iter().take(to_add) {
            self.items.push_back(track);
        }

        info!("➕ Agregadas {} canciones a la cola", to_add);
        to_add
    }

    /// Pista en la cabeza (la que suena, si la sesión reproduce).
    pub fn head(&self) -> Option<&Track> {
        self.items.front()
    }

    /// Saca la cabeza de la cola.
    pub fn pop_head(&mut self) -> Option<Track> {
        let popped = self.items.pop_front();
        if let Some(ref track) = popped {
            debug!("➡️ Cabeza retirada de la cola: {}", track.title());
        }
        popped
    }

    /// Vacía todo menos la cabeza (la pista en curso).
    ///
    /// Devuelve cuántas pistas pendientes se descartaron.
    pub fn clear_pending(&mut self) -> usize {
        let removed = self.items.len().saturating_sub(1);
        self.items.truncate(1);
        if removed > 0 {
            info!("🗑️ Cola limpiada: {} pistas descartadas", removed);
        }
        removed
    }

    /// Vacía la cola por completo.
    pub fn clear_all(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Títulos en orden de reproducción; vista barata para logs y tests.
    pub fn titles(&self) -> Vec<String> {
        self.items.iter().map(|t| t.title().to_string()).collect()
    }

    /// Vista paginada de la cola para mostrar al usuario.
    ///
    /// Una cola vacía señala `EmptyQueue` antes de validar la página; una
    /// página fuera de `1..=total_pages` señala `InvalidPage`. Lectura
    /// pura: no muta nada.
    pub fn page(&self, page_number: usize, page_size: usize) -> EngineResult<QueuePage> {
        if self.items.is_empty() {
            return Err(EngineError::EmptyQueue);
        }

        let total_pages = self.items.len().div_ceil(page_size).max(1);

        if page_number < 1 || page_number > total_pages {
            return Err(EngineError::InvalidPage {
                page: page_number,
                total_pages,
            });
        }

        let start = (page_number - 1) * page_size;
        let end = (start + page_size).min(self.items.len());

        Ok(QueuePage {
            items: self.items.range(start..end).cloned().collect(),
            page_number,
            total_pages,
            total_items: self.items.len(),
        })
    }
}

/// Una página de la cola, lista para formatear.
#[derive(Debug, Clone)]
pub struct QueuePage {
    pub items: Vec<Track>,
    pub page_number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn track(n: usize) -> Track {
        Track::new(format!("Track {n}"), format!("src:{n}"), "tester")
    }

    fn queue_with(n: usize) -> MusicQueue {
        let mut queue = MusicQueue::new(100);
        for i in 1..=n {
            queue.push(track(i)).unwrap();
        }
        queue
    }

    #[test]
    fn push_preserves_fifo_order() {
        let queue = queue_with(5);
        assert_eq!(
            queue.titles(),
            vec!["Track 1", "Track 2", "Track 3", "Track 4", "Track 5"]
        );
        assert_eq!(queue.head().unwrap().title(), "Track 1");
    }

    #[test]
    fn push_rejects_when_full() {
        let mut queue = MusicQueue::new(2);
        queue.push(track(1)).unwrap();
        queue.push(track(2)).unwrap();
        assert!(matches!(
            queue.push(track(3)),
            Err(EngineError::QueueFull { max: 2 })
        ));
    }

    #[test]
    fn push_many_truncates_to_capacity() {
        let mut queue = MusicQueue::new(3);
        queue.push(track(1)).unwrap();
        let admitted = queue.push_many((2..=9).map(track).collect());
        assert_eq!(admitted, 2);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn clear_pending_keeps_the_head() {
        let mut queue = queue_with(4);
        let removed = queue.clear_pending();
        assert_eq!(removed, 3);
        assert_eq!(queue.titles(), vec!["Track 1"]);
    }

    #[test]
    fn clear_pending_on_empty_is_noop() {
        let mut queue = MusicQueue::new(10);
        assert_eq!(queue.clear_pending(), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn page_on_empty_queue_signals_empty_before_validation() {
        let queue = MusicQueue::new(10);
        // Cualquier número de página: EmptyQueue gana.
        assert!(matches!(queue.page(0, 10), Err(EngineError::EmptyQueue)));
        assert!(matches!(queue.page(99, 10), Err(EngineError::EmptyQueue)));
    }

    #[test]
    fn page_zero_and_past_end_are_invalid() {
        let queue = queue_with(12);
        assert!(matches!(
            queue.page(0, 10),
            Err(EngineError::InvalidPage {
                page: 0,
                total_pages: 2
            })
        ));
        assert!(matches!(
            queue.page(3, 10),
            Err(EngineError::InvalidPage {
                page: 3,
                total_pages: 2
            })
        ));
    }

    #[test]
    fn twelve_items_paginate_into_ten_and_two() {
        let queue = queue_with(12);

        let first = queue.page(1, 10).unwrap();
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.items[0].title(), "Track 1");
        assert_eq!(first.items[9].title(), "Track 10");

        let second = queue.page(2, 10).unwrap();
        assert_eq!(second.items.len(), 2);
        assert_eq!(second.items[0].title(), "Track 11");
        assert_eq!(second.items[1].title(), "Track 12");
        assert_eq!(second.total_items, 12);
    }
}
