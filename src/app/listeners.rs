//! Status listener registry.
//!
//! Listeners are boxed [`StatusListener`] trait objects addressed by the
//! [`ListenerId`] handed out at registration. Fan-out is a plain synchronous
//! loop in registration order; nothing is queued and nothing is replayed to
//! late subscribers.

use crate::alarm::AlarmStatus;

use super::ports::StatusListener;

/// Handle identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u32);

/// Listeners must be `Send` so a service can sit behind a shared lock.
pub type BoxedListener = Box<dyn StatusListener + Send>;

/// Ordered set of registered listeners.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u32,
    entries: Vec<(ListenerId, BoxedListener)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: BoxedListener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((id, listener));
        id
    }

    /// Unregister and hand the listener back. `None` if the handle is stale.
    pub fn remove(&mut self, id: ListenerId) -> Option<BoxedListener> {
        let idx = self.entries.iter().position(|(entry, _)| *entry == id)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn alarm_status_changed(&mut self, status: AlarmStatus) {
        for (_, listener) in &mut self.entries {
            listener.alarm_status_changed(status);
        }
    }

    pub fn subject_detected_changed(&mut self, detected: bool) {
        for (_, listener) in &mut self.entries {
            listener.subject_detected_changed(detected);
        }
    }

    pub fn sensors_changed(&mut self) {
        for (_, listener) in &mut self.entries {
            listener.sensors_changed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Tagged {
        tag: &'static str,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl StatusListener for Tagged {
        fn alarm_status_changed(&mut self, status: AlarmStatus) {
            self.seen.lock().unwrap().push(format!("{}:{}", self.tag, status));
        }
        fn subject_detected_changed(&mut self, detected: bool) {
            self.seen.lock().unwrap().push(format!("{}:cat={}", self.tag, detected));
        }
    }

    #[test]
    fn fan_out_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut reg = ListenerRegistry::new();
        reg.add(Box::new(Tagged { tag: "a", seen: seen.clone() }));
        reg.add(Box::new(Tagged { tag: "b", seen: seen.clone() }));

        reg.alarm_status_changed(AlarmStatus::Alarm);
        reg.subject_detected_changed(true);
        reg.sensors_changed(); // default no-op

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["a:ALARM", "b:ALARM", "a:cat=true", "b:cat=true"]
        );
    }

    #[test]
    fn removed_listener_gets_nothing() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut reg = ListenerRegistry::new();
        let id = reg.add(Box::new(Tagged { tag: "a", seen: seen.clone() }));
        assert!(reg.remove(id).is_some());
        assert!(reg.remove(id).is_none(), "second removal must be a no-op");
        assert!(reg.is_empty());

        reg.alarm_status_changed(AlarmStatus::PendingAlarm);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn ids_are_not_reused() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut reg = ListenerRegistry::new();
        let first = reg.add(Box::new(Tagged { tag: "a", seen: seen.clone() }));
        reg.remove(first);
        let second = reg.add(Box::new(Tagged { tag: "b", seen }));
        assert_ne!(first, second);
        assert_eq!(reg.len(), 1);
    }
}
