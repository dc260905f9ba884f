use super::*;

/// Everything a listener can do in this harness. Each variant routes back
/// into an enhancement component; the disclosure variants all funnel through
/// the controller's idempotent open/close entry points so no event path ever
/// mutates the disclosure surfaces on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EnhancerAction {
    NavToggleActivate,
    NavLinkActivate,
    NavOutsideClick,
    NavEscapeKey,
    MediaElementError,
}

impl EnhancerAction {
    pub(crate) fn is_navigation(self) -> bool {
        matches!(
            self,
            Self::NavToggleActivate
                | Self::NavLinkActivate
                | Self::NavOutsideClick
                | Self::NavEscapeKey
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Listener {
    pub(crate) capture: bool,
    pub(crate) action: EnhancerAction,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    pub(crate) map: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
}

impl ListenerStore {
    pub(crate) fn add(&mut self, node_id: NodeId, event: String, listener: Listener) {
        let listeners = self
            .map
            .entry(node_id)
            .or_default()
            .entry(event)
            .or_default();

        // Match browser semantics: registering the same handler for the same
        // type/capture pair is a no-op. This also makes re-wiring idempotent.
        if listeners.contains(&listener) {
            return;
        }
        listeners.push(listener);
    }

    pub(crate) fn remove_where(&mut self, mut predicate: impl FnMut(EnhancerAction) -> bool) {
        for events in self.map.values_mut() {
            for listeners in events.values_mut() {
                listeners.retain(|listener| !predicate(listener.action));
            }
            events.retain(|_, listeners| !listeners.is_empty());
        }
        self.map.retain(|_, events| !events.is_empty());
    }

    pub(crate) fn get(&self, node_id: NodeId, event: &str, capture: bool) -> Vec<Listener> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|listener| listener.capture == capture)
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) event_type: String,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) event_phase: i32,
    pub(crate) time_stamp_ms: i64,
    pub(crate) default_prevented: bool,
    pub(crate) bubbles: bool,
    pub(crate) key: Option<String>,
    pub(crate) propagation_stopped: bool,
}

impl EventState {
    pub(crate) fn new(event_type: &str, target: NodeId, time_stamp_ms: i64) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            event_phase: 2,
            time_stamp_ms,
            default_prevented: false,
            bubbles: true,
            key: None,
            propagation_stopped: false,
        }
    }

    pub(crate) fn new_keyboard(event_type: &str, target: NodeId, key: &str, time_stamp_ms: i64) -> Self {
        let mut event = Self::new(event_type, target, time_stamp_ms);
        event.key = Some(key.to_string());
        event
    }
}
