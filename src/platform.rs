use super::*;

/// Viewport width at or below which the navigation drawer is in play.
pub(crate) const MOBILE_BREAKPOINT_PX: i64 = 768;

/// Trailing-edge debounce window for viewport resize bursts.
pub(crate) const RESIZE_DEBOUNCE_MS: i64 = 250;

/// Observer proximity margin: elements load shortly before entering view.
pub(crate) const LAZY_LOAD_MARGIN_PX: i64 = 100;

/// Low visible-fraction threshold for the intersection mock.
pub(crate) const LAZY_LOAD_THRESHOLD: f32 = 0.1;

/// The three boolean feature-detection queries the enhancement layer
/// consumes. `smooth_scroll` belongs to the excluded smooth-scroll
/// collaborator and is carried only for boundary completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub native_lazy_loading: bool,
    pub intersection_observer: bool,
    pub smooth_scroll: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            native_lazy_loading: true,
            intersection_observer: true,
            smooth_scroll: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Viewport {
    pub(crate) width: i64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1024 }
    }
}

/// Mocked intersection-observation capability: one shared observer with an
/// active observation set. The harness delivers records; stale records for
/// elements no longer in the set are dropped by `unobserve` returning false.
#[derive(Debug)]
pub(crate) struct ObserverState {
    pub(crate) observed: Vec<NodeId>,
    pub(crate) root_margin_px: i64,
    pub(crate) threshold: f32,
}

impl ObserverState {
    pub(crate) fn new() -> Self {
        Self {
            observed: Vec::new(),
            root_margin_px: LAZY_LOAD_MARGIN_PX,
            threshold: LAZY_LOAD_THRESHOLD,
        }
    }

    pub(crate) fn observe(&mut self, node: NodeId) {
        if !self.observed.contains(&node) {
            self.observed.push(node);
        }
    }

    pub(crate) fn unobserve(&mut self, node: NodeId) -> bool {
        let before = self.observed.len();
        self.observed.retain(|observed| *observed != node);
        self.observed.len() != before
    }

    pub(crate) fn is_observed(&self, node: NodeId) -> bool {
        self.observed.contains(&node)
    }

    pub(crate) fn len(&self) -> usize {
        self.observed.len()
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct IntersectionRecord {
    pub(crate) target: NodeId,
    pub(crate) is_intersecting: bool,
}

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
    pub(crate) to_stderr: bool,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            logs: VecDeque::new(),
            log_limit: 10_000,
            to_stderr: false,
        }
    }
}

impl TraceState {
    pub(crate) fn trace(&mut self, line: String) {
        if !self.enabled {
            return;
        }
        self.record(line);
    }

    /// Warnings are recorded regardless of the trace toggle: a degraded
    /// controller must leave a visible footprint exactly once.
    pub(crate) fn warn(&mut self, line: String) {
        self.record(format!("warn: {line}"));
    }

    fn record(&mut self, line: String) {
        if self.to_stderr {
            eprintln!("[page_enhancer] {line}");
        }
        self.logs.push_back(line);
        while self.logs.len() > self.log_limit {
            self.logs.pop_front();
        }
    }

    pub(crate) fn take_logs(&mut self) -> Vec<String> {
        self.logs.drain(..).collect()
    }
}
