use super::*;

pub(crate) const DEFERRED_SRC_ATTR: &str = "data-src";
pub(crate) const DEFERRED_SRCSET_ATTR: &str = "data-srcset";
pub(crate) const LOADING_CLASS: &str = "loading";
pub(crate) const LOADED_CLASS: &str = "loaded";
pub(crate) const LOAD_FAILED_CLASS: &str = "load-failed";

/// How deferred media gets materialized. Chosen once per page load from the
/// capability flags and never re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingStrategy {
    /// The platform defers fetches itself; materialize everything up front.
    Native,
    /// One shared observer materializes each element as it nears the viewport.
    Observed,
    /// No deferred-loading support at all; materialize everything up front.
    Immediate,
}

/// Strategy selection is a pure function of the capability flags, in fixed
/// precedence order.
pub(crate) fn choose_strategy(capabilities: Capabilities) -> LoadingStrategy {
    if capabilities.native_lazy_loading {
        LoadingStrategy::Native
    } else if capabilities.intersection_observer {
        LoadingStrategy::Observed
    } else {
        LoadingStrategy::Immediate
    }
}

#[derive(Debug, Default)]
pub(crate) struct MediaLoader {
    pub(crate) started: bool,
    pub(crate) strategy: Option<LoadingStrategy>,
    pub(crate) observer: Option<ObserverState>,
    pub(crate) materialized: HashSet<NodeId>,
}

impl Page {
    /// Start the media-loading scheduler over every loadable element present
    /// in the document right now. Idempotent: a second call is a no-op, so
    /// repeated starts can never leak duplicate observations. Elements added
    /// later are out of scope.
    pub fn start_media_loading(&mut self) {
        if self.media.started {
            return;
        }
        self.media.started = true;

        let loadables = self.loadable_elements();
        let strategy = choose_strategy(self.capabilities);
        self.media.strategy = Some(strategy);
        self.trace_state
            .trace(format!("media strategy selected: {strategy:?}"));

        for node in &loadables {
            self.listeners.add(
                *node,
                "error".to_string(),
                Listener {
                    capture: false,
                    action: EnhancerAction::MediaElementError,
                },
            );
        }

        match strategy {
            LoadingStrategy::Native | LoadingStrategy::Immediate => {
                for node in loadables {
                    self.materialize_media(node);
                }
            }
            LoadingStrategy::Observed => {
                let mut observer = ObserverState::new();
                self.trace_state.trace(format!(
                    "media observer margin={}px threshold={}",
                    observer.root_margin_px, observer.threshold
                ));
                for node in loadables {
                    self.dom.add_class(node, LOADING_CLASS);
                    observer.observe(node);
                }
                self.media.observer = Some(observer);
            }
        }
    }

    /// Elements carrying deferred source data at scheduler start, in
    /// document order.
    fn loadable_elements(&self) -> Vec<NodeId> {
        self.dom
            .all_elements()
            .into_iter()
            .filter(|node| {
                let tag = self.dom.tag_name(*node).unwrap_or("");
                (tag == "img" || tag == "source")
                    && (self.dom.has_attr(*node, DEFERRED_SRC_ATTR)
                        || self.dom.has_attr(*node, DEFERRED_SRCSET_ATTR))
            })
            .collect()
    }

    /// Copy deferred attributes into live ones. Monotonic and exactly-once:
    /// an already-materialized element is left alone.
    pub(crate) fn materialize_media(&mut self, node: NodeId) {
        if !self.media.materialized.insert(node) {
            return;
        }
        if let Some(src) = self.dom.attr(node, DEFERRED_SRC_ATTR).map(str::to_string) {
            self.dom.set_attr(node, "src", &src);
        }
        if let Some(srcset) = self.dom.attr(node, DEFERRED_SRCSET_ATTR).map(str::to_string) {
            self.dom.set_attr(node, "srcset", &srcset);
        }
        self.dom.remove_class(node, LOADING_CLASS);
        self.dom.add_class(node, LOADED_CLASS);
    }

    /// Deliver intersection records to the shared observer. Deregistration
    /// happens before any mutation: a record for an element that is no
    /// longer observed is stale and dropped, so double materialization is
    /// structurally impossible.
    pub(crate) fn deliver_intersections(&mut self, records: Vec<IntersectionRecord>) {
        for record in records {
            if !record.is_intersecting {
                continue;
            }
            let Some(observer) = self.media.observer.as_mut() else {
                return;
            };
            if !observer.unobserve(record.target) {
                continue;
            }
            self.materialize_media(record.target);
        }
    }

    /// Simulate the element scrolling into view.
    pub fn intersect(&mut self, selector: &str) -> Result<()> {
        self.intersect_with(selector, true)
    }

    /// Deliver an intersection record with an explicit intersecting flag;
    /// non-intersecting and stale records must both be no-ops.
    pub fn intersect_with(&mut self, selector: &str, is_intersecting: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        self.deliver_intersections(vec![IntersectionRecord {
            target,
            is_intersecting,
        }]);
        Ok(())
    }

    pub fn media_strategy(&self) -> Option<LoadingStrategy> {
        self.media.strategy
    }

    pub fn observed_media_count(&self) -> usize {
        self.media.observer.as_ref().map_or(0, ObserverState::len)
    }

    pub fn is_materialized(&self, selector: &str) -> Result<bool> {
        let node = self.select_one(selector)?;
        Ok(self.media.materialized.contains(&node))
    }

    pub fn is_observed(&self, selector: &str) -> Result<bool> {
        let node = self.select_one(selector)?;
        Ok(self
            .media
            .observer
            .as_ref()
            .is_some_and(|observer| observer.is_observed(node)))
    }

    /// A failed load is contained to its element: mark it and hide it so the
    /// host never shows a broken placeholder. Siblings and the scheduler are
    /// untouched. Errors on still-deferred elements are ignored; nothing was
    /// fetched yet.
    pub(crate) fn mark_media_failed(&mut self, node: NodeId) {
        if !self.media.materialized.contains(&node) {
            return;
        }
        self.dom.remove_class(node, LOADED_CLASS);
        self.dom.add_class(node, LOAD_FAILED_CLASS);
        self.dom.set_attr(node, "hidden", "true");
        self.trace_state.trace("media element failed".to_string());
    }
}
