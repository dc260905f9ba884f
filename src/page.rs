use super::*;

/// Construction-time configuration: mocked platform capabilities and the
/// initial viewport width.
#[derive(Debug, Clone, Copy)]
pub struct PageOptions {
    pub capabilities: Capabilities,
    pub viewport_width: i64,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            capabilities: Capabilities::default(),
            viewport_width: 1024,
        }
    }
}

/// A parsed document plus the deterministic machinery around it: listener
/// store, virtual-time scheduler, mocked capabilities, trace log, and the
/// two enhancement components. Tests drive it through the event methods and
/// read it back through the assert helpers.
#[derive(Debug)]
pub struct Page {
    pub(crate) dom: Dom,
    pub(crate) listeners: ListenerStore,
    pub(crate) scheduler: SchedulerState,
    pub(crate) capabilities: Capabilities,
    pub(crate) viewport: Viewport,
    pub(crate) trace_state: TraceState,
    pub(crate) body: NodeId,
    pub(crate) nav: Option<NavDisclosure>,
    pub(crate) nav_inert: bool,
    pub(crate) media: MediaLoader,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_options(html, PageOptions::default())
    }

    pub fn from_html_with_options(html: &str, options: PageOptions) -> Result<Self> {
        let mut dom = parse_html(html)?;
        let body = dom.ensure_body();
        Ok(Self {
            dom,
            listeners: ListenerStore::default(),
            scheduler: SchedulerState::default(),
            capabilities: options.capabilities,
            viewport: Viewport {
                width: options.viewport_width,
            },
            trace_state: TraceState::default(),
            body,
            nav: None,
            nav_inert: false,
            media: MediaLoader::default(),
        })
    }

    /// Apply the whole enhancement layer: wire the navigation disclosure
    /// controller and start the media-loading scheduler. Both are
    /// idempotent, so calling this twice changes nothing.
    pub fn enhance(&mut self) {
        self.wire_navigation();
        self.start_media_loading();
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        select_one_node(&self.dom, selector)
    }

    pub(crate) fn select_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        select_all_nodes(&self.dom, selector)
    }

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(32 * 1024 * 1024, || {
            self.dispatch_prepared_event(EventState::new("click", target, self.scheduler.now_ms));
            Ok(())
        })
    }

    /// Key events land on body and bubble to the document root, where the
    /// controller's global keydown listener lives.
    pub fn press_key(&mut self, key: &str) -> Result<()> {
        let target = self.body;
        stacker::grow(32 * 1024 * 1024, || {
            self.dispatch_prepared_event(EventState::new_keyboard(
                "keydown",
                target,
                key,
                self.scheduler.now_ms,
            ));
            Ok(())
        })
    }

    pub fn dispatch(&mut self, selector: &str, event_type: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(32 * 1024 * 1024, || {
            self.dispatch_prepared_event(EventState::new(
                event_type,
                target,
                self.scheduler.now_ms,
            ));
            Ok(())
        })
    }

    /// Change the viewport width. The controller sees every resize but only
    /// acts on the debounced trailing edge, via `advance_time`.
    pub fn resize_to(&mut self, width: i64) {
        self.viewport.width = width;
        self.trace_state.trace(format!("resize to {width}px"));
        self.debounce_viewport_resize();
    }

    /// Run virtual time forward, firing due timers in `(due_at, order)`
    /// order.
    pub fn advance_time(&mut self, ms: i64) {
        let until = self.scheduler.now_ms.saturating_add(ms.max(0));
        while let Some(task) = self.scheduler.pop_due(until) {
            self.scheduler.now_ms = self.scheduler.now_ms.max(task.due_at);
            self.trace_state
                .trace(format!("timer {} fired at {}ms", task.id, task.due_at));
            match task.callback {
                TimerCallback::NavResizeSettled => self.nav_resize_settled(),
            }
        }
        self.scheduler.now_ms = until;
    }

    pub fn pending_timer_count(&self) -> usize {
        self.scheduler.task_queue.len()
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.scheduler.pending_timers()
    }

    /// Three-phase dispatch: capture from the root, target, then bubble.
    pub(crate) fn dispatch_prepared_event(&mut self, mut event: EventState) {
        let target = event.target;
        let mut path = Vec::new();
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.dom.parent(node);
        }
        path.reverse();

        // Capture phase.
        if path.len() >= 2 {
            for index in 0..path.len() - 1 {
                let node = path[index];
                event.event_phase = 1;
                event.current_target = node;
                self.invoke_listeners(node, &mut event, true);
                if event.propagation_stopped {
                    self.trace_event_done(&event, "propagation_stopped");
                    return;
                }
            }
        }

        // Target phase: capture listeners first, then bubble listeners.
        event.event_phase = 2;
        event.current_target = target;
        self.invoke_listeners(target, &mut event, true);
        if event.propagation_stopped {
            self.trace_event_done(&event, "propagation_stopped");
            return;
        }
        self.invoke_listeners(target, &mut event, false);
        if event.propagation_stopped {
            self.trace_event_done(&event, "propagation_stopped");
            return;
        }

        // Bubble phase.
        if event.bubbles && path.len() >= 2 {
            for index in (0..path.len() - 1).rev() {
                let node = path[index];
                event.event_phase = 3;
                event.current_target = node;
                self.invoke_listeners(node, &mut event, false);
                if event.propagation_stopped {
                    self.trace_event_done(&event, "propagation_stopped");
                    return;
                }
            }
        }

        self.trace_event_done(&event, "completed");
    }

    fn invoke_listeners(&mut self, node: NodeId, event: &mut EventState, capture: bool) {
        for listener in self.listeners.get(node, &event.event_type, capture) {
            self.run_action(listener.action, event);
        }
    }

    /// The single place listener actions execute. Every disclosure trigger
    /// funnels into the controller's idempotent entry points; no action
    /// touches the disclosure surfaces directly.
    fn run_action(&mut self, action: EnhancerAction, event: &mut EventState) {
        match action {
            EnhancerAction::NavToggleActivate => {
                // Suppress the control's default activation and keep the
                // click out of the outside-click path.
                event.default_prevented = true;
                event.propagation_stopped = true;
                self.toggle_navigation();
            }
            EnhancerAction::NavLinkActivate => {
                // Unconditional at every viewport width: selecting a
                // destination always collapses the drawer.
                self.close_navigation();
            }
            EnhancerAction::NavOutsideClick => {
                if !self.nav_is_open() {
                    return;
                }
                let Some(nav) = self.nav.as_ref() else {
                    return;
                };
                let target = event.target;
                let inside_toggle =
                    target == nav.toggle || self.dom.is_descendant_of(target, nav.toggle);
                let inside_drawer =
                    target == nav.drawer || self.dom.is_descendant_of(target, nav.drawer);
                if !inside_toggle && !inside_drawer {
                    self.close_navigation();
                }
            }
            EnhancerAction::NavEscapeKey => {
                if event.key.as_deref() == Some("Escape") && self.nav_is_open() {
                    self.close_navigation();
                }
            }
            EnhancerAction::MediaElementError => {
                self.mark_media_failed(event.target);
            }
        }
    }

    fn trace_event_done(&mut self, event: &EventState, status: &str) {
        let line = format!(
            "event {} target=n{} current=n{} phase={} at {}ms{} {status}",
            event.event_type,
            event.target.0,
            event.current_target.0,
            event.event_phase,
            event.time_stamp_ms,
            if event.default_prevented {
                " default_prevented"
            } else {
                ""
            },
        );
        self.trace_state.trace(line);
    }

    pub fn set_trace_enabled(&mut self, enabled: bool) {
        self.trace_state.enabled = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace_state.take_logs()
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        self.select_one(selector).map(|_| ())
    }

    pub fn assert_count(&self, selector: &str, expected: usize) -> Result<()> {
        let matches = self.select_all(selector)?;
        if matches.len() == expected {
            return Ok(());
        }
        let snippet = matches
            .first()
            .map(|node| self.dom.snippet(*node))
            .unwrap_or_else(|| "<no match>".to_string());
        Err(Error::AssertionFailed {
            selector: selector.to_string(),
            expected: format!("{expected} matches"),
            actual: format!("{} matches", matches.len()),
            dom_snippet: snippet,
        })
    }

    pub fn assert_attr(&self, selector: &str, name: &str, expected: &str) -> Result<()> {
        let node = self.select_one(selector)?;
        let actual = self.dom.attr(node, name).unwrap_or("<absent>");
        if actual == expected {
            return Ok(());
        }
        Err(Error::AssertionFailed {
            selector: selector.to_string(),
            expected: format!("{name}={expected}"),
            actual: format!("{name}={actual}"),
            dom_snippet: self.dom.snippet(node),
        })
    }

    pub fn assert_has_class(&self, selector: &str, class: &str) -> Result<()> {
        self.assert_class_state(selector, class, true)
    }

    pub fn assert_lacks_class(&self, selector: &str, class: &str) -> Result<()> {
        self.assert_class_state(selector, class, false)
    }

    fn assert_class_state(&self, selector: &str, class: &str, expected: bool) -> Result<()> {
        let node = self.select_one(selector)?;
        let actual = self.dom.has_class(node, class);
        if actual == expected {
            return Ok(());
        }
        Err(Error::AssertionFailed {
            selector: selector.to_string(),
            expected: format!("class {class} present={expected}"),
            actual: format!("class {class} present={actual}"),
            dom_snippet: self.dom.snippet(node),
        })
    }
}
