use super::*;

pub(crate) const NAV_TOGGLE_SELECTOR: &str = ".mobile-nav-toggle";
pub(crate) const NAV_DRAWER_SELECTOR: &str = "#primary-navigation";

pub(crate) const ARIA_EXPANDED_ATTR: &str = "aria-expanded";
pub(crate) const DRAWER_VISIBLE_ATTR: &str = "data-visible";
pub(crate) const DRAWER_OPEN_CLASS: &str = "open";
pub(crate) const SCROLL_LOCK_CLASS: &str = "menu-open";

/// Open/closed state of the mobile navigation drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisclosureState {
    Closed,
    Open,
}

/// The disclosure controller: sole writer of the three observable surfaces
/// (ARIA expanded state on the toggle, visibility attribute plus open class
/// on the drawer, scroll-lock class on body). Five trigger sources feed it;
/// all of them land in `open_navigation`/`close_navigation`.
#[derive(Debug)]
pub(crate) struct NavDisclosure {
    pub(crate) toggle: NodeId,
    pub(crate) drawer: NodeId,
    pub(crate) links: Vec<NodeId>,
    pub(crate) state: DisclosureState,
    pub(crate) disposed: bool,
    pub(crate) resize_timer: Option<i64>,
}

impl Page {
    /// Wire the disclosure controller to the host DOM. Idempotent. A page
    /// without the toggle or the drawer gets a permanently inert controller
    /// and a single warning; navigation must never block the rest of the
    /// page.
    pub(crate) fn wire_navigation(&mut self) {
        if self.nav.is_some() || self.nav_inert {
            return;
        }

        let toggle = select_one_node(&self.dom, NAV_TOGGLE_SELECTOR).ok();
        let drawer = select_one_node(&self.dom, NAV_DRAWER_SELECTOR).ok();
        let (Some(toggle), Some(drawer)) = (toggle, drawer) else {
            self.nav_inert = true;
            self.trace_state
                .warn("navigation elements not found; disclosure controller is inert".to_string());
            return;
        };

        let links = self
            .dom
            .descendant_elements(drawer)
            .into_iter()
            .filter(|node| self.dom.tag_name(*node).is_some_and(|tag| tag == "a"))
            .collect::<Vec<_>>();

        // Initial state: all three surfaces agree on Closed.
        self.apply_disclosure_surfaces(toggle, drawer, false);

        self.listeners.add(
            toggle,
            "click".to_string(),
            Listener {
                capture: false,
                action: EnhancerAction::NavToggleActivate,
            },
        );
        for link in &links {
            self.listeners.add(
                *link,
                "click".to_string(),
                Listener {
                    capture: false,
                    action: EnhancerAction::NavLinkActivate,
                },
            );
        }
        let root = self.dom.root;
        self.listeners.add(
            root,
            "click".to_string(),
            Listener {
                capture: false,
                action: EnhancerAction::NavOutsideClick,
            },
        );
        self.listeners.add(
            root,
            "keydown".to_string(),
            Listener {
                capture: false,
                action: EnhancerAction::NavEscapeKey,
            },
        );

        self.nav = Some(NavDisclosure {
            toggle,
            drawer,
            links,
            state: DisclosureState::Closed,
            disposed: false,
            resize_timer: None,
        });
    }

    /// Number of drawer links the controller is watching.
    pub fn nav_link_count(&self) -> usize {
        self.nav.as_ref().map_or(0, |nav| nav.links.len())
    }

    pub fn nav_is_open(&self) -> bool {
        self.nav
            .as_ref()
            .is_some_and(|nav| !nav.disposed && nav.state == DisclosureState::Open)
    }

    /// Idempotent: opening an open drawer is a no-op. The three surfaces are
    /// written together; no observable intermediate state exists.
    pub fn open_navigation(&mut self) {
        let Some(nav) = self.nav.as_mut() else {
            return;
        };
        if nav.disposed || nav.state == DisclosureState::Open {
            return;
        }
        nav.state = DisclosureState::Open;
        let (toggle, drawer) = (nav.toggle, nav.drawer);
        self.apply_disclosure_surfaces(toggle, drawer, true);
        self.trace_state.trace("nav open".to_string());
    }

    /// Idempotent counterpart of `open_navigation`.
    pub fn close_navigation(&mut self) {
        let Some(nav) = self.nav.as_mut() else {
            return;
        };
        if nav.disposed || nav.state == DisclosureState::Closed {
            return;
        }
        nav.state = DisclosureState::Closed;
        let (toggle, drawer) = (nav.toggle, nav.drawer);
        self.apply_disclosure_surfaces(toggle, drawer, false);
        self.trace_state.trace("nav close".to_string());
    }

    pub fn toggle_navigation(&mut self) {
        if self.nav_is_open() {
            self.close_navigation();
        } else {
            self.open_navigation();
        }
    }

    /// Close the drawer, remove every listener the controller registered,
    /// cancel any pending debounce timer, and go permanently inert.
    pub fn dispose_navigation(&mut self) {
        self.close_navigation();
        let Some(nav) = self.nav.as_mut() else {
            return;
        };
        if nav.disposed {
            return;
        }
        nav.disposed = true;
        if let Some(timer_id) = nav.resize_timer.take() {
            self.scheduler.cancel(timer_id);
        }
        self.listeners.remove_where(EnhancerAction::is_navigation);
        self.trace_state.trace("nav disposed".to_string());
    }

    fn apply_disclosure_surfaces(&mut self, toggle: NodeId, drawer: NodeId, open: bool) {
        let flag = if open { "true" } else { "false" };
        self.dom.set_attr(toggle, ARIA_EXPANDED_ATTR, flag);
        self.dom.set_attr(drawer, DRAWER_VISIBLE_ATTR, flag);
        if open {
            self.dom.add_class(drawer, DRAWER_OPEN_CLASS);
            self.dom.add_class(self.body, SCROLL_LOCK_CLASS);
        } else {
            self.dom.remove_class(drawer, DRAWER_OPEN_CLASS);
            self.dom.remove_class(self.body, SCROLL_LOCK_CLASS);
        }
    }

    /// Resize events arrive in bursts; only the trailing edge matters.
    /// Latest call wins: any previously scheduled settle is canceled first.
    pub(crate) fn debounce_viewport_resize(&mut self) {
        let Some(nav) = self.nav.as_mut() else {
            return;
        };
        if nav.disposed {
            return;
        }
        if let Some(timer_id) = nav.resize_timer.take() {
            self.scheduler.cancel(timer_id);
        }
        let timer_id = self
            .scheduler
            .schedule(RESIZE_DEBOUNCE_MS, TimerCallback::NavResizeSettled);
        if let Some(nav) = self.nav.as_mut() {
            nav.resize_timer = Some(timer_id);
        }
    }

    /// Debounced resize settled: leaving the mobile breakpoint while the
    /// drawer is open closes it. Below the breakpoint the drawer stands.
    pub(crate) fn nav_resize_settled(&mut self) {
        if let Some(nav) = self.nav.as_mut() {
            nav.resize_timer = None;
        }
        if self.viewport.width > MOBILE_BREAKPOINT_PX && self.nav_is_open() {
            self.close_navigation();
        }
    }

    /// True when the ARIA attribute, the visibility attribute, the open
    /// class, and the scroll lock all agree with the controller state.
    /// Pages without a wired controller are vacuously consistent.
    pub fn disclosure_surfaces_agree(&self) -> bool {
        let Some(nav) = self.nav.as_ref() else {
            return true;
        };
        let open = nav.state == DisclosureState::Open;
        let flag = if open { "true" } else { "false" };
        self.dom.attr(nav.toggle, ARIA_EXPANDED_ATTR) == Some(flag)
            && self.dom.attr(nav.drawer, DRAWER_VISIBLE_ATTR) == Some(flag)
            && self.dom.has_class(nav.drawer, DRAWER_OPEN_CLASS) == open
            && self.dom.has_class(self.body, SCROLL_LOCK_CLASS) == open
    }
}
