use super::*;

fn mobile_page() -> Result<Page> {
    let mut page = Page::from_html_with_options(MARKETING_PAGE_HTML, mobile_observer_options())?;
    page.enhance();
    Ok(page)
}

fn assert_drawer_open(page: &Page, open: bool) -> Result<()> {
    let flag = if open { "true" } else { "false" };
    page.assert_attr(".mobile-nav-toggle", "aria-expanded", flag)?;
    page.assert_attr("#primary-navigation", "data-visible", flag)?;
    if open {
        page.assert_has_class("#primary-navigation", "open")?;
        page.assert_has_class("body", "menu-open")?;
    } else {
        page.assert_lacks_class("#primary-navigation", "open")?;
        page.assert_lacks_class("body", "menu-open")?;
    }
    assert_eq!(page.nav_is_open(), open);
    assert!(page.disclosure_surfaces_agree());
    Ok(())
}

#[test]
fn toggle_click_opens_then_closes_all_surfaces_in_lockstep() -> Result<()> {
    let mut page = mobile_page()?;
    assert_drawer_open(&page, false)?;

    page.click(".mobile-nav-toggle")?;
    assert_drawer_open(&page, true)?;

    page.click(".mobile-nav-toggle")?;
    assert_drawer_open(&page, false)?;
    Ok(())
}

#[test]
fn open_and_close_are_idempotent() -> Result<()> {
    let mut page = mobile_page()?;

    page.open_navigation();
    page.open_navigation();
    assert_drawer_open(&page, true)?;

    page.close_navigation();
    page.close_navigation();
    assert_drawer_open(&page, false)?;
    Ok(())
}

#[test]
fn rapid_toggle_bursts_never_desynchronize_surfaces() -> Result<()> {
    let mut page = mobile_page()?;
    for _ in 0..7 {
        page.click(".mobile-nav-toggle")?;
        assert!(page.disclosure_surfaces_agree());
    }
    assert_drawer_open(&page, true)?;
    Ok(())
}

#[test]
fn drawer_link_click_closes_at_any_viewport_width() -> Result<()> {
    for width in [320, 768, 769, 1400] {
        let mut options = mobile_observer_options();
        options.viewport_width = width;
        let mut page = Page::from_html_with_options(MARKETING_PAGE_HTML, options)?;
        page.enhance();

        page.click(".mobile-nav-toggle")?;
        assert_drawer_open(&page, true)?;
        page.click("#home-link")?;
        assert_drawer_open(&page, false)?;
    }
    Ok(())
}

#[test]
fn escape_closes_only_while_open() -> Result<()> {
    let mut page = mobile_page()?;

    page.press_key("Escape")?;
    assert_drawer_open(&page, false)?;

    page.click(".mobile-nav-toggle")?;
    page.press_key("Enter")?;
    assert_drawer_open(&page, true)?;

    page.press_key("Escape")?;
    assert_drawer_open(&page, false)?;
    Ok(())
}

#[test]
fn outside_click_closes_but_drawer_click_does_not() -> Result<()> {
    let mut page = mobile_page()?;

    page.click(".mobile-nav-toggle")?;
    page.click("#primary-navigation")?;
    assert_drawer_open(&page, true)?;

    page.click("#content")?;
    assert_drawer_open(&page, false)?;
    Ok(())
}

#[test]
fn toggle_then_outside_click_ends_closed_without_scroll_lock() -> Result<()> {
    let mut page = mobile_page()?;
    page.click(".mobile-nav-toggle")?;
    page.click("#content")?;
    assert_drawer_open(&page, false)?;
    page.assert_lacks_class("body", "menu-open")?;
    Ok(())
}

#[test]
fn resize_close_is_debounced_and_latest_call_wins() -> Result<()> {
    let mut page = mobile_page()?;
    page.click(".mobile-nav-toggle")?;

    page.resize_to(900);
    page.resize_to(600);
    page.resize_to(1000);
    assert_eq!(page.pending_timer_count(), 1);

    // Each resize cancels and reschedules, so only the third timer survives,
    // due a full debounce window after it was scheduled.
    assert_eq!(page.pending_timers(), vec![PendingTimer { id: 3, due_at: 250 }]);

    // Still within the debounce window; nothing has settled.
    page.advance_time(249);
    assert_drawer_open(&page, true)?;

    page.advance_time(1);
    assert_drawer_open(&page, false)?;
    assert_eq!(page.pending_timer_count(), 0);
    Ok(())
}

#[test]
fn resize_below_breakpoint_leaves_drawer_open() -> Result<()> {
    let mut page = mobile_page()?;
    page.click(".mobile-nav-toggle")?;

    page.resize_to(600);
    page.advance_time(300);
    assert_drawer_open(&page, true)?;
    Ok(())
}

#[test]
fn resize_at_exact_breakpoint_width_does_not_close() -> Result<()> {
    let mut page = mobile_page()?;
    page.click(".mobile-nav-toggle")?;

    page.resize_to(768);
    page.advance_time(300);
    assert_drawer_open(&page, true)?;
    Ok(())
}

#[test]
fn resize_while_closed_settles_without_effect() -> Result<()> {
    let mut page = mobile_page()?;
    page.resize_to(1200);
    page.advance_time(300);
    assert_drawer_open(&page, false)?;
    Ok(())
}

#[test]
fn wiring_is_idempotent_and_dedupes_listeners() -> Result<()> {
    let mut page = mobile_page()?;
    page.enhance();
    page.enhance();
    assert_eq!(page.nav_link_count(), 3);

    // A duplicate toggle listener would make one click toggle twice.
    page.click(".mobile-nav-toggle")?;
    assert_drawer_open(&page, true)?;
    Ok(())
}

#[test]
fn missing_navigation_elements_degrade_to_inert_with_one_warning() -> Result<()> {
    let mut page = Page::from_html("<main id='content'><p>No nav here</p></main>")?;
    page.enhance();
    page.enhance();

    assert!(!page.nav_is_open());
    page.open_navigation();
    page.toggle_navigation();
    assert!(!page.nav_is_open());
    assert!(page.disclosure_surfaces_agree());

    let warnings = page
        .take_trace_logs()
        .into_iter()
        .filter(|line| line.starts_with("warn:"))
        .collect::<Vec<_>>();
    assert_eq!(warnings.len(), 1, "expected one warning, got {warnings:?}");
    Ok(())
}

#[test]
fn dispose_closes_removes_listeners_and_cancels_timers() -> Result<()> {
    let mut page = mobile_page()?;
    page.click(".mobile-nav-toggle")?;
    page.resize_to(900);
    assert_eq!(page.pending_timer_count(), 1);

    page.dispose_navigation();
    assert_drawer_open(&page, false)?;
    assert_eq!(page.pending_timer_count(), 0);

    // No listener survives disposal and the entry points are no-ops.
    page.click(".mobile-nav-toggle")?;
    assert!(!page.nav_is_open());
    page.open_navigation();
    assert!(!page.nav_is_open());
    page.assert_attr("#primary-navigation", "data-visible", "false")?;
    Ok(())
}

#[test]
fn controller_is_sole_writer_of_initial_surfaces() -> Result<()> {
    // The host template may ship stale markup; wiring normalizes it.
    let html = r#"
        <button class='mobile-nav-toggle' aria-expanded='true'>Menu</button>
        <nav id='primary-navigation' data-visible='true' class='open'>
          <a href='#home'>Home</a>
        </nav>
        "#;
    let mut page = Page::from_html(html)?;
    page.enhance();
    page.assert_attr(".mobile-nav-toggle", "aria-expanded", "false")?;
    page.assert_attr("#primary-navigation", "data-visible", "false")?;
    page.assert_lacks_class("#primary-navigation", "open")?;
    assert!(page.disclosure_surfaces_agree());
    Ok(())
}
