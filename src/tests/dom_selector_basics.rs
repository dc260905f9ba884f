use super::*;

#[test]
fn fragment_without_body_gets_one_synthesized() -> Result<()> {
    let page = Page::from_html("<p id='solo'>hi</p>")?;
    page.assert_exists("body")?;
    page.assert_exists("body > p")?;
    Ok(())
}

#[test]
fn list_items_with_optional_end_tags_are_recovered() -> Result<()> {
    let page = Page::from_html("<ul><li>A<li>B<li>C</ul>")?;
    page.assert_count("li", 3)?;
    page.assert_count("ul > li", 3)?;
    Ok(())
}

#[test]
fn scripts_and_styles_are_inert_raw_text() -> Result<()> {
    let html = r#"
        <script>document.body.innerHTML = '<div id="injected"></div>';</script>
        <style>p { color: red; }</style>
        <p id='kept'>kept</p>
        "#;
    let page = Page::from_html(html)?;
    page.assert_exists("#kept")?;
    assert!(matches!(
        page.assert_exists("#injected"),
        Err(Error::SelectorNotFound(_))
    ));
    Ok(())
}

#[test]
fn attribute_values_decode_character_references() -> Result<()> {
    let page = Page::from_html("<a id='offer' title='Black &amp; White &raquo;'>x</a>")?;
    page.assert_attr("#offer", "title", "Black & White »")?;
    Ok(())
}

#[test]
fn selector_subset_matches_expected_nodes() -> Result<()> {
    let page = Page::from_html(MARKETING_PAGE_HTML)?;
    page.assert_count("img", 3)?;
    page.assert_count("img[data-src]", 2)?;
    page.assert_count("[data-srcset]", 2)?;
    page.assert_count("a[href^='#']", 3)?;
    page.assert_count("a[href$='products']", 1)?;
    page.assert_count("a[href*='ome']", 1)?;
    page.assert_count("nav a", 3)?;
    page.assert_count("ul > a", 0)?;
    page.assert_count("li > a", 3)?;
    page.assert_count(".site-header .mobile-nav-toggle", 1)?;
    page.assert_count("*", 18)?;
    Ok(())
}

#[test]
fn id_fast_path_and_document_order_agree() -> Result<()> {
    let page = Page::from_html(MARKETING_PAGE_HTML)?;
    let by_id = select_one_node(&page.dom, "#home-link")?;
    let by_scan = select_all_nodes(&page.dom, "a")?;
    assert_eq!(by_scan.first().copied(), Some(by_id));
    Ok(())
}

#[test]
fn unsupported_selector_is_rejected() {
    let page = Page::from_html("<p>x</p>").expect("parse");
    assert!(matches!(
        page.assert_exists("p:nth-child(2)"),
        Err(Error::UnsupportedSelector(_))
    ));
    assert!(matches!(
        page.assert_exists(""),
        Err(Error::UnsupportedSelector(_))
    ));
}

#[test]
fn missing_selector_reports_not_found() {
    let page = Page::from_html("<p>x</p>").expect("parse");
    assert!(matches!(
        page.assert_exists("#missing"),
        Err(Error::SelectorNotFound(_))
    ));
}

#[test]
fn unclosed_comment_is_a_parse_error() {
    assert!(matches!(
        Page::from_html("<!-- never closed"),
        Err(Error::HtmlParse(_))
    ));
}

#[test]
fn assertion_failures_carry_a_dom_snippet() -> Result<()> {
    let page = Page::from_html("<img id='hero' data-src='a.jpg'>")?;
    match page.assert_attr("#hero", "src", "a.jpg") {
        Err(Error::AssertionFailed {
            selector,
            expected,
            actual,
            dom_snippet,
        }) => {
            assert_eq!(selector, "#hero");
            assert_eq!(expected, "src=a.jpg");
            assert_eq!(actual, "src=<absent>");
            assert!(dom_snippet.contains("<img"), "snippet: {dom_snippet}");
        }
        other => panic!("expected assertion failure, got {other:?}"),
    }
    Ok(())
}

#[test]
fn class_list_mutations_preserve_unrelated_entries() -> Result<()> {
    let mut page = Page::from_html("<div id='box' class='a b'></div>")?;
    let node = page.select_one("#box")?;
    page.dom.add_class(node, "c");
    page.dom.add_class(node, "b");
    page.assert_attr("#box", "class", "a b c")?;

    page.dom.remove_class(node, "b");
    page.assert_attr("#box", "class", "a c")?;
    page.assert_has_class("#box", "a")?;
    page.assert_lacks_class("#box", "b")?;
    Ok(())
}

#[test]
fn event_dispatch_walks_capture_target_and_bubble_phases() -> Result<()> {
    let mut page =
        Page::from_html_with_options(MARKETING_PAGE_HTML, mobile_observer_options())?;
    page.enhance();
    page.set_trace_enabled(true);
    page.click("#content")?;
    let logs = page.take_trace_logs();
    assert!(
        logs.iter().any(|line| line.contains("event click") && line.contains("completed")),
        "logs: {logs:?}"
    );
    Ok(())
}
