use page_enhancer::{Capabilities, Page, PageOptions};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseResult};

const DISCLOSURE_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/disclosure_property_fuzz_test.txt";
const DEFAULT_DISCLOSURE_PROPTEST_CASES: u32 = 256;

const FUZZ_PAGE_HTML: &str = r#"
<header>
  <button class='mobile-nav-toggle' aria-expanded='false'>Menu</button>
  <nav id='primary-navigation' data-visible='false'>
    <ul>
      <li><a id='home-link' href='#home'>Home</a></li>
      <li><a id='docs-link' href='#docs'>Docs</a></li>
    </ul>
  </nav>
</header>
<main id='content'>
  <h1>Fuzz fixture</h1>
  <img id='hero' data-src='hero.jpg' alt='Hero'>
</main>
"#;

#[derive(Clone, Debug)]
enum PageAction {
    ClickToggle,
    ClickHomeLink,
    ClickOutside,
    PressEscape,
    ResizeTo(i64),
    AdvanceTime(i64),
    IntersectHero,
}

fn disclosure_proptest_cases() -> u32 {
    std::env::var("PAGE_ENHANCER_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_DISCLOSURE_PROPTEST_CASES)
}

fn page_action_strategy() -> BoxedStrategy<PageAction> {
    prop_oneof![
        5 => Just(PageAction::ClickToggle),
        2 => Just(PageAction::ClickHomeLink),
        2 => Just(PageAction::ClickOutside),
        2 => Just(PageAction::PressEscape),
        3 => (320i64..=1400).prop_map(PageAction::ResizeTo),
        3 => (0i64..=400).prop_map(PageAction::AdvanceTime),
        1 => Just(PageAction::IntersectHero),
    ]
    .boxed()
}

fn page_action_sequence_strategy() -> BoxedStrategy<Vec<PageAction>> {
    vec(page_action_strategy(), 1..=32).boxed()
}

fn run_action(page: &mut Page, action: &PageAction) -> page_enhancer::Result<()> {
    match action {
        PageAction::ClickToggle => page.click(".mobile-nav-toggle"),
        PageAction::ClickHomeLink => page.click("#home-link"),
        PageAction::ClickOutside => page.click("#content"),
        PageAction::PressEscape => page.press_key("Escape"),
        PageAction::ResizeTo(width) => {
            page.resize_to(*width);
            Ok(())
        }
        PageAction::AdvanceTime(delta) => {
            page.advance_time(*delta);
            Ok(())
        }
        PageAction::IntersectHero => page.intersect("#hero"),
    }
}

fn assert_disclosure_sequence_is_stable(actions: &[PageAction]) -> TestCaseResult {
    let options = PageOptions {
        capabilities: Capabilities {
            native_lazy_loading: false,
            intersection_observer: true,
            smooth_scroll: false,
        },
        viewport_width: 500,
    };
    let mut page = Page::from_html_with_options(FUZZ_PAGE_HTML, options)
        .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))?;
    page.enhance();

    let mut hero_was_materialized = false;

    for (step, action) in actions.iter().enumerate() {
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            run_action(&mut page, action)
        }));

        match outcome {
            Err(_) => {
                prop_assert!(
                    false,
                    "action panicked at step {step}: {action:?}, actions={actions:?}"
                );
            }
            Ok(Err(error)) => {
                prop_assert!(
                    false,
                    "action returned error at step {step}: {action:?}, error={error:?}, actions={actions:?}"
                );
            }
            Ok(Ok(())) => {}
        }

        prop_assert!(
            page.disclosure_surfaces_agree(),
            "disclosure surfaces diverged after step {step}: {action:?}, actions={actions:?}"
        );

        let hero_is_materialized = page
            .is_materialized("#hero")
            .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))?;
        prop_assert!(
            !hero_was_materialized || hero_is_materialized,
            "hero reverted to deferred after step {step}: {action:?}, actions={actions:?}"
        );
        hero_was_materialized = hero_is_materialized;
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: disclosure_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(DISCLOSURE_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn disclosure_and_media_action_sequences_stay_consistent(actions in page_action_sequence_strategy()) {
        assert_disclosure_sequence_is_stable(&actions)?;
    }
}
