use super::*;

mod disclosure_navigation;
mod dom_selector_basics;

pub(crate) const MARKETING_PAGE_HTML: &str = r#"
    <header class='site-header'>
      <button class='mobile-nav-toggle' aria-expanded='false'>Menu</button>
      <nav id='primary-navigation' data-visible='false'>
        <ul>
          <li><a id='home-link' href='#home'>Home</a></li>
          <li><a id='products-link' href='#products'>Products</a></li>
          <li><a id='contact-link' href='#contact'>Contact</a></li>
        </ul>
      </nav>
    </header>
    <main id='content'>
      <h1>Shades</h1>
      <img id='hero' data-src='images/hero.jpg' alt='Hero'>
      <picture>
        <source id='hero-wide' data-srcset='images/hero-wide.jpg 2x'>
        <img id='inline' src='images/inline.jpg' alt='Inline'>
      </picture>
      <img id='catalog' data-src='images/catalog.jpg' data-srcset='images/catalog-2x.jpg 2x' alt='Catalog'>
    </main>
    "#;

pub(crate) fn mobile_observer_options() -> PageOptions {
    PageOptions {
        capabilities: Capabilities {
            native_lazy_loading: false,
            intersection_observer: true,
            smooth_scroll: false,
        },
        viewport_width: 500,
    }
}
