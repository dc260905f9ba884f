use std::collections::{HashMap, HashSet, VecDeque};
use std::error::Error as StdError;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
        }
    }
}

impl StdError for Error {}

mod dom;
mod events;
mod html;
mod media;
mod nav;
mod page;
mod platform;
mod scheduler;
mod selector;

pub use media::LoadingStrategy;
pub use nav::DisclosureState;
pub use page::{Page, PageOptions};
pub use platform::Capabilities;
pub use scheduler::PendingTimer;

pub(crate) use dom::*;
pub(crate) use events::*;
pub(crate) use html::*;
pub(crate) use media::*;
pub(crate) use nav::*;
pub(crate) use platform::*;
pub(crate) use scheduler::*;
pub(crate) use selector::*;

#[cfg(test)]
mod tests;
