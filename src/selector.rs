use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SelectorAttrCondition {
    Exists { key: String },
    Eq { key: String, value: String },
    StartsWith { key: String, value: String },
    EndsWith { key: String, value: String },
    Contains { key: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SelectorStep {
    pub(crate) tag: Option<String>,
    pub(crate) universal: bool,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<SelectorAttrCondition>,
}

impl SelectorStep {
    pub(crate) fn id_only(&self) -> Option<&str> {
        if !self.universal && self.tag.is_none() && self.classes.is_empty() && self.attrs.is_empty()
        {
            self.id.as_deref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SelectorCombinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorPart {
    pub(crate) step: SelectorStep,
    // Relation to previous (left) selector part.
    pub(crate) combinator: Option<SelectorCombinator>,
}

pub(crate) fn parse_selector_chain(selector: &str) -> Result<Vec<SelectorPart>> {
    let selector = selector.trim();
    if selector.is_empty() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }

    let tokens = tokenize_selector(selector)?;
    let mut parts: Vec<SelectorPart> = Vec::new();
    let mut pending_combinator: Option<SelectorCombinator> = None;

    for token in tokens {
        if token == ">" {
            if pending_combinator.is_some() || parts.is_empty() {
                return Err(Error::UnsupportedSelector(selector.into()));
            }
            pending_combinator = Some(SelectorCombinator::Child);
            continue;
        }

        let step = parse_selector_step(&token, selector)?;
        let combinator = if parts.is_empty() {
            None
        } else {
            Some(pending_combinator.unwrap_or(SelectorCombinator::Descendant))
        };
        pending_combinator = None;
        parts.push(SelectorPart { step, combinator });
    }

    if pending_combinator.is_some() || parts.is_empty() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }
    Ok(parts)
}

fn tokenize_selector(selector: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;
    let mut quote: Option<char> = None;

    for ch in selector.chars() {
        if let Some(open_quote) = quote {
            current.push(ch);
            if ch == open_quote {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' if in_brackets => {
                quote = Some(ch);
                current.push(ch);
            }
            '[' => {
                if in_brackets {
                    return Err(Error::UnsupportedSelector(selector.into()));
                }
                in_brackets = true;
                current.push(ch);
            }
            ']' => {
                if !in_brackets {
                    return Err(Error::UnsupportedSelector(selector.into()));
                }
                in_brackets = false;
                current.push(ch);
            }
            '>' if !in_brackets => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(">".to_string());
            }
            ch if ch.is_whitespace() && !in_brackets => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if in_brackets || quote.is_some() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

fn parse_selector_step(token: &str, selector: &str) -> Result<SelectorStep> {
    let mut step = SelectorStep::default();
    let chars = token.chars().collect::<Vec<_>>();
    let mut i = 0usize;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                step.universal = true;
                i += 1;
            }
            '#' => {
                let (name, next) = read_identifier(&chars, i + 1);
                if name.is_empty() {
                    return Err(Error::UnsupportedSelector(selector.into()));
                }
                step.id = Some(name);
                i = next;
            }
            '.' => {
                let (name, next) = read_identifier(&chars, i + 1);
                if name.is_empty() {
                    return Err(Error::UnsupportedSelector(selector.into()));
                }
                step.classes.push(name);
                i = next;
            }
            '[' => {
                let close = chars[i..]
                    .iter()
                    .position(|ch| *ch == ']')
                    .map(|offset| i + offset)
                    .ok_or_else(|| Error::UnsupportedSelector(selector.into()))?;
                let body = chars[i + 1..close].iter().collect::<String>();
                step.attrs.push(parse_attr_condition(&body, selector)?);
                i = close + 1;
            }
            ch if ch.is_ascii_alphanumeric() || ch == '-' => {
                let (name, next) = read_identifier(&chars, i);
                step.tag = Some(name.to_ascii_lowercase());
                i = next;
            }
            _ => return Err(Error::UnsupportedSelector(selector.into())),
        }
    }

    Ok(step)
}

fn read_identifier(chars: &[char], from: usize) -> (String, usize) {
    let mut i = from;
    let mut out = String::new();
    while i < chars.len() {
        let ch = chars[i];
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            out.push(ch);
            i += 1;
        } else {
            break;
        }
    }
    (out, i)
}

fn parse_attr_condition(body: &str, selector: &str) -> Result<SelectorAttrCondition> {
    let body = body.trim();
    if body.is_empty() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }

    for needle in ["^=", "$=", "*="] {
        let Some((key, value)) = body.split_once(needle) else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = unquote(value.trim()).to_string();
        return Ok(match needle {
            "^=" => SelectorAttrCondition::StartsWith { key, value },
            "$=" => SelectorAttrCondition::EndsWith { key, value },
            _ => SelectorAttrCondition::Contains { key, value },
        });
    }

    if let Some((key, value)) = body.split_once('=') {
        return Ok(SelectorAttrCondition::Eq {
            key: key.trim().to_ascii_lowercase(),
            value: unquote(value.trim()).to_string(),
        });
    }

    Ok(SelectorAttrCondition::Exists {
        key: body.to_ascii_lowercase(),
    })
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn matches_step(dom: &Dom, node: NodeId, step: &SelectorStep) -> bool {
    let Some(element) = dom.element(node) else {
        return false;
    };

    if let Some(tag) = &step.tag {
        if !element.tag_name.eq_ignore_ascii_case(tag) {
            return false;
        }
    }
    if let Some(id) = &step.id {
        if element.attrs.get("id").map(String::as_str) != Some(id.as_str()) {
            return false;
        }
    }
    for class in &step.classes {
        if !dom.has_class(node, class) {
            return false;
        }
    }
    for condition in &step.attrs {
        let matched = match condition {
            SelectorAttrCondition::Exists { key } => element.attrs.contains_key(key),
            SelectorAttrCondition::Eq { key, value } => {
                element.attrs.get(key).map(String::as_str) == Some(value.as_str())
            }
            SelectorAttrCondition::StartsWith { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|actual| actual.starts_with(value)),
            SelectorAttrCondition::EndsWith { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|actual| actual.ends_with(value)),
            SelectorAttrCondition::Contains { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|actual| actual.contains(value)),
        };
        if !matched {
            return false;
        }
    }
    true
}

fn matches_chain(dom: &Dom, node: NodeId, parts: &[SelectorPart]) -> bool {
    let Some((last, rest)) = parts.split_last() else {
        return false;
    };
    if !matches_step(dom, node, &last.step) {
        return false;
    }
    match last.combinator {
        None => rest.is_empty(),
        Some(SelectorCombinator::Child) => dom
            .parent(node)
            .is_some_and(|parent| matches_chain(dom, parent, rest)),
        Some(SelectorCombinator::Descendant) => {
            let mut cursor = dom.parent(node);
            while let Some(ancestor) = cursor {
                if matches_chain(dom, ancestor, rest) {
                    return true;
                }
                cursor = dom.parent(ancestor);
            }
            false
        }
    }
}

pub(crate) fn select_all_nodes(dom: &Dom, selector: &str) -> Result<Vec<NodeId>> {
    let parts = parse_selector_chain(selector)?;

    if parts.len() == 1 {
        if let Some(id) = parts[0].step.id_only() {
            return Ok(dom.element_by_id(id).into_iter().collect());
        }
    }

    Ok(dom
        .all_elements()
        .into_iter()
        .filter(|node| matches_chain(dom, *node, &parts))
        .collect())
}

pub(crate) fn select_one_node(dom: &Dom, selector: &str) -> Result<NodeId> {
    select_all_nodes(dom, selector)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
}
