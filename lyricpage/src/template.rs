// Copyright 2026 The lyricweb Authors.
// This project is dual-licensed under Apache 2.0 and MIT terms.
// See LICENSE-APACHE and LICENSE-MIT for details.

//! A minimal `{{ variable }}` substitution engine for HTML templates.
//!
//! Values are HTML-escaped unless the `safe` filter is given, as in `{{ data_json|safe }}`.

use std::collections::BTreeMap;
use thiserror::Error;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TemplateError {
    #[error("unknown template variable {name:?} at byte {offset}")]
    UnknownVariable { name: String, offset: usize },
    #[error("unknown template filter {filter:?} at byte {offset}")]
    UnknownFilter { filter: String, offset: usize },
    #[error("unterminated {{{{ at byte {offset}")]
    Unterminated { offset: usize },
}

/// Renders the given template, substituting the given variables.
pub fn render(template: &str, variables: &BTreeMap<&str, String>) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find(OPEN) {
        let offset = template.len() - rest.len() + open;
        output.push_str(&rest[..open]);
        let after_open = &rest[open + OPEN.len()..];
        let close = after_open
            .find(CLOSE)
            .ok_or(TemplateError::Unterminated { offset })?;
        let expression = after_open[..close].trim();
        let (name, filter) = match expression.split_once('|') {
            Some((name, filter)) => (name.trim(), Some(filter.trim())),
            None => (expression, None),
        };
        let value = variables
            .get(name)
            .ok_or_else(|| TemplateError::UnknownVariable {
                name: name.to_string(),
                offset,
            })?;
        match filter {
            None => output.push_str(&escape_html(value)),
            Some("safe") => output.push_str(value),
            Some(filter) => {
                return Err(TemplateError::UnknownFilter {
                    filter: filter.to_string(),
                    offset,
                });
            }
        }
        rest = &after_open[close + CLOSE.len()..];
    }
    output.push_str(rest);
    Ok(output)
}

/// Escapes the characters which are special in HTML text and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
