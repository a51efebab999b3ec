// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Node-list expansion.
//!
//! Accepts the compact host-list syntax used by batch schedulers:
//!
//! ```text
//! g01r1n[01-03,07],g02r4n11
//!   → g01r1n01, g01r1n02, g01r1n03, g01r1n07, g02r4n11
//! ```
//!
//! Tokens are split on commas outside brackets. A token may end in one
//! bracketed list of singletons and `start-end` ranges; zero padding
//! follows the wider of the two range bounds.

use crate::{NodeName, Platform, TopologyError};
use std::collections::HashSet;

/// Upper bound on the number of nodes one list may expand to.
pub const MAX_NODES: usize = 65_536;

/// Expands a node-list specification into validated node names, in
/// textual order.
pub fn parse_node_list(spec: &str, platform: Platform) -> Result<Vec<NodeName>, TopologyError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(TopologyError::parse(spec, "node list is empty"));
    }

    let mut names = Vec::new();
    let mut seen = HashSet::new();
    for token in split_top_level(spec)? {
        for raw in expand_token(spec, token, MAX_NODES - names.len())? {
            if !seen.insert(raw.clone()) {
                return Err(TopologyError::parse(spec, format!("duplicate node '{raw}'")));
            }
            names.push(NodeName::parse(&raw, platform)?);
        }
    }

    tracing::debug!("expanded node list '{}' into {} nodes", spec, names.len());
    Ok(names)
}

/// Splits on commas that are not inside `[...]`.
fn split_top_level(spec: &str) -> Result<Vec<&str>, TopologyError> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, c) in spec.char_indices() {
        match c {
            '[' => {
                if depth > 0 {
                    return Err(TopologyError::parse(spec, "nested '[' is not allowed"));
                }
                depth += 1;
            }
            ']' => {
                if depth == 0 {
                    return Err(TopologyError::parse(spec, "unbalanced ']'"));
                }
                depth -= 1;
            }
            ',' if depth == 0 => {
                tokens.push(spec[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(TopologyError::parse(spec, "unclosed '['"));
    }
    tokens.push(spec[start..].trim());

    if tokens.iter().any(|t| t.is_empty()) {
        return Err(TopologyError::parse(spec, "empty node token"));
    }
    Ok(tokens)
}

/// Expands one token into at most `budget` names.
fn expand_token(spec: &str, token: &str, budget: usize) -> Result<Vec<String>, TopologyError> {
    let too_many = || {
        TopologyError::parse(spec, format!("node list expands to more than {MAX_NODES} nodes"))
    };
    let Some(open) = token.find('[') else {
        if budget == 0 {
            return Err(too_many());
        }
        return Ok(vec![token.to_string()]);
    };
    if !token.ends_with(']') {
        return Err(TopologyError::parse(
            spec,
            format!("'{token}': range list must close the token"),
        ));
    }
    let prefix = &token[..open];
    if prefix.is_empty() {
        return Err(TopologyError::parse(spec, format!("'{token}': missing prefix")));
    }
    let body = &token[open + 1..token.len() - 1];

    let mut out = Vec::new();
    for item in body.split(',') {
        let item = item.trim();
        if item.is_empty() {
            return Err(TopologyError::parse(spec, format!("'{token}': empty range item")));
        }
        match item.split_once('-') {
            None => {
                parse_bound(spec, item)?;
                if out.len() >= budget {
                    return Err(too_many());
                }
                out.push(format!("{prefix}{item}"));
            }
            Some((lo, hi)) => {
                let (lo, hi) = (lo.trim(), hi.trim());
                let start = parse_bound(spec, lo)?;
                let end = parse_bound(spec, hi)?;
                if start > end {
                    return Err(TopologyError::parse(
                        spec,
                        format!("'{item}': range start exceeds end"),
                    ));
                }
                if end - start >= (budget - out.len()) as u64 {
                    return Err(too_many());
                }
                let width = lo.len().max(hi.len());
                out.extend((start..=end).map(|i| format!("{prefix}{i:0width$}")));
            }
        }
    }
    Ok(out)
}

fn parse_bound(spec: &str, bound: &str) -> Result<u64, TopologyError> {
    if bound.is_empty() || !bound.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TopologyError::parse(
            spec,
            format!("'{bound}' is not a non-negative integer"),
        ));
    }
    bound
        .parse()
        .map_err(|_| TopologyError::parse(spec, format!("'{bound}' is too large")))
}
