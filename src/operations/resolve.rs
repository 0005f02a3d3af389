// Alias Resolution
// Substitutes alias references with terminal values across a merged token set

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet, VecDeque};
use thiserror::Error;
use tracing::{debug, warn};

use super::alias::{reference_text, Segment};
use crate::core::{TokenDefinition, TokenSet, TokenType, TokenValue};

/// A token's resolution needs itself, transitively
///
/// `chain` starts and ends with the same token name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("circular reference: {}", .chain.join(" -> "))]
pub struct CircularReferenceError {
    pub chain: Vec<String>,
}

/// A reference names a token missing from the merged set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("token '{token}' references missing token '{reference}'")]
pub struct UnresolvedReferenceError {
    pub token: String,
    pub reference: String,
}

/// Per-token outcome of resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionStatus {
    /// Every reference reached a literal
    Resolved,

    /// Some references had no target; their text was left in place
    Unresolved { missing: Vec<String> },

    /// The token depends on a cycle; its raw value is kept
    Circular(CircularReferenceError),
}

/// A token after resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedToken {
    pub name: String,
    pub value: Value,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip)]
    pub status: ResolutionStatus,
}

impl ResolvedToken {
    pub fn is_resolved(&self) -> bool {
        self.status == ResolutionStatus::Resolved
    }
}

/// Result of resolving a merged token set, in merged order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    tokens: IndexMap<String, ResolvedToken>,
}

impl Resolution {
    pub fn get(&self, name: &str) -> Option<&ResolvedToken> {
        self.tokens.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.tokens.get(name).map(|t| &t.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedToken> {
        self.tokens.values()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Flattened name -> value mapping
    pub fn values(&self) -> IndexMap<String, Value> {
        self.tokens
            .iter()
            .map(|(name, token)| (name.clone(), token.value.clone()))
            .collect()
    }

    /// Cycle failures, one per affected token
    pub fn circular_errors(&self) -> impl Iterator<Item = (&str, &CircularReferenceError)> {
        self.tokens.values().filter_map(|t| match &t.status {
            ResolutionStatus::Circular(err) => Some((t.name.as_str(), err)),
            _ => None,
        })
    }

    /// Soft failures for references with no target
    pub fn unresolved_references(&self) -> Vec<UnresolvedReferenceError> {
        self.tokens
            .values()
            .filter_map(|t| match &t.status {
                ResolutionStatus::Unresolved { missing } => Some((t, missing)),
                _ => None,
            })
            .flat_map(|(t, missing)| {
                missing.iter().map(move |reference| UnresolvedReferenceError {
                    token: t.name.clone(),
                    reference: reference.clone(),
                })
            })
            .collect()
    }

    /// Resolved tokens as literal definitions, ready for export
    pub fn to_token_set(&self) -> TokenSet {
        self.tokens
            .iter()
            .map(|(name, token)| {
                (
                    name.clone(),
                    TokenDefinition {
                        value: token.value.clone(),
                        token_type: token.token_type,
                        description: token.description.clone(),
                    },
                )
            })
            .collect()
    }
}

/// Look up a resolved token by name
pub fn find_token<'a>(resolution: &'a Resolution, name: &str) -> Option<&'a ResolvedToken> {
    resolution.get(name)
}

/// Resolve every alias in a merged set
///
/// Never fails as a whole: cycles and missing targets are recorded on the
/// affected tokens only.
pub fn resolve_tokens(merged: &TokenSet) -> Resolution {
    let parsed: HashMap<&str, TokenValue> = merged
        .iter()
        .map(|(name, definition)| (name.as_str(), definition.parsed_value()))
        .collect();

    let mut resolver = Resolver {
        parsed: &parsed,
        outcomes: HashMap::new(),
    };

    for name in merged.keys() {
        resolver.visit(name);
    }

    let mut outcomes = resolver.outcomes;
    let tokens: IndexMap<String, ResolvedToken> = merged
        .iter()
        .map(|(name, definition)| {
            let (value, status) = match outcomes.remove(name.as_str()) {
                Some(Ok(done)) if done.missing.is_empty() => (done.value, ResolutionStatus::Resolved),
                Some(Ok(done)) => (done.value, ResolutionStatus::Unresolved { missing: done.missing }),
                Some(Err(err)) => (definition.value.clone(), ResolutionStatus::Circular(err)),
                None => (definition.value.clone(), ResolutionStatus::Resolved),
            };

            let token = ResolvedToken {
                name: name.clone(),
                value,
                token_type: definition.token_type,
                description: definition.description.clone(),
                status,
            };
            (name.clone(), token)
        })
        .collect();

    let resolution = Resolution { tokens };

    let unresolved = resolution.unresolved_references();
    for err in &unresolved {
        warn!(token = %err.token, reference = %err.reference, "unresolved token reference");
    }
    debug!(
        tokens = resolution.len(),
        unresolved = unresolved.len(),
        circular = resolution.circular_errors().count(),
        "resolved token set"
    );

    resolution
}

/// A finished token value and the missing names it picked up on the way
#[derive(Debug, Clone)]
struct Done {
    value: Value,
    missing: Vec<String>,
}

type Outcome = Result<Done, CircularReferenceError>;

/// A token whose dependencies are being walked
struct Frame<'a> {
    name: &'a str,
    deps: Vec<&'a str>,
    next: usize,
}

struct Resolver<'a> {
    parsed: &'a HashMap<&'a str, TokenValue>,
    outcomes: HashMap<&'a str, Outcome>,
}

impl<'a> Resolver<'a> {
    fn frame(&self, name: &'a str) -> Frame<'a> {
        let deps = self.parsed.get(name).map(|v| v.references()).unwrap_or_default();
        Frame { name, deps, next: 0 }
    }

    /// Depth-first walk from `root` with an explicit stack
    ///
    /// A token is finished only after every dependency is finished, so
    /// substitution never sees an unfinished reference.
    fn visit(&mut self, root: &'a str) {
        if self.outcomes.contains_key(root) {
            return;
        }

        let mut stack = vec![self.frame(root)];
        let mut on_stack: HashMap<&'a str, usize> = HashMap::from([(root, 0)]);

        loop {
            let next_dep = match stack.last_mut() {
                None => break,
                Some(top) => {
                    let dep = top.deps.get(top.next).copied();
                    if dep.is_some() {
                        top.next += 1;
                    }
                    dep
                }
            };

            match next_dep {
                Some(dep) => {
                    if self.outcomes.contains_key(dep) || !self.parsed.contains_key(dep) {
                        continue;
                    }

                    if let Some(&pos) = on_stack.get(dep) {
                        let cycle: Vec<&'a str> = stack[pos..].iter().map(|f| f.name).collect();
                        self.fail_cycle(&cycle);
                        for frame in stack.drain(pos..) {
                            on_stack.remove(frame.name);
                        }
                        continue;
                    }

                    on_stack.insert(dep, stack.len());
                    stack.push(self.frame(dep));
                }
                None => {
                    if let Some(frame) = stack.pop() {
                        on_stack.remove(frame.name);
                        let outcome = match self.cycle_through(&frame) {
                            Some(err) => {
                                warn!(token = %frame.name, error = %err, "circular token reference");
                                Err(err)
                            }
                            None => self.finish(frame.name),
                        };
                        self.outcomes.insert(frame.name, outcome);
                    }
                }
            }
        }
    }

    /// Record a cycle on each member, rotated to start at that member
    fn fail_cycle(&mut self, cycle: &[&'a str]) {
        for (i, &member) in cycle.iter().enumerate() {
            let chain: Vec<String> = cycle[i..]
                .iter()
                .chain(cycle[..i].iter())
                .chain(std::iter::once(&member))
                .map(|s| s.to_string())
                .collect();

            let err = CircularReferenceError { chain };
            warn!(token = %member, error = %err, "circular token reference");
            self.outcomes.insert(member, Err(err));
        }
    }

    /// The cycle `frame` belongs to when a failed dependency leads back to it
    ///
    /// A cycle found deeper in the walk unwinds the frames above it, so a
    /// token can close a second loop through that cycle without having been
    /// on the stack when it was detected.
    fn cycle_through(&self, frame: &Frame<'a>) -> Option<CircularReferenceError> {
        frame
            .deps
            .iter()
            .copied()
            .filter(|dep| matches!(self.outcomes.get(dep), Some(Err(_))))
            .find_map(|dep| self.path_between(dep, frame.name))
            .map(|path| CircularReferenceError {
                chain: std::iter::once(frame.name)
                    .chain(path)
                    .map(str::to_string)
                    .collect(),
            })
    }

    /// Shortest reference path from `from` to `to`, both ends included
    fn path_between(&self, from: &'a str, to: &str) -> Option<Vec<&'a str>> {
        let mut parents: HashMap<&'a str, &'a str> = HashMap::new();
        let mut seen: HashSet<&'a str> = HashSet::from([from]);
        let mut queue = VecDeque::from([from]);

        while let Some(node) = queue.pop_front() {
            if node == to {
                let mut path = vec![node];
                let mut current = node;
                while let Some(&parent) = parents.get(current) {
                    path.push(parent);
                    current = parent;
                }
                path.reverse();
                return Some(path);
            }

            let Some(parsed) = self.parsed.get(node) else {
                continue;
            };
            for next in parsed.references() {
                if seen.insert(next) {
                    parents.insert(next, node);
                    queue.push_back(next);
                }
            }
        }

        None
    }

    fn finish(&self, name: &str) -> Outcome {
        let mut missing = Vec::new();
        let value = match self.parsed.get(name) {
            Some(parsed) => self.substitute(parsed, &mut missing)?,
            None => Value::Null,
        };
        Ok(Done { value, missing })
    }

    fn substitute(&self, value: &TokenValue, missing: &mut Vec<String>) -> Result<Value, CircularReferenceError> {
        match value {
            TokenValue::Literal(literal) => Ok(literal.clone()),
            TokenValue::Reference(name) => self.lookup(name, missing),
            TokenValue::Template(segments) => {
                let mut out = String::new();
                for segment in segments {
                    match segment {
                        Segment::Text(text) => out.push_str(text),
                        Segment::Reference(name) => out.push_str(&stringify(&self.lookup(name, missing)?)),
                    }
                }
                Ok(Value::String(out))
            }
            TokenValue::Composite(fields) => {
                let mut object = Map::new();
                for (key, field) in fields {
                    object.insert(key.clone(), self.substitute(field, missing)?);
                }
                Ok(Value::Object(object))
            }
            TokenValue::List(items) => items
                .iter()
                .map(|item| self.substitute(item, missing))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
        }
    }

    fn lookup(&self, name: &str, missing: &mut Vec<String>) -> Result<Value, CircularReferenceError> {
        match self.outcomes.get(name) {
            Some(Ok(done)) => {
                for reference in &done.missing {
                    push_unique(missing, reference);
                }
                Ok(done.value.clone())
            }
            Some(Err(err)) => Err(err.clone()),
            None => {
                push_unique(missing, name);
                Ok(Value::String(reference_text(name)))
            }
        }
    }
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

/// Text form of a value substituted into a larger string
fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn merged(tokens: &[(&str, Value)]) -> TokenSet {
        tokens
            .iter()
            .map(|(name, value)| (name.to_string(), TokenDefinition::new(value.clone(), TokenType::Implicit)))
            .collect()
    }

    #[test]
    fn test_literal_is_unchanged() {
        let resolution = resolve_tokens(&merged(&[("a", json!("#ff0000")), ("b", json!(4))]));
        assert_eq!(resolution.value("a"), Some(&json!("#ff0000")));
        assert_eq!(resolution.value("b"), Some(&json!(4)));
        assert!(resolution.iter().all(ResolvedToken::is_resolved));
    }

    #[test]
    fn test_multi_hop_alias() {
        let resolution = resolve_tokens(&merged(&[
            ("x", json!("{a}")),
            ("a", json!("{b}")),
            ("b", json!("red")),
        ]));
        assert_eq!(resolution.value("x"), Some(&json!("red")));
        assert_eq!(resolution.value("a"), Some(&json!("red")));
    }

    #[test]
    fn test_pure_alias_preserves_type() {
        let resolution = resolve_tokens(&merged(&[
            ("size.base", json!(8)),
            ("size.alias", json!("{size.base}")),
            ("shadow", json!({ "x": 0, "y": 2 })),
            ("shadow.alias", json!("{shadow}")),
        ]));
        assert_eq!(resolution.value("size.alias"), Some(&json!(8)));
        assert_eq!(resolution.value("shadow.alias"), Some(&json!({ "x": 0, "y": 2 })));
    }

    #[test]
    fn test_template_stringifies_each_reference() {
        let resolution = resolve_tokens(&merged(&[
            ("spacing.small", json!(4)),
            ("spacing.large", json!("16px")),
            ("padding", json!("{spacing.small} {spacing.large}")),
        ]));
        assert_eq!(resolution.value("padding"), Some(&json!("4 16px")));
    }

    #[test]
    fn test_two_token_cycle() {
        let resolution = resolve_tokens(&merged(&[
            ("a", json!("{b}")),
            ("b", json!("{a}")),
            ("c", json!("blue")),
        ]));

        match &resolution.get("a").unwrap().status {
            ResolutionStatus::Circular(err) => assert_eq!(err.chain, vec!["a", "b", "a"]),
            other => panic!("expected cycle, got {other:?}"),
        }
        match &resolution.get("b").unwrap().status {
            ResolutionStatus::Circular(err) => assert_eq!(err.chain, vec!["b", "a", "b"]),
            other => panic!("expected cycle, got {other:?}"),
        }
        assert_eq!(resolution.value("a"), Some(&json!("{b}")));
        assert_eq!(resolution.value("c"), Some(&json!("blue")));
        assert!(resolution.get("c").unwrap().is_resolved());
        assert_eq!(resolution.circular_errors().count(), 2);
    }

    #[test]
    fn test_cycle_closed_through_another_cycle() {
        let resolution = resolve_tokens(&merged(&[
            ("a", json!("{b}")),
            ("b", json!("{c} {a}")),
            ("c", json!("{b}")),
            ("d", json!("{a}")),
        ]));

        let chain = |name: &str| match &resolution.get(name).unwrap().status {
            ResolutionStatus::Circular(err) => err.chain.clone(),
            other => panic!("expected cycle for {name}, got {other:?}"),
        };
        assert_eq!(chain("a"), vec!["a", "b", "a"]);
        assert_eq!(chain("b"), vec!["b", "c", "b"]);
        assert_eq!(chain("c"), vec!["c", "b", "c"]);
        assert_eq!(chain("d"), vec!["a", "b", "a"]);
        assert_eq!(resolution.value("b"), Some(&json!("{c} {a}")));
    }

    #[test]
    fn test_self_reference() {
        let resolution = resolve_tokens(&merged(&[("a", json!("{a} and more"))]));
        match &resolution.get("a").unwrap().status {
            ResolutionStatus::Circular(err) => {
                assert_eq!(err.chain, vec!["a", "a"]);
                assert_eq!(err.to_string(), "circular reference: a -> a");
            }
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_dependent_of_cycle_reports_reached_cycle() {
        let resolution = resolve_tokens(&merged(&[
            ("entry", json!("{b}")),
            ("b", json!("{c}")),
            ("c", json!("{b}")),
        ]));
        match &resolution.get("entry").unwrap().status {
            ResolutionStatus::Circular(err) => assert_eq!(err.chain, vec!["b", "c", "b"]),
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_reference_leaves_marker() {
        let resolution = resolve_tokens(&merged(&[
            ("a", json!("{nonexistent.token}")),
            ("b", json!("1px solid {nonexistent.token}")),
            ("c", json!("{a}")),
            ("d", json!("fine")),
        ]));

        assert_eq!(resolution.value("a"), Some(&json!("{nonexistent.token}")));
        assert_eq!(resolution.value("b"), Some(&json!("1px solid {nonexistent.token}")));
        assert_eq!(resolution.value("c"), Some(&json!("{nonexistent.token}")));
        assert_eq!(
            resolution.get("c").unwrap().status,
            ResolutionStatus::Unresolved { missing: vec!["nonexistent.token".to_string()] }
        );
        assert!(resolution.get("d").unwrap().is_resolved());
        assert_eq!(resolution.unresolved_references().len(), 3);
    }

    #[test]
    fn test_composite_resolves_field_by_field() {
        let resolution = resolve_tokens(&merged(&[
            ("font.family", json!("Inter")),
            ("font.size", json!(16)),
            ("colors.shadow", json!("#00000040")),
            (
                "type.body",
                json!({ "fontFamily": "{font.family}", "fontSize": "{font.size}", "fontWeight": "{font.weight}" }),
            ),
            (
                "shadow.card",
                json!([
                    { "type": "dropShadow", "x": 0, "y": "{font.size}", "blur": 8, "spread": 0, "color": "{colors.shadow}" },
                    { "type": "innerShadow", "x": 1, "y": 1, "blur": 2, "spread": 0, "color": "#fff" }
                ]),
            ),
        ]));

        assert_eq!(
            resolution.value("type.body"),
            Some(&json!({ "fontFamily": "Inter", "fontSize": 16, "fontWeight": "{font.weight}" }))
        );
        assert_eq!(
            resolution.get("type.body").unwrap().status,
            ResolutionStatus::Unresolved { missing: vec!["font.weight".to_string()] }
        );
        assert_eq!(
            resolution.value("shadow.card").unwrap()[0],
            json!({ "type": "dropShadow", "x": 0, "y": 16, "blur": 8, "spread": 0, "color": "#00000040" })
        );
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let depth = 20_000;
        let mut tokens: Vec<(String, Value)> = (0..depth)
            .map(|i| (format!("t{i}"), json!(format!("{{t{}}}", i + 1))))
            .collect();
        tokens.push((format!("t{depth}"), json!("end")));

        let set: TokenSet = tokens
            .into_iter()
            .map(|(name, value)| (name, TokenDefinition::new(value, TokenType::Other)))
            .collect();

        let resolution = resolve_tokens(&set);
        assert_eq!(resolution.value("t0"), Some(&json!("end")));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let set = merged(&[
            ("a", json!("{b} {c}")),
            ("b", json!("{c}")),
            ("c", json!({ "k": "{missing}" })),
            ("d", json!("{e}")),
            ("e", json!("{d}")),
        ]);

        let first = resolve_tokens(&set);
        let second = resolve_tokens(&set);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first.values()).unwrap(),
            serde_json::to_string(&second.values()).unwrap()
        );
    }

    #[test]
    fn test_find_token_and_export_set() {
        let resolution = resolve_tokens(&merged(&[("a", json!("{b}")), ("b", json!(2))]));
        assert_eq!(find_token(&resolution, "a").map(|t| &t.value), Some(&json!(2)));
        assert!(find_token(&resolution, "zzz").is_none());

        let literal = resolution.to_token_set();
        assert_eq!(literal["a"].value, json!(2));
    }
}
