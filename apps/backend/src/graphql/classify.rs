//! Public/protected classification of inbound GraphQL bodies.
//!
//! Two classifiers share one rule order: introspection-only requests are
//! public, requests naming an allow-listed operation are public, anything
//! else is protected.
//!
//! [`ClassifierMode::Substring`] applies those rules to the raw body text.
//! It is cheap but fooled by any protected request that merely mentions an
//! allow-listed name (in an alias, argument or comment), so it is opt-in.
//! [`ClassifierMode::Parsed`] applies them to the root fields of the parsed
//! document and treats anything it cannot parse as protected.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use async_graphql::parser::parse_query;
use async_graphql::parser::types::{ExecutableDocument, Selection, SelectionSet};
use serde::Deserialize;
use tracing::debug;

/// Largest body the gate will buffer.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub const INTROSPECTION_MARKERS: &[&str] = &[
    "__schema",
    "__type",
    "__typename",
    "__directive",
    "__field",
    "__inputValue",
    "__enumValue",
];

pub const PROTECTED_OPERATIONS: &[&str] = &[
    "customers",
    "customer",
    "customersByType",
    "searchCustomers",
    "getCustomerWithErrorHandling",
    "customersByStatus",
    "premiumCustomersByTier",
    "updateCustomer",
    "deleteCustomer",
];

pub const PUBLIC_OPERATIONS: &[&str] = &[
    "createIndividualCustomer",
    "createBusinessCustomer",
    "createPremiumCustomer",
    "createCustomerWithErrorHandling",
    "login",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Public,
    Protected,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Public => "public",
            Classification::Protected => "protected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierMode {
    #[default]
    Parsed,
    Substring,
}

impl FromStr for ClassifierMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parsed" => Ok(ClassifierMode::Parsed),
            "substring" => Ok(ClassifierMode::Substring),
            other => Err(format!(
                "unknown classifier mode {other:?} (expected \"parsed\" or \"substring\")"
            )),
        }
    }
}

impl fmt::Display for ClassifierMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierMode::Parsed => f.write_str("parsed"),
            ClassifierMode::Substring => f.write_str("substring"),
        }
    }
}

/// The rule set the gate applies to each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GatePolicy {
    pub mode: ClassifierMode,
}

impl GatePolicy {
    pub fn new(mode: ClassifierMode) -> Self {
        Self { mode }
    }

    /// Classify a POST body (`{"query": ...}` JSON).
    pub fn classify(&self, body: &[u8]) -> Classification {
        match self.mode {
            ClassifierMode::Substring => classify_substring(&String::from_utf8_lossy(body)),
            ClassifierMode::Parsed => classify_parsed(body),
        }
    }

    /// Classify bare operation text, as carried by a GET request's `query`
    /// parameter.
    pub fn classify_query(&self, query: &str) -> Classification {
        match self.mode {
            ClassifierMode::Substring => classify_substring(query),
            ClassifierMode::Parsed => classify_document(query),
        }
    }
}

/// The part of a request body the gate looks at. A body without `query`
/// (such as a hash-only persisted query) does not decode.
#[derive(Deserialize)]
struct GateBody {
    query: String,
}

fn is_introspection_field(name: &str) -> bool {
    INTROSPECTION_MARKERS.contains(&name)
}

fn is_public_field(name: &str) -> bool {
    PUBLIC_OPERATIONS.contains(&name) || is_introspection_field(name)
}

pub fn classify_substring(text: &str) -> Classification {
    if INTROSPECTION_MARKERS.iter().any(|m| text.contains(m)) && is_only_introspection(text) {
        return Classification::Public;
    }
    if PUBLIC_OPERATIONS.iter().any(|op| text.contains(op)) {
        return Classification::Public;
    }
    Classification::Protected
}

// Only spaces and LFs are stripped; tabs and CRs survive.
fn is_only_introspection(text: &str) -> bool {
    let cleaned: String = text.chars().filter(|&c| c != ' ' && c != '\n').collect();
    !PROTECTED_OPERATIONS.iter().any(|op| cleaned.contains(op))
}

fn classify_parsed(body: &[u8]) -> Classification {
    match serde_json::from_slice::<GateBody>(body) {
        Ok(request) => classify_document(&request.query),
        Err(e) => {
            debug!(error = %e, "gate: body is not a GraphQL request");
            Classification::Protected
        }
    }
}

fn classify_document(query: &str) -> Classification {
    let document = match parse_query(query) {
        Ok(document) => document,
        Err(e) => {
            debug!(error = %e, "gate: document does not parse");
            return Classification::Protected;
        }
    };
    let Some(fields) = root_field_names(&document) else {
        return Classification::Protected;
    };
    classify_root_fields(&fields)
}

/// Root fields of every operation, looking through inline fragments and
/// fragment spreads. `None` when a spread names an unknown fragment or
/// fragments spread each other in a cycle.
pub fn root_field_names(document: &ExecutableDocument) -> Option<Vec<&str>> {
    let mut fields = Vec::new();
    for (_, operation) in document.operations.iter() {
        let mut visiting = HashSet::new();
        collect_fields(
            document,
            &operation.node.selection_set.node,
            &mut visiting,
            &mut fields,
        )?;
    }
    Some(fields)
}

fn collect_fields<'a>(
    document: &'a ExecutableDocument,
    selection_set: &'a SelectionSet,
    visiting: &mut HashSet<&'a str>,
    fields: &mut Vec<&'a str>,
) -> Option<()> {
    for selection in &selection_set.items {
        match &selection.node {
            Selection::Field(field) => fields.push(field.node.name.node.as_str()),
            Selection::InlineFragment(fragment) => {
                collect_fields(document, &fragment.node.selection_set.node, visiting, fields)?;
            }
            Selection::FragmentSpread(spread) => {
                let name = spread.node.fragment_name.node.as_str();
                if !visiting.insert(name) {
                    return None;
                }
                let fragment = document.fragments.get(&spread.node.fragment_name.node)?;
                collect_fields(document, &fragment.node.selection_set.node, visiting, fields)?;
                visiting.remove(name);
            }
        }
    }
    Some(())
}

/// Rule order applied to the root fields of a parsed document.
pub fn classify_root_fields(fields: &[&str]) -> Classification {
    if fields.is_empty() {
        return Classification::Protected;
    }
    if fields.iter().all(|f| is_introspection_field(f)) {
        return Classification::Public;
    }
    if fields.iter().all(|f| is_public_field(f)) {
        return Classification::Public;
    }
    Classification::Protected
}
