//! SQL-like query specifications
//!
//! A `QuerySpec` is the registry's equivalent of a parameterized document
//! query such as `SELECT * FROM c WHERE c.id = @id`. Filter values are always
//! carried as bound parameters; the rendered text is for logging only and
//! never has values spliced into it.
//!
//! Each filter is evaluated as JSON containment of `{path: value}` in the
//! document, which is plain equality for scalar values.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Default number of documents fetched per page
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// A named query parameter and its bound value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryParameter {
    pub name: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
struct FieldFilter {
    path: Vec<String>,
    parameter: String,
    value: Value,
}

impl FieldFilter {
    fn containment(&self) -> Value {
        self.path
            .iter()
            .rev()
            .fold(self.value.clone(), |inner, segment| {
                let mut object = Map::new();
                object.insert(segment.clone(), inner);
                Value::Object(object)
            })
    }
}

/// A parameterized equality query over one container
///
/// # Examples
///
/// ```rust
/// use core_kernel::documents::QuerySpec;
///
/// let spec = QuerySpec::by_id("42");
/// assert_eq!(spec.query_text(), "SELECT * FROM c WHERE c.id = @id");
///
/// let spec = QuerySpec::select_all().where_eq("login.username", "jdoe");
/// assert_eq!(spec.query_text(), "SELECT * FROM c WHERE c.login.username = @login_username");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySpec {
    filters: Vec<FieldFilter>,
}

impl QuerySpec {
    /// Full scan of the container
    pub fn select_all() -> Self {
        Self::default()
    }

    /// Equality lookup on the document identifier
    pub fn by_id(id: impl Into<String>) -> Self {
        Self::select_all().where_eq("id", Value::String(id.into()))
    }

    /// Adds an equality filter on a dotted property path
    ///
    /// Blank path segments are dropped; a path with no segments left adds no
    /// filter.
    pub fn where_eq(mut self, path: &str, value: impl Into<Value>) -> Self {
        let segments: Vec<String> = path
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if segments.is_empty() {
            return self;
        }

        let base = format!("@{}", segments.join("_"));
        let taken = self.filters.iter().filter(|f| f.path == segments).count();
        let parameter = if taken == 0 { base } else { format!("{}{}", base, taken) };

        self.filters.push(FieldFilter {
            path: segments,
            parameter,
            value: value.into(),
        });
        self
    }

    /// Returns true when the query has no filters
    pub fn is_full_scan(&self) -> bool {
        self.filters.is_empty()
    }

    /// Renders the query text with parameter placeholders
    pub fn query_text(&self) -> String {
        if self.filters.is_empty() {
            return "SELECT * FROM c".to_string();
        }
        let predicates: Vec<String> = self
            .filters
            .iter()
            .map(|f| format!("c.{} = {}", f.path.join("."), f.parameter))
            .collect();
        format!("SELECT * FROM c WHERE {}", predicates.join(" AND "))
    }

    /// Returns the bound parameters in declaration order
    pub fn parameters(&self) -> Vec<QueryParameter> {
        self.filters
            .iter()
            .map(|f| QueryParameter {
                name: f.parameter.clone(),
                value: f.value.clone(),
            })
            .collect()
    }

    /// Returns one containment pattern per filter
    ///
    /// A document matches the query when it contains every pattern.
    pub fn containment_patterns(&self) -> Vec<Value> {
        self.filters.iter().map(FieldFilter::containment).collect()
    }

    /// Evaluates the query against a document in memory
    pub fn matches(&self, document: &Value) -> bool {
        self.containment_patterns()
            .iter()
            .all(|pattern| json_contains(document, pattern))
    }
}

impl fmt::Display for QuerySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query_text())
    }
}

/// JSON containment with the same rules as PostgreSQL's `@>` operator
pub fn json_contains(document: &Value, pattern: &Value) -> bool {
    match (document, pattern) {
        (Value::Object(doc), Value::Object(pat)) => pat
            .iter()
            .all(|(key, expected)| doc.get(key).is_some_and(|actual| json_contains(actual, expected))),
        (Value::Array(doc), Value::Array(pat)) => pat
            .iter()
            .all(|expected| doc.iter().any(|actual| json_contains(actual, expected))),
        (Value::Array(doc), scalar) if !scalar.is_object() => doc.iter().any(|actual| actual == scalar),
        (actual, expected) => actual == expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_select_all_text() {
        let spec = QuerySpec::select_all();
        assert!(spec.is_full_scan());
        assert_eq!(spec.query_text(), "SELECT * FROM c");
        assert!(spec.parameters().is_empty());
    }

    #[test]
    fn test_by_id_binds_parameter() {
        let spec = QuerySpec::by_id("abc\" OR 1=1");
        assert_eq!(spec.query_text(), "SELECT * FROM c WHERE c.id = @id");
        let params = spec.parameters();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "@id");
        assert_eq!(params[0].value, json!("abc\" OR 1=1"));
    }

    #[test]
    fn test_repeated_paths_get_distinct_parameters() {
        let spec = QuerySpec::select_all()
            .where_eq("gender", "female")
            .where_eq("gender", "male");
        let names: Vec<_> = spec.parameters().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["@gender", "@gender1"]);
    }

    #[test]
    fn test_blank_path_is_ignored() {
        let spec = QuerySpec::select_all().where_eq(" . ", 1);
        assert!(spec.is_full_scan());
    }

    #[test]
    fn test_nested_containment_pattern() {
        let spec = QuerySpec::select_all().where_eq("location.city", "Izmir");
        assert_eq!(
            spec.containment_patterns(),
            vec![json!({"location": {"city": "Izmir"}})]
        );
    }

    #[test]
    fn test_matches_nested_value() {
        let doc = json!({"id": "1", "location": {"city": "Izmir", "country": "TR"}});
        assert!(QuerySpec::select_all().where_eq("location.city", "Izmir").matches(&doc));
        assert!(!QuerySpec::select_all().where_eq("location.city", "Ankara").matches(&doc));
        assert!(!QuerySpec::select_all().where_eq("missing.path", "x").matches(&doc));
        assert!(QuerySpec::select_all().matches(&doc));
    }

    #[test]
    fn test_conflicting_filters_never_match() {
        let doc = json!({"id": "1"});
        let spec = QuerySpec::by_id("1").where_eq("id", "2");
        assert!(!spec.matches(&doc));
    }

    #[test]
    fn test_json_contains_arrays() {
        assert!(json_contains(&json!([1, 2, 3]), &json!([3, 1])));
        assert!(!json_contains(&json!([1, 2]), &json!([4])));
        assert!(json_contains(&json!(["a", "b"]), &json!("a")));
    }
}
