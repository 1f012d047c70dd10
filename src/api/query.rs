//! Query-string construction for API requests.
//!
//! Parameters keep insertion order so the same call always produces the same
//! URL. Optional values that are absent are skipped entirely, never emitted
//! as empty strings.

use std::fmt;

/// An ordered set of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn push(mut self, key: &'static str, value: impl ToString) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Append a parameter only when a value was supplied.
    pub fn push_opt<V: ToString>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.push(key, v),
            None => self,
        }
    }

    /// Append a list as a single comma-separated parameter.
    ///
    /// An empty list is treated as absent.
    pub fn push_list<V: ToString>(self, key: &'static str, values: &[V]) -> Self {
        if values.is_empty() {
            return self;
        }
        let joined = values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.push(key, joined)
    }

    /// Check whether no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Get the value of the first parameter named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over parameter names in order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pairs.iter().map(|(k, _)| *k)
    }

    /// Append the encoded query string to `url`.
    ///
    /// Returns `url` unchanged when there are no parameters.
    pub fn apply_to(&self, url: &str) -> String {
        if self.is_empty() {
            url.to_string()
        } else {
            format!("{}?{}", url, self)
        }
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(
                f,
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_leave_url_untouched() {
        let params = QueryParams::new();
        assert!(params.is_empty());
        assert_eq!(params.apply_to("http://api/webhooklogs"), "http://api/webhooklogs");
    }

    #[test]
    fn test_push_preserves_order() {
        let params = QueryParams::new().push("project", "p").push("task", 3).push("us", 5);
        assert_eq!(params.to_string(), "project=p&task=3&us=5");
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["project", "task", "us"]);
    }

    #[test]
    fn test_push_opt_skips_none() {
        let params = QueryParams::new()
            .push("project", "p")
            .push_opt::<u64>("us", None)
            .push_opt("task", Some(7));
        assert_eq!(params.to_string(), "project=p&task=7");
        assert_eq!(params.get("us"), None);
    }

    #[test]
    fn test_omitting_twice_is_same_as_once() {
        let once = QueryParams::new().push("project", "p").push_opt::<u64>("us", None);
        let twice = QueryParams::new()
            .push("project", "p")
            .push_opt::<u64>("us", None)
            .push_opt::<u64>("us", None);
        assert_eq!(once, twice);
        assert_eq!(once.to_string(), twice.to_string());
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let params = QueryParams::new().push("slug", "home page&more");
        assert_eq!(params.to_string(), "slug=home%20page%26more");
    }

    #[test]
    fn test_push_list() {
        let params = QueryParams::new()
            .push_list("members", &[1, 2, 3])
            .push_list::<u64>("empty", &[]);
        assert_eq!(params.to_string(), "members=1%2C2%2C3");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_apply_to() {
        let params = QueryParams::new().push("webhook", 7);
        assert_eq!(params.apply_to("http://api/webhooklogs"), "http://api/webhooklogs?webhook=7");
    }
}
