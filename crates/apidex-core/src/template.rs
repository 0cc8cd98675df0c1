//! Path templates.
//!
//! An item's `path` doubles as a template: the names in its query string
//! declare the inputs the endpoint requires. Values written in the template
//! are ignored; only the names carry forward into a resolved request.

use url::form_urlencoded;

/// A parsed item path: base path plus the ordered, de-duplicated parameter names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    base: String,
    params: Vec<String>,
}

impl PathTemplate {
    /// Parse an item path such as `/search?q=&page=1`.
    ///
    /// Parameter names are percent-decoded. Empty names are dropped.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let (base, query) = path.split_once('?').unwrap_or((path, ""));

        let mut params: Vec<String> = Vec::new();
        for (name, _value) in form_urlencoded::parse(query.as_bytes()) {
            if name.is_empty() || params.iter().any(|p| p.as_str() == name) {
                continue;
            }
            params.push(name.into_owned());
        }

        Self {
            base: base.to_string(),
            params,
        }
    }

    /// The path without its query string.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Declared parameter names in first-appearance order.
    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Whether the template declares any parameters.
    #[must_use]
    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }

    /// Build a request path from the base and the supplied `(name, value)` pairs.
    ///
    /// Pairs are encoded in the order given.
    pub fn resolve<'a, I>(&self, values: I) -> String
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in values {
            serializer.append_pair(name, value);
        }
        format!("{}?{}", self.base, serializer.finish())
    }
}
