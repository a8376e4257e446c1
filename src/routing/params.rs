//! Path parameters captured by the matching engine.

use matchit::Params;

/// Parameters captured from the request path, e.g. `id` for `/items/{id}`.
///
/// Inserted into the request extensions before the handler runs:
///
/// ```rust,ignore
/// let id = request.extensions().get::<RouteParams>().and_then(|p| p.get("id"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: Vec<(String, String)>,
}

impl RouteParams {
    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(name, value)` pairs in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl From<&Params<'_, '_>> for RouteParams {
    fn from(params: &Params<'_, '_>) -> Self {
        Self {
            params: params
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
        }
    }
}
