use reqwest::Url;

/// Path of the results view
pub const RESULTS_PATH: &str = "/search";

/// Query parameter shared by the search form and the results view
pub const QUERY_PARAM: &str = "query";

/// Navigation target produced by the search form and read by the results view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRoute {
    query: String,
}

impl SearchRoute {
    /// Handles a search form submission; blank input does not navigate anywhere
    pub fn submit(input: &str) -> Option<Self> {
        let query = input.trim();
        if query.is_empty() {
            None
        } else {
            Some(Self {
                query: query.to_string(),
            })
        }
    }

    /// Reads the query from a results URL; a missing parameter means an empty query
    pub fn from_url(url: &Url) -> Self {
        let query = url
            .query_pairs()
            .find(|(key, _)| key == QUERY_PARAM)
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();
        Self { query }
    }

    /// Results URL on the given origin
    pub fn to_url(&self, origin: &Url) -> Url {
        let mut url = origin.clone();
        url.set_path(RESULTS_PATH);
        url.set_fragment(None);
        url.query_pairs_mut()
            .clear()
            .append_pair(QUERY_PARAM, &self.query);
        url
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}
