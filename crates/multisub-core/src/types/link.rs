/// Base URL used when building links handed out to subscribers.
///
/// Holds the operator-configured value, if any. When nothing is configured
/// the base comes from the request being served.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicBaseUrl(Option<String>);

impl PublicBaseUrl {
    /// Wrap a configured value. Blank values count as unconfigured.
    #[must_use]
    pub fn new(configured: Option<&str>) -> Self {
        Self(
            configured
                .map(|value| value.trim().trim_end_matches('/'))
                .filter(|value| !value.is_empty())
                .map(String::from),
        )
    }

    /// The configured base, without trailing slash
    #[must_use]
    pub fn configured(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Configured base if present, otherwise `scheme://host` of the request
    #[must_use]
    pub fn resolve(&self, request_scheme: &str, request_host: &str) -> String {
        match &self.0 {
            Some(base) => base.clone(),
            None => format!("{request_scheme}://{}", request_host.trim_end_matches('/')),
        }
    }

    /// Full subscription link for aggregation `id`
    #[must_use]
    pub fn link_for(&self, request_scheme: &str, request_host: &str, id: &str) -> String {
        subscription_link(&self.resolve(request_scheme, request_host), id)
    }
}

/// `{base}/sub/{id}`
#[must_use]
pub fn subscription_link(base: &str, id: &str) -> String {
    format!("{}/sub/{id}", base.trim_end_matches('/'))
}
