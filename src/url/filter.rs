use url::Url;

/// Extensions of resources that never hold product content
pub const DEFAULT_DENIED_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".ico", ".css", ".js", ".pdf", ".zip",
];

/// Case-insensitive denylist of path extensions
#[derive(Debug, Clone)]
pub struct ExtensionDenylist {
    extensions: Vec<String>,
}

impl ExtensionDenylist {
    /// Creates a denylist; entries are matched case-insensitively
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Returns true if the URL's path ends with a denied extension
    ///
    /// Only the path is inspected, so `/logo.png?v=3` is denied while
    /// `/search?q=logo.png` is not.
    pub fn is_denied(&self, url: &Url) -> bool {
        let path = url.path().to_lowercase();
        self.extensions.iter().any(|ext| path.ends_with(ext.as_str()))
    }
}

impl Default for ExtensionDenylist {
    fn default() -> Self {
        Self::new(DEFAULT_DENIED_EXTENSIONS)
    }
}
