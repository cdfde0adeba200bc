/// GraphQL schema language text from a single source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    source: String,
    sdl: String,
}

impl Fragment {
    #[must_use]
    pub fn new(source: impl Into<String>, sdl: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            sdl: sdl.into(),
        }
    }

    /// File path or URL the text came from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn sdl(&self) -> &str {
        &self.sdl
    }

    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.source, self.sdl)
    }
}
