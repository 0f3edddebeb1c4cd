use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Errors raised while interpreting a feed source string.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source string was empty or whitespace.
    #[error("Feed source is empty")]
    Empty,
    /// The URL uses a scheme other than http, https or file.
    #[error("Unsupported scheme: {0} (only http/https/file allowed)")]
    UnsupportedScheme(String),
    /// A `file://` URL that does not map to a local path.
    #[error("Invalid file URL: {0}")]
    InvalidFileUrl(String),
}

/// Where the article feed lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A static resource fetched over HTTP(S).
    Remote(Url),
    /// A file on the local filesystem.
    Local(PathBuf),
}

impl Source {
    /// Interpret a user-supplied source string.
    ///
    /// `http://` and `https://` URLs are fetched remotely, `file://` URLs and
    /// anything that does not parse as an absolute URL are read as paths.
    ///
    /// ```
    /// use newsdesk::feed::Source;
    ///
    /// assert!(matches!(Source::parse("https://example.com/articles.json"), Ok(Source::Remote(_))));
    /// assert!(matches!(Source::parse("articles.json"), Ok(Source::Local(_))));
    /// assert!(Source::parse("ftp://example.com/articles.json").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, SourceError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SourceError::Empty);
        }

        let url = match Url::parse(trimmed) {
            Ok(url) => url,
            Err(_) => return Ok(Source::Local(PathBuf::from(trimmed))),
        };

        match url.scheme() {
            "http" | "https" => Ok(Source::Remote(url)),
            "file" => url
                .to_file_path()
                .map(Source::Local)
                .map_err(|_| SourceError::InvalidFileUrl(trimmed.to_owned())),
            // Windows drive letters ("C:\feeds\articles.json") parse as a one-letter scheme
            scheme if scheme.len() == 1 => Ok(Source::Local(PathBuf::from(trimmed))),
            scheme => Err(SourceError::UnsupportedScheme(scheme.to_owned())),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Remote(url) => write!(f, "{}", url),
            Source::Local(path) => write!(f, "{}", path.display()),
        }
    }
}
