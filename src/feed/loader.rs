use super::schema;
use super::source::Source;
use super::types::Article;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that end a load.
///
/// Both variants are terminal for the invocation that triggered the load:
/// the caller logs them and keeps whatever it rendered last.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The feed could not be retrieved at all.
    #[error("Data unavailable: {0}")]
    DataUnavailable(#[from] Unavailable),
    /// The feed was retrieved but does not have the expected shape.
    #[error("Data malformed: {0}")]
    DataMalformed(String),
}

/// Transport-level reasons behind [`LoadError::DataUnavailable`].
#[derive(Debug, Error)]
pub enum Unavailable {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("request timed out")]
    Timeout,
    /// Body exceeded the 10MB size limit
    #[error("response too large")]
    ResponseTooLarge,
    /// Response was incomplete (received fewer bytes than Content-Length)
    #[error("incomplete response: expected {expected} bytes, received {received}")]
    IncompleteResponse { expected: u64, received: usize },
    /// Local file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Retrieves and decodes the article collection from a [`Source`].
///
/// Cheap to clone: `reqwest::Client` is reference counted, so each background
/// invocation gets its own handle.
#[derive(Debug, Clone)]
pub struct Loader {
    client: reqwest::Client,
    source: Source,
    timeout: Duration,
    max_bytes: usize,
}

impl Loader {
    pub fn new(client: reqwest::Client, source: Source) -> Self {
        Self {
            client,
            source,
            timeout: DEFAULT_TIMEOUT,
            max_bytes: MAX_FEED_SIZE,
        }
    }

    /// Override the remote fetch timeout (default 30 seconds).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Load the full article collection.
    ///
    /// # Errors
    ///
    /// - [`LoadError::DataUnavailable`] on transport failure, non-2xx status,
    ///   timeout, oversized or truncated body, or an unreadable file
    /// - [`LoadError::DataMalformed`] when the body is not a valid feed document
    ///
    /// Nothing is retried.
    pub async fn load(&self) -> Result<Vec<Article>, LoadError> {
        let bytes = match &self.source {
            Source::Remote(url) => {
                tokio::time::timeout(self.timeout, self.fetch_remote(url))
                    .await
                    .map_err(|_| Unavailable::Timeout)??
            }
            Source::Local(path) => self.read_local(path).await?,
        };

        let articles = schema::decode(&bytes).map_err(LoadError::DataMalformed)?;
        tracing::debug!(
            source = %self.source,
            bytes = bytes.len(),
            articles = articles.len(),
            "Loaded article feed"
        );
        Ok(articles)
    }

    async fn fetch_remote(&self, url: &url::Url) -> Result<Vec<u8>, Unavailable> {
        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(Unavailable::HttpStatus(response.status().as_u16()));
        }

        read_limited_bytes(response, self.max_bytes).await
    }

    async fn read_local(&self, path: &Path) -> Result<Vec<u8>, Unavailable> {
        let io_err = |source| Unavailable::Io {
            path: path.to_path_buf(),
            source,
        };

        let meta = tokio::fs::metadata(path).await.map_err(io_err)?;
        if meta.len() > self.max_bytes as u64 {
            return Err(Unavailable::ResponseTooLarge);
        }

        tokio::fs::read(path).await.map_err(io_err)
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, Unavailable> {
    let expected_length = response.content_length();

    // Fast path: check Content-Length header
    if let Some(len) = expected_length {
        if len as usize > limit {
            return Err(Unavailable::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(Unavailable::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    if let Some(expected) = expected_length {
        if (bytes.len() as u64) < expected {
            return Err(Unavailable::IncompleteResponse {
                expected,
                received: bytes.len(),
            });
        }
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const VALID_FEED: &str = r#"{"articles": [
        {"title": "Alpha", "content": "a", "date": "2024-01-01", "category": "tech", "views": 10, "wordCount": 400},
        {"title": "Beta", "content": "b", "date": "2024-06-01", "category": "sports", "views": 50, "wordCount": 100}
    ]}"#;

    fn remote_loader(server: &MockServer) -> Loader {
        let source = Source::parse(&format!("{}/articles.json", server.uri())).unwrap();
        Loader::new(reqwest::Client::new(), source)
    }

    #[tokio::test]
    async fn test_remote_load_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(VALID_FEED)
                    .insert_header("Content-Type", "application/json"),
            )
            .mount(&server)
            .await;

        let articles = remote_loader(&server).load().await.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "Alpha");
    }

    #[tokio::test]
    async fn test_remote_404_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        match remote_loader(&server).load().await.unwrap_err() {
            LoadError::DataUnavailable(Unavailable::HttpStatus(404)) => {}
            e => panic!("Expected HttpStatus(404), got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_remote_500_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        match remote_loader(&server).load().await.unwrap_err() {
            LoadError::DataUnavailable(Unavailable::HttpStatus(500)) => {}
            e => panic!("Expected HttpStatus(500), got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_remote_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"posts": []}"#))
            .mount(&server)
            .await;

        match remote_loader(&server).load().await.unwrap_err() {
            LoadError::DataMalformed(_) => {}
            e => panic!("Expected DataMalformed, got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_remote_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(VALID_FEED)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let loader = remote_loader(&server).with_timeout(Duration::from_millis(50));
        match loader.load().await.unwrap_err() {
            LoadError::DataUnavailable(Unavailable::Timeout) => {}
            e => panic!("Expected Timeout, got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_remote_body_over_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(VALID_FEED))
            .mount(&server)
            .await;

        let mut loader = remote_loader(&server);
        loader.max_bytes = 16;
        match loader.load().await.unwrap_err() {
            LoadError::DataUnavailable(Unavailable::ResponseTooLarge) => {}
            e => panic!("Expected ResponseTooLarge, got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_local_load_success() {
        let dir = std::env::temp_dir().join("newsdesk_loader_test_local");
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("articles.json");
        std::fs::write(&file, VALID_FEED).unwrap();

        let loader = Loader::new(reqwest::Client::new(), Source::Local(file));
        let articles = loader.load().await.unwrap();
        assert_eq!(articles.len(), 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_local_missing_file_is_unavailable() {
        let file = std::env::temp_dir().join("newsdesk_loader_test_missing/articles.json");
        let loader = Loader::new(reqwest::Client::new(), Source::Local(file));
        match loader.load().await.unwrap_err() {
            LoadError::DataUnavailable(Unavailable::Io { .. }) => {}
            e => panic!("Expected Io error, got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_local_file_over_limit() {
        let dir = std::env::temp_dir().join("newsdesk_loader_test_large");
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("articles.json");
        std::fs::write(&file, VALID_FEED).unwrap();

        let mut loader = Loader::new(reqwest::Client::new(), Source::Local(file));
        loader.max_bytes = 8;
        match loader.load().await.unwrap_err() {
            LoadError::DataUnavailable(Unavailable::ResponseTooLarge) => {}
            e => panic!("Expected ResponseTooLarge, got {:?}", e),
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_error_messages_name_the_category() {
        let unavailable = LoadError::from(Unavailable::HttpStatus(503));
        assert_eq!(unavailable.to_string(), "Data unavailable: HTTP error: status 503");

        let malformed = LoadError::DataMalformed("missing field `views`".into());
        assert!(malformed.to_string().starts_with("Data malformed"));
    }
}
