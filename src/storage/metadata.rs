//! Sources of parasha/aliyah boundary metadata.
//!
//! The index API (and the cached documents it produces) describe each
//! parasha as a node under `alt_structs.Parasha.nodes`, with its name in
//! `sharedTitle` and one range string per aliyah in `refs`.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use non_empty_string::NonEmptyString;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::domain::{
    AliyahBoundary, BookMetadata, Config, ParashaBoundary, reference::ParseError,
};

/// Supplies the reading-portion structure of a book.
pub trait MetadataSource {
    /// Returns the boundary metadata of the named book.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the metadata cannot be obtained or does not
    /// have the expected shape.
    fn book_metadata(&self, book_name: &str) -> Result<BookMetadata, FetchError>;
}

/// Errors raised while obtaining book metadata.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent or its body could not be read.
    #[error("metadata request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("metadata request returned status {0}")]
    Status(u16),

    /// The document is not valid JSON.
    #[error("metadata is not valid JSON: {0}")]
    Json(serde_json::Error),

    /// The document is JSON but not an index document.
    #[error("unexpected metadata shape: {0}")]
    Shape(String),

    /// An aliyah range could not be parsed.
    #[error(transparent)]
    Reference(#[from] ParseError),

    /// The source has no metadata for this book.
    #[error("no metadata for book '{0}'")]
    NotFound(String),

    /// A cached document could not be read.
    #[error("failed to read metadata: {0}")]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        match error.classify() {
            serde_json::error::Category::Data => Self::Shape(error.to_string()),
            _ => Self::Json(error),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IndexDocument {
    alt_structs: AltStructs,
}

#[derive(Debug, Deserialize)]
struct AltStructs {
    #[serde(rename = "Parasha")]
    parasha: AltStruct,
}

#[derive(Debug, Deserialize)]
struct AltStruct {
    nodes: Vec<ParashaNode>,
}

#[derive(Debug, Deserialize)]
struct ParashaNode {
    #[serde(rename = "sharedTitle")]
    shared_title: String,
    refs: Vec<String>,
}

impl BookMetadata {
    /// Parses an index document.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Json`] or [`FetchError::Shape`] if the document
    /// is not an index document, and [`FetchError::Reference`] if an aliyah
    /// range cannot be parsed.
    pub fn from_index_json(book_name: &str, json: &str) -> Result<Self, FetchError> {
        let document: IndexDocument = serde_json::from_str(json)?;
        let parshiot = document
            .alt_structs
            .parasha
            .nodes
            .into_iter()
            .map(|node| {
                let name = NonEmptyString::new(node.shared_title)
                    .map_err(|_| FetchError::Shape("parasha with an empty title".to_string()))?;
                let aliyot = node
                    .refs
                    .iter()
                    .map(|range| range.parse::<AliyahBoundary>())
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ParashaBoundary::new(name, aliyot))
            })
            .collect::<Result<Vec<_>, FetchError>>()?;
        let name = NonEmptyString::new(book_name.to_string())
            .map_err(|_| FetchError::Shape("empty book name".to_string()))?;
        Ok(Self::new(name, parshiot))
    }
}

/// Answers only for its own book.
impl MetadataSource for BookMetadata {
    fn book_metadata(&self, book_name: &str) -> Result<Self, FetchError> {
        if self.name().eq_ignore_ascii_case(book_name) {
            Ok(self.clone())
        } else {
            Err(FetchError::NotFound(book_name.to_string()))
        }
    }
}

/// Fetches index documents over HTTP.
#[derive(Debug, Clone)]
pub struct SefariaClient {
    client: Client,
    api_base: String,
}

impl SefariaClient {
    /// Creates a client for the given API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the HTTP client cannot be built.
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_base: api_base.into(),
        })
    }

    /// Creates a client from the configured base URL and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(config.api_base(), config.timeout())
    }

    fn url(&self, book_name: &str) -> String {
        format!("{}/{book_name}", self.api_base.trim_end_matches('/'))
    }
}

impl MetadataSource for SefariaClient {
    #[instrument(skip(self))]
    fn book_metadata(&self, book_name: &str) -> Result<BookMetadata, FetchError> {
        let url = self.url(book_name);
        tracing::debug!("Fetching {url}");

        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }
        let body = response.text()?;
        BookMetadata::from_index_json(book_name, &body)
    }
}

/// Reads cached index documents from `<dir>/<book_name>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirectory {
    root: PathBuf,
}

impl JsonDirectory {
    /// Creates a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory the documents are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl MetadataSource for JsonDirectory {
    #[instrument(skip(self))]
    fn book_metadata(&self, book_name: &str) -> Result<BookMetadata, FetchError> {
        let path = self.root.join(format!("{book_name}.json"));
        let json = fs::read_to_string(&path).map_err(|error| match error.kind() {
            io::ErrorKind::NotFound => FetchError::NotFound(book_name.to_string()),
            _ => FetchError::Io(error),
        })?;
        tracing::debug!("Loaded metadata from {}", path.display());
        BookMetadata::from_index_json(book_name, &json)
    }
}

/// Picks the metadata source described by the configuration.
///
/// A configured cache directory takes precedence over the network.
///
/// # Errors
///
/// Returns [`FetchError::Http`] if the HTTP client cannot be built.
pub fn from_config(config: &Config) -> Result<Box<dyn MetadataSource + Send + Sync>, FetchError> {
    Ok(match &config.metadata_dir {
        Some(dir) => Box::new(JsonDirectory::new(dir.clone())),
        None => Box::new(SefariaClient::from_config(config)?),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Write;

    use test_case::test_case;

    use super::*;
    use crate::domain::ChapterVerse;

    /// An index document with two parshiot.
    pub(crate) const INDEX: &str = r#"{
        "title": "Genesis",
        "alt_structs": {
            "Parasha": {
                "nodes": [
                    {
                        "sharedTitle": "Bereshit",
                        "refs": [
                            "Genesis 1:1-2:3",
                            "Genesis 2:4-19",
                            "Genesis 2:20-3:21",
                            "Genesis 3:22-4:18",
                            "Genesis 4:19-22",
                            "Genesis 4:23-5:24",
                            "Genesis 5:25-6:8"
                        ]
                    },
                    {
                        "sharedTitle": "Lech Lecha",
                        "refs": [
                            "Genesis 12:1–13",
                            "Genesis 12:14–13:4",
                            "Genesis 13:5–18",
                            "Genesis 14:1–20",
                            "Genesis 14:21–15:6",
                            "Genesis 15:7–17:6",
                            "Genesis 17:7–27"
                        ]
                    }
                ]
            }
        }
    }"#;

    #[test]
    fn parses_index_document() {
        let metadata = BookMetadata::from_index_json("Genesis", INDEX).unwrap();
        assert_eq!(metadata.name(), "Genesis");
        assert_eq!(metadata.parshiot().len(), 2);
        assert!(metadata.parshiot().iter().all(|p| p.aliyot().len() == 7));

        let lech_lecha = &metadata.parshiot()[1];
        assert_eq!(lech_lecha.name(), "Lech Lecha");
        let first = lech_lecha.aliyot()[0];
        assert_eq!(first.start(), ChapterVerse::new(12, 1));
        assert_eq!(first.end(), ChapterVerse::new(12, 13));
    }

    #[test_case("not json"; "syntax")]
    #[test_case(r#"{"alt_structs": "#; "truncated")]
    fn invalid_json(json: &str) {
        assert!(matches!(
            BookMetadata::from_index_json("Genesis", json),
            Err(FetchError::Json(_))
        ));
    }

    #[test_case(r#"{}"#; "no alt structs")]
    #[test_case(r#"{"alt_structs": {"Parasha": {"nodes": [{"refs": []}]}}}"#; "no title")]
    #[test_case(r#"{"alt_structs": {"Parasha": {"nodes": [{"sharedTitle": "", "refs": []}]}}}"#; "empty title")]
    fn unexpected_shape(json: &str) {
        assert!(matches!(
            BookMetadata::from_index_json("Genesis", json),
            Err(FetchError::Shape(_))
        ));
    }

    #[test]
    fn bad_range_is_a_reference_error() {
        let json = r#"{"alt_structs": {"Parasha": {"nodes": [{"sharedTitle": "X", "refs": ["Genesis 1:1"]}]}}}"#;
        assert!(matches!(
            BookMetadata::from_index_json("Genesis", json),
            Err(FetchError::Reference(_))
        ));
    }

    #[test]
    fn in_memory_metadata_answers_for_itself() {
        let metadata = BookMetadata::from_index_json("Genesis", INDEX).unwrap();
        assert_eq!(metadata.book_metadata("genesis").unwrap(), metadata);
        assert!(matches!(
            metadata.book_metadata("Exodus"),
            Err(FetchError::NotFound(name)) if name == "Exodus"
        ));
    }

    #[test]
    fn json_directory_reads_cached_documents() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("Genesis.json")).unwrap();
        file.write_all(INDEX.as_bytes()).unwrap();

        let source = JsonDirectory::new(dir.path());
        let metadata = source.book_metadata("Genesis").unwrap();
        assert_eq!(metadata.parshiot()[0].name(), "Bereshit");

        assert!(matches!(
            source.book_metadata("Exodus"),
            Err(FetchError::NotFound(_))
        ));
    }

    #[test]
    fn client_url_joins_book_name() {
        let client = SefariaClient::new("https://example.test/index/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.url("Genesis"), "https://example.test/index/Genesis");
    }

    #[test]
    fn config_selects_source() {
        let mut config = Config::default();
        assert!(from_config(&config).is_ok());
        config.metadata_dir = Some(PathBuf::from("cache"));
        assert!(from_config(&config).is_ok());
    }
}
