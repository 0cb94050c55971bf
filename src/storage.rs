/// Sources of parasha/aliyah boundary metadata.
pub mod metadata;
/// Loading book text files.
pub mod text;

pub use metadata::{FetchError, JsonDirectory, MetadataSource, SefariaClient};
pub use text::{LoadError, book_files, book_path, load_book, parse_book};
