use std::{
    path::{Path, PathBuf},
    time::Duration,
};

mod books;
mod find;
mod frequency;
mod ngrams;
mod search;
mod show;
mod terminal;

use anyhow::Context;
use books::Books;
use clap::ArgAction;
use find::Find;
use frequency::Frequency;
use indicatif::{ProgressBar, ProgressStyle};
use ngrams::Ngrams;
use search::Search;
use show::Show;
use taamim::{
    Book, Config, MetadataSource, TaamName, Verse,
    storage::{self, metadata},
};
use terminal::Colorize;

/// Parse a mark name, in English (`tarha`) or Hebrew (`טרחא`).
fn parse_taam(s: &str) -> Result<TaamName, String> {
    let s = s.trim();
    s.to_lowercase()
        .parse::<TaamName>()
        .or_else(|_| TaamName::from_hebrew_name(s))
        .map_err(|e| format!("{e}"))
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The directory holding the book text files
    #[arg(short, long, default_value = "data/cantillation", global = true)]
    root: PathBuf,

    /// Configuration file (defaults to `<root>/taamim.toml`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config_path = self
            .config
            .unwrap_or_else(|| self.root.join("taamim.toml"));
        let library = Library {
            config: load_config(&config_path),
            root: self.root,
        };

        self.command.run(&library)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// List the books available under the root directory
    Books(Books),

    /// Count how often each mark occurs
    Frequency(Frequency),

    /// Rank runs of consecutive marks by frequency
    Ngrams(Ngrams),

    /// Find verses containing a run of marks
    ///
    /// Results are grouped by parasha and aliyah.
    Search(Search),

    /// List the verses carrying a mark
    Find(Find),

    /// Show a verse with its marks
    Show(Show),
}

impl Command {
    fn run(self, library: &Library) -> anyhow::Result<()> {
        match self {
            Self::Books(command) => command.run(library)?,
            Self::Frequency(command) => command.run(library)?,
            Self::Ngrams(command) => command.run(library)?,
            Self::Search(command) => command.run(library)?,
            Self::Find(command) => command.run(library)?,
            Self::Show(command) => command.run(library)?,
        }
        Ok(())
    }
}

/// Overrides for whether servant (conjunctive) marks take part in a query.
#[derive(Debug, Clone, Copy, Default, clap::Args)]
pub struct ServantFilter {
    /// Leave out servant (conjunctive) marks
    #[arg(long, conflicts_with = "servants")]
    no_servants: bool,

    /// Include servant marks even when the configuration leaves them out
    #[arg(long)]
    servants: bool,
}

/// Where books live and how to load them.
#[derive(Debug)]
pub struct Library {
    root: PathBuf,
    config: Config,
}

impl Library {
    fn root(&self) -> &Path {
        &self.root
    }

    /// A flag wins over the configuration, which defaults to including
    /// servants.
    const fn include_servants(&self, filter: ServantFilter) -> bool {
        filter.servants || (!filter.no_servants && self.config.include_servants)
    }

    fn source(&self) -> anyhow::Result<Box<dyn MetadataSource + Send + Sync>> {
        metadata::from_config(&self.config).context("failed to set up metadata source")
    }

    /// Loads each named book, showing a spinner while it is parsed.
    fn load(&self, names: &[String]) -> anyhow::Result<Vec<Book>> {
        let source = self.source()?;
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));

        let mut books = Vec::with_capacity(names.len());
        for name in names {
            let path = storage::book_path(&self.root, name);
            spinner.set_message(format!("Loading {}", path.display()));
            let book = storage::load_book(&path, source.as_ref())
                .with_context(|| format!("failed to load book '{name}'"))?;
            books.push(book);
        }

        spinner.finish_and_clear();
        Ok(books)
    }

    fn load_one(&self, name: &str) -> anyhow::Result<Book> {
        self.load(&[name.to_string()])?
            .pop()
            .context("no book loaded")
    }
}

/// Joins mark names with `separator`, e.g. `maarikh, tarha`.
fn sequence_label(sequence: &[TaamName], separator: &str) -> String {
    sequence
        .iter()
        .copied()
        .map(TaamName::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Renders a verse with the words picked out by `selected` highlighted.
fn highlight(verse: &Verse, selected: impl Fn(usize) -> bool) -> String {
    verse
        .words()
        .enumerate()
        .map(|(i, word)| {
            let word = word.to_string();
            if selected(i) { word.matched() } else { word }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn load_config(path: &Path) -> Config {
    Config::load(path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use clap::Parser;
    use non_empty_string::NonEmptyString;
    use taamim::domain::{AliyahBoundary, BookMetadata, ChapterVerse, ParashaBoundary};
    use test_case::test_case;

    use super::*;

    const GENESIS: &str = include_str!("../testdata/genesis_1_1-7.txt");

    /// Genesis 1:1-7 as one parasha with a single verse per aliyah.
    pub(crate) fn genesis() -> Book {
        let aliyot = (1..=7)
            .map(|verse| {
                AliyahBoundary::new(ChapterVerse::new(1, verse), ChapterVerse::new(1, verse))
                    .unwrap()
            })
            .collect();
        let metadata = BookMetadata::new(
            NonEmptyString::new("Genesis".to_string()).unwrap(),
            vec![ParashaBoundary::new(
                NonEmptyString::new("Bereshit".to_string()).unwrap(),
                aliyot,
            )],
        );
        storage::parse_book(GENESIS, &metadata).unwrap()
    }

    fn library(config: Config) -> Library {
        Library {
            root: PathBuf::from("."),
            config,
        }
    }

    fn servant_filter(args: &[&str]) -> ServantFilter {
        #[derive(Debug, clap::Parser)]
        struct Args {
            #[command(flatten)]
            servants: ServantFilter,
        }
        let args = std::iter::once("taam").chain(args.iter().copied());
        Args::try_parse_from(args).unwrap().servants
    }

    #[test_case("tarha", TaamName::Tarha; "english")]
    #[test_case("  Sof_Passuq ", TaamName::SofPassuq; "mixed case")]
    #[test_case("טרחא", TaamName::Tarha; "hebrew")]
    fn parses_taam_names(input: &str, expected: TaamName) {
        assert_eq!(parse_taam(input), Ok(expected));
    }

    #[test]
    fn rejects_unknown_taam() {
        assert!(parse_taam("nothing").is_err());
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["taam", "books", "-vv", "--root", "texts"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.root, PathBuf::from("texts"));
        assert!(matches!(cli.command, Command::Books(_)));
    }

    #[test]
    fn missing_config_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_config(&dir.path().join("taamim.toml")), Config::default());
    }

    #[test_case(true, &[], true; "default config")]
    #[test_case(true, &["--no-servants"], false; "flag removes servants")]
    #[test_case(false, &[], false; "config removes servants")]
    #[test_case(false, &["--servants"], true; "flag restores servants")]
    fn servant_flags_override_config(configured: bool, args: &[&str], expected: bool) {
        let mut config = Config::default();
        config.include_servants = configured;
        assert_eq!(library(config).include_servants(servant_filter(args)), expected);
    }

    #[test]
    fn servant_flags_conflict() {
        #[derive(Debug, clap::Parser)]
        struct Args {
            #[command(flatten)]
            servants: ServantFilter,
        }
        assert!(Args::try_parse_from(["taam", "--servants", "--no-servants"]).is_err());
    }

    #[test]
    fn sequence_labels() {
        assert_eq!(
            sequence_label(&[TaamName::Maarikh, TaamName::Tarha], ", "),
            "maarikh, tarha"
        );
        assert_eq!(sequence_label(&[], " → "), "");
    }

    #[test]
    fn highlight_without_selection_is_plain_text() {
        let book = genesis();
        let verse = book.verse(ChapterVerse::new(1, 1)).unwrap();
        let words: Vec<String> = verse.words().map(ToString::to_string).collect();
        assert_eq!(highlight(verse, |_| false), words.join(" "));
    }
}
