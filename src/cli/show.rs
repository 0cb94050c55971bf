use anyhow::bail;
use clap::Parser;
use taamim::{
    Taam, TaamName, Word,
    domain::{ChapterVerse, NiqudName},
};
use tracing::instrument;

use super::{Library, sequence_label, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Show a verse word by word, with its marks")]
pub struct Show {
    /// The book (file name under the root, without `.txt`)
    book: String,

    /// The verse, as `chapter:verse`
    verse: ChapterVerse,

    /// Also list the vowels of each word
    #[arg(long)]
    vowels: bool,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// The marks of a word as the search sees them, one entry per mark.
fn word_marks(word: &Word) -> Vec<TaamName> {
    word.letter_taamim()
        .iter()
        .flatten()
        .map(Taam::name)
        .collect()
}

impl Show {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, library: &Library) -> anyhow::Result<()> {
        let book = library.load_one(&self.book)?;
        let Some(verse) = book.verse(self.verse) else {
            bail!("{} has no verse {}", book.name(), self.verse);
        };

        match self.output {
            OutputFormat::Json => {
                let words: Vec<_> = verse
                    .words()
                    .map(|word| {
                        let vowels: Vec<NiqudName> =
                            word.nequdot().map(|niqud| niqud.name()).collect();
                        serde_json::json!({
                            "text": word.to_string(),
                            "taamim": word_marks(word),
                            "nequdot": vowels,
                        })
                    })
                    .collect();
                let output = serde_json::json!({
                    "book": book.name(),
                    "verse": verse.location().to_string(),
                    "words": words,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                println!(
                    "{}",
                    format!("{} {}", book.name(), verse.location()).heading()
                );
                println!("{}", verse.to_string().trim_matches(['\u{202A}', '\u{202C}']));
                println!();
                for (i, word) in verse.words().enumerate() {
                    let marks = word_marks(word);
                    let english = sequence_label(&marks, ", ");
                    let hebrew = marks
                        .iter()
                        .copied()
                        .map(TaamName::hebrew_name)
                        .collect::<Vec<_>>()
                        .join(", ");
                    println!("{:>3}  {word}  {english}  {}", i + 1, hebrew.dim());
                    if self.vowels {
                        let vowels = word
                            .nequdot()
                            .map(|niqud| niqud.name().to_string())
                            .collect::<Vec<_>>()
                            .join(", ");
                        println!("     {}", vowels.dim());
                    }
                }
            }
        }
        Ok(())
    }
}
