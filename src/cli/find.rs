use clap::Parser;
use taamim::TaamName;
use tracing::instrument;

use super::{Library, highlight, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "List the verses carrying a mark")]
pub struct Find {
    /// The book to search (file name under the root, without `.txt`)
    book: String,

    /// The mark, in English or Hebrew
    #[clap(value_parser = super::parse_taam)]
    taam: TaamName,

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

impl Find {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, library: &Library) -> anyhow::Result<()> {
        let book = library.load_one(&self.book)?;
        let verses = book.find_verses_with_taam(self.taam);

        match self.output {
            OutputFormat::Json => {
                let output: Vec<_> = verses
                    .iter()
                    .map(|verse| {
                        let words: Vec<usize> = verse
                            .words()
                            .enumerate()
                            .filter(|(_, word)| word.has_taam(self.taam))
                            .map(|(i, _)| i)
                            .collect();
                        serde_json::json!({
                            "verse": verse.location().to_string(),
                            "words": words,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                if verses.is_empty() {
                    println!(
                        "{}",
                        format!("No verses in {} carry {}", book.name(), self.taam).dim()
                    );
                    return Ok(());
                }
                for verse in &verses {
                    let line = highlight(verse, |i| {
                        verse.word(i).is_some_and(|word| word.has_taam(self.taam))
                    });
                    println!("{:>7}  {line}", verse.location().to_string());
                }
                println!();
                println!(
                    "{} verse(s), {} occurrence(s) of {} ({})",
                    verses.len(),
                    book.count_taam(self.taam),
                    self.taam,
                    self.taam.hebrew_name()
                );
            }
        }
        Ok(())
    }
}
