use clap::Parser;
use taamim::{TaamName, domain::BookTaamSequenceResult};
use tracing::instrument;

use super::{Library, ServantFilter, highlight, sequence_label, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Find verses containing a run of marks")]
pub struct Search {
    /// The books to search (file names under the root, without `.txt`)
    #[arg(required = true)]
    books: Vec<String>,

    /// The marks to look for, comma separated (e.g. `maarikh,tarha`)
    #[arg(short, long, required = true, value_delimiter = ',', value_parser = super::parse_taam)]
    sequence: Vec<TaamName>,

    #[command(flatten)]
    servants: ServantFilter,

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

impl Search {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, library: &Library) -> anyhow::Result<()> {
        let include_servants = library.include_servants(self.servants);
        let books = library.load(&self.books)?;
        let results: Vec<(&str, BookTaamSequenceResult)> = books
            .iter()
            .map(|book| {
                (
                    book.name(),
                    book.find_verses_with_taam_sequence(&self.sequence, include_servants),
                )
            })
            .collect();

        match self.output {
            OutputFormat::Json => Self::output_json(&results)?,
            OutputFormat::Table => self.output_table(&results),
        }
        Ok(())
    }

    fn output_json(results: &[(&str, BookTaamSequenceResult)]) -> anyhow::Result<()> {
        let mut output = Vec::new();
        for (book, result) in results {
            for (parasha, parasha_result) in result.parshiot() {
                for aliyah in parasha_result.matching_aliyot() {
                    for (verse, matches) in aliyah {
                        output.push(serde_json::json!({
                            "book": book,
                            "parasha": parasha,
                            "aliyah": aliyah.idx() + 1,
                            "verse": verse.location().to_string(),
                            "matches": matches.word_indices(),
                        }));
                    }
                }
            }
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_table(&self, results: &[(&str, BookTaamSequenceResult)]) {
        let pattern = sequence_label(&self.sequence, ", ");

        let total: usize = results.iter().map(|(_, result)| result.verse_count()).sum();
        if total == 0 {
            println!("{}", format!("No verses contain {pattern}").dim());
            return;
        }

        for (book, result) in results {
            if result.is_empty() {
                continue;
            }
            println!("{}", book.heading());
            for (parasha, parasha_result) in result.parshiot() {
                println!("  {parasha}");
                for aliyah in parasha_result.matching_aliyot() {
                    println!("    {}", format!("Aliyah {}", aliyah.idx() + 1).dim());
                    for (verse, matches) in aliyah {
                        println!(
                            "      {:>7}  {}",
                            verse.location().to_string(),
                            highlight(verse, |i| matches.touches(i))
                        );
                    }
                }
            }
        }

        println!();
        println!("{total} verse(s) contain {pattern}");
    }
}
