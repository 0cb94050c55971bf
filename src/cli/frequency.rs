use std::collections::BTreeMap;

use clap::Parser;
use taamim::TaamName;
use tracing::instrument;

use super::{
    Library, ServantFilter,
    terminal::{self, Colorize},
};

#[derive(Debug, Parser)]
#[command(about = "Count how often each mark occurs")]
pub struct Frequency {
    /// The books to count (file names under the root, without `.txt`)
    #[arg(required = true)]
    books: Vec<String>,

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

impl Frequency {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, library: &Library) -> anyhow::Result<()> {
        let include_servants = library.include_servants(self.servants);
        let mut totals: BTreeMap<TaamName, usize> = BTreeMap::new();
        for book in library.load(&self.books)? {
            for (name, count) in book.taam_frequencies(include_servants) {
                *totals.entry(name).or_insert(0) += count;
            }
        }

        let mut rows: Vec<(TaamName, usize)> = totals.into_iter().collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        match self.output {
            OutputFormat::Json => {
                let output: serde_json::Map<String, serde_json::Value> = rows
                    .iter()
                    .map(|(name, count)| (name.to_string(), (*count).into()))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => Self::output_table(&rows),
        }
        Ok(())
    }

    fn output_table(rows: &[(TaamName, usize)]) {
        let max = rows.first().map_or(0, |(_, count)| *count);
        let label_width = rows
            .iter()
            .map(|(name, _)| name.as_str().len())
            .max()
            .unwrap_or(0);
        let width = terminal::bar_width(label_width);

        for (name, count) in rows {
            if terminal::is_narrow() {
                println!("{name:<label_width$} {count:>7}");
            } else {
                println!(
                    "{name:<label_width$} {count:>7} {} {}",
                    terminal::bar(*count, max, width),
                    name.hebrew_name().dim()
                );
            }
        }
    }
}
