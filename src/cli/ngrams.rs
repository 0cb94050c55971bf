use std::num::NonZeroUsize;

use clap::Parser;
use taamim::{TaamName, domain::TaamSequenceCounts};
use tracing::instrument;

use super::{
    Library, ServantFilter, sequence_label,
    terminal::{self, Colorize},
};

#[derive(Debug, Parser)]
#[command(about = "Rank runs of consecutive marks by how often they occur")]
pub struct Ngrams {
    /// The books to count (file names under the root, without `.txt`)
    #[arg(required = true)]
    books: Vec<String>,

    /// The number of marks in each run
    #[arg(short = 'n', long = "length", default_value = "2")]
    n: NonZeroUsize,

    /// How many runs to show
    #[arg(long, default_value = "10")]
    top: usize,

    /// Show the least common runs instead of the most common
    #[arg(long)]
    least: bool,

    /// Ignore runs seen fewer times than this
    #[arg(long, default_value = "5")]
    min_occurrences: usize,

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

impl Ngrams {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, library: &Library) -> anyhow::Result<()> {
        let include_servants = library.include_servants(self.servants);
        let mut totals = TaamSequenceCounts::new();
        for book in library.load(&self.books)? {
            for (sequence, count) in book.count_n_taam_sequences(self.n.get(), include_servants) {
                *totals.entry(sequence).or_insert(0) += count;
            }
        }

        let ranked = rank(totals, self.min_occurrences, self.top, self.least);

        match self.output {
            OutputFormat::Json => {
                let output: Vec<_> = ranked
                    .iter()
                    .map(|(sequence, count)| {
                        serde_json::json!({
                            "sequence": sequence,
                            "count": count,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => Self::output_table(&ranked),
        }
        Ok(())
    }

    fn output_table(ranked: &[(Vec<TaamName>, usize)]) {
        if ranked.is_empty() {
            println!("{}", "No sequences meet the minimum occurrence count".dim());
            return;
        }

        let labels: Vec<String> = ranked
            .iter()
            .map(|(sequence, _)| sequence_label(sequence, " → "))
            .collect();
        let label_width = labels.iter().map(|label| label.chars().count()).max().unwrap_or(0);
        let max = ranked.iter().map(|(_, count)| *count).max().unwrap_or(0);
        let width = terminal::bar_width(label_width);

        for (label, (_, count)) in labels.iter().zip(ranked) {
            let padding = " ".repeat(label_width - label.chars().count());
            if terminal::is_narrow() {
                println!("{label}{padding} {count:>7}");
            } else {
                println!("{label}{padding} {count:>7} {}", terminal::bar(*count, max, width));
            }
        }
    }
}

/// Keeps the runs seen at least `min_occurrences` times and returns the
/// `top` most (or least) common, ties broken by sequence order.
fn rank(
    counts: TaamSequenceCounts,
    min_occurrences: usize,
    top: usize,
    least: bool,
) -> Vec<(Vec<TaamName>, usize)> {
    let mut ranked: Vec<(Vec<TaamName>, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count >= min_occurrences)
        .collect();
    if least {
        ranked.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    } else {
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    }
    ranked.truncate(top);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::tests::genesis;

    fn counts() -> TaamSequenceCounts {
        [
            (vec![TaamName::Tarha, TaamName::Atnah], 9),
            (vec![TaamName::Atnah, TaamName::Tarha], 5),
            (vec![TaamName::Maarikh, TaamName::Tarha], 7),
            (vec![TaamName::Tevir, TaamName::Tarha], 2),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn most_common_first() {
        let ranked = rank(counts(), 5, 10, false);
        let totals: Vec<usize> = ranked.iter().map(|(_, count)| *count).collect();
        assert_eq!(totals, vec![9, 7, 5]);
    }

    #[test]
    fn least_common_first() {
        let ranked = rank(counts(), 0, 2, true);
        assert_eq!(ranked[0], (vec![TaamName::Tevir, TaamName::Tarha], 2));
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn threshold_can_remove_everything() {
        assert!(rank(counts(), 100, 10, false).is_empty());
    }

    #[test]
    fn table_renders_book_bigrams() {
        let ranked = rank(genesis().count_n_taam_sequences(2, true), 1, 5, false);
        assert_eq!(ranked.len(), 5);
        assert!(ranked.windows(2).all(|pair| pair[0].1 >= pair[1].1));
        Ngrams::output_table(&ranked);
        Ngrams::output_table(&[]);
    }
}
