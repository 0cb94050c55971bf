use clap::Parser;
use taamim::storage;
use tracing::instrument;

use super::{Library, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "List the book text files under the root directory")]
pub struct Books {
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

impl Books {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, library: &Library) -> anyhow::Result<()> {
        let names: Vec<String> = storage::book_files(library.root())
            .iter()
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
            .collect();

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&names)?),
            OutputFormat::Table => {
                if names.is_empty() {
                    println!(
                        "No books found in {}",
                        library.root().display().to_string().dim()
                    );
                    return Ok(());
                }
                println!("{}", format!("Books in {}", library.root().display()).heading());
                for name in names {
                    println!("  {name}");
                }
            }
        }
        Ok(())
    }
}
