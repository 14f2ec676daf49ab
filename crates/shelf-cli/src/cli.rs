use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use shelf_store::{CatalogConfig, StorageFormat};
use shelf_types::BookId;

#[derive(Parser)]
#[command(
    name = "shelf",
    about = "Shelf: a personal book catalog",
    version,
)]
pub struct Cli {
    /// Action to run; starts the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Catalog file
    #[arg(long, global = true, default_value = "library.json")]
    pub file: PathBuf,

    /// File encoding (json or csv); inferred from the extension by default
    #[arg(long, global = true)]
    pub storage: Option<StorageFormat>,

    /// Field delimiter for CSV catalogs
    #[arg(long, global = true, default_value_t = ',')]
    pub delimiter: char,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

impl Cli {
    /// Storage settings selected by the global flags.
    pub fn catalog_config(&self) -> anyhow::Result<CatalogConfig> {
        anyhow::ensure!(
            self.delimiter.is_ascii(),
            "delimiter must be a single ASCII character, got {:?}",
            self.delimiter
        );
        let mut config = CatalogConfig::for_path(&self.file);
        if let Some(format) = self.storage {
            config.format = format;
        }
        config.csv_delimiter = self.delimiter as u8;
        Ok(config)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every book
    List(ListArgs),
    /// Show one book
    Get(GetArgs),
    /// Add a book
    Add(AddArgs),
    /// Delete a book
    Delete(DeleteArgs),
    /// Change a book's status
    Status(StatusArgs),
    /// Search books by title, author or year
    Search(SearchArgs),
    /// Interactive text menu
    Menu(MenuArgs),
}

#[derive(Args)]
pub struct ListArgs {}

#[derive(Args)]
pub struct GetArgs {
    pub id: BookId,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub author: String,
    #[arg(long, allow_negative_numbers = true)]
    pub year: i32,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub id: BookId,
}

#[derive(Args)]
pub struct StatusArgs {
    pub id: BookId,
    /// available or borrowed
    pub status: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// title, author or year
    pub field: String,
    pub query: String,
}

#[derive(Args)]
pub struct MenuArgs {}
