use std::io::{self, Write};

use anyhow::Context;
use shelf_store::Catalog;
use tracing::{debug, info};

use crate::cli::*;
use crate::menu::Menu;
use crate::render;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = cli.catalog_config()?;
    debug!(path = %config.path.display(), storage = %config.format, "opening catalog");
    let mut catalog = config
        .open_catalog()
        .with_context(|| format!("failed to open catalog {}", config.path.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let command = cli.command.unwrap_or(Command::Menu(MenuArgs {}));
    execute(&mut catalog, command, cli.format, &mut out)
}

fn execute(
    catalog: &mut Catalog,
    command: Command,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::List(_) => render::books(out, &catalog.list(), "The catalog is empty.", format)?,
        Command::Get(args) => {
            let book = catalog.get(args.id)?.clone();
            render::book(out, "Found book:", &book, format)?;
        }
        Command::Add(args) => {
            let book = catalog.add(&args.title, &args.author, args.year)?;
            info!(id = %book.id(), "book added");
            render::book(out, "Book added:", &book, format)?;
        }
        Command::Delete(args) => {
            let book = catalog.delete(args.id)?;
            info!(id = %book.id(), "book deleted");
            render::book(out, "Book deleted:", &book, format)?;
        }
        Command::Status(args) => {
            let book = catalog.update_status(args.id, &args.status)?;
            info!(id = %book.id(), status = %book.status(), "status updated");
            render::book(out, "Status updated:", &book, format)?;
        }
        Command::Search(args) => {
            let found = catalog.search(&args.field, &args.query)?;
            render::books(out, &found, "No books found.", format)?;
        }
        Command::Menu(_) => {
            let stdin = io::stdin();
            Menu::new(catalog, stdin.lock(), out).run()?;
        }
    }
    Ok(())
}
