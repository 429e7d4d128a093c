use clap::Subcommand;

use storefront_core::ViewError;
use storefront_core::domain::ResourceId;
use storefront_core::view::{DeleteOutcome, FetchOutcome, ProductListView};

use crate::render;
use crate::state::AppState;

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// Print one page of products
    List {
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        limit: Option<u32>,
    },
    /// Delete a product (admin sessions only)
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },
    /// Page through products interactively
    Browse {
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        limit: Option<u32>,
    },
}

pub async fn run(command: ProductsCommand, state: &AppState) -> anyhow::Result<()> {
    match command {
        ProductsCommand::List { page, limit } => {
            let view = state.product_view(limit, false);
            view.load().await?;
            if page != 1 {
                view.go_to_page(page).await?;
            }
            println!("{}", render::product_table(&view.snapshot().await));
        }
        ProductsCommand::Delete { id, yes } => {
            let view = state.product_view(None, yes);
            match view.delete_product(&ResourceId::new(id)).await? {
                DeleteOutcome::Deleted { .. } => {}
                DeleteOutcome::Declined => println!("Cancelled"),
            }
        }
        ProductsCommand::Browse { limit } => browse(state, limit).await?,
    }
    Ok(())
}

/// One line typed at the browse prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BrowseCommand {
    Next,
    Previous,
    Page(u32),
    Limit(u32),
    Refresh,
    Delete(ResourceId),
    Help,
    Quit,
}

impl BrowseCommand {
    fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("");
        let argument = words.next();
        if words.next().is_some() {
            return Err(format!("too many arguments for `{command}`"));
        }

        let number = |what: &str| -> Result<u32, String> {
            argument
                .ok_or_else(|| format!("`{command}` needs a {what}"))?
                .parse()
                .map_err(|_| format!("`{command}` needs a {what}"))
        };

        match command {
            "next" | "n" => Ok(Self::Next),
            "prev" | "p" => Ok(Self::Previous),
            "page" => number("page number").map(Self::Page),
            "limit" => number("page size").map(Self::Limit),
            "refresh" | "r" => Ok(Self::Refresh),
            "delete" => argument
                .map(|id| Self::Delete(ResourceId::new(id)))
                .ok_or_else(|| "`delete` needs a product id".to_string()),
            "help" | "?" | "" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command `{other}`")),
        }
    }
}

const BROWSE_HELP: &str =
    "Commands: next, prev, page N, limit M, refresh, delete ID, help, quit";

async fn browse(state: &AppState, limit: Option<u32>) -> anyhow::Result<()> {
    let view = state.product_view(limit, false);
    show_fetch(&view, view.load().await).await;
    println!("{BROWSE_HELP}");

    while let Some(line) = state.terminal.prompt("products> ").await? {
        let command = match BrowseCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        tracing::debug!(?command, "Browse command");

        let fetched = match command {
            BrowseCommand::Next => view.next_page().await,
            BrowseCommand::Previous => view.previous_page().await,
            BrowseCommand::Page(page) => view.go_to_page(page).await,
            BrowseCommand::Limit(limit) => view.set_limit(limit).await,
            BrowseCommand::Refresh => view.refresh().await,
            BrowseCommand::Delete(id) => {
                match view.delete_product(&id).await {
                    Ok(DeleteOutcome::Deleted { .. }) => {
                        println!("{}", render::product_table(&view.snapshot().await));
                    }
                    Ok(DeleteOutcome::Declined) => println!("Cancelled"),
                    // The notifier has already told the user.
                    Err(e) => tracing::debug!(error = %e, "Delete failed"),
                }
                continue;
            }
            BrowseCommand::Help => {
                println!("{BROWSE_HELP}");
                continue;
            }
            BrowseCommand::Quit => break,
        };
        show_fetch(&view, fetched).await;
    }

    view.shutdown();
    Ok(())
}

async fn show_fetch(view: &ProductListView, result: Result<FetchOutcome, ViewError>) {
    match result {
        Ok(FetchOutcome::Applied { .. }) => {
            println!("{}", render::product_table(&view.snapshot().await));
        }
        Ok(FetchOutcome::Superseded) => {}
        Err(ViewError::PageOutOfRange { requested, total_pages }) => {
            println!("There is no page {requested} (1..={total_pages})");
        }
        Err(e) => println!("{e}"),
    }
}
