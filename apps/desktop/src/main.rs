use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{load_settings, CategoryApi, CategoryListController, HttpCategoryApi, Notice};
use shared::domain::{CategoryId, DraftField};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Manage categories on a remote REST collection")]
struct Cli {
    /// Overrides the configured API base url.
    #[arg(long)]
    api_base_url: Option<String>,
    /// Print the resulting collection as JSON.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        image: String,
    },
    Update {
        id: CategoryId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    Delete {
        id: CategoryId,
    },
}

/// Logs go to stderr.
const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = load_settings().with_base_url_override(cli.api_base_url);
    let api = HttpCategoryApi::from_settings(&settings).context("invalid client settings")?;
    tracing::debug!(base_url = api.base_url(), "using categories api");

    let mut controller = CategoryListController::new(api);
    controller.initialize().await;

    match cli.command {
        Command::List => {}
        Command::Add { name, image } => {
            controller.update_draft_field(DraftField::Name, name);
            controller.update_draft_field(DraftField::Image, image);
            controller.submit_draft().await?;
        }
        Command::Update { id, name, image } => {
            if !controller.begin_edit_by_id(id) {
                return Err(anyhow!("no category with id {id} in the fetched collection"));
            }
            if let Some(name) = name {
                controller.update_draft_field(DraftField::Name, name);
            }
            if let Some(image) = image {
                controller.update_draft_field(DraftField::Image, image);
            }
            controller.submit_draft().await?;
        }
        Command::Delete { id } => {
            controller.delete_category(id).await;
        }
    }

    print_collection(&controller, cli.json)?;

    match controller.state().notice() {
        Some(Notice::Error(message)) => Err(anyhow!("{message}")),
        Some(Notice::Success(message)) => {
            eprintln!("{message}");
            Ok(())
        }
        None => Ok(()),
    }
}

fn print_collection<A: CategoryApi>(
    controller: &CategoryListController<A>,
    json: bool,
) -> Result<()> {
    let categories = controller.state().categories();
    if json {
        println!("{}", serde_json::to_string_pretty(categories)?);
        return Ok(());
    }

    for category in categories {
        println!("{:>6}  {:<32}  {}", category.id.0, category.name, category.image);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_log_filter_is_info() {
        let filter = EnvFilter::try_new(DEFAULT_LOG_FILTER).expect("valid filter");
        assert_eq!(filter.to_string(), "info");
    }
}
