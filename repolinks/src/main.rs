use repolinks::handlers::{
    handle_collections, handle_extract, handle_import, init_logging, load_env_file, print_banner,
};
use tracing::debug;

mod commands;

use commands::command_argument_builder;

#[tokio::main]
async fn main() {
    // Must run before argument parsing so `--uri` can fall back to MONGODB_URI from .env
    let env_file = load_env_file(None);

    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");
    let verbose = chosen_command.get_flag("verbose");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    if chosen_command.subcommand().is_none() {
        // No subcommand provided, just show the banner
        return;
    }

    init_logging(verbose);

    if let Some(path) = env_file {
        debug!("Loaded environment from {}", path.display());
    }

    let outcome = match chosen_command.subcommand() {
        Some(("extract", primary_command)) => {
            handle_extract(primary_command).await;
            Ok(())
        }
        Some(("import", primary_command)) => handle_import(primary_command),
        Some(("collections", primary_command)) => handle_collections(primary_command),
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = outcome {
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
