use crate::CLAP_STYLING;
use clap::{arg, command};
use repolinks_core::config::{DEFAULT_COLLECTION, DEFAULT_DATABASE, DEFAULT_OUTPUT, URI_ENV_VAR};

pub(crate) const DEFAULT_STORE: &str = "sqlite://~/.config/repolinks/structures.db";

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("repolinks")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("repolinks")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(arg!(-v --"verbose" "Log every document as it is processed").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("extract")
                .about(
                    "Read stored repository structures and collect every https:// URL they \
                contain. Prints the URLs and writes them to a report.",
                )
                .arg(
                    arg!(-u --"uri" <URI>)
                        .required(false)
                        .env(URI_ENV_VAR)
                        .hide_env_values(true)
                        .help("Connection string: mongodb://, mongodb+srv:// or sqlite://PATH"),
                )
                .arg(
                    arg!(-d --"database" <NAME>)
                        .required(false)
                        .help("Database holding the structures (MongoDB only)")
                        .default_value(DEFAULT_DATABASE),
                )
                .arg(
                    arg!(-c --"collection" <NAME>)
                        .required(false)
                        .help("Collection holding the structures")
                        .default_value(DEFAULT_COLLECTION),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Where to write the report")
                        .default_value(DEFAULT_OUTPUT),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            command!("import")
                .about("Load repository structure documents from a JSON file into a local store")
                .arg(
                    arg!(-i --"input" <PATH>)
                        .required(true)
                        .help("JSON file holding an array of {\"repo\", \"structure\"} documents")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-s --"store" <URI>)
                        .required(false)
                        .help("Local store to import into")
                        .default_value(DEFAULT_STORE),
                )
                .arg(
                    arg!(-c --"collection" <NAME>)
                        .required(false)
                        .help("Collection to import into")
                        .default_value(DEFAULT_COLLECTION),
                ),
        )
        .subcommand(
            command!("collections")
                .about("List the collections of a local store and their document counts")
                .arg(
                    arg!(-s --"store" <URI>)
                        .required(false)
                        .help("Local store to inspect")
                        .default_value(DEFAULT_STORE),
                ),
        )
}
