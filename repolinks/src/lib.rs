// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    ImportSummary,
    format_index,
    import_documents,
    load_documents_from_file,
    load_env_file,
    parse_documents,
    resolve_config,
    write_report,
};

// Re-export extraction functionality from repolinks-core
pub use repolinks_core::{
    RepositoryRecord, RepositoryUrlIndex, Structure, build_index, extract_urls,
};
