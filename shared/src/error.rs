use rolldown_error::BatchedBuildDiagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InlayError {
    #[error("I/O Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("UTF-8 Error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Rolldown Error: {0}")]
    RolldownError(#[from] BatchedBuildDiagnostic),

    #[error("Build error: {0}")]
    Build(#[from] anyhow::Error),

    #[error("{0} is required")]
    MissingDependency(&'static str),

    #[error(
        "there is no html page with a template option, set `template` explicitly or give a page a template"
    )]
    NoTemplateConfigured,

    #[error("entry should be a map of named entries, found {0}")]
    InvalidEntryShape(String),

    #[error("can't resolve '{}' from '{tag}' in '{}'", .path.display(), .template.display())]
    UnresolvedScript {
        path: PathBuf,
        tag: String,
        template: PathBuf,
    },

    #[error("can't resolve template path from '{0}'")]
    UnresolvedTemplate(String),
}

pub type InlayResult<T = ()> = Result<T, InlayError>;
