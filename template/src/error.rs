use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum TemplateError {
    #[error("Failed to fetch template from {url}")]
    #[diagnostic()]
    Fetch {
        url: String,
        source: reqwest::Error,
    },

    #[error("Failed to fetch template from {url}, status code: {status}")]
    #[diagnostic(help("Check that the template URL is correct and publicly reachable"))]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to read template file {}", .path.display())]
    #[diagnostic()]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read argument file {}", .path.display())]
    #[diagnostic()]
    ReadArgFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse argument file {}", .path.display())]
    #[diagnostic(help("The argument file must be a yaml mapping of argument names to values"))]
    ParseArgFile {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to render template {template}")]
    #[diagnostic()]
    Render {
        template: String,
        source: tera::Error,
    },

    #[error("Template {template} did not render into a valid manifest")]
    #[diagnostic()]
    Manifest {
        template: String,
        source: serde_yaml::Error,
    },

    #[error("{} already exists", .0.display())]
    #[diagnostic(help("Pass --overwrite to replace it"))]
    OutputExists(PathBuf),

    #[error("Failed to write manifest to {}", .path.display())]
    #[diagnostic()]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
