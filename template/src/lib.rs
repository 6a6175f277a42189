//! Loads Okteto manifest templates, renders them with
//! user supplied arguments and parses the result.
//!
//! Templates use tera syntax, e.g. `namespace: {{ namespace }}`.

use std::{fs, path::Path};

use bon::Builder;
use indexmap::IndexMap;
use log::{debug, info, trace};
use okteto_tagger_manifest::Manifest;
use okteto_tagger_utils::constants::{CONTEXT_ARG, NAMESPACE_ARG};
use tera::{Context, Tera};

pub mod args;
mod error;
pub mod source;

pub use args::*;
pub use error::*;
pub use source::*;

/// A manifest template along with everything
/// needed to render it.
#[derive(Debug, Clone, Builder)]
pub struct ManifestTemplate {
    /// The URL or path of the template.
    #[builder(into)]
    template: TemplateSource,

    /// A yaml file of arguments to render the template with.
    #[builder(into)]
    arg_file: Option<std::path::PathBuf>,

    /// Arguments given inline. These win over the ones
    /// in `arg_file`.
    #[builder(default)]
    args: IndexMap<String, String>,

    /// Exposed to the template as `namespace`.
    #[builder(into)]
    namespace: Option<String>,

    /// Exposed to the template as `context`.
    #[builder(into)]
    context: Option<String>,
}

/// The output of a rendered template.
#[derive(Debug, Clone)]
pub struct RenderedManifest {
    /// The rendered text, as it will be written out.
    pub contents: String,

    pub manifest: Manifest,
}

impl ManifestTemplate {
    /// Collects the arguments the template is rendered with.
    ///
    /// The argument file is loaded first, then inline arguments
    /// are layered on top, then `namespace` and `context`. Those
    /// two are always present so templates can reference them,
    /// and are empty when no value was given anywhere.
    ///
    /// # Errors
    /// Errors if the argument file can't be loaded.
    pub fn arguments(&self) -> Result<TemplateArgs, TemplateError> {
        trace!("ManifestTemplate::arguments()");

        let file_args = self
            .arg_file
            .as_deref()
            .map(load_argument_file)
            .transpose()?
            .unwrap_or_default();

        let mut args = merge_args(file_args, self.args.clone());
        for (key, value) in [
            (NAMESPACE_ARG, self.namespace.as_deref()),
            (CONTEXT_ARG, self.context.as_deref()),
        ] {
            match value {
                Some(value) => {
                    args.insert(key.to_string(), value.into());
                }
                None => {
                    args.entry(key.to_string())
                        .or_insert_with(|| serde_yaml::Value::String(String::new()));
                }
            }
        }
        debug!("Template arguments: {args:?}");

        Ok(args)
    }

    /// Fetches and renders the template, then parses
    /// the result as a manifest.
    ///
    /// # Errors
    /// Errors if the template can't be fetched, the arguments
    /// can't be loaded, the template fails to render, or the
    /// rendered text isn't a valid manifest.
    pub fn render(&self) -> Result<RenderedManifest, TemplateError> {
        trace!("ManifestTemplate::render({})", self.template);

        let raw = self.template.fetch()?;
        let args = self.arguments()?;

        let contents = render_str(&raw, &args).map_err(|source| TemplateError::Render {
            template: self.template.to_string(),
            source,
        })?;

        let manifest =
            Manifest::from_yaml(&contents).map_err(|source| TemplateError::Manifest {
                template: self.template.to_string(),
                source,
            })?;
        info!("Generated template successfully");

        Ok(RenderedManifest { contents, manifest })
    }
}

impl RenderedManifest {
    /// Writes the rendered manifest to `path`.
    ///
    /// # Errors
    /// Errors if `path` exists and `overwrite` isn't set,
    /// or if the file can't be written.
    pub fn write(&self, path: &Path, overwrite: bool) -> Result<(), TemplateError> {
        trace!("RenderedManifest::write({}, {overwrite})", path.display());

        validate_output_path(path, overwrite)?;
        fs::write(path, &self.contents).map_err(|source| TemplateError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Manifest written to {}", path.display());

        Ok(())
    }
}

/// Checks that a manifest can be written to `path`.
///
/// # Errors
/// Errors if `path` already exists and `overwrite` isn't set.
pub fn validate_output_path(path: &Path, overwrite: bool) -> Result<(), TemplateError> {
    if path.exists() && !overwrite {
        return Err(TemplateError::OutputExists(path.to_path_buf()));
    }
    Ok(())
}

fn render_str(template: &str, args: &TemplateArgs) -> tera::Result<String> {
    let context = Context::from_serialize(args)?;
    Tera::one_off(template, &context, false)
}
