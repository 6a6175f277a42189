use std::path::PathBuf;

use bon::Builder;
use clap::Args;
use indexmap::IndexMap;
use log::{debug, trace};
use miette::{IntoDiagnostic, Result};
use okteto_tagger_manifest::Manifest;
use okteto_tagger_template::{validate_output_path, ManifestTemplate};
use okteto_tagger_utils::constants::{OKTETO_CONTEXT, OKTETO_NAMESPACE};

use super::TaggerCommand;

#[derive(Debug, Clone, Args, Builder)]
pub struct InitTemplateCommand {
    /// URL or path of the manifest template.
    #[arg(short, long)]
    #[builder(into)]
    template: String,

    /// A yaml file of arguments to render the template with.
    #[arg(long)]
    #[builder(into)]
    template_arg_file: Option<PathBuf>,

    /// An argument to render the template with, as `KEY=VALUE`.
    ///
    /// Can be passed more than once. Wins over the
    /// values in --template-arg-file.
    #[arg(long = "template-arg", value_parser = parse_key_val)]
    #[builder(default)]
    template_args: Vec<(String, String)>,

    /// The namespace exposed to the template.
    #[arg(short, long, env = OKTETO_NAMESPACE)]
    #[builder(into)]
    namespace: Option<String>,

    /// The Okteto context exposed to the template.
    #[arg(short, long, env = OKTETO_CONTEXT)]
    #[builder(into)]
    context: Option<String>,

    /// The directory to write the manifest to.
    ///
    /// Defaults to the current directory.
    #[arg(short, long)]
    #[builder(into)]
    workdir: Option<PathBuf>,

    /// The file to write the manifest to.
    ///
    /// Defaults to `okteto.yml` inside the working directory.
    #[arg(short, long)]
    #[builder(into)]
    output: Option<PathBuf>,

    /// Replace the manifest if it already exists.
    #[arg(long)]
    #[builder(default)]
    overwrite: bool,
}

impl TaggerCommand for InitTemplateCommand {
    fn try_run(&mut self) -> Result<()> {
        trace!("InitTemplateCommand::try_run()");

        let path = self.output_path()?;
        validate_output_path(&path, self.overwrite)?;

        let rendered = self.manifest_template().render()?;
        debug!("Rendered manifest:\n{}", rendered.contents);

        rendered.write(&path, self.overwrite)?;
        Ok(())
    }
}

impl InitTemplateCommand {
    fn output_path(&self) -> Result<PathBuf> {
        if let Some(output) = &self.output {
            return Ok(output.clone());
        }

        let workdir = match &self.workdir {
            Some(workdir) => workdir.clone(),
            None => std::env::current_dir().into_diagnostic()?,
        };
        Ok(Manifest::default_path(&workdir))
    }

    fn manifest_template(&self) -> ManifestTemplate {
        ManifestTemplate::builder()
            .template(self.template.as_str())
            .maybe_arg_file(self.template_arg_file.clone())
            .args(self.template_args.iter().cloned().collect::<IndexMap<_, _>>())
            .maybe_namespace(self.namespace.clone())
            .maybe_context(self.context.clone())
            .build()
    }
}

fn parse_key_val(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("invalid KEY=VALUE: no `=` or empty key found in `{arg}`")),
    }
}
