use std::{
    io::{self, Write},
    path::PathBuf,
};

use bon::Builder;
use clap::Args;
use log::{debug, info, trace};
use miette::{bail, miette, IntoDiagnostic, Result};
use okteto_tagger_core::{Tagger, Variant};
use okteto_tagger_manifest::Manifest;
use okteto_tagger_utils::constants::{DEFAULT_MANIFEST, OKTETO_TAGGER_MANIFEST, OKTETO_TAGGER_VARIANT};

use super::{ContextArgs, TaggerCommand};

#[derive(Debug, Clone, Args, Builder)]
pub struct TagCommand {
    /// The manifest to resolve references for.
    #[arg(short, long, default_value = DEFAULT_MANIFEST, env = OKTETO_TAGGER_MANIFEST)]
    #[builder(into, default = PathBuf::from(DEFAULT_MANIFEST))]
    manifest: PathBuf,

    /// The owner of the images.
    ///
    /// Defaults to the name in the manifest.
    #[arg(short, long)]
    #[builder(into)]
    name: Option<String>,

    /// Only resolve the images of these services.
    ///
    /// Can be passed more than once.
    #[arg(short, long = "service")]
    #[builder(default)]
    services: Vec<String>,

    /// The kind of build to resolve references for.
    #[arg(long, value_enum, default_value_t = Variant::Standard, env = OKTETO_TAGGER_VARIANT)]
    #[builder(default)]
    variant: Variant,

    /// Also print the references a build cache should
    /// probe for each image.
    #[arg(long)]
    #[builder(default)]
    candidates: bool,

    #[clap(flatten)]
    #[builder(default)]
    context: ContextArgs,
}

/// The references resolved for one build target.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedTarget {
    service: String,
    reference: String,
    candidates: Vec<String>,
}

impl TaggerCommand for TagCommand {
    fn try_run(&mut self) -> Result<()> {
        trace!("TagCommand::try_run()");

        let manifest = Manifest::parse(&self.manifest)?;
        let resolved = self.resolve(&manifest)?;

        Self::print(&resolved, &mut io::stdout().lock())
    }
}

impl TagCommand {
    fn resolve(&self, manifest: &Manifest) -> Result<Vec<ResolvedTarget>> {
        trace!("TagCommand::resolve()");

        let owner = self
            .name
            .as_deref()
            .or(manifest.name.as_deref())
            .ok_or_else(|| {
                miette!(
                    help = "Set `name` in the manifest or pass --name",
                    "Unable to determine the owner of the images"
                )
            })?;

        let unknown = self
            .services
            .iter()
            .filter(|service| !manifest.build.contains_key(service.as_str()))
            .collect::<Vec<_>>();
        if !unknown.is_empty() {
            bail!("Services not found in the build section of the manifest: {unknown:?}");
        }

        let targets = manifest.build_targets(&self.services);
        if targets.is_empty() {
            info!("Manifest has no images to build");
        }

        let tagger = Tagger::new(self.variant, self.context.runtime_context());
        debug!("Resolving {} image(s) for {owner} with {tagger:?}", targets.len());

        Ok(targets
            .into_iter()
            .map(|(service, target)| ResolvedTarget {
                service: service.to_string(),
                reference: tagger.tag(owner, service, target),
                candidates: if self.candidates {
                    tagger.possible_tags(owner, service, &tagger.context().content_hash)
                } else {
                    Vec::new()
                },
            })
            .collect())
    }

    fn print<W: Write>(resolved: &[ResolvedTarget], out: &mut W) -> Result<()> {
        for target in resolved {
            writeln!(out, "{}\t{}", target.service, target.reference).into_diagnostic()?;
            for candidate in &target.candidates {
                writeln!(out, "\t{candidate}").into_diagnostic()?;
            }
        }
        Ok(())
    }
}
