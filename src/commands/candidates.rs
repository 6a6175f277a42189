use std::io::{self, Write};

use bon::Builder;
use clap::Args;
use log::{debug, trace, warn};
use miette::{IntoDiagnostic, Result};
use okteto_tagger_core::{Tagger, Variant};
use okteto_tagger_utils::constants::OKTETO_TAGGER_VARIANT;

use super::{ContextArgs, TaggerCommand};

#[derive(Debug, Clone, Args, Builder)]
pub struct CandidatesCommand {
    /// The owner of the image, usually the manifest name.
    #[arg(short, long)]
    #[builder(into)]
    name: String,

    /// The service the image is built for.
    #[arg(short, long)]
    #[builder(into)]
    service: String,

    /// The kind of build to resolve candidates for.
    #[arg(long, value_enum, default_value_t = Variant::Standard, env = OKTETO_TAGGER_VARIANT)]
    #[builder(default)]
    variant: Variant,

    /// Only print the content addressed candidates.
    ///
    /// Prints nothing when no content hash is available.
    #[arg(long)]
    #[builder(default)]
    hash_only: bool,

    #[clap(flatten)]
    #[builder(default)]
    context: ContextArgs,
}

impl TaggerCommand for CandidatesCommand {
    fn try_run(&mut self) -> Result<()> {
        trace!("CandidatesCommand::try_run()");

        let candidates = self.candidates();

        let mut stdout = io::stdout().lock();
        for candidate in &candidates {
            writeln!(stdout, "{candidate}").into_diagnostic()?;
        }

        Ok(())
    }
}

impl CandidatesCommand {
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub const fn context(&self) -> &ContextArgs {
        &self.context
    }

    fn candidates(&self) -> Vec<String> {
        let tagger = Tagger::new(self.variant, self.context.runtime_context());
        let content_hash = &tagger.context().content_hash;

        if content_hash.is_empty() {
            warn!(
                "No content hash available, only the {} tag can be probed",
                self.variant.base_tag()
            );
        }

        let candidates = if self.hash_only {
            tagger.possible_hash_images(&self.name, &self.service, content_hash)
        } else {
            tagger.possible_tags(&self.name, &self.service, content_hash)
        };
        debug!("Candidates for {}-{}: {candidates:?}", self.name, self.service);

        candidates
    }
}
