use bon::Builder;
use clap::{builder::BoolishValueParser, crate_version, Args, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::{error, trace};
use okteto_tagger_core::RuntimeContext;

pub mod candidates;
pub mod init_template;
pub mod tag;

pub trait TaggerCommand {
    /// Runs the command and returns a result
    /// of the execution
    ///
    /// # Errors
    /// Can return a `miette` Error
    fn try_run(&mut self) -> miette::Result<()>;

    /// Runs the command and exits if there is an error.
    fn run(&mut self) {
        if let Err(e) = self.try_run() {
            error!("{e:?}");
            std::process::exit(1);
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "okteto-tagger",
    about,
    long_about = None,
    version = crate_version!(),
)]
pub struct TaggerArgs {
    #[command(subcommand)]
    pub command: CommandArgs,

    #[clap(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

#[derive(Debug, Subcommand)]
pub enum CommandArgs {
    /// Print the reference each image of a manifest is pushed to
    Tag(tag::TagCommand),

    /// Print the references a build cache should probe
    /// for an already built image, most specific first
    Candidates(candidates::CandidatesCommand),

    /// Generate a manifest from a template
    InitTemplate(init_template::InitTemplateCommand),
}

/// Facts about the environment the build runs in.
///
/// Every flag that isn't given falls back to its
/// `OKTETO_TAGGER_*` environment variable.
#[derive(Default, Clone, Debug, Builder, Args)]
pub struct ContextArgs {
    /// Whether the repository has no uncommitted changes.
    #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    clean: Option<bool>,

    /// Whether you can push to the global registry.
    #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    global_access: Option<bool>,

    /// The hash of the build context.
    #[arg(long)]
    #[builder(into)]
    content_hash: Option<String>,
}

impl ContextArgs {
    /// Resolves the runtime context, preferring flags over the environment.
    #[must_use]
    pub fn runtime_context(&self) -> RuntimeContext {
        trace!("ContextArgs::runtime_context({self:?})");

        let env = RuntimeContext::from_env();
        RuntimeContext::builder()
            .is_clean(self.clean.unwrap_or(env.is_clean))
            .has_access(self.global_access.unwrap_or(env.has_access))
            .content_hash(self.content_hash.clone().unwrap_or(env.content_hash))
            .build()
    }
}

#[cfg(test)]
mod test {
    use clap::Parser;
    use okteto_tagger_core::{RuntimeContext, Variant};
    use pretty_assertions::assert_eq;

    use super::{CommandArgs, ContextArgs, TaggerArgs};

    #[test]
    fn flags_override_env() {
        let context = ContextArgs::builder()
            .clean(true)
            .global_access(false)
            .content_hash("abc")
            .build();

        assert_eq!(
            context.runtime_context(),
            RuntimeContext::builder()
                .is_clean(true)
                .has_access(false)
                .content_hash("abc")
                .build()
        );
    }

    #[test]
    fn parse_candidates() {
        let args = TaggerArgs::parse_from([
            "okteto-tagger",
            "candidates",
            "--name",
            "movies",
            "--service",
            "api",
            "--variant",
            "with-volume-mounts",
            "--clean",
            "yes",
            "--content-hash",
            "abc",
        ]);

        let CommandArgs::Candidates(command) = args.command else {
            panic!("Expected the candidates command");
        };
        assert_eq!(command.variant(), Variant::WithExtraVolumeMounts);
        assert_eq!(command.context().runtime_context().content_hash, "abc");
        assert!(command.context().runtime_context().is_clean);
    }

    #[test]
    fn parse_init_template() {
        let args = TaggerArgs::parse_from([
            "okteto-tagger",
            "init-template",
            "-t",
            "https://example.com/okteto.yml.tmpl",
            "--template-arg",
            "name=movies",
            "--template-arg",
            "query=a=b",
            "--overwrite",
        ]);

        assert!(matches!(args.command, CommandArgs::InitTemplate(_)));
        assert!(TaggerArgs::try_parse_from([
            "okteto-tagger",
            "init-template",
            "-t",
            "okteto.yml.tmpl",
            "--template-arg",
            "no-equals",
        ])
        .is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;

        TaggerArgs::command().debug_assert();
    }
}
