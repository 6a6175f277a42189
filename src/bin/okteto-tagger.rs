use clap::Parser;
use log::LevelFilter;
use okteto_tagger::commands::{CommandArgs, TaggerArgs, TaggerCommand};
use okteto_tagger_utils::logging::Logger;

fn main() {
    let args = TaggerArgs::parse();

    Logger::new()
        .filter_level(args.verbosity.log_level_filter())
        .filter_modules([
            ("hyper_util", LevelFilter::Info),
            ("reqwest", LevelFilter::Info),
        ])
        .init();

    log::trace!("Parsed arguments: {args:#?}");

    match args.command {
        CommandArgs::Tag(mut command) => command.run(),
        CommandArgs::Candidates(mut command) => command.run(),
        CommandArgs::InitTemplate(mut command) => command.run(),
    }
}
