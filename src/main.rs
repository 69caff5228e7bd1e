use clap::Parser;
use icondb::cli::SubCommandExtend;
use icondb::config::{Opts, SubCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = Opts::parse();
    match &opts.subcmd {
        SubCommand::Render(cmd) => cmd.run(&opts).await,
        SubCommand::Load(cmd) => cmd.run(&opts).await,
        SubCommand::Build(cmd) => cmd.run(&opts).await,
        SubCommand::Verify(cmd) => cmd.run(&opts).await,
    }
}
