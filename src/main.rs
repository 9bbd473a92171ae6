use clap::Parser;
use repo_stats::cli::{self, Cli};
use repo_stats::console::StdConsole;
use repo_stats::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    let mut console = StdConsole::new();
    cli::run(args, &mut console).await
}
