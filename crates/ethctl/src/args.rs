use crate::{
    Context,
    opts::{Ethctl, EthctlSubcommand},
};
use clap::Parser;
use ethctl_cli::{handler, utils, utils::LoadConfig};
use eyre::Result;

/// Run the `ethctl` command-line interface.
///
/// Failures are reported on stderr, unless quiet, before being returned.
pub fn run() -> Result<()> {
    setup()?;

    let args = Ethctl::parse();
    args.global.init();
    let shell = args.global.shell();

    let res = args.global.tokio_runtime().and_then(|rt| rt.block_on(run_command(args)));
    if let Err(err) = &res {
        debug!(?err, "command failed");
        let _ = shell.error(err);
    }
    res
}

/// Setup the error handler and load the `.env` file.
pub fn setup() -> Result<()> {
    handler::install();
    utils::load_dotenv();

    Ok(())
}

/// Run the subcommand.
pub async fn run_command(args: Ethctl) -> Result<()> {
    let config = args.load_config()?;
    let ctx = Context::new(config, args.global.shell());
    trace!(config = ?ctx.config, "loaded config");

    match args.cmd {
        EthctlSubcommand::Ens(cmd) => cmd.run(&ctx).await,
    }
}
