use anyhow::Result;
use bsacompose::{run, Args};
use clap::Parser;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    run(args.command)?;

    Ok(())
}
