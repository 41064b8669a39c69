use clap::Parser;

mod args;
mod bake;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = args::Args::parse();
    match args.command {
        args::Commands::Bake(args) => bake::bake_command(args),
    }
}
