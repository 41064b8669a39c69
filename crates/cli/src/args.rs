use clap::{Parser, Subcommand};

#[derive(clap::Args, Debug)]
pub struct BakeArgs {
    /// Path to the STL model to bake.
    pub model_path: String,

    /// Directory to write `vertices.bin` and `indices.bin` into.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Ignore facet normals so corners are shared across sides.
    #[arg(long)]
    pub positions_only: bool,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Bake(BakeArgs),
}
