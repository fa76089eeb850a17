use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "kmaps")]
#[command(author = "Jørgen Hanssen <jorgen@hanssen.io>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Material, King safety, Activity, Pawn structure and Space scores for FEN positions")]
pub struct Args {
    /// FEN positions to score. Read from stdin, one per line, when omitted.
    pub positions: Vec<String>,

    /// Pretty-print the JSON output.
    #[arg(short, long)]
    pub pretty: bool,

    /// Clear the pawn-structure cache after this many pawn layouts.
    #[arg(long)]
    pub cache_capacity: Option<usize>,

    /// Log to a file for debugging.
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,
}
