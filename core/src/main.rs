mod args;

use args::Args;
use clap::Parser;
use evaluation::{Evaluator, EvaluatorConfig, MetricResult};
use log::{debug, LevelFilter};
use simplelog::{Config, WriteLogger};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, Write};

fn main() -> Result<(), Box<dyn Error>> {
    let args = init()?;

    let evaluator = Evaluator::new(EvaluatorConfig {
        pawn_cache_capacity: args.cache_capacity,
    });

    let positions = if args.positions.is_empty() {
        read_positions(io::stdin().lock())?
    } else {
        args.positions.clone()
    };
    debug!("Scoring {} positions", positions.len());

    let results = evaluator.compute_batch(&positions);

    let mut out = io::stdout().lock();
    for (fen, scores) in positions.iter().zip(&results) {
        if scores.is_empty() {
            debug!("No scores for '{}'", fen);
        }
        writeln!(out, "{}", render(scores, args.pretty)?)?;
    }

    debug!("Pawn cache holds {} layouts", evaluator.pawn_cache().len());
    Ok(())
}

fn init() -> Result<Args, Box<dyn Error>> {
    let args = Args::parse();

    if let Some(log_file) = &args.log_file {
        WriteLogger::init(
            LevelFilter::Debug,
            Config::default(),
            File::create(log_file)?,
        )?;
    }

    Ok(args)
}

fn read_positions(input: impl BufRead) -> io::Result<Vec<String>> {
    let mut positions = Vec::new();
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            positions.push(line.to_string());
        }
    }
    Ok(positions)
}

fn render(scores: &[MetricResult], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(scores)
    } else {
        serde_json::to_string(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_positions_skips_blank_lines() {
        let input = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1\n\n  \n4k3/8/8/8/8/8/8/4K3 w - - 0 1  \n";
        let positions = read_positions(input.as_bytes()).unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[1], "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    }

    #[test]
    fn test_render_invalid_position_as_empty_list() {
        assert_eq!(render(&[], false).unwrap(), "[]");
    }

    #[test]
    fn test_render_field_names() {
        let scores = evaluation::compute_kmaps("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        let json = render(&scores, false).unwrap();
        assert!(json.starts_with(r#"[{"metric":"Material","White":0.5,"Black":0.5}"#));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["kmaps", "--pretty", "--cache-capacity", "64", "8/8/8/8/8/8/8/8 w - - 0 1"]);
        assert!(args.pretty);
        assert_eq!(args.cache_capacity, Some(64));
        assert_eq!(args.positions.len(), 1);
        assert!(args.log_file.is_none());
    }
}
