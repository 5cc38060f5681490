//! Perft benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example perft_bench -p draughts_core -- [depth] [variant] [descriptor]
//!
//! Examples:
//!   # Default: depth 6 from every variant's starting position
//!   cargo flamegraph --example perft_bench -p draughts_core
//!
//!   # One variant
//!   cargo flamegraph --example perft_bench -p draughts_core -- 7 russian
//!
//!   # A variant and a position descriptor
//!   cargo flamegraph --example perft_bench -p draughts_core -- 5 brazilian "Weeeeeeeeebbeeeeeweeeeeeeeeeeeeee"

use draughts_core::{Board, STARTPOS, Variant, perft};
use std::env;
use std::process;
use std::time::{Duration, Instant};

fn main() {
    let args: Vec<String> = env::args().collect();

    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(6);

    let Some(name) = args.get(2) else {
        run_all_variants(depth);
        return;
    };
    let variant: Variant = match name.parse() {
        Ok(variant) => variant,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };
    let setup = args.get(3).map(String::as_str).unwrap_or(STARTPOS);
    match Board::new(variant, setup) {
        Ok(board) => run_single_position(&board, setup, depth),
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    }
}

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}

fn run_single_position(board: &Board, setup: &str, depth: u8) {
    println!("Variant: {}", board.variant());
    println!("Position: {setup}");
    println!("Depth: {depth}");
    println!();

    // Warm-up run at lower depth
    if depth > 2 {
        let _ = perft(board, depth.saturating_sub(2));
    }

    let start = Instant::now();
    let nodes = perft(board, depth);
    let elapsed = start.elapsed();

    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {:.0}", nps(nodes, elapsed));
}

fn run_all_variants(depth: u8) {
    println!("=== Perft Benchmark Suite ===");
    println!("Depth: {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for variant in Variant::ALL {
        let board = Board::startpos(variant);

        print!("{:.<30}", variant.name());

        let start = Instant::now();
        let nodes = perft(&board, depth);
        let elapsed = start.elapsed();

        total_nodes += nodes;
        total_time += elapsed;

        println!(
            " {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
            nps(nodes, elapsed)
        );
    }

    println!();
    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time)
    );
}
