use anyhow::{Context, Result};
use bst_rebuild::Tree;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "bst-demo",
    about = "Build a binary search tree, unbalance it and rebuild it"
)]
struct Cli {
    /// Keys to build the initial tree from (any order, duplicates allowed).
    #[arg(default_values_t = [10, 5, 15, 2, 7, 20, 21, 22, 23])]
    keys: Vec<i64>,
    /// Keys to insert after building, in order.
    #[arg(short, long, value_delimiter = ',', default_values_t = [1, 0])]
    insert: Vec<i64>,
    /// Keys to delete after inserting, in order. Deleting a missing key is an error.
    #[arg(short, long, value_delimiter = ',')]
    delete: Vec<i64>,
    /// Keys whose height and depth are reported.
    #[arg(short, long, value_delimiter = ',', default_values_t = [10])]
    find: Vec<i64>,
    /// Only report whether the tree is balanced, don't rebuild it.
    #[arg(long)]
    no_rebalance: bool,
    /// Log more (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    run(&cli)
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(filter),
        )
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let mut tree = Tree::build_tree(cli.keys.iter().copied());
    info!(len = tree.len(), height = ?tree.height(), "built tree");

    for &key in &cli.insert {
        if !tree.insert(key) {
            warn!(key, "key already present");
        }
    }
    for key in &cli.delete {
        tree.try_delete(key)
            .with_context(|| format!("failed to delete {key}"))?;
    }

    print!("{tree}");
    for key in &cli.find {
        let node = tree
            .try_find(key)
            .with_context(|| format!("failed to find {key}"))?;
        let depth = tree
            .depth(node)
            .with_context(|| format!("{key} is not reachable from the root"))?;
        println!("{key}: height {}, depth {depth}", node.height());
    }
    println!("balanced: {}", tree.is_balanced());

    if !cli.no_rebalance {
        tree.rebalance();
        print!("{tree}");
        println!("balanced: {}", tree.is_balanced());
    }

    Ok(())
}
