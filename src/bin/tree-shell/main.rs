//! An interactive shell around [`avl_bst`]. It reads an initial set of keys, builds
//! either a plain BST or an AVL tree from them and then runs commands such as
//! `print`, `remove` or `rebalance` until `exit` or the end of input.
//!
//! ```text
//! $ tree-shell --tree avl
//! nodes> 5
//! insert> 5 3 8 1 4
//!
//! action> print
//!  Pre-order: 4 1 3 5 8
//!   In-order: 1 3 4 5 8
//! Post-order: 3 1 8 5 4
//! ```
//!
//! Set `RUST_LOG=debug` (or `trace`) to see what the tree does underneath.

use std::io;

use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};

mod shell;

use shell::{Shell, TreeKind};

/// Build a binary search tree from the keys you type and play with it.
#[derive(Parser)]
#[command(name = "tree-shell", version)]
struct CliOpts {
    /// Which tree to build from the initial keys.
    #[arg(long = "tree", value_enum, ignore_case = true)]
    tree: TreeKind,
}

fn main() -> Result<()> {
    // Logs go to stderr; `warn` unless RUST_LOG says otherwise.
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let opts = CliOpts::parse();
    let stdin = io::stdin();
    let mut shell = Shell::start(opts.tree, stdin.lock(), io::stdout())?;
    shell.run()
}
