use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use avl_bst::{keys, tikz, AvlTree, Balanced, Bst, Mode, Plain};
use clap::ValueEnum;
use log::{info, warn};

const HELP: &str = "
Available commands:
Help       - Show this message
FindMinMax - Print the smallest and the largest node from the tree
Print      - Print the tree using In-order, Pre-order, Post-order
Remove     - Remove an element from the tree
Delete     - Delete the whole tree
Export     - Export the tree to TikZ picture
Rebalance  - Rebalance the AVL tree or convert BST to AVL and rebalance
Exit       - Exit the program (same as ctrl+C)
";

/// The kind of tree the initial keys are loaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TreeKind {
    Avl,
    Bst,
}

/// The tree a session works on. `rebalance` turns a plain tree into a balanced one.
enum Loaded {
    Plain(Bst<i64>),
    Balanced(AvlTree<i64>),
}

/// Evaluates `$body` with `$tree` bound to whichever tree `$loaded` holds.
macro_rules! with_tree {
    ($loaded:expr, $tree:ident => $body:expr) => {
        match $loaded {
            Loaded::Plain($tree) => $body,
            Loaded::Balanced($tree) => $body,
        }
    };
}

impl Loaded {
    fn name(&self) -> &'static str {
        match self {
            Loaded::Plain(_) => Plain::NAME,
            Loaded::Balanced(_) => Balanced::NAME,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Help,
    FindMinMax,
    Print,
    Remove,
    Delete,
    Export,
    Rebalance,
    Exit,
}

impl Command {
    /// Commands are matched case-insensitively.
    fn parse(word: &str) -> Option<Self> {
        let command = match word.to_ascii_lowercase().as_str() {
            "help" => Self::Help,
            "findminmax" => Self::FindMinMax,
            "print" => Self::Print,
            "remove" => Self::Remove,
            "delete" => Self::Delete,
            "export" => Self::Export,
            "rebalance" => Self::Rebalance,
            "exit" => Self::Exit,
            _ => return None,
        };
        Some(command)
    }
}

enum Flow {
    Continue,
    Exit,
}

/// One interactive session: prompts go to `output`, answers come from `input`.
pub struct Shell<R, W> {
    input: R,
    output: W,
    tree: Loaded,
}

impl<R, W> Shell<R, W>
where
    R: BufRead,
    W: Write,
{
    /// Asks for the initial keys and builds the tree.
    pub fn start(kind: TreeKind, mut input: R, mut output: W) -> Result<Self> {
        let count = keys::parse_count(&expect_line(&mut input, &mut output, "nodes> ")?)?;
        let keys: Vec<i64> =
            keys::parse_exact(count, &expect_line(&mut input, &mut output, "insert> ")?)?;

        let tree = match kind {
            TreeKind::Avl => Loaded::Balanced(AvlTree::build_balanced(keys)),
            TreeKind::Bst => Loaded::Plain(keys.into_iter().collect()),
        };
        info!(
            "loaded {} keys into a {} tree",
            with_tree!(&tree, tree => tree.size()),
            tree.name()
        );

        Ok(Self {
            input,
            output,
            tree,
        })
    }

    /// Runs commands until `exit` or the end of input. A failing command is
    /// reported and the session carries on.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(line) = prompt(&mut self.input, &mut self.output, "\naction> ")? else {
                return Ok(());
            };
            let Some(word) = line.split_whitespace().next() else {
                continue;
            };
            let Some(command) = Command::parse(word) else {
                writeln!(
                    self.output,
                    "Invalid command. Type \"help\" for a list of commands."
                )?;
                continue;
            };

            match self.execute(command) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(err) => {
                    warn!("{command:?} failed: {err:#}");
                    writeln!(self.output, "An error occurred: {err}")?;
                }
            }
        }
    }

    fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Help => self.output.write_all(HELP.as_bytes())?,
            Command::FindMinMax => {
                let (min, max) =
                    with_tree!(&self.tree, tree => (*tree.find_min()?, *tree.find_max()?));
                writeln!(self.output, "Min: {min}\nMax: {max}")?;
            }
            Command::Print => self.print()?,
            Command::Remove => self.remove()?,
            Command::Delete => {
                with_tree!(&mut self.tree, tree => tree.clear());
                writeln!(self.output, "Tree successfully deleted.")?;
            }
            Command::Export => {
                let stem = self.line("Enter the filename to save the tree structure: ")?;
                let path = format!("{}.tex", stem.trim());
                with_tree!(&self.tree, tree => tikz::export(tree, &path))?;
                info!("exported the tree to {path}");
                writeln!(self.output, "Tree exported successfully.")?;
            }
            Command::Rebalance => self.rebalance()?,
            Command::Exit => {
                writeln!(self.output, "Exiting...")?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn print(&mut self) -> Result<()> {
        if with_tree!(&self.tree, tree => tree.is_empty()) {
            writeln!(
                self.output,
                "{} tree is empty.",
                self.tree.name().to_uppercase()
            )?;
            return Ok(());
        }

        let [pre, ino, post] = with_tree!(
            &self.tree,
            tree => [tree.pre_order(), tree.in_order(), tree.post_order()].map(join)
        );
        writeln!(
            self.output,
            " Pre-order: {pre}\n  In-order: {ino}\nPost-order: {post}"
        )?;
        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        let count = keys::parse_count(&self.line("nodes> ")?)?;
        let doomed: Vec<i64> = keys::parse_exact(count, &self.line("delete> ")?)?;

        for key in doomed {
            if with_tree!(&mut self.tree, tree => tree.delete(&key)) {
                writeln!(self.output, "Removed {key}")?;
            } else {
                writeln!(self.output, "Value {key} not found")?;
            }
        }
        Ok(())
    }

    fn rebalance(&mut self) -> Result<()> {
        let rebuilt = match &self.tree {
            Loaded::Plain(tree) => {
                let rebuilt = tree.convert_to_balanced();
                writeln!(self.output, "Converted BST to AVL and rebalanced.")?;
                rebuilt
            }
            Loaded::Balanced(tree) => tree.convert_to_balanced(),
        };
        let pre_order = join(rebuilt.pre_order());
        self.tree = Loaded::Balanced(rebuilt);

        writeln!(self.output, "Tree rebalanced. \nPre-Order: {pre_order}")?;
        Ok(())
    }

    fn line(&mut self, text: &str) -> Result<String> {
        expect_line(&mut self.input, &mut self.output, text)
    }
}

/// Writes `text` and reads one line. `None` at the end of input.
fn prompt<R, W>(input: &mut R, output: &mut W, text: &str) -> Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{text}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn expect_line<R, W>(input: &mut R, output: &mut W, text: &str) -> Result<String>
where
    R: BufRead,
    W: Write,
{
    prompt(input, output, text)?.context("unexpected end of input")
}

fn join<T: Display>(keys: Vec<T>) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
