//! Exports a tree's shape as a TikZ picture.
//!
//! Every present child becomes a `child {node {...}}` block. When a node has
//! exactly one child, the absent one is written as `child[missing] {}` so the
//! drawing keeps left and right apart. Characters LaTeX treats specially, such as
//! `_` or `%`, are escaped in the keys.
//!
//! # Examples
//!
//! ```
//! use avl_bst::{tikz, AvlTree};
//!
//! let tree = AvlTree::build_balanced([1, 2]);
//!
//! let picture = tikz::render(&tree).unwrap();
//! assert!(picture.contains("\\node {1}\n  child[missing] {}\n  child {node {2}};"));
//! ```

use std::fmt::Display;
use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::tree::{NodeRef, Tree};

const HEADER: &str = "\\begin{TikzTreeStyle}\n";
const FOOTER: &str = ";\n\\path[draw=none] (0,-3) -- (0,4mm); % Set tikzpicture height to 34mm\n\\end{TikzTreeStyle}\n";

enum Frame<'a, K, M> {
    Child(NodeRef<'a, K, M>, usize),
    Missing(usize),
    Close(usize),
}

/// Renders `tree` as the body of a `TikzTreeStyle` environment.
///
/// # Errors
///
/// [`Error::EmptyTree`] if there is nothing to draw.
pub fn render<K, M>(tree: &Tree<K, M>) -> Result<String>
where
    K: Display,
{
    let root = tree.root().ok_or(Error::EmptyTree)?;

    let mut out = String::from(HEADER);
    out.push_str(&format!("\\node {{{}}}", escape(root.key())));

    // Frames are popped in output order, so each node's closing brace goes on the
    // stack before its children.
    let mut stack = Vec::new();
    push_children(&mut stack, root, 1);
    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Child(node, depth) => {
                out.push_str(&format!(
                    "\n{}child {{node {{{}}}",
                    indent(depth),
                    escape(node.key())
                ));
                if node.is_leaf() {
                    out.push('}');
                } else {
                    stack.push(Frame::Close(depth));
                    push_children(&mut stack, node, depth + 1);
                }
            }
            Frame::Missing(depth) => {
                out.push_str(&format!("\n{}child[missing] {{}}", indent(depth)));
            }
            Frame::Close(depth) => {
                out.push_str(&format!("\n{}}}", indent(depth)));
            }
        }
    }

    out.push_str(FOOTER);
    Ok(out)
}

/// Renders `tree` and writes it to `path`, replacing any existing file.
///
/// # Errors
///
/// [`Error::EmptyTree`] for an empty tree and [`Error::Io`] if the file can't be
/// written.
pub fn export<K, M>(tree: &Tree<K, M>, path: impl AsRef<Path>) -> Result<()>
where
    K: Display,
{
    let path = path.as_ref();
    let picture = render(tree)?;
    debug!("writing {} bytes of TikZ to {}", picture.len(), path.display());
    fs::write(path, picture)?;
    Ok(())
}

fn push_children<'a, K, M>(
    stack: &mut Vec<Frame<'a, K, M>>,
    node: NodeRef<'a, K, M>,
    depth: usize,
) {
    if node.is_leaf() {
        return;
    }
    let frame = |child: Option<NodeRef<'a, K, M>>| match child {
        Some(child) => Frame::Child(child, depth),
        None => Frame::Missing(depth),
    };
    stack.push(frame(node.right()));
    stack.push(frame(node.left()));
}

/// Makes a key's text safe to place inside a TikZ node.
fn escape(key: &impl Display) -> String {
    let text = key.to_string();
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '_' | '%' | '#' | '&' | '$' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
