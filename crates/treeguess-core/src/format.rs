//! Text rendering of a tree.
//!
//! The plain rendering is the payload embedded in analysis prompts:
//!
//! ```text
//! 📁 proj/
//!   📁 src/
//!     - a.js (10 B)
//!   - README.md (2.00 KB)
//! ```

use crate::node::{FileNode, TreeNode};

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// Render a tree as an indented listing, two spaces per level.
pub fn format_structure(node: &TreeNode) -> String {
    format_structure_with(node, |file| file.name.to_string())
}

/// Render a tree, letting `decorate` produce the text in each file's name
/// slot. The rest of every line is identical to [`format_structure`].
pub fn format_structure_with<F>(node: &TreeNode, decorate: F) -> String
where
    F: Fn(&FileNode) -> String,
{
    let mut out = String::new();
    write_node(&mut out, node, 0, &decorate);
    out
}

fn write_node<F>(out: &mut String, node: &TreeNode, level: usize, decorate: &F)
where
    F: Fn(&FileNode) -> String,
{
    let indent = "  ".repeat(level);
    match node {
        TreeNode::File(file) => {
            out.push_str(&format!(
                "{indent}- {} ({})\n",
                decorate(file),
                format_file_size(file.size)
            ));
        }
        TreeNode::Directory(dir) => {
            out.push_str(&format!("{indent}📁 {}/\n", dir.name));
            for child in &dir.children {
                write_node(out, child, level + 1, decorate);
            }
        }
    }
}

/// Format a byte count with binary multiples and `B`/`KB`/`MB`/`GB` units.
pub fn format_file_size(bytes: u64) -> String {
    match bytes {
        b if b < KIB => format!("{b} B"),
        b if b < MIB => format!("{:.2} KB", b as f64 / KIB as f64),
        b if b < GIB => format!("{:.2} MB", b as f64 / MIB as f64),
        b => format!("{:.2} GB", b as f64 / GIB as f64),
    }
}
