// Plain-text rendering of a nested comment tree

use crate::types::CommentNode;

const INDENT: &str = "  ";

/// Render comments depth-first, one `[ups] author: body` line per comment,
/// indented two spaces per level. Replies follow their parent at `depth + 1`.
///
/// Non-comment nodes are skipped. No limits are applied here; the tree is
/// rendered exactly as upstream truncated it.
pub fn format_comments(nodes: &[CommentNode], depth: usize) -> String {
    let mut out = String::new();
    write_comments(&mut out, nodes, depth);
    out
}

fn write_comments(out: &mut String, nodes: &[CommentNode], depth: usize) {
    let indent = INDENT.repeat(depth);

    for comment in nodes.iter().filter_map(CommentNode::as_comment) {
        let body = comment.body.replace('\n', &format!("\n{}", indent));
        out.push_str(&format!(
            "{}[{}] {}: {}\n",
            indent, comment.ups, comment.author, body
        ));

        if let Some(replies) = &comment.replies {
            write_comments(out, replies, depth + 1);
        }
    }
}

/// Number of comment nodes reachable from `nodes`
pub fn count_comments(nodes: &[CommentNode]) -> usize {
    nodes
        .iter()
        .filter_map(CommentNode::as_comment)
        .map(|c| 1 + c.replies.as_deref().map(count_comments).unwrap_or(0))
        .sum()
}
