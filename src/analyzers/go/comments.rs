//! Comment groups and their association with declarations.

use tree_sitter::Node;

/// Adjacent comments with no blank line or code between them.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentGroup {
    pub start_byte: usize,
    pub start_row: usize,
    pub end_row: usize,
    /// The group starts on a line that already holds code.
    pub trailing: bool,
    pub comments: Vec<String>,
}

impl CommentGroup {
    pub fn text(&self) -> String {
        comment_text(&self.comments)
    }
}

/// All comment groups of one file, in source order.
#[derive(Debug, Default)]
pub struct CommentIndex {
    groups: Vec<CommentGroup>,
}

impl CommentIndex {
    pub fn build(root: Node<'_>, source: &str) -> Self {
        let mut groups: Vec<CommentGroup> = Vec::new();

        for node in collect_comments(root) {
            let start_row = node.start_position().row;
            let end_row = node.end_position().row;
            let text = source[node.start_byte()..node.end_byte()].to_string();
            let trailing = has_code_before(source, node.start_byte());

            if let Some(last) = groups.last_mut() {
                let joins = if trailing {
                    last.trailing && last.end_row == start_row
                } else {
                    !last.trailing && start_row <= last.end_row + 1
                };

                if joins {
                    last.end_row = end_row;
                    last.comments.push(text);
                    continue;
                }
            }

            groups.push(CommentGroup {
                start_byte: node.start_byte(),
                start_row,
                end_row,
                trailing,
                comments: vec![text],
            });
        }

        Self { groups }
    }

    /// Text of the comment group ending on the line above `row`.
    pub fn doc_for(&self, row: usize) -> String {
        self.groups
            .iter()
            .find(|g| !g.trailing && g.end_row + 1 == row)
            .map(CommentGroup::text)
            .unwrap_or_default()
    }

    /// Text of the comment group that starts after code on `row`.
    pub fn trailing_for(&self, row: usize) -> String {
        self.groups
            .iter()
            .find(|g| g.trailing && g.start_row == row)
            .map(CommentGroup::text)
            .unwrap_or_default()
    }

    /// Like [`trailing_for`](Self::trailing_for), restricted to groups that
    /// start before byte offset `end`.
    pub fn trailing_before(&self, row: usize, end: usize) -> String {
        self.groups
            .iter()
            .find(|g| g.trailing && g.start_row == row && g.start_byte < end)
            .map(CommentGroup::text)
            .unwrap_or_default()
    }

    pub fn groups(&self) -> &[CommentGroup] {
        &self.groups
    }
}

fn collect_comments(root: Node<'_>) -> Vec<Node<'_>> {
    let mut comments = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.kind() == "comment" {
            comments.push(node);
            continue;
        }

        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    comments
}

fn has_code_before(source: &str, byte: usize) -> bool {
    let line_start = source[..byte].rfind('\n').map_or(0, |i| i + 1);
    !source[line_start..byte].trim().is_empty()
}

/// Text of a comment group with comment markers removed.
///
/// One space after `//` is dropped, tool directives (`//go:embed`,
/// `//line f.go:1`) are skipped, trailing whitespace is trimmed and leading,
/// trailing and repeated blank lines are removed.
pub fn comment_text<S: AsRef<str>>(comments: &[S]) -> String {
    let mut lines: Vec<String> = Vec::new();

    for comment in comments {
        let comment = comment.as_ref();

        let body = if let Some(rest) = comment.strip_prefix("//") {
            if let Some(rest) = rest.strip_prefix(' ') {
                rest
            } else if is_directive(rest) {
                continue;
            } else {
                rest
            }
        } else if let Some(rest) = comment.strip_prefix("/*") {
            rest.strip_suffix("*/").unwrap_or(rest)
        } else {
            comment
        };

        lines.extend(body.split('\n').map(|l| l.trim_end().to_string()));
    }

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        let prev_blank = out.last().is_none_or(|l| l.is_empty());
        if !line.is_empty() || !prev_blank {
            out.push(line);
        }
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }

    out.join("\n")
}

/// `line `, `extern `, `export ` or `[a-z0-9]+:[a-z0-9]` after `//`.
fn is_directive(c: &str) -> bool {
    if c.starts_with("line ") || c.starts_with("extern ") || c.starts_with("export ") {
        return true;
    }

    let bytes = c.as_bytes();
    let Some(colon) = c.find(':') else {
        return false;
    };
    if colon == 0 || colon + 1 >= bytes.len() {
        return false;
    }

    (0..=colon + 1)
        .filter(|&i| i != colon)
        .all(|i| bytes[i].is_ascii_lowercase() || bytes[i].is_ascii_digit())
}
