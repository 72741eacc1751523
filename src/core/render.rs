//! Text helpers shared by the declaration entities' `Display` impls.

use super::entities::Field;

/// Width a wrapped doc comment line stays under.
const COMMENT_WIDTH: usize = 80;

/// Renders `doc` as a `//` comment block ending in a newline.
///
/// Multi-line docs keep their lines. A single line is word-wrapped greedily.
pub fn comment_block(doc: &str) -> String {
    let doc = doc.trim();
    if doc.is_empty() {
        return String::new();
    }

    let mut out = String::new();

    if doc.contains('\n') {
        for line in doc.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                out.push_str("//\n");
            } else {
                out.push_str("// ");
                out.push_str(line);
                out.push('\n');
            }
        }
        return out;
    }

    let mut line = String::from("//");
    let mut line_len = 3;
    let mut has_words = false;

    for word in doc.split_whitespace() {
        if has_words && line_len + word.len() + 1 >= COMMENT_WIDTH {
            out.push_str(&line);
            out.push('\n');
            line = String::from("//");
            line_len = 3;
        }

        line.push(' ');
        line.push_str(word);
        line_len += word.len() + 1;
        has_words = true;
    }

    out.push_str(&line);
    out.push('\n');
    out
}

/// Renders `comment` as a ` // ...` suffix on the current line.
///
/// Multi-line comments are folded onto that line.
pub fn trailing_comment(comment: &str) -> String {
    let words: Vec<&str> = comment.split_whitespace().collect();
    if words.is_empty() {
        String::new()
    } else {
        format!(" // {}", words.join(" "))
    }
}

/// Comma-separated parameter list without the surrounding parentheses.
pub fn field_list(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::signature)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result list as it follows a parameter list.
///
/// A single unnamed result stays bare, anything else is parenthesized and an
/// empty list renders as nothing.
pub fn result_list(fields: &[Field]) -> String {
    match fields {
        [] => String::new(),
        [single] if single.names.is_empty() => single.signature(),
        _ => format!("({})", field_list(fields)),
    }
}

/// `(params) results` with a separating space only when results exist.
pub fn signature_tail(params: &[Field], results: &[Field]) -> String {
    let results = result_list(results);
    if results.is_empty() {
        format!("({})", field_list(params))
    } else {
        format!("({}) {}", field_list(params), results)
    }
}
