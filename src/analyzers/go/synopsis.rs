//! First-sentence summaries of doc comments, as `go doc` prints them.

/// Docs starting with these (ignoring case) have no synopsis.
const ILLEGAL_PREFIXES: [&str; 3] = ["copyright", "all rights", "author"];

/// Returns the first sentence of the first paragraph of `text`, with its
/// lines joined by single spaces.
///
/// A paragraph that is a code block, heading or list yields an empty
/// synopsis.
pub fn synopsis(text: &str) -> String {
    let sentence = first_sentence(text);

    let lower = sentence.to_lowercase();
    if ILLEGAL_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return String::new();
    }

    let paragraph: Vec<&str> = sentence
        .lines()
        .skip_while(|line| line.trim().is_empty())
        .take_while(|line| !line.trim().is_empty())
        .collect();

    match paragraph.first() {
        None => return String::new(),
        Some(first) if !is_plain_paragraph(first) => return String::new(),
        Some(_) => {}
    }

    paragraph
        .iter()
        .flat_map(|line| line.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text up to and including the first sentence terminator that is followed
/// by whitespace.
///
/// A period after a single capital letter (`J. Doe`) does not end a
/// sentence unless the letter before it is also a capital (`USA. Next`).
/// Ideographic full stops end a sentence without trailing whitespace.
fn first_sentence(s: &str) -> &str {
    let (mut ppp, mut pp, mut p) = ('\0', '\0', '\0');

    for (i, q) in s.char_indices() {
        let q = if matches!(q, '\n' | '\r' | '\t') { ' ' } else { q };

        if q == ' ' {
            let abbreviation = p == '.' && pp.is_uppercase() && !ppp.is_uppercase();
            if matches!(p, '.' | '!' | '?') && !abbreviation {
                return &s[..i];
            }
        }

        if matches!(p, '。' | '．') {
            return &s[..i];
        }

        (ppp, pp, p) = (pp, p, q);
    }

    s
}

fn is_plain_paragraph(line: &str) -> bool {
    if line.starts_with([' ', '\t']) {
        return false;
    }

    let trimmed = line.trim_start();
    if trimmed.starts_with("# ") {
        return false;
    }

    if ["- ", "* ", "+ ", "• "]
        .iter()
        .any(|marker| trimmed.starts_with(marker))
    {
        return false;
    }

    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &trimmed[digits..];
        if rest.starts_with(". ") || rest.starts_with(") ") {
            return false;
        }
    }

    true
}
