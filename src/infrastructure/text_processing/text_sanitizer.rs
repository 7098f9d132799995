/// Collapses every run of whitespace (including newlines) to a single
/// space and trims the ends. Applied to each extracted page before pages
/// are joined.
pub fn collapse_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_was_space = true;

    for ch in raw.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                out.push(' ');
                prev_was_space = true;
            }
        } else {
            out.push(ch);
            prev_was_space = false;
        }
    }

    while out.ends_with(' ') {
        out.pop();
    }

    out
}
