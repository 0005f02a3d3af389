// Alias Grammar
// Splits token strings into literal text and `{token.name}` references
//
// Grammar:
//   reference := '{' name '}'   name = one or more chars, none of '{', '}' or whitespace
//   escape    := '\{' | '\}' | '\\'
// An unterminated '{' or an empty '{}' is literal text.

/// A piece of a token string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Reference(String),
}

/// Split a string value into text and reference segments
///
/// Adjacent text is merged, so a string without references yields at most
/// one `Text` segment.
pub fn parse_template(input: &str) -> Vec<Segment> {
    let chars: Vec<char> = input.chars().collect();
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' if matches!(chars.get(i + 1), Some('{' | '}' | '\\')) => {
                text.push(chars[i + 1]);
                i += 2;
            }
            '{' => match reference_end(&chars, i) {
                Some(end) => {
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Reference(chars[i + 1..end].iter().collect()));
                    i = end + 1;
                }
                None => {
                    text.push('{');
                    i += 1;
                }
            },
            c => {
                text.push(c);
                i += 1;
            }
        }
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }

    segments
}

/// Index of the closing brace for a reference opened at `start`
fn reference_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    while j < chars.len() && !matches!(chars[j], '{' | '}') && !chars[j].is_whitespace() {
        j += 1;
    }

    (j < chars.len() && chars[j] == '}' && j > start + 1).then_some(j)
}

/// The textual form of a reference, used as the unresolved marker
pub fn reference_text(name: &str) -> String {
    format!("{{{}}}", name)
}
