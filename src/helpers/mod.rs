pub mod progress;

/// Characters dropped from display names before casing.
const STRIPPED: &[char] = &['\'', '(', ')', ':'];

/// Remove punctuation that never survives into an identifier.
///
/// `-` becomes a single space so hyphenated names still split into words;
/// the other stripped characters are deleted outright.
pub fn clean_name(name: &str) -> String {
    name.chars()
        .filter(|c| !STRIPPED.contains(c))
        .map(|c| if c == '-' { ' ' } else { c })
        .collect()
}

/// Turn a display name into a Pascal-case identifier.
///
/// `"Kamisato Ayaka's Bow (Event)"` becomes `"KamisatoAyakasBowEvent"`.
pub fn to_pascal_case(name: &str) -> String {
    clean_name(name).split_whitespace().map(title_case).collect()
}

/// Title-case one word: a letter is upper-cased when the character before
/// it is not a cased letter, every other letter is lower-cased.
///
/// So `"the` becomes `"The`, `a.b` becomes `A.B` and `2nd` becomes `2Nd`.
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_cased = false;

    for c in word.chars() {
        if prev_cased {
            out.extend(c.to_lowercase());
        } else {
            push_titlecase(&mut out, c);
        }
        prev_cased = is_cased(c);
    }

    out
}

/// Titlecase of a word-initial character: the first char of its upper-case
/// expansion stays upper, the rest is lowered (`ß` gives `Ss`).
fn push_titlecase(out: &mut String, c: char) {
    let mut upper = c.to_uppercase();
    if let Some(first) = upper.next() {
        out.push(first);
    }
    out.extend(upper.flat_map(char::to_lowercase));
}

fn is_cased(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase()
}
