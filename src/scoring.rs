/// Characters per "word" when converting keystrokes to words per minute.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Display state of a single passage character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Untyped,
    Correct,
    Incorrect,
}

/// A passage character paired with how the current input matches it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub char: char,
    pub class: CharClass,
    pub is_space: bool,
}

/// Counts positions where the input matches the passage.
pub fn count_correct_chars(input: &str, passage: &str) -> usize {
    input
        .chars()
        .zip(passage.chars())
        .filter(|(typed, expected)| typed == expected)
        .count()
}

/// Words per minute from correctly typed characters over an elapsed window.
pub fn calculate_wpm(correct_chars: usize, elapsed_secs: u64) -> u32 {
    if correct_chars == 0 || elapsed_secs == 0 {
        return 0;
    }
    (correct_chars as f64 * 60.0 / elapsed_secs as f64 / CHARS_PER_WORD).round() as u32
}

/// Accuracy as a whole percentage of correct characters over typed characters.
pub fn calculate_accuracy(correct_chars: usize, input_len: usize) -> u32 {
    if correct_chars == 0 || input_len == 0 {
        return 0;
    }
    (correct_chars as f64 / input_len as f64 * 100.0).round() as u32
}

/// Zips the input against the passage position by position.
///
/// Every passage char yields exactly one glyph, whitespace included, so the
/// renderer can lay the passage out without re-deriving indices.
pub fn classify(input: &str, passage: &str) -> Vec<Glyph> {
    let mut typed = input.chars();
    passage
        .chars()
        .map(|expected| {
            let class = match typed.next() {
                Some(c) if c == expected => CharClass::Correct,
                Some(_) => CharClass::Incorrect,
                None => CharClass::Untyped,
            };
            Glyph {
                char: expected,
                class,
                is_space: expected.is_whitespace(),
            }
        })
        .collect()
}
