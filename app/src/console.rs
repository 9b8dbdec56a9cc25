//! Line-oriented terminal input.

use std::io::Write;

/// Words that leave an interactive loop.
pub const EXIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

/// Print `prompt` and read one trimmed line; `None` on end of input.
pub fn read_line(prompt: &str) -> std::io::Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    let mut input = String::new();
    if std::io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

#[must_use]
pub fn is_exit(input: &str) -> bool {
    EXIT_WORDS.iter().any(|word| input.eq_ignore_ascii_case(word))
}

pub fn rule(width: usize) -> String {
    "=".repeat(width)
}
