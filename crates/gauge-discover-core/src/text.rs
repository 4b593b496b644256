/// Lines of `text`, treating `\r\n` and `\n` alike
pub fn lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// Number of lines in `text`; a trailing newline opens one more empty line
pub fn line_count(text: &str) -> usize {
    lines(text).len()
}
