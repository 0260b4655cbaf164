/// Splits a segment on runs of spaces and tabs. No quoting is recognised.
pub fn tokenize(segment: &str) -> Vec<String> {
    segment
        .split([' ', '\t'])
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
