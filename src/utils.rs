/// Length of the longest common prefix of two strings.
pub fn lcp(xs: &[u8], ys: &[u8]) -> usize {
    xs.iter()
        .zip(ys.iter())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Clamp a string to at most `max` bytes.
pub fn trunc(s: &[u8], max: usize) -> &[u8] {
    &s[..s.len().min(max)]
}
