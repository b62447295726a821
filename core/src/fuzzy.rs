/// Edit distance between two strings, counted over chars.
/// Insertion, deletion and substitution each cost one.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}
