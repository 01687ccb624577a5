/// Count whitespace-separated tokens in extracted document text.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
