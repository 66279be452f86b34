/// Character budget per outgoing message, kept under Discord's 2000 limit.
pub const MAX_CHUNK_CHARS: usize = 1900;

/// Split into consecutive slices of at most `max_chars` characters, ignoring word boundaries.
pub fn chunk_answer(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    if text.chars().count() <= max_chars {
        return vec![text.to_owned()];
    }

    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_chars)
        .map(|slice| slice.iter().collect())
        .collect()
}

/// Prefix each chunk with `(part i/n)` when there is more than one.
pub fn with_part_headers(chunks: Vec<String>) -> Vec<String> {
    let total = chunks.len();
    if total <= 1 {
        return chunks;
    }

    chunks
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| format!("(part {}/{})\n{}", index + 1, total, chunk))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{MAX_CHUNK_CHARS, chunk_answer, with_part_headers};

    #[test]
    fn short_answers_stay_whole() {
        assert_eq!(chunk_answer("hello", MAX_CHUNK_CHARS), vec!["hello"]);
        assert_eq!(chunk_answer("", MAX_CHUNK_CHARS), vec![""]);
        assert_eq!(with_part_headers(vec!["hello".to_owned()]), vec!["hello"]);
    }

    #[test]
    fn splits_2500_chars_into_1900_and_600() {
        let answer = "a".repeat(2500);
        let chunks = chunk_answer(&answer, MAX_CHUNK_CHARS);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 1900);
        assert_eq!(chunks[1].len(), 600);

        let framed = with_part_headers(chunks);
        assert!(framed[0].starts_with("(part 1/2)\n"));
        assert!(framed[1].starts_with("(part 2/2)\n"));
        assert_eq!(framed[1].len(), "(part 2/2)\n".len() + 600);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let answer = "é".repeat(5);
        let chunks = chunk_answer(&answer, 2);

        assert_eq!(chunks, vec!["éé", "éé", "é"]);
    }
}
