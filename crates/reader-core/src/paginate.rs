//! Client-side pagination of book text into fixed word-count pages.
//!
//! Pages are derived, never persisted: they are recomputed whenever the
//! content or the viewport width class changes. The invariant is that the
//! token sequence of all pages joined together reproduces the token
//! sequence of the original content.

/// A contiguous word-count slice of a book's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice {
    /// 1-based page number.
    pub number: usize,
    pub text: String,
    pub word_count: usize,
}

/// Split `content` into pages of `words_per_page` whitespace-delimited
/// tokens, the last page taking the remainder. Empty content yields zero
/// pages; content shorter than one page yields a single page.
pub fn paginate(content: &str, words_per_page: usize) -> Vec<PageSlice> {
    let per_page = words_per_page.max(1);
    let words: Vec<&str> = content.split_whitespace().collect();
    let mut pages = Vec::with_capacity(page_count(words.len(), per_page));
    for (idx, chunk) in words.chunks(per_page).enumerate() {
        pages.push(PageSlice {
            number: idx + 1,
            text: chunk.join(" "),
            word_count: chunk.len(),
        });
    }
    pages
}

pub fn page_count(word_count: usize, words_per_page: usize) -> usize {
    word_count.div_ceil(words_per_page.max(1))
}

/// Words-per-page threshold for a viewport width class. Narrow viewports
/// get fewer words per page.
pub fn words_per_page_for_width(cols: u16) -> usize {
    match cols {
        0..=59 => 150,
        60..=99 => 220,
        _ => 300,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn splits_650_words_into_three_pages_at_300() {
        let content = words(650);
        let pages = paginate(&content, 300);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].word_count, 300);
        assert_eq!(pages[1].word_count, 300);
        assert_eq!(pages[2].word_count, 50);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[2].number, 3);
    }

    #[test]
    fn empty_content_yields_zero_pages() {
        assert!(paginate("", 300).is_empty());
        assert!(paginate("   \n\t ", 300).is_empty());
    }

    #[test]
    fn short_content_yields_single_page() {
        let pages = paginate("a quick brown fox", 300);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].word_count, 4);
        assert_eq!(pages[0].text, "a quick brown fox");
    }

    #[test]
    fn joined_pages_reproduce_token_sequence() {
        let content = "one  two\nthree\t four five six seven";
        let tokens: Vec<&str> = content.split_whitespace().collect();
        for per_page in [1, 2, 3, 5, 100] {
            let pages = paginate(content, per_page);
            let rejoined: Vec<String> = pages
                .iter()
                .flat_map(|p| p.text.split_whitespace().map(str::to_string))
                .collect();
            assert_eq!(rejoined, tokens, "words_per_page={per_page}");
            assert_eq!(pages.len(), page_count(tokens.len(), per_page));
        }
    }

    #[test]
    fn pagination_is_idempotent() {
        let content = words(47);
        assert_eq!(paginate(&content, 10), paginate(&content, 10));
    }

    #[test]
    fn page_count_is_ceiling_division() {
        assert_eq!(page_count(0, 300), 0);
        assert_eq!(page_count(1, 300), 1);
        assert_eq!(page_count(300, 300), 1);
        assert_eq!(page_count(301, 300), 2);
        assert_eq!(page_count(650, 300), 3);
    }

    #[test]
    fn narrow_viewports_get_smaller_thresholds() {
        assert_eq!(words_per_page_for_width(40), 150);
        assert_eq!(words_per_page_for_width(80), 220);
        assert_eq!(words_per_page_for_width(120), 300);
        assert!(words_per_page_for_width(40) < words_per_page_for_width(120));
    }
}
