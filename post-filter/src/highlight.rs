use crate::models::Segment;

/// 将搜索词转换为小写字符序列
pub(crate) fn fold_case(term: &str) -> Vec<char> {
    term.chars().flat_map(char::to_lowercase).collect()
}

/// 在文本开头尝试匹配（不区分大小写），返回匹配部分的字节长度
///
/// 搜索词在某个字符的小写展开中途结束时（如 `İ` → `i̇`），匹配延伸到该字符末尾。
fn match_prefix(text: &str, needle: &[char]) -> Option<usize> {
    let mut matched = 0;

    for (offset, ch) in text.char_indices() {
        for lower in ch.to_lowercase() {
            if matched == needle.len() {
                break;
            }
            if needle[matched] != lower {
                return None;
            }
            matched += 1;
        }

        if matched == needle.len() {
            return Some(offset + ch.len_utf8());
        }
    }

    None
}

/// 查找第一个不区分大小写的匹配位置，返回字节区间
///
/// 返回的区间总是位于字符边界上。
pub(crate) fn find_ignore_case(text: &str, needle: &[char]) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return Some((0, 0));
    }

    text.char_indices()
        .find_map(|(start, _)| match_prefix(&text[start..], needle).map(|len| (start, start + len)))
}

/// 文本是否包含搜索词（不区分大小写）
pub fn contains_ignore_case(text: &str, term: &str) -> bool {
    find_ignore_case(text, &fold_case(term)).is_some()
}

/// 将文本切分为普通片段和命中片段
///
/// 从左到右扫描：每次找到剩余文本中第一个命中，输出命中前的普通片段
/// （可能为空）和命中片段，然后从命中之后继续。所有片段拼接后等于原文。
pub fn highlight_segments<'a>(text: &'a str, term: &str) -> Vec<Segment<'a>> {
    if text.is_empty() {
        return Vec::new();
    }
    if term.is_empty() {
        return vec![Segment::Plain(text)];
    }

    let needle = fold_case(term);
    let mut segments = Vec::new();
    let mut cursor = 0;

    while cursor < text.len() {
        let rest = &text[cursor..];
        match find_ignore_case(rest, &needle) {
            Some((start, end)) => {
                segments.push(Segment::Plain(&rest[..start]));
                segments.push(Segment::Matched(&rest[start..end]));
                cursor += end;
            }
            None => {
                segments.push(Segment::Plain(rest));
                break;
            }
        }
    }

    segments
}

/// 用 `<mark>` 标记渲染片段
pub fn render_marked(segments: &[Segment<'_>]) -> String {
    let mut highlighted = String::new();

    for segment in segments {
        match segment {
            Segment::Plain(text) => highlighted.push_str(text),
            Segment::Matched(text) => {
                highlighted.push_str("<mark>");
                highlighted.push_str(text);
                highlighted.push_str("</mark>");
            }
        }
    }

    highlighted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concat(segments: &[Segment<'_>]) -> String {
        segments.iter().map(|s| s.text()).collect()
    }

    #[test]
    fn marks_every_occurrence() {
        let segments = highlight_segments("banana", "an");
        assert_eq!(
            segments,
            vec![
                Segment::Plain("b"),
                Segment::Matched("an"),
                Segment::Plain(""),
                Segment::Matched("an"),
                Segment::Plain("a"),
            ]
        );
        assert_eq!(concat(&segments), "banana");
    }

    #[test]
    fn match_is_case_insensitive_and_keeps_original_case() {
        let segments = highlight_segments("Hello HELLO", "hello");
        assert_eq!(
            segments,
            vec![
                Segment::Plain(""),
                Segment::Matched("Hello"),
                Segment::Plain(" "),
                Segment::Matched("HELLO"),
            ]
        );
    }

    #[test]
    fn empty_inputs() {
        assert!(highlight_segments("", "an").is_empty());
        assert_eq!(highlight_segments("banana", ""), vec![Segment::Plain("banana")]);
    }

    #[test]
    fn no_match_is_single_plain_segment() {
        assert_eq!(highlight_segments("banana", "xy"), vec![Segment::Plain("banana")]);
    }

    #[test]
    fn occurrences_do_not_overlap() {
        let segments = highlight_segments("aaa", "aa");
        assert_eq!(
            segments,
            vec![Segment::Plain(""), Segment::Matched("aa"), Segment::Plain("a")]
        );
    }

    #[test]
    fn handles_multibyte_text() {
        let segments = highlight_segments("学习Rust与rust", "RUST");
        assert_eq!(concat(&segments), "学习Rust与rust");
        let matched: Vec<_> = segments.iter().filter(|s| s.is_matched()).map(|s| s.text()).collect();
        assert_eq!(matched, vec!["Rust", "rust"]);
    }

    #[test]
    fn long_text_with_many_matches() {
        let text = "ab".repeat(50_000);
        let segments = highlight_segments(&text, "b");
        assert_eq!(segments.iter().filter(|s| s.is_matched()).count(), 50_000);
        assert_eq!(concat(&segments), text);
    }

    #[test]
    fn renders_mark_tags() {
        let segments = highlight_segments("banana", "an");
        assert_eq!(render_marked(&segments), "b<mark>an</mark><mark>an</mark>a");
    }

    #[test]
    fn contains_ignores_case() {
        assert!(contains_ignore_case("Hello World", "WORLD"));
        assert!(!contains_ignore_case("Goodbye", "hello"));
    }

    #[test]
    fn term_ending_inside_lowercase_expansion() {
        // 'İ' 的小写是 "i" 加组合点
        assert!("İstanbul".to_lowercase().contains('i'));
        assert!(contains_ignore_case("İstanbul", "i"));
        assert!(contains_ignore_case("İstanbul", "i\u{307}st"));
        assert!(!contains_ignore_case("İstanbul", "ist"));

        let segments = highlight_segments("İstanbul", "i");
        assert_eq!(
            segments,
            vec![Segment::Plain(""), Segment::Matched("İ"), Segment::Plain("stanbul")]
        );
        assert_eq!(concat(&segments), "İstanbul");
    }
}
