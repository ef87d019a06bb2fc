//! 按显示宽度处理文本

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 截断到 `width` 列以内，超出时以 `…` 结尾
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// 只保留末尾 `width` 列（用于输入框：光标总在末尾）
pub fn tail_to_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (i, c) in text.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = i;
    }
    &text[start..]
}

/// 截断或用空格填充到正好 `width` 列
pub fn pad_to_width(text: &str, width: usize) -> String {
    let mut out = truncate_to_width(text, width);
    let used = out.width();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_marks_overflow() {
        assert_eq!(truncate_to_width("ou=people", 20), "ou=people");
        assert_eq!(truncate_to_width("ou=people", 5), "ou=p…");
        assert_eq!(truncate_to_width("ou=people", 0), "");
    }

    #[test]
    fn wide_characters_count_double() {
        // 每个汉字占两列
        assert_eq!(truncate_to_width("cn=张三丰", 6), "cn=张…");
        assert_eq!(pad_to_width("张三", 6), "张三  ");
    }

    #[test]
    fn tail_keeps_end_of_input() {
        assert_eq!(tail_to_width("(objectClass=person)", 8), "=person)");
        assert_eq!(tail_to_width("abc", 10), "abc");
        assert_eq!(tail_to_width("abc", 0), "");
    }
}
