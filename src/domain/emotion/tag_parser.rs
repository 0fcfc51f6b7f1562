//! 情绪标签解析器
//!
//! 对话行可以以 3 字符标签 `[d]`（d 为 0-9）结尾，标签选择角色反应。
//! 未带标签是正常情况，不视为错误。

use super::EmotionCode;

/// `[` + 数字 + `]`
const TAG_LEN: usize = 3;

/// 解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    /// 送去合成的文本
    pub spoken_text: String,
    /// 情绪代码，未带标签时为 None
    pub code: Option<EmotionCode>,
}

/// 解析对话行末尾的情绪标签
///
/// 命中标签时去掉末尾 3 个字符并 trim；否则原样返回文本
pub fn parse_emotion_tag(message: &str) -> ParsedMessage {
    match trailing_code(message) {
        Some(code) => ParsedMessage {
            // 标签为 ASCII，切片边界一定合法
            spoken_text: message[..message.len() - TAG_LEN].trim().to_string(),
            code: Some(code),
        },
        None => ParsedMessage {
            spoken_text: message.to_string(),
            code: None,
        },
    }
}

fn trailing_code(message: &str) -> Option<EmotionCode> {
    let bytes = message.as_bytes();
    if bytes.len() < TAG_LEN {
        return None;
    }

    let tag = &bytes[bytes.len() - TAG_LEN..];
    if tag[0] != b'[' || tag[2] != b']' {
        return None;
    }

    EmotionCode::from_digit(tag[1] as char)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(value: u8) -> Option<EmotionCode> {
        Some(EmotionCode::new(value).unwrap())
    }

    #[test]
    fn test_tag_stripped() {
        let parsed = parse_emotion_tag("hello[2]");
        assert_eq!(parsed.spoken_text, "hello");
        assert_eq!(parsed.code, code(2));
    }

    #[test]
    fn test_no_tag() {
        let parsed = parse_emotion_tag("hello");
        assert_eq!(parsed.spoken_text, "hello");
        assert_eq!(parsed.code, None);
    }

    #[test]
    fn test_tag_trimmed() {
        let parsed = parse_emotion_tag("hi  [9]");
        assert_eq!(parsed.spoken_text, "hi");
        assert_eq!(parsed.code, code(9));
    }

    #[test]
    fn test_untagged_text_kept_verbatim() {
        let parsed = parse_emotion_tag("  spaced out  ");
        assert_eq!(parsed.spoken_text, "  spaced out  ");
        assert_eq!(parsed.code, None);
    }

    #[test]
    fn test_tag_must_be_suffix() {
        assert_eq!(parse_emotion_tag("[2] hello").code, None);
        assert_eq!(parse_emotion_tag("hello [2] ").code, None);
        assert_eq!(parse_emotion_tag("hello [2] ").spoken_text, "hello [2] ");
    }

    #[test]
    fn test_tag_must_be_single_digit() {
        assert_eq!(parse_emotion_tag("hello[10]").code, None);
        assert_eq!(parse_emotion_tag("hello[a]").code, None);
        assert_eq!(parse_emotion_tag("hello[]").code, None);
        assert_eq!(parse_emotion_tag("hello(2)").code, None);
    }

    #[test]
    fn test_tag_only() {
        let parsed = parse_emotion_tag("[0]");
        assert_eq!(parsed.spoken_text, "");
        assert_eq!(parsed.code, code(0));
    }

    #[test]
    fn test_short_messages() {
        assert_eq!(parse_emotion_tag("").code, None);
        assert_eq!(parse_emotion_tag("2]").code, None);
    }

    #[test]
    fn test_multibyte_text() {
        let parsed = parse_emotion_tag("头好痛…[1]");
        assert_eq!(parsed.spoken_text, "头好痛…");
        assert_eq!(parsed.code, code(1));

        // 多字节字符结尾不会被误判
        let parsed = parse_emotion_tag("好的");
        assert_eq!(parsed.spoken_text, "好的");
        assert_eq!(parsed.code, None);
    }
}
