use crate::constants::column::SKIP_SENTINEL;

/// 字段注解中的单个选项，布尔选项的值为空串
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOption {
    pub key: String,
    pub value: String,
}

/// 解析后的字段注解
///
/// 注解格式为 `name,opt1,opt2=value2,...`，第一个位置参数是可选的列名。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Annotation {
    pub name: Option<String>,
    pub options: Vec<TagOption>,
}

impl Annotation {
    /// 列名为 `-` 表示忽略该字段
    pub fn is_skip(&self) -> bool {
        self.name.as_deref() == Some(SKIP_SENTINEL)
    }
}

/// 解析字段注解
pub fn parse_annotation(tag: &str) -> Annotation {
    if tag.is_empty() {
        return Annotation::default();
    }

    let mut tokens = split_top_level(tag).into_iter();
    let name = tokens
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    let options = tokens
        .map(|token| match token.split_once('=') {
            Some((key, value)) => TagOption {
                key: key.trim().to_string(),
                value: value.to_string(),
            },
            None => TagOption {
                key: token.trim().to_string(),
                value: String::new(),
            },
        })
        .collect();

    Annotation { name, options }
}

/// 按逗号切分，括号内的逗号不作为分隔符，例如 `type=DECIMAL(9,6)`
fn split_top_level(s: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                tokens.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    tokens.push(&s[start..]);

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(key: &str, value: &str) -> TagOption {
        TagOption {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_parse_empty() {
        let tag = parse_annotation("");
        assert_eq!(tag.name, None);
        assert!(tag.options.is_empty());
        assert!(!tag.is_skip());
    }

    #[test]
    fn test_parse_name_and_options() {
        let tag = parse_annotation("user_name,null,size=64,comment='名字'");
        assert_eq!(tag.name.as_deref(), Some("user_name"));
        assert_eq!(
            tag.options,
            vec![opt("null", ""), opt("size", "64"), opt("comment", "'名字'")]
        );
    }

    #[test]
    fn test_parse_without_name() {
        let tag = parse_annotation(",auto");
        assert_eq!(tag.name, None);
        assert_eq!(tag.options, vec![opt("auto", "")]);
    }

    #[test]
    fn test_parenthesized_comma_is_not_separator() {
        let tag = parse_annotation(",type=DECIMAL(9,6),null");
        assert_eq!(tag.options, vec![opt("type", "DECIMAL(9,6)"), opt("null", "")]);

        let tag = parse_annotation(",type=DECIMAL((9),(6))");
        assert_eq!(tag.options, vec![opt("type", "DECIMAL((9),(6))")]);
    }

    #[test]
    fn test_value_keeps_spaces_and_equals() {
        let tag = parse_annotation(",type=INTEGER UNSIGNED,default='a=b'");
        assert_eq!(
            tag.options,
            vec![opt("type", "INTEGER UNSIGNED"), opt("default", "'a=b'")]
        );
    }

    #[test]
    fn test_skip_sentinel() {
        assert!(parse_annotation("-").is_skip());
        assert!(parse_annotation("-,null").is_skip());
        assert!(!parse_annotation("-name").is_skip());
    }

    #[test]
    fn test_unbalanced_parenthesis() {
        // 多余的右括号不会让深度变成负数
        let tag = parse_annotation(",comment=a)b,null");
        assert_eq!(tag.options, vec![opt("comment", "a)b"), opt("null", "")]);
    }
}
