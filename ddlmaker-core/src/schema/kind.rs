use crate::constants::column::MAX_INDIRECTION_DEPTH;
use std::fmt;

/// 字段类型的归类结果
///
/// 指针和包装类型在归类时已经解引用到目标类型，
/// 可空包装用 `Nullable` 表示。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
    /// 定长字节序列，携带长度
    FixedBytes(usize),
    /// 变长字节序列
    Bytes,
    DateTime,
    RawJson,
    Nullable(Box<FieldKind>),
    /// 无默认映射的类型，携带类型描述
    Other(String),
}

impl FieldKind {
    pub fn of<T: Classify + ?Sized>() -> Self {
        T::classify()
    }

    pub fn nullable(inner: FieldKind) -> Self {
        FieldKind::Nullable(Box::new(inner))
    }

    /// 解析 Rust 写法的类型名，例如 `i32`、`Option<String>`、`[u8; 16]`
    ///
    /// 无法识别的类型名归类为 `Other`，嵌套超过上限时同样视为未知类型。
    pub fn parse(type_name: &str) -> Self {
        parse_with_depth(type_name.trim(), 0)
    }
}

fn parse_with_depth(s: &str, depth: usize) -> FieldKind {
    let inner_of = |prefix: &str| {
        s.strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix('>'))
            .map(str::trim)
    };

    if let Some(inner) = inner_of("Option<") {
        if depth >= MAX_INDIRECTION_DEPTH {
            return FieldKind::Other(s.to_string());
        }
        return FieldKind::nullable(parse_with_depth(inner, depth + 1));
    }
    if let Some(inner) = inner_of("Box<").or_else(|| s.strip_prefix('&').map(str::trim)) {
        if depth >= MAX_INDIRECTION_DEPTH {
            return FieldKind::Other(s.to_string());
        }
        return parse_with_depth(inner, depth + 1);
    }

    match s {
        "bool" => FieldKind::Bool,
        "i8" => FieldKind::Int8,
        "i16" => FieldKind::Int16,
        "i32" => FieldKind::Int32,
        "i64" => FieldKind::Int64,
        "u8" => FieldKind::Uint8,
        "u16" => FieldKind::Uint16,
        "u32" => FieldKind::Uint32,
        "u64" => FieldKind::Uint64,
        "f32" => FieldKind::Float32,
        "f64" => FieldKind::Float64,
        "String" | "str" => FieldKind::String,
        "Vec<u8>" => FieldKind::Bytes,
        "DateTime" | "NaiveDateTime" => FieldKind::DateTime,
        "Json" | "serde_json::Value" => FieldKind::RawJson,
        _ if s.starts_with("DateTime<") && s.ends_with('>') => FieldKind::DateTime,
        _ => parse_fixed_bytes(s).unwrap_or_else(|| FieldKind::Other(s.to_string())),
    }
}

/// `[u8; 16]` -> FixedBytes(16)
fn parse_fixed_bytes(s: &str) -> Option<FieldKind> {
    let body = s.strip_prefix('[')?.strip_suffix(']')?;
    let (elem, len) = body.split_once(';')?;
    if elem.trim() != "u8" {
        return None;
    }
    len.trim().parse().ok().map(FieldKind::FixedBytes)
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Bool => f.write_str("bool"),
            FieldKind::Int8 => f.write_str("i8"),
            FieldKind::Int16 => f.write_str("i16"),
            FieldKind::Int32 => f.write_str("i32"),
            FieldKind::Int64 => f.write_str("i64"),
            FieldKind::Uint8 => f.write_str("u8"),
            FieldKind::Uint16 => f.write_str("u16"),
            FieldKind::Uint32 => f.write_str("u32"),
            FieldKind::Uint64 => f.write_str("u64"),
            FieldKind::Float32 => f.write_str("f32"),
            FieldKind::Float64 => f.write_str("f64"),
            FieldKind::String => f.write_str("String"),
            FieldKind::FixedBytes(len) => write!(f, "[u8; {len}]"),
            FieldKind::Bytes => f.write_str("Vec<u8>"),
            FieldKind::DateTime => f.write_str("DateTime"),
            FieldKind::RawJson => f.write_str("Json"),
            FieldKind::Nullable(inner) => write!(f, "Option<{inner}>"),
            FieldKind::Other(desc) => f.write_str(desc),
        }
    }
}

/// 把 Rust 类型归类为 [`FieldKind`]
pub trait Classify {
    fn classify() -> FieldKind;
}

macro_rules! impl_classify {
    ($($ty:ty => $kind:expr),* $(,)?) => {
        $(
            impl Classify for $ty {
                fn classify() -> FieldKind {
                    $kind
                }
            }
        )*
    };
}

impl_classify! {
    bool => FieldKind::Bool,
    i8 => FieldKind::Int8,
    i16 => FieldKind::Int16,
    i32 => FieldKind::Int32,
    i64 => FieldKind::Int64,
    u8 => FieldKind::Uint8,
    u16 => FieldKind::Uint16,
    u32 => FieldKind::Uint32,
    u64 => FieldKind::Uint64,
    f32 => FieldKind::Float32,
    f64 => FieldKind::Float64,
    String => FieldKind::String,
    str => FieldKind::String,
    Vec<u8> => FieldKind::Bytes,
    chrono::NaiveDateTime => FieldKind::DateTime,
    serde_json::Value => FieldKind::RawJson,
}

impl<const N: usize> Classify for [u8; N] {
    fn classify() -> FieldKind {
        FieldKind::FixedBytes(N)
    }
}

impl<Tz: chrono::TimeZone> Classify for chrono::DateTime<Tz> {
    fn classify() -> FieldKind {
        FieldKind::DateTime
    }
}

impl<T: Classify> Classify for Option<T> {
    fn classify() -> FieldKind {
        FieldKind::nullable(T::classify())
    }
}

impl<T: Classify + ?Sized> Classify for Box<T> {
    fn classify() -> FieldKind {
        T::classify()
    }
}

impl<T: Classify + ?Sized> Classify for &T {
    fn classify() -> FieldKind {
        T::classify()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_rust_types() {
        assert_eq!(FieldKind::of::<i32>(), FieldKind::Int32);
        assert_eq!(FieldKind::of::<u64>(), FieldKind::Uint64);
        assert_eq!(FieldKind::of::<String>(), FieldKind::String);
        assert_eq!(FieldKind::of::<[u8; 16]>(), FieldKind::FixedBytes(16));
        assert_eq!(FieldKind::of::<Vec<u8>>(), FieldKind::Bytes);
        assert_eq!(
            FieldKind::of::<chrono::DateTime<chrono::Utc>>(),
            FieldKind::DateTime
        );
        assert_eq!(FieldKind::of::<serde_json::Value>(), FieldKind::RawJson);
        assert_eq!(
            FieldKind::of::<Option<i64>>(),
            FieldKind::nullable(FieldKind::Int64)
        );
        // 指针解引用到目标类型
        assert_eq!(FieldKind::of::<Box<Box<bool>>>(), FieldKind::Bool);
    }

    #[test]
    fn test_parse_type_names() {
        assert_eq!(FieldKind::parse("i16"), FieldKind::Int16);
        assert_eq!(FieldKind::parse(" String "), FieldKind::String);
        assert_eq!(FieldKind::parse("[u8; 32]"), FieldKind::FixedBytes(32));
        assert_eq!(FieldKind::parse("Vec<u8>"), FieldKind::Bytes);
        assert_eq!(FieldKind::parse("DateTime<Utc>"), FieldKind::DateTime);
        assert_eq!(
            FieldKind::parse("Option<Box<u32>>"),
            FieldKind::nullable(FieldKind::Uint32)
        );
        assert_eq!(
            FieldKind::parse("Point"),
            FieldKind::Other("Point".to_string())
        );
        assert_eq!(
            FieldKind::parse("[u16; 4]"),
            FieldKind::Other("[u16; 4]".to_string())
        );
    }

    #[test]
    fn test_parse_depth_is_capped() {
        let deep = format!("{}u8{}", "Box<".repeat(40), ">".repeat(40));
        assert!(matches!(FieldKind::parse(&deep), FieldKind::Other(_)));
    }

    #[test]
    fn test_display_round_trip() {
        for name in ["i8", "u64", "String", "[u8; 4]", "Vec<u8>", "Option<f64>", "Json"] {
            assert_eq!(FieldKind::parse(name).to_string(), name);
        }
    }
}
