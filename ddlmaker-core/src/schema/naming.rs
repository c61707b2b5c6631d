use once_cell::sync::Lazy;
use std::collections::HashSet;

/// 常见缩写词，转换时作为整体处理
static COMMON_INITIALISMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "ETA", "GPU", "GUID", "HTML", "HTTP",
        "HTTPS", "ID", "IP", "JSON", "LHS", "OS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL",
        "SSH", "TCP", "TLS", "TTL", "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML",
        "XMPP", "XSRF", "XSS", "OAuth",
    ]
    .into_iter()
    .collect()
});

/// 驼峰命名转下划线命名
///
/// 能识别常见缩写词：`UserID` -> `user_id`，`HTTPSID` -> `https_id`。
pub fn camel_to_snake(s: &str) -> String {
    let mut buf = String::with_capacity(s.len() + 4);

    let mut i = 0;
    while let Some(ch) = s[i..].chars().next() {
        if ch.is_uppercase() {
            buf.push('_');
            match starts_with_common_initialism(&s[i..]) {
                Some(init) => {
                    buf.push_str(&init.to_lowercase());
                    i += init.len();
                }
                None => {
                    buf.extend(ch.to_lowercase());
                    i += ch.len_utf8();
                }
            }
        } else {
            buf.push(ch);
            i += ch.len_utf8();
        }
    }

    match buf.strip_prefix('_') {
        Some(rest) => rest.to_string(),
        None => buf,
    }
}

/// 最长的缩写词为 5 个字符，最短为 2 个，优先匹配较长的
fn starts_with_common_initialism(s: &str) -> Option<&str> {
    (2..=5)
        .rev()
        .filter_map(|n| s.get(..n))
        .find(|prefix| COMMON_INITIALISMS.contains(*prefix))
}
