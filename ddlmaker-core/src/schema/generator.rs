use super::types::{Column, ForeignKey, FullTextIndex, Index, SpatialIndex, Table, UniqueIndex};
use crate::config::DbConfig;

/// 生成完整的建表脚本
///
/// 输入应当已经通过 [`super::validator::Validator`] 校验；
/// 输出只依赖输入顺序，同样的输入总是得到逐字节相同的文本。
pub fn generate_ddl(tables: &[Table], db: &DbConfig) -> String {
    let mut sql = String::from("SET foreign_key_checks=0;\n\n");

    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            sql.push('\n');
        }
        sql.push_str(&format!("DROP TABLE IF EXISTS {};\n\n", quote(&table.name)));
        sql.push_str(&generate_create_table_sql(table, db));
        sql.push_str("\n\n");
    }

    sql.push_str("SET foreign_key_checks=1;\n");
    sql
}

/// 生成CREATE TABLE SQL
pub fn generate_create_table_sql(table: &Table, db: &DbConfig) -> String {
    let mut sql = format!("CREATE TABLE {} (\n", quote(&table.name));

    let mut parts = Vec::new();
    for column in &table.columns {
        parts.push(format!("    {}", generate_column_sql(column)));
    }
    for index in &table.indexes {
        parts.push(format!("    {}", generate_index_sql(index)));
    }
    for index in &table.unique_indexes {
        parts.push(format!("    {}", generate_unique_index_sql(index)));
    }
    for index in &table.full_text_indexes {
        parts.push(format!("    {}", generate_full_text_index_sql(index)));
    }
    for index in &table.spatial_indexes {
        parts.push(format!("    {}", generate_spatial_index_sql(index)));
    }
    for fk in &table.foreign_keys {
        parts.push(format!("    {}", generate_foreign_key_sql(fk)));
    }
    if let Some(pk) = &table.primary_key {
        parts.push(format!("    PRIMARY KEY ({})", quote_all(pk.columns())));
    }

    sql.push_str(&parts.join(",\n"));
    sql.push_str("\n)");

    // 添加表选项
    if !db.engine.is_empty() {
        sql.push_str(&format!(" ENGINE={}", db.engine));
    }
    if !db.charset.is_empty() {
        sql.push_str(&format!(" DEFAULT CHARACTER SET={}", db.charset));
    }
    if !db.collate.is_empty() {
        sql.push_str(&format!(" DEFAULT COLLATE={}", db.collate));
    }

    sql.push(';');
    sql
}

/// 生成列定义SQL
pub fn generate_column_sql(column: &Column) -> String {
    let mut sql = format!("{} {}", quote(&column.name), column.sql_type);

    if column.size != 0 {
        sql.push_str(&format!("({})", column.size));
    }
    if column.unsigned {
        sql.push_str(" UNSIGNED");
    }
    if let Some(charset) = &column.charset {
        sql.push_str(&format!(" CHARACTER SET {charset}"));
    }
    if let Some(collate) = &column.collate {
        sql.push_str(&format!(" COLLATE {collate}"));
    }

    if column.nullable {
        sql.push_str(" NULL");
    } else {
        sql.push_str(" NOT NULL");
    }

    if column.auto_increment {
        sql.push_str(" AUTO_INCREMENT");
    }
    if column.invisible {
        sql.push_str(" INVISIBLE");
    }
    if let Some(comment) = &column.comment {
        sql.push_str(&format!(" COMMENT {}", quote_string(comment)));
    }
    if let Some(default) = &column.default {
        sql.push_str(&format!(" DEFAULT {}", default_literal(default)));
    }

    sql
}

/// 生成索引定义SQL
pub fn generate_index_sql(index: &Index) -> String {
    let columns = index
        .columns
        .iter()
        .map(|col| match col.order {
            Some(order) => format!("{} {}", quote(&col.name), order.as_sql()),
            None => quote(&col.name),
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut sql = format!("INDEX {} ({})", quote(&index.name), columns);
    if let Some(comment) = &index.comment {
        sql.push_str(&format!(" COMMENT {}", quote_string(comment)));
    }
    if index.invisible {
        sql.push_str(" INVISIBLE");
    }
    sql
}

pub fn generate_unique_index_sql(index: &UniqueIndex) -> String {
    let mut sql = format!(
        "UNIQUE {} ({})",
        quote(&index.name),
        quote_all(&index.columns)
    );
    if let Some(comment) = &index.comment {
        sql.push_str(&format!(" COMMENT {}", quote_string(comment)));
    }
    if index.invisible {
        sql.push_str(" INVISIBLE");
    }
    sql
}

pub fn generate_full_text_index_sql(index: &FullTextIndex) -> String {
    let mut sql = format!(
        "FULLTEXT INDEX {} ({})",
        quote(&index.name),
        quote(&index.column)
    );
    if let Some(parser) = &index.parser {
        sql.push_str(&format!(" WITH PARSER {parser}"));
    }
    if let Some(comment) = &index.comment {
        sql.push_str(&format!(" COMMENT {}", quote_string(comment)));
    }
    sql
}

pub fn generate_spatial_index_sql(index: &SpatialIndex) -> String {
    let mut sql = format!(
        "SPATIAL INDEX {} ({})",
        quote(&index.name),
        quote(&index.column)
    );
    if let Some(comment) = &index.comment {
        sql.push_str(&format!(" COMMENT {}", quote_string(comment)));
    }
    sql
}

/// 生成外键约束SQL，ON DELETE 在 ON UPDATE 之前
pub fn generate_foreign_key_sql(fk: &ForeignKey) -> String {
    let mut sql = format!(
        "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
        quote(&fk.name),
        quote_all(&fk.columns),
        quote(&fk.table),
        quote_all(&fk.references)
    );
    if let Some(option) = fk.on_delete {
        sql.push_str(&format!(" ON DELETE {}", option.as_sql()));
    }
    if let Some(option) = fk.on_update {
        sql.push_str(&format!(" ON UPDATE {}", option.as_sql()));
    }
    sql
}

/// 用反引号包裹标识符，内部的反引号加倍
pub fn quote(s: &str) -> String {
    let mut buf = String::with_capacity(s.len() + 2);
    buf.push('`');
    for ch in s.chars() {
        if ch == '`' {
            buf.push('`');
        }
        buf.push(ch);
    }
    buf.push('`');
    buf
}

fn quote_all(names: &[String]) -> String {
    names
        .iter()
        .map(|name| quote(name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// 用单引号包裹字符串字面量并转义
pub fn quote_string(s: &str) -> String {
    let mut buf = String::with_capacity(s.len() + 2);
    buf.push('\'');
    for ch in s.chars() {
        match ch {
            '\0' => buf.push_str("\\0"),
            '\'' => buf.push_str("\\'"),
            '"' => buf.push_str("\\\""),
            '\u{8}' => buf.push_str("\\b"),
            '\n' => buf.push_str("\\n"),
            '\r' => buf.push_str("\\r"),
            '\t' => buf.push_str("\\t"),
            '\u{1a}' => buf.push_str("\\Z"),
            '\\' => buf.push_str("\\\\"),
            _ => buf.push(ch),
        }
    }
    buf.push('\'');
    buf
}

/// 可以直接作为 DEFAULT 值的关键字
const DEFAULT_KEYWORDS: &[&str] = &["NULL", "TRUE", "FALSE", "CURRENT_TIMESTAMP", "LOCALTIMESTAMP"];

/// DEFAULT 值的字面量形式
///
/// 括号表达式 `(...)` 和关键字原样输出，关键字可带 `(fsp)` 精度。
/// `'...'` 形式的值取引号内的文本重新转义，其它值整体按字符串字面量转义。
fn default_literal(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('(') && value.ends_with(')') {
        return value.to_string();
    }
    if is_default_keyword(value) {
        return value.to_string();
    }
    match value
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
    {
        Some(inner) => quote_string(inner),
        None => quote_string(value),
    }
}

fn is_default_keyword(value: &str) -> bool {
    let (word, fsp) = match value.split_once('(') {
        Some((word, rest)) => (word, Some(rest)),
        None => (value, None),
    };
    let fsp_ok = fsp.is_none_or(|rest| {
        rest.strip_suffix(')')
            .is_some_and(|digits| digits.chars().all(|c| c.is_ascii_digit()))
    });
    fsp_ok
        && DEFAULT_KEYWORDS
            .iter()
            .any(|kw| kw.eq_ignore_ascii_case(word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{ForeignKeyOption, IndexColumn};

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote("users"), "`users`");
        assert_eq!(quote("we`ird"), "`we``ird`");
        assert_eq!(quote(""), "``");
    }

    #[test]
    fn test_quote_string() {
        assert_eq!(quote_string(r"it's\b"), r"'it\'s\\b'");
        assert_eq!(
            quote_string("\0'\"\u{8}\n\r\t\u{1a}\\"),
            r#"'\0\'\"\b\n\r\t\Z\\'"#
        );
        // 其它字符不转义
        assert_eq!(quote_string("コメント %_"), "'コメント %_'");
    }

    #[test]
    fn test_default_literal() {
        assert_eq!(default_literal("'John Doe'"), "'John Doe'");
        assert_eq!(default_literal("(CURRENT_TIMESTAMP)"), "(CURRENT_TIMESTAMP)");
        assert_eq!(default_literal("John's"), r"'John\'s'");
        assert_eq!(default_literal("'"), r"'\''");
        assert_eq!(default_literal("''"), "''");
    }

    #[test]
    fn test_default_literal_escapes_quoted_text() {
        assert_eq!(default_literal("'it's'"), r"'it\'s'");
        assert_eq!(default_literal("'a\nb'"), r"'a\nb'");
    }

    #[test]
    fn test_default_literal_keywords() {
        assert_eq!(default_literal("NULL"), "NULL");
        assert_eq!(default_literal("null"), "null");
        assert_eq!(default_literal("CURRENT_TIMESTAMP"), "CURRENT_TIMESTAMP");
        assert_eq!(default_literal("CURRENT_TIMESTAMP(3)"), "CURRENT_TIMESTAMP(3)");
        assert_eq!(default_literal("CURRENT_TIMESTAMP(x)"), "'CURRENT_TIMESTAMP(x)'");
        assert_eq!(default_literal("NULLABLE"), "'NULLABLE'");
        assert_eq!(default_literal("'NULL'"), "'NULL'");
    }

    #[test]
    fn test_column_clause_order() {
        let column = Column {
            name: "name".to_string(),
            sql_type: "VARCHAR".to_string(),
            size: 64,
            charset: Some("utf8".to_string()),
            collate: Some("utf8_bin".to_string()),
            invisible: true,
            comment: Some("名前".to_string()),
            default: Some("'x'".to_string()),
            ..Column::default()
        };
        assert_eq!(
            generate_column_sql(&column),
            "`name` VARCHAR(64) CHARACTER SET utf8 COLLATE utf8_bin NOT NULL INVISIBLE COMMENT '名前' DEFAULT 'x'"
        );

        let column = Column {
            name: "id".to_string(),
            sql_type: "BIGINT".to_string(),
            unsigned: true,
            nullable: true,
            auto_increment: true,
            ..Column::default()
        };
        assert_eq!(
            generate_column_sql(&column),
            "`id` BIGINT UNSIGNED NULL AUTO_INCREMENT"
        );
    }

    #[test]
    fn test_index_clauses() {
        let index = Index::new(
            "idx_user_created",
            [IndexColumn::from("user_id"), IndexColumn::desc("created_at")],
        )
        .comment("an index\n\twith 'comment'")
        .invisible();
        assert_eq!(
            generate_index_sql(&index),
            r"INDEX `idx_user_created` (`user_id`, `created_at` DESC) COMMENT 'an index\n\twith \'comment\'' INVISIBLE"
        );

        let index = UniqueIndex::new("uniq_email", ["email"]);
        assert_eq!(generate_unique_index_sql(&index), "UNIQUE `uniq_email` (`email`)");

        let index = FullTextIndex::new("idx_text", "text")
            .with_parser("ngram")
            .comment("FULLTEXT INDEX");
        assert_eq!(
            generate_full_text_index_sql(&index),
            "FULLTEXT INDEX `idx_text` (`text`) WITH PARSER ngram COMMENT 'FULLTEXT INDEX'"
        );

        let index = SpatialIndex::new("idx_point", "point");
        assert_eq!(
            generate_spatial_index_sql(&index),
            "SPATIAL INDEX `idx_point` (`point`)"
        );
    }

    #[test]
    fn test_foreign_key_clause() {
        let fk = ForeignKey::new("fk_foo1", ["id"], "foo1", ["id"])
            .on_update(ForeignKeyOption::Cascade)
            .on_delete(ForeignKeyOption::SetNull);
        assert_eq!(
            generate_foreign_key_sql(&fk),
            "CONSTRAINT `fk_foo1` FOREIGN KEY (`id`) REFERENCES `foo1` (`id`) ON DELETE SET NULL ON UPDATE CASCADE"
        );
    }

    #[test]
    fn test_table_without_primary_key() {
        let table = Table {
            name: "logs".to_string(),
            columns: vec![Column {
                name: "message".to_string(),
                sql_type: "TEXT".to_string(),
                ..Column::default()
            }],
            ..Table::default()
        };
        let db = DbConfig {
            engine: "InnoDB".to_string(),
            charset: String::new(),
            collate: String::new(),
        };
        assert_eq!(
            generate_create_table_sql(&table, &db),
            "CREATE TABLE `logs` (\n    `message` TEXT NOT NULL\n) ENGINE=InnoDB;"
        );
    }
}
