use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 表列定义
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// 来源字段名，仅用于诊断
    pub source_field_name: String,
    pub sql_type: String,
    /// 0 表示未设置
    pub size: u32,
    pub unsigned: bool,
    pub nullable: bool,
    pub auto_increment: bool,
    pub invisible: bool,
    /// 未转义的默认值
    pub default: Option<String>,
    pub comment: Option<String>,
    pub charset: Option<String>,
    pub collate: Option<String>,
    /// 空间参考 ID
    pub srid: Option<u32>,
}

/// 主键
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrimaryKey {
    columns: Vec<String>,
}

impl PrimaryKey {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// 索引列的排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// 普通索引中的一列，可带排序方向
///
/// 字符串形式为 `name`、`name ASC` 或 `name DESC`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IndexColumn {
    pub name: String,
    pub order: Option<SortOrder>,
}

impl IndexColumn {
    pub fn asc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            order: Some(SortOrder::Asc),
        }
    }

    pub fn desc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            order: Some(SortOrder::Desc),
        }
    }
}

impl From<&str> for IndexColumn {
    fn from(name: &str) -> Self {
        Self {
            name: name.to_string(),
            order: None,
        }
    }
}

impl FromStr for IndexColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, order) = match s.rsplit_once(char::is_whitespace) {
            Some((name, dir)) if dir.eq_ignore_ascii_case("ASC") => {
                (name.trim_end(), Some(SortOrder::Asc))
            }
            Some((name, dir)) if dir.eq_ignore_ascii_case("DESC") => {
                (name.trim_end(), Some(SortOrder::Desc))
            }
            _ => (s, None),
        };
        if name.is_empty() {
            return Err(format!("索引列名为空: {s:?}"));
        }
        Ok(Self {
            name: name.to_string(),
            order,
        })
    }
}

impl TryFrom<String> for IndexColumn {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<IndexColumn> for String {
    fn from(col: IndexColumn) -> Self {
        col.to_string()
    }
}

impl fmt::Display for IndexColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.order {
            Some(order) => write!(f, "{} {}", self.name, order.as_sql()),
            None => f.write_str(&self.name),
        }
    }
}

/// 普通索引
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub columns: Vec<IndexColumn>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub invisible: bool,
}

impl Index {
    pub fn new<I, C>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<IndexColumn>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            comment: None,
            invisible: false,
        }
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn invisible(mut self) -> Self {
        self.invisible = true;
        self
    }

    /// 不含排序方向的列名
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// 唯一索引
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueIndex {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub invisible: bool,
}

impl UniqueIndex {
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            comment: None,
            invisible: false,
        }
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn invisible(mut self) -> Self {
        self.invisible = true;
        self
    }
}

/// 全文索引
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullTextIndex {
    pub name: String,
    pub column: String,
    #[serde(default)]
    pub parser: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl FullTextIndex {
    pub fn new(name: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
            parser: None,
            comment: None,
        }
    }

    pub fn with_parser(mut self, parser: impl Into<String>) -> Self {
        self.parser = Some(parser.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// 空间索引
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpatialIndex {
    pub name: String,
    pub column: String,
    #[serde(default)]
    pub comment: Option<String>,
}

impl SpatialIndex {
    pub fn new(name: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
            comment: None,
        }
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// 外键的引用动作
///
/// NO ACTION 和 SET DEFAULT 在不同存储引擎上行为不一致，不提供。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForeignKeyOption {
    #[serde(rename = "CASCADE")]
    Cascade,
    #[serde(rename = "SET NULL")]
    SetNull,
    #[serde(rename = "RESTRICT")]
    Restrict,
}

impl ForeignKeyOption {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ForeignKeyOption::Cascade => "CASCADE",
            ForeignKeyOption::SetNull => "SET NULL",
            ForeignKeyOption::Restrict => "RESTRICT",
        }
    }
}

/// 外键约束
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub name: String,
    pub columns: Vec<String>,
    /// 被引用的表名
    pub table: String,
    pub references: Vec<String>,
    #[serde(default)]
    pub on_update: Option<ForeignKeyOption>,
    #[serde(default)]
    pub on_delete: Option<ForeignKeyOption>,
}

impl ForeignKey {
    pub fn new<I, J, S, T>(name: impl Into<String>, columns: I, table: impl Into<String>, references: J) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        J: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            table: table.into(),
            references: references.into_iter().map(Into::into).collect(),
            on_update: None,
            on_delete: None,
        }
    }

    pub fn on_update(mut self, option: ForeignKeyOption) -> Self {
        self.on_update = Some(option);
        self
    }

    pub fn on_delete(mut self, option: ForeignKeyOption) -> Self {
        self.on_delete = Some(option);
        self
    }
}

/// 表定义
///
/// 列按声明顺序保存，生成 DDL 时保持该顺序。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub primary_key: Option<PrimaryKey>,
    pub indexes: Vec<Index>,
    pub unique_indexes: Vec<UniqueIndex>,
    pub full_text_indexes: Vec<FullTextIndex>,
    pub spatial_indexes: Vec<SpatialIndex>,
    pub foreign_keys: Vec<ForeignKey>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_column_from_str() {
        let col: IndexColumn = "created_at DESC".parse().unwrap();
        assert_eq!(col, IndexColumn::desc("created_at"));

        let col: IndexColumn = "name asc".parse().unwrap();
        assert_eq!(col, IndexColumn::asc("name"));

        let col: IndexColumn = "name".parse().unwrap();
        assert_eq!(col, IndexColumn::from("name"));

        assert!("  ".parse::<IndexColumn>().is_err());
    }

    #[test]
    fn test_index_column_serde_parses_order() {
        let col: IndexColumn = serde_json::from_str(r#""a DESC""#).unwrap();
        assert_eq!(col, IndexColumn::desc("a"));

        let col: IndexColumn = serde_json::from_str(r#""a""#).unwrap();
        assert_eq!(col, IndexColumn::from("a"));

        assert!(serde_json::from_str::<IndexColumn>(r#""""#).is_err());
        assert_eq!(
            serde_json::to_string(&IndexColumn::asc("b")).unwrap(),
            r#""b ASC""#
        );
    }

    #[test]
    fn test_foreign_key_option_serde() {
        let fk: ForeignKey = serde_json::from_str(
            r#"{"name":"fk","columns":["a"],"table":"t","references":["id"],"on_delete":"SET NULL"}"#,
        )
        .unwrap();
        assert_eq!(fk.on_delete, Some(ForeignKeyOption::SetNull));
        assert_eq!(fk.on_update, None);
    }

    #[test]
    fn test_index_builder() {
        let idx = Index::new("idx_name", ["name"]).comment("c").invisible();
        assert_eq!(idx.column_names(), vec!["name"]);
        assert_eq!(idx.comment.as_deref(), Some("c"));
        assert!(idx.invisible);
    }
}
