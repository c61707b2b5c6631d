//! 基于文件的记录定义
//!
//! 非 Rust 调用方可以用 TOML 或 JSON 描述记录类型，加载后直接交给 [`crate::Maker`]。
//!
//! ```toml
//! [[records]]
//! name = "User"
//! primary_key = ["id"]
//!
//! [[records.fields]]
//! name = "ID"
//! type = "u64"
//! tag = ",auto"
//!
//! [[records.fields]]
//! name = "Name"
//! type = "String"
//!
//! [[records.indexes]]
//! name = "idx_name"
//! columns = ["name DESC"]
//! ```

use crate::error::{DdlError, Result};
use crate::schema::{
    Field, FieldKind, ForeignKey, FullTextIndex, Index, PrimaryKey, Record, Shape, SpatialIndex,
    UniqueIndex,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

const STRUCT_KIND: &str = "struct";

fn default_kind() -> String {
    STRUCT_KIND.to_string()
}

/// 一组记录定义
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaDefinition {
    #[serde(default)]
    pub records: Vec<RecordDefinition>,
}

/// 单个记录类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDefinition {
    pub name: String,
    /// 只有 `struct` 能生成表
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    /// 自定义表名
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub primary_key: Option<PrimaryKey>,
    #[serde(default)]
    pub indexes: Option<Vec<Index>>,
    #[serde(default)]
    pub unique_indexes: Option<Vec<UniqueIndex>>,
    #[serde(default)]
    pub full_text_indexes: Option<Vec<FullTextIndex>>,
    #[serde(default)]
    pub spatial_indexes: Option<Vec<SpatialIndex>>,
    #[serde(default)]
    pub foreign_keys: Option<Vec<ForeignKey>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    /// Rust 写法的类型名
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub tag: String,
}

impl SchemaDefinition {
    /// 根据扩展名选择格式，`.json` 按 JSON 解析，其余按 TOML 解析
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let definition = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        debug!(
            "从 {} 加载了 {} 个记录定义",
            path.display(),
            definition.records.len()
        );
        Ok(definition)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let definition: SchemaDefinition = toml::from_str(content)?;
        definition.check()?;
        Ok(definition)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let definition: SchemaDefinition = serde_json::from_str(content)?;
        definition.check()?;
        Ok(definition)
    }

    /// 转换为可以交给 Maker 的记录列表
    pub fn into_records(self) -> Vec<Box<dyn Record>> {
        self.records
            .into_iter()
            .map(|r| Box::new(r) as Box<dyn Record>)
            .collect()
    }

    /// 名称不能为空，其余问题交给建表和校验阶段
    fn check(&self) -> Result<()> {
        for (i, record) in self.records.iter().enumerate() {
            if record.name.trim().is_empty() {
                return Err(DdlError::invalid_definition(format!(
                    "第 {} 个记录缺少 name",
                    i + 1
                )));
            }
            for field in &record.fields {
                if field.name.trim().is_empty() {
                    return Err(DdlError::invalid_definition(format!(
                        "记录 {} 中存在缺少 name 的字段",
                        record.name
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Record for RecordDefinition {
    fn type_name(&self) -> String {
        self.name.clone()
    }

    fn shape(&self) -> Shape {
        if self.kind != STRUCT_KIND {
            return Shape::Other(self.kind.clone());
        }
        Shape::Struct(
            self.fields
                .iter()
                .map(|f| Field::new(&f.name, FieldKind::parse(&f.type_name), &f.tag))
                .collect(),
        )
    }

    fn table_name(&self) -> Option<String> {
        self.table.clone()
    }

    fn primary_key(&self) -> Option<PrimaryKey> {
        self.primary_key.clone()
    }

    fn indexes(&self) -> Option<Vec<Index>> {
        self.indexes.clone()
    }

    fn unique_indexes(&self) -> Option<Vec<UniqueIndex>> {
        self.unique_indexes.clone()
    }

    fn full_text_indexes(&self) -> Option<Vec<FullTextIndex>> {
        self.full_text_indexes.clone()
    }

    fn spatial_indexes(&self) -> Option<Vec<SpatialIndex>> {
        self.spatial_indexes.clone()
    }

    fn foreign_keys(&self) -> Option<Vec<ForeignKey>> {
        self.foreign_keys.clone()
    }
}
