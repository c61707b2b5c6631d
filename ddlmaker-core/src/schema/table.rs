use super::column::map_column;
use super::naming::camel_to_snake;
use super::record::{Record, Shape};
use super::types::Table;
use crate::error::{DdlError, Result};
use tracing::debug;

/// 根据记录类型构建表定义
///
/// 字段按声明顺序映射为列，任一字段映射失败则整张表构建失败。
/// 主键、索引和外键只是原样收集，引用关系在 [`super::validator`] 中统一检查。
pub fn build_table<R: Record + ?Sized>(record: &R) -> Result<Table> {
    let type_name = record.type_name();

    let fields = match record.shape() {
        Shape::Struct(fields) => fields,
        Shape::Other(kind) => return Err(DdlError::NotRecord { type_name, kind }),
    };

    let name = record
        .table_name()
        .unwrap_or_else(|| camel_to_snake(&type_name));
    debug!("构建表 {} (记录 {})", name, type_name);

    let mut columns = Vec::with_capacity(fields.len());
    for field in &fields {
        let column = map_column(field).map_err(|source| DdlError::Mapping {
            type_name: type_name.clone(),
            field: field.name.clone(),
            source,
        })?;
        if let Some(column) = column {
            columns.push(column);
        }
    }

    Ok(Table {
        name,
        columns,
        primary_key: record.primary_key(),
        indexes: record.indexes().unwrap_or_default(),
        unique_indexes: record.unique_indexes().unwrap_or_default(),
        full_text_indexes: record.full_text_indexes().unwrap_or_default(),
        spatial_indexes: record.spatial_indexes().unwrap_or_default(),
        foreign_keys: record.foreign_keys().unwrap_or_default(),
    })
}
