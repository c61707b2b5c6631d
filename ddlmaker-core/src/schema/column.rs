use super::annotation::parse_annotation;
use super::kind::FieldKind;
use super::naming::camel_to_snake;
use super::record::Field;
use super::types::Column;
use crate::constants::column::{DEFAULT_VARBINARY_SIZE, DEFAULT_VARCHAR_SIZE};
use crate::error::MappingError;
use tracing::debug;

/// 类型的默认列映射
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SqlDefault {
    sql_type: &'static str,
    size: u32,
    unsigned: bool,
}

impl SqlDefault {
    const fn plain(sql_type: &'static str) -> Self {
        Self {
            sql_type,
            size: 0,
            unsigned: false,
        }
    }

    const fn unsigned(sql_type: &'static str) -> Self {
        Self {
            sql_type,
            size: 0,
            unsigned: true,
        }
    }

    const fn sized(sql_type: &'static str, size: u32) -> Self {
        Self {
            sql_type,
            size,
            unsigned: false,
        }
    }
}

/// 默认类型映射表，没有默认映射的类型返回 None
fn default_mapping(kind: &FieldKind) -> Option<SqlDefault> {
    let mapped = match kind {
        FieldKind::Bool => SqlDefault::plain("TINYINT(1)"),
        FieldKind::Int8 => SqlDefault::plain("TINYINT"),
        FieldKind::Int16 => SqlDefault::plain("SMALLINT"),
        FieldKind::Int32 => SqlDefault::plain("INTEGER"),
        FieldKind::Int64 => SqlDefault::plain("BIGINT"),
        FieldKind::Uint8 => SqlDefault::unsigned("TINYINT"),
        FieldKind::Uint16 => SqlDefault::unsigned("SMALLINT"),
        FieldKind::Uint32 => SqlDefault::unsigned("INTEGER"),
        FieldKind::Uint64 => SqlDefault::unsigned("BIGINT"),
        FieldKind::Float32 => SqlDefault::plain("FLOAT"),
        FieldKind::Float64 => SqlDefault::plain("DOUBLE"),
        FieldKind::String => SqlDefault::sized("VARCHAR", DEFAULT_VARCHAR_SIZE),
        FieldKind::FixedBytes(len) => SqlDefault::sized("BINARY", u32::try_from(*len).ok()?),
        FieldKind::Bytes => SqlDefault::sized("VARBINARY", DEFAULT_VARBINARY_SIZE),
        FieldKind::DateTime => SqlDefault::plain("DATETIME"),
        FieldKind::RawJson => SqlDefault::plain("JSON"),
        FieldKind::Nullable(inner) => return default_mapping(inner),
        FieldKind::Other(_) => return None,
    };
    Some(mapped)
}

/// 把字段映射为列
///
/// 注解列名为 `-` 时返回 `Ok(None)`，表示忽略该字段。
/// 注解选项按出现顺序覆盖默认映射；`type=` 会清空之前推断出的 size 和 unsigned。
pub fn map_column(field: &Field) -> Result<Option<Column>, MappingError> {
    let tag = parse_annotation(&field.tag);
    if tag.is_skip() {
        debug!("忽略字段: {}", field.name);
        return Ok(None);
    }

    let mut column = Column {
        name: tag
            .name
            .clone()
            .unwrap_or_else(|| camel_to_snake(&field.name)),
        source_field_name: field.name.clone(),
        // 包装类型即使没有默认映射也保持可空
        nullable: matches!(field.kind, FieldKind::Nullable(_)),
        ..Column::default()
    };

    if let Some(default) = default_mapping(&field.kind) {
        column.sql_type = default.sql_type.to_string();
        column.size = default.size;
        column.unsigned = default.unsigned;
    }

    for option in tag.options {
        match option.key.as_str() {
            "null" => column.nullable = true,
            "auto" => column.auto_increment = true,
            "invisible" => column.invisible = true,
            "unsigned" => column.unsigned = true,
            "size" => column.size = parse_number(&option.key, &option.value)?,
            "srid" => column.srid = Some(parse_number(&option.key, &option.value)?),
            "type" => {
                column.sql_type = option.value;
                column.size = 0;
                column.unsigned = false;
            }
            "default" => column.default = Some(option.value),
            "charset" => column.charset = Some(option.value),
            "collate" => column.collate = Some(option.value),
            "comment" => column.comment = Some(option.value),
            "" => return Err(MappingError::EmptyOption),
            _ => return Err(MappingError::UnknownOption(option.key)),
        }
    }

    if column.sql_type.is_empty() {
        return Err(MappingError::UnsupportedKind(field.kind.to_string()));
    }

    debug!(
        "字段 {} -> 列 {} {}",
        field.name, column.name, column.sql_type
    );
    Ok(Some(column))
}

fn parse_number(key: &str, value: &str) -> Result<u32, MappingError> {
    value
        .trim()
        .parse()
        .map_err(|_| MappingError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        })
}
