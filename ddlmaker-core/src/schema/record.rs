use super::kind::{Classify, FieldKind};
use super::types::{ForeignKey, FullTextIndex, Index, PrimaryKey, SpatialIndex, UniqueIndex};

/// 记录类型中的一个字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// 声明的字段名，例如 `UserID`
    pub name: String,
    pub kind: FieldKind,
    /// 原始注解字符串，没有注解时为空串
    pub tag: String,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            tag: tag.into(),
        }
    }

    /// 根据 Rust 类型构造字段
    pub fn of<T: Classify + ?Sized>(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::new(name, T::classify(), tag)
    }
}

/// 记录类型的结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// 结构体，字段按声明顺序排列
    Struct(Vec<Field>),
    /// 其它类型，携带类型描述
    Other(String),
}

/// 可以生成一张表的记录类型
///
/// `type_name` 和 `shape` 必须实现，其余方法都是可选能力：
/// 返回 `None` 表示该记录不提供对应能力，建表时使用默认值。
pub trait Record {
    fn type_name(&self) -> String;

    fn shape(&self) -> Shape;

    /// 自定义表名
    fn table_name(&self) -> Option<String> {
        None
    }

    fn primary_key(&self) -> Option<PrimaryKey> {
        None
    }

    fn indexes(&self) -> Option<Vec<Index>> {
        None
    }

    fn unique_indexes(&self) -> Option<Vec<UniqueIndex>> {
        None
    }

    fn full_text_indexes(&self) -> Option<Vec<FullTextIndex>> {
        None
    }

    fn spatial_indexes(&self) -> Option<Vec<SpatialIndex>> {
        None
    }

    fn foreign_keys(&self) -> Option<Vec<ForeignKey>> {
        None
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn type_name(&self) -> String {
        (**self).type_name()
    }

    fn shape(&self) -> Shape {
        (**self).shape()
    }

    fn table_name(&self) -> Option<String> {
        (**self).table_name()
    }

    fn primary_key(&self) -> Option<PrimaryKey> {
        (**self).primary_key()
    }

    fn indexes(&self) -> Option<Vec<Index>> {
        (**self).indexes()
    }

    fn unique_indexes(&self) -> Option<Vec<UniqueIndex>> {
        (**self).unique_indexes()
    }

    fn full_text_indexes(&self) -> Option<Vec<FullTextIndex>> {
        (**self).full_text_indexes()
    }

    fn spatial_indexes(&self) -> Option<Vec<SpatialIndex>> {
        (**self).spatial_indexes()
    }

    fn foreign_keys(&self) -> Option<Vec<ForeignKey>> {
        (**self).foreign_keys()
    }
}
