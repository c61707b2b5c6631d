mod annotation;
mod column;
mod generator;
mod kind;
mod naming;
mod record;
mod table;
mod types;
mod validator;


// 重新导出公共接口
pub use annotation::{Annotation, TagOption, parse_annotation};
pub use column::map_column;
pub use generator::{generate_create_table_sql, generate_ddl, quote, quote_string};
pub use kind::{Classify, FieldKind};
pub use naming::camel_to_snake;
pub use record::{Field, Record, Shape};
pub use table::build_table;
pub use types::{
    Column, ForeignKey, ForeignKeyOption, FullTextIndex, Index, IndexColumn, PrimaryKey,
    SortOrder, SpatialIndex, Table, UniqueIndex,
};
pub use validator::Validator;
