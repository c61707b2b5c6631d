use super::types::{Column, ForeignKey, Table};
use crate::error::ValidationError;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// schema 整体校验
///
/// 先建立表和列的查找表，再检查跨表引用，避免声明顺序带来的前向引用问题。
/// 校验不会在第一个错误处停止，所有诊断按发现顺序返回。
pub struct Validator<'a> {
    skip_fk_index_validation: bool,

    tables: &'a [Table],
    errors: Vec<String>,

    /// key: 表名，重名时保留第一次出现的表
    table_map: HashMap<&'a str, &'a Table>,

    /// key: (表名, 列名)
    column_map: HashMap<(&'a str, &'a str), &'a Column>,
}

impl<'a> Validator<'a> {
    pub fn new(tables: &'a [Table]) -> Self {
        Self {
            skip_fk_index_validation: false,
            tables,
            errors: Vec::new(),
            table_map: HashMap::new(),
            column_map: HashMap::new(),
        }
    }

    /// 关闭外键索引覆盖检查
    pub fn skip_fk_index_validation(mut self, skip: bool) -> Self {
        self.skip_fk_index_validation = skip;
        self
    }

    /// 执行全部检查，返回诊断列表，空列表表示校验通过
    pub fn validate(mut self) -> Vec<String> {
        self.create_table_map();

        let tables = self.tables;
        for table in tables {
            self.validate_index(table);
            self.validate_index_name(table);
        }
        self.validate_constraint_names();
        self.validate_foreign_keys();

        self.errors
    }

    /// 执行全部检查，有诊断时返回 [`ValidationError`]
    pub fn check(self) -> Result<(), ValidationError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(errors))
        }
    }

    fn save_error(&mut self, msg: String) {
        warn!("{}", msg);
        self.errors.push(msg);
    }

    fn create_table_map(&mut self) {
        let tables = self.tables;
        for table in tables {
            // 表名唯一
            if self.table_map.contains_key(table.name.as_str()) {
                self.save_error(format!("duplicated name of table: {:?}", table.name));
                continue;
            }
            self.table_map.insert(&table.name, table);

            for col in &table.columns {
                // 列名在表内唯一
                let key = (table.name.as_str(), col.name.as_str());
                if self.column_map.contains_key(&key) {
                    self.save_error(format!(
                        "table {:?}: duplicated name of column: {:?}",
                        table.name, col.name
                    ));
                    continue;
                }
                self.column_map.insert(key, col);
            }
        }
    }

    fn has_column(&self, table: &'a str, column: &'a str) -> bool {
        self.column_map.contains_key(&(table, column))
    }

    fn validate_index(&mut self, table: &'a Table) {
        if let Some(pk) = &table.primary_key {
            for col in pk.columns() {
                if !self.has_column(&table.name, col) {
                    self.save_error(format!(
                        "table {:?}, primary key: column {:?} not found",
                        table.name, col
                    ));
                }
            }
        }

        for idx in &table.indexes {
            for col in &idx.columns {
                if !self.has_column(&table.name, &col.name) {
                    self.save_error(format!(
                        "table {:?}, index {:?}: column {:?} not found",
                        table.name, idx.name, col.name
                    ));
                }
            }
        }

        for idx in &table.unique_indexes {
            for col in &idx.columns {
                if !self.has_column(&table.name, col) {
                    self.save_error(format!(
                        "table {:?}, unique index {:?}: column {:?} not found",
                        table.name, idx.name, col
                    ));
                }
            }
        }

        for idx in &table.full_text_indexes {
            if !self.has_column(&table.name, &idx.column) {
                self.save_error(format!(
                    "table {:?}, fulltext index {:?}: column {:?} not found",
                    table.name, idx.name, idx.column
                ));
            }
        }

        for idx in &table.spatial_indexes {
            if !self.has_column(&table.name, &idx.column) {
                self.save_error(format!(
                    "table {:?}, spatial index {:?}: column {:?} not found",
                    table.name, idx.name, idx.column
                ));
            }
        }
    }

    /// 四类索引共用同一个命名空间
    fn validate_index_name(&mut self, table: &'a Table) {
        let names = table
            .indexes
            .iter()
            .map(|idx| idx.name.as_str())
            .chain(table.unique_indexes.iter().map(|idx| idx.name.as_str()))
            .chain(table.full_text_indexes.iter().map(|idx| idx.name.as_str()))
            .chain(table.spatial_indexes.iter().map(|idx| idx.name.as_str()));

        let mut seen = HashSet::new();
        for name in names {
            if !seen.insert(name) {
                self.save_error(format!(
                    "table {:?}: duplicated name of index: {:?}",
                    table.name, name
                ));
            }
        }
    }

    /// 外键约束名在整个 schema 内唯一
    fn validate_constraint_names(&mut self) {
        let mut seen = HashSet::new();

        let tables = self.tables;
        for table in tables {
            for fk in &table.foreign_keys {
                if !seen.insert(fk.name.as_str()) {
                    self.save_error(format!(
                        "table {:?}: duplicated name of foreign key constraint: {:?}",
                        table.name, fk.name
                    ));
                }
            }
        }
    }

    fn validate_foreign_keys(&mut self) {
        let tables = self.tables;
        for table in tables {
            for fk in &table.foreign_keys {
                self.validate_fk_columns(table, fk);
                self.validate_fk_ref(table, fk);
            }
        }
    }

    fn validate_fk_columns(&mut self, table: &'a Table, fk: &'a ForeignKey) {
        if fk.columns.len() != fk.references.len() {
            self.save_error(format!(
                "table {:?}, foreign key {:?}: {} column(s) but {} referenced column(s)",
                table.name,
                fk.name,
                fk.columns.len(),
                fk.references.len()
            ));
        }

        let mut passed = true;
        for col in &fk.columns {
            if !self.has_column(&table.name, col) {
                self.save_error(format!(
                    "table {:?}, foreign key {:?}: column {:?} not found",
                    table.name, fk.name, col
                ));
                passed = false;
            }
        }

        if passed && !self.skip_fk_index_validation && !self.has_index(table, &fk.columns) {
            self.save_error(format!(
                "table {:?}, foreign key {:?}: index required on table {:?}",
                table.name, fk.name, table.name
            ));
        }
    }

    fn validate_fk_ref(&mut self, table: &'a Table, fk: &'a ForeignKey) {
        let Some(&ref_table) = self.table_map.get(fk.table.as_str()) else {
            self.save_error(format!(
                "table {:?}, foreign key {:?}: referenced table {:?} not found",
                table.name, fk.name, fk.table
            ));
            return;
        };

        let mut passed = true;
        for (i, col) in fk.references.iter().enumerate() {
            let Some(&ref_col) = self.column_map.get(&(ref_table.name.as_str(), col.as_str()))
            else {
                self.save_error(format!(
                    "table {:?}, foreign key {:?}: referenced column {:?}.{:?} not found",
                    table.name, fk.name, ref_table.name, col
                ));
                passed = false;
                continue;
            };

            // 本表列不存在的错误已经报告过
            let Some(&my_col) = fk
                .columns
                .get(i)
                .and_then(|name| self.column_map.get(&(table.name.as_str(), name.as_str())))
            else {
                continue;
            };

            if ref_col.sql_type != my_col.sql_type || ref_col.unsigned != my_col.unsigned {
                self.save_error(format!(
                    "table {:?}, foreign key {:?}: column {:?} and referenced column {:?}.{:?} type mismatch",
                    table.name, fk.name, my_col.name, ref_table.name, col
                ));
            }
            if ref_col.charset != my_col.charset {
                self.save_error(format!(
                    "table {:?}, foreign key {:?}: column {:?} and referenced column {:?}.{:?} character set mismatch",
                    table.name, fk.name, my_col.name, ref_table.name, col
                ));
            }
            if ref_col.collate != my_col.collate {
                self.save_error(format!(
                    "table {:?}, foreign key {:?}: column {:?} and referenced column {:?}.{:?} collate mismatch",
                    table.name, fk.name, my_col.name, ref_table.name, col
                ));
            }
        }

        if passed && !self.skip_fk_index_validation && !self.has_index(ref_table, &fk.references) {
            self.save_error(format!(
                "table {:?}, foreign key {:?}: index required on table {:?}",
                table.name, fk.name, ref_table.name
            ));
        }
    }

    /// 主键、普通索引或唯一索引的列以 `cols` 为前缀
    fn has_index(&self, table: &Table, cols: &[String]) -> bool {
        if let Some(pk) = &table.primary_key {
            if has_prefix(pk.columns().iter().map(String::as_str), cols) {
                return true;
            }
        }

        table
            .indexes
            .iter()
            .any(|idx| has_prefix(idx.column_names().into_iter(), cols))
            || table
                .unique_indexes
                .iter()
                .any(|idx| has_prefix(idx.columns.iter().map(String::as_str), cols))
    }
}

fn has_prefix<'s>(mut columns: impl Iterator<Item = &'s str>, prefix: &[String]) -> bool {
    prefix
        .iter()
        .all(|want| columns.next().is_some_and(|got| got == want))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{FullTextIndex, Index, PrimaryKey, SpatialIndex, UniqueIndex};

    fn column(name: &str, sql_type: &str) -> Column {
        Column {
            name: name.to_string(),
            source_field_name: name.to_string(),
            sql_type: sql_type.to_string(),
            ..Column::default()
        }
    }

    fn table(name: &str, columns: Vec<Column>) -> Table {
        Table {
            name: name.to_string(),
            columns,
            primary_key: Some(PrimaryKey::new(["id"])),
            ..Table::default()
        }
    }

    #[test]
    fn test_has_prefix() {
        let cols = || ["a", "b", "c"].into_iter();
        assert!(has_prefix(cols(), &["a".to_string()]));
        assert!(has_prefix(cols(), &["a".to_string(), "b".to_string()]));
        assert!(!has_prefix(cols(), &["b".to_string()]));
        assert!(!has_prefix(
            ["a"].into_iter(),
            &["a".to_string(), "b".to_string()]
        ));
    }

    #[test]
    fn test_valid_schema() {
        let tables = vec![table("users", vec![column("id", "INTEGER")])];
        assert!(Validator::new(&tables).validate().is_empty());
        assert!(Validator::new(&tables).check().is_ok());
    }

    #[test]
    fn test_full_text_and_spatial_columns() {
        let mut t = table("docs", vec![column("id", "INTEGER")]);
        t.full_text_indexes.push(FullTextIndex::new("ft_body", "body"));
        t.spatial_indexes.push(SpatialIndex::new("sp_loc", "loc"));

        let errors = Validator::new(&[t]).validate();
        assert_eq!(
            errors,
            vec![
                r#"table "docs", fulltext index "ft_body": column "body" not found"#,
                r#"table "docs", spatial index "sp_loc": column "loc" not found"#,
            ]
        );
    }

    #[test]
    fn test_fk_column_count_mismatch() {
        let parent = table("parent", vec![column("id", "INTEGER")]);
        let mut child = table(
            "child",
            vec![column("id", "INTEGER"), column("parent_id", "INTEGER")],
        );
        child.indexes.push(Index::new("idx_parent", ["parent_id", "id"]));
        child.foreign_keys.push(ForeignKey::new(
            "fk_parent",
            ["parent_id", "id"],
            "parent",
            ["id"],
        ));

        let errors = Validator::new(&[parent, child]).validate();
        assert_eq!(
            errors,
            vec![r#"table "child", foreign key "fk_parent": 2 column(s) but 1 referenced column(s)"#]
        );
    }

    #[test]
    fn test_unique_index_covers_foreign_key() {
        let mut parent = table("parent", vec![column("id", "INTEGER"), column("code", "VARCHAR")]);
        parent.unique_indexes.push(UniqueIndex::new("uniq_code", ["code"]));
        let mut child = table(
            "child",
            vec![column("id", "INTEGER"), column("parent_code", "VARCHAR")],
        );
        child.indexes.push(Index::new("idx_parent_code", ["parent_code"]));
        child.foreign_keys.push(ForeignKey::new(
            "fk_parent_code",
            ["parent_code"],
            "parent",
            ["code"],
        ));

        assert!(Validator::new(&[parent, child]).validate().is_empty());
    }

    #[test]
    fn test_skip_fk_index_validation() {
        let parent = table("parent", vec![column("id", "INTEGER")]);
        let mut child = table(
            "child",
            vec![column("id", "INTEGER"), column("parent_id", "INTEGER")],
        );
        child
            .foreign_keys
            .push(ForeignKey::new("fk_parent", ["parent_id"], "parent", ["id"]));
        let tables = vec![parent, child];

        assert_eq!(
            Validator::new(&tables).validate(),
            vec![r#"table "child", foreign key "fk_parent": index required on table "child""#]
        );
        assert!(
            Validator::new(&tables)
                .skip_fk_index_validation(true)
                .validate()
                .is_empty()
        );
    }
}
