use crate::config::MakerConfig;
use crate::error::{DdlError, Result};
use crate::schema::{Record, Table, Validator, build_table, generate_ddl};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// DDL 生成器
///
/// 收集记录类型，依次完成建表、校验和输出。
/// 校验未通过时不会写出任何内容。
pub struct Maker {
    config: MakerConfig,
    records: Vec<Box<dyn Record>>,
    tables: Vec<Table>,
}

impl Maker {
    pub fn new(config: MakerConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
            tables: Vec::new(),
        }
    }

    pub fn config(&self) -> &MakerConfig {
        &self.config
    }

    pub fn add_record<R: Record + 'static>(&mut self, record: R) {
        self.records.push(Box::new(record));
    }

    pub fn add_records<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = Box<dyn Record>>,
    {
        self.records.extend(records);
    }

    /// 最近一次构建出的表，按记录添加顺序排列
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// 重新构建全部表定义，遇到第一个结构性错误即返回
    pub fn build_tables(&mut self) -> Result<()> {
        let mut tables = Vec::with_capacity(self.records.len());
        for record in &self.records {
            tables.push(build_table(record)?);
        }
        info!("已构建 {} 张表", tables.len());
        self.tables = tables;
        Ok(())
    }

    /// 校验已构建的表
    pub fn validate(&self) -> Result<()> {
        Validator::new(&self.tables)
            .skip_fk_index_validation(self.config.skip_fk_index_validation)
            .check()?;
        Ok(())
    }

    /// 构建、校验并生成 DDL 文本
    pub fn generate_string(&mut self) -> Result<String> {
        self.build_tables()?;
        self.validate()?;
        let ddl = generate_ddl(&self.tables, &self.config.db);
        info!("DDL 生成完成: {} 张表, {} 字节", self.tables.len(), ddl.len());
        Ok(ddl)
    }

    /// 生成 DDL 并写入 writer
    pub fn generate<W: Write>(&mut self, mut writer: W) -> Result<()> {
        let ddl = self.generate_string()?;
        writer.write_all(ddl.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// 生成 DDL 并写入配置中的 out_file_path
    pub fn generate_file(&mut self) -> Result<()> {
        let path = self
            .config
            .out_file_path
            .clone()
            .ok_or_else(|| DdlError::custom("未配置输出文件路径 out_file_path"))?;
        self.generate_to_path(path)
    }

    /// 生成 DDL 并写入指定文件，必要时创建父目录
    pub fn generate_to_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let ddl = self.generate_string()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, ddl)?;
        info!("DDL 已写入: {}", path.display());
        Ok(())
    }
}
