use crate::constants::{config, table};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 生成器配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct MakerConfig {
    #[serde(default)]
    pub db: DbConfig,
    /// DDL 输出文件路径
    #[serde(default)]
    pub out_file_path: Option<PathBuf>,
    /// 关闭外键索引覆盖检查
    #[serde(default)]
    pub skip_fk_index_validation: bool,
}

/// 建表尾部使用的数据库选项，按原样拼接进 DDL
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DbConfig {
    pub engine: String,
    pub charset: String,
    pub collate: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            engine: table::DEFAULT_ENGINE.to_string(),
            charset: table::DEFAULT_CHARSET.to_string(),
            collate: table::DEFAULT_COLLATE.to_string(),
        }
    }
}

impl MakerConfig {
    /// 按优先级查找配置文件：ddlmaker.toml -> .ddlmaker.toml，找不到时使用默认配置
    pub fn find_and_load_config() -> Result<Self> {
        for config_file in config::CONFIG_FILE_CANDIDATES {
            if Path::new(config_file).exists() {
                tracing::info!("找到配置文件: {}", config_file);
                return Self::load_from_file(config_file);
            }
        }

        tracing::debug!("未找到配置文件，使用默认配置");
        Ok(Self::default())
    }

    /// 从指定文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let config: MakerConfig = toml::from_str(&content)?;

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_with_comments();
        fs::write(&path, content)?;
        Ok(())
    }

    /// 生成带注释的TOML配置
    fn to_toml_with_comments(&self) -> String {
        const TEMPLATE: &str = include_str!("../templates/ddlmaker.toml.template");

        let out_file_path_line = match &self.out_file_path {
            Some(path) => format!(
                "out_file_path = {}",
                toml_string(&path.to_string_lossy())
            ),
            None => format!("# out_file_path = \"{}\"", config::DEFAULT_OUT_FILE),
        };

        TEMPLATE
            .replace("{out_file_path_line}", &out_file_path_line)
            .replace(
                "{skip_fk_index_validation}",
                &self.skip_fk_index_validation.to_string(),
            )
            .replace("{engine}", &toml_string(&self.db.engine))
            .replace("{charset}", &toml_string(&self.db.charset))
            .replace("{collate}", &toml_string(&self.db.collate))
    }
}

fn toml_string(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = MakerConfig::default();
        assert_eq!(config.db.engine, "InnoDB");
        assert_eq!(config.db.charset, "utf8mb4");
        assert_eq!(config.db.collate, "utf8mb4_bin");
        assert!(config.out_file_path.is_none());
        assert!(!config.skip_fk_index_validation);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("ddlmaker.toml");

        let config = MakerConfig {
            db: DbConfig {
                engine: "InnoDB".to_string(),
                charset: "utf8".to_string(),
                collate: String::new(),
            },
            out_file_path: Some(PathBuf::from("out/schema.sql")),
            skip_fk_index_validation: true,
        };
        config.save_to_file(&path).unwrap();

        let loaded = MakerConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);

        // 模板中的注释应该保留
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("# DDL Maker 配置文件"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: MakerConfig = toml::from_str("[db]\ncharset = \"latin1\"\n").unwrap();
        assert_eq!(config.db.engine, "InnoDB");
        assert_eq!(config.db.charset, "latin1");
        assert_eq!(config.db.collate, "utf8mb4_bin");
    }

    #[test]
    fn test_default_config_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("ddlmaker.toml");

        MakerConfig::default().save_to_file(&path).unwrap();
        let loaded = MakerConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, MakerConfig::default());
    }
}
