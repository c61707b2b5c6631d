use anyhow::{Context, Result};
use ddlmaker_core::MakerConfig;
use std::path::Path;
use tracing::info;

use crate::cli::Commands;
use crate::commands;

#[derive(Debug, Clone)]
pub struct CliApp {
    pub config: MakerConfig,
}

impl CliApp {
    /// 从指定配置文件初始化，未指定时自动查找
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => MakerConfig::load_from_file(path)
                .with_context(|| format!("加载配置文件 {} 失败", path.display()))?,
            None => MakerConfig::find_and_load_config().context("加载配置文件失败")?,
        };
        Ok(Self { config })
    }

    pub fn with_config(config: MakerConfig) -> Self {
        Self { config }
    }

    /// 运行应用命令
    pub fn run_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Init { .. } => unreachable!(), // 已经在 main.rs 中处理
            Commands::Check { schema } => {
                info!("🔍 校验记录定义: {}", schema.display());
                commands::run_check(self, &schema)
            }
            Commands::Generate {
                schema,
                out,
                skip_fk_index_validation,
            } => {
                info!("🛠️  生成 DDL: {}", schema.display());
                commands::run_generate(self, &schema, out.as_deref(), skip_fk_index_validation)
            }
        }
    }
}
