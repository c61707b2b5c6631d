use crate::project_info::{metadata, version_info};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// DDL Maker CLI - 记录定义到 MySQL DDL 的编译工具
#[derive(Parser, Debug)]
#[command(name = metadata::display::BIN_NAME)]
#[command(about = metadata::PROJECT_DESCRIPTION)]
#[command(version = version_info::CLI_VERSION)]
#[command(long_about = metadata::display::DESCRIPTION_LONG)]
#[command(author = metadata::PROJECT_AUTHORS)]
pub struct Cli {
    /// 配置文件路径，不指定时依次查找 ddlmaker.toml 和 .ddlmaker.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 详细输出
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// 创建默认配置文件
    Init {
        /// 如果配置文件已存在，强制覆盖
        #[arg(long)]
        force: bool,
    },
    /// 构建并校验记录定义，输出全部问题
    Check {
        /// 记录定义文件（.toml 或 .json）
        #[arg(short, long)]
        schema: PathBuf,
    },
    /// 生成 DDL
    Generate {
        /// 记录定义文件（.toml 或 .json）
        #[arg(short, long)]
        schema: PathBuf,
        /// 输出文件，不指定时使用配置中的 out_file_path，都没有则输出到标准输出
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// 跳过外键索引覆盖检查
        #[arg(long)]
        skip_fk_index_validation: bool,
    },
}
