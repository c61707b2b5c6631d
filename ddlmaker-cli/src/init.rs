use anyhow::{Context, Result};
use ddlmaker_core::{MakerConfig, constants::config};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 运行独立的初始化流程，返回配置文件路径
pub fn run_init(config_path: Option<&Path>, force: bool) -> Result<PathBuf> {
    info!("🛠️  DDL Maker 初始化");

    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config::get_config_file_path);

    // 检查是否已经初始化过
    if !force && path.exists() {
        warn!("⚠️  配置文件已存在: {}", path.display());
        info!("如果您要重新初始化，请使用 --force 参数");
        info!("示例: ddlmaker init --force");
        return Ok(path);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("创建目录 {} 失败", parent.display()))?;
        }
    }

    MakerConfig::default()
        .save_to_file(&path)
        .with_context(|| format!("写入配置文件 {} 失败", path.display()))?;
    info!("   ✅ 创建配置文件: {}", path.display());

    info!("📝 接下来的步骤:");
    info!("   1️⃣  编写记录定义文件，例如 schema.toml");
    info!("   2️⃣  运行 'ddlmaker check --schema schema.toml' 校验定义");
    info!("   3️⃣  运行 'ddlmaker generate --schema schema.toml --out schema.sql' 生成 DDL");

    Ok(path)
}
