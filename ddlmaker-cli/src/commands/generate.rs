use super::load_maker;
use crate::app::CliApp;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// 生成 DDL
///
/// 输出位置优先级：`--out` 参数 > 配置中的 out_file_path > 标准输出
pub fn run_generate(
    app: &CliApp,
    schema: &Path,
    out: Option<&Path>,
    skip_fk_index_validation: bool,
) -> Result<()> {
    let mut config = app.config.clone();
    if skip_fk_index_validation {
        config.skip_fk_index_validation = true;
    }
    if let Some(out) = out {
        config.out_file_path = Some(out.to_path_buf());
    }

    let mut maker = load_maker(config, schema)?;

    if maker.config().out_file_path.is_some() {
        maker.generate_file().context("生成 DDL 失败")?;
    } else {
        let stdout = std::io::stdout();
        maker.generate(stdout.lock()).context("生成 DDL 失败")?;
    }

    info!("✅ 共生成 {} 张表", maker.tables().len());
    Ok(())
}
