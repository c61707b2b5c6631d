use super::load_maker;
use crate::app::CliApp;
use anyhow::{Context, Result};
use ddlmaker_core::DdlError;
use std::path::Path;
use tracing::{error, info};

/// 构建并校验记录定义，每条诊断单独输出
pub fn run_check(app: &CliApp, schema: &Path) -> Result<()> {
    let mut maker = load_maker(app.config.clone(), schema)?;
    maker.build_tables().context("构建表定义失败")?;

    match maker.validate() {
        Ok(()) => {
            info!("✅ 校验通过: {} 张表", maker.tables().len());
            Ok(())
        }
        Err(DdlError::Validation(errs)) => {
            for diagnostic in errs.diagnostics() {
                error!("   ❌ {}", diagnostic);
            }
            Err(errs.into())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddlmaker_core::{MakerConfig, ValidationError};
    use tempfile::tempdir;

    const VALID: &str = r#"
[[records]]
name = "User"
primary_key = ["id"]

[[records.fields]]
name = "ID"
type = "i32"
"#;

    const INVALID: &str = r#"
[[records]]
name = "User"
primary_key = ["uid"]

[[records.fields]]
name = "ID"
type = "i32"

[[records.indexes]]
name = "idx"
columns = ["missing"]
"#;

    #[test]
    fn test_check_valid_schema() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("schema.toml");
        std::fs::write(&path, VALID).unwrap();

        let app = CliApp::with_config(MakerConfig::default());
        run_check(&app, &path).unwrap();
    }

    #[test]
    fn test_check_reports_all_problems() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("schema.toml");
        std::fs::write(&path, INVALID).unwrap();

        let app = CliApp::with_config(MakerConfig::default());
        let err = run_check(&app, &path).unwrap_err();
        let errs = err.downcast_ref::<ValidationError>().unwrap();
        assert_eq!(errs.len(), 2);
        assert_eq!(
            errs.diagnostics()[1],
            r#"table "user", index "idx": column "missing" not found"#
        );
    }

    #[test]
    fn test_check_missing_file() {
        let temp_dir = tempdir().unwrap();
        let app = CliApp::with_config(MakerConfig::default());
        assert!(run_check(&app, &temp_dir.path().join("nope.toml")).is_err());
    }
}
