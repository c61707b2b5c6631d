mod check;
mod generate;

use anyhow::{Context, Result};
use ddlmaker_core::{Maker, MakerConfig, SchemaDefinition};
use std::path::Path;

// Check commands
pub use check::run_check;

// Generate commands
pub use generate::run_generate;

/// 加载记录定义并创建 Maker
fn load_maker(config: MakerConfig, schema: &Path) -> Result<Maker> {
    let definition = SchemaDefinition::load_from_file(schema)
        .with_context(|| format!("加载记录定义 {} 失败", schema.display()))?;

    let mut maker = Maker::new(config);
    maker.add_records(definition.into_records());
    Ok(maker)
}
