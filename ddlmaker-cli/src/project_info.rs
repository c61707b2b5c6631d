/// DDL Maker CLI 项目信息模块
///
/// 项目元数据统一在这里定义，ddlmaker-core 只提供技术性常量
pub mod metadata {
    /// 项目名称（自动从 Cargo.toml 同步）
    pub const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");

    /// 项目描述（自动从 Cargo.toml 同步）
    pub const PROJECT_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

    /// 项目作者（自动从 Cargo.toml 同步）
    pub const PROJECT_AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

    pub mod display {
        /// 命令行中使用的程序名
        pub const BIN_NAME: &str = "ddlmaker";

        /// 项目详细描述
        pub const DESCRIPTION_LONG: &str = "把带注解的记录定义编译为经过校验的 schema，并输出确定性的 MySQL DDL。\
            校验会一次性报告所有表名、列名、索引和外键问题。";
    }
}

/// 版本信息
pub mod version_info {
    /// CLI 版本（自动从 Cargo.toml 同步）
    pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");
}
