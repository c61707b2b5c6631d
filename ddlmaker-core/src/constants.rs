/// 列类型映射相关常量
pub mod column {
    /// 字符串默认长度（utf8mb4 下单列索引上限 767 字节 / 4）
    pub const DEFAULT_VARCHAR_SIZE: u32 = 191;

    /// 变长字节序列默认长度
    pub const DEFAULT_VARBINARY_SIZE: u32 = 767;

    /// 注解中表示“忽略该字段”的名称
    pub const SKIP_SENTINEL: &str = "-";

    /// 类型指针/包装的最大解析深度，超出后视为未知类型
    pub const MAX_INDIRECTION_DEPTH: usize = 16;
}

/// 建表尾部默认值
pub mod table {
    /// 默认存储引擎
    pub const DEFAULT_ENGINE: &str = "InnoDB";

    /// 默认字符集
    pub const DEFAULT_CHARSET: &str = "utf8mb4";

    /// 默认排序规则
    pub const DEFAULT_COLLATE: &str = "utf8mb4_bin";
}

/// 配置文件相关常量
pub mod config {
    use std::path::{Path, PathBuf};

    /// 默认配置文件名
    pub const CONFIG_FILE_NAME: &str = "ddlmaker.toml";

    /// 按优先级查找的配置文件名
    pub const CONFIG_FILE_CANDIDATES: &[&str] = &["ddlmaker.toml", ".ddlmaker.toml"];

    /// 默认 DDL 输出文件名
    pub const DEFAULT_OUT_FILE: &str = "schema.sql";

    /// 获取默认配置文件路径
    pub fn get_config_file_path() -> PathBuf {
        Path::new(".").join(CONFIG_FILE_NAME)
    }
}

/// 日志相关常量
pub mod logging {
    /// 设置后日志写入该文件而不是终端
    pub const LOG_FILE_ENV: &str = "DDLMAKER_LOG_FILE";
}
