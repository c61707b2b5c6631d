use thiserror::Error;

pub type Result<T> = std::result::Result<T, DdlError>;

#[derive(Error, Debug)]
pub enum DdlError {
    #[error("类型 {type_name} 不是结构体记录: {kind}")]
    NotRecord { type_name: String, kind: String },

    #[error("记录 {type_name} 的字段 {field} 无法映射为列: {source}")]
    Mapping {
        type_name: String,
        field: String,
        #[source]
        source: MappingError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置错误: {0}")]
    Config(#[from] toml::de::Error),

    #[error("配置序列化错误: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("记录定义无效: {0}")]
    InvalidDefinition(String),

    #[error("自定义错误: {0}")]
    Custom(String),
}

impl DdlError {
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    pub fn invalid_definition(msg: impl Into<String>) -> Self {
        Self::InvalidDefinition(msg.into())
    }

    /// 校验失败时返回诊断数量，其余错误返回 None
    pub fn problem_count(&self) -> Option<usize> {
        match self {
            Self::Validation(errs) => Some(errs.len()),
            _ => None,
        }
    }
}

/// 单个字段映射为列时的结构性错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("不支持的类型 {0}，请使用 type= 指定列类型")]
    UnsupportedKind(String),

    #[error("选项 {key} 的值 {value:?} 不是有效的整数")]
    InvalidNumber { key: String, value: String },

    #[error("未知的注解选项: {0}")]
    UnknownOption(String),

    #[error("注解中存在空的选项名")]
    EmptyOption,
}

/// schema 校验失败，按发现顺序保存全部诊断
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("schema 校验失败: 发现 {} 个问题", .errors.len())]
pub struct ValidationError {
    errors: Vec<String>,
}

impl ValidationError {
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.errors
    }
}
