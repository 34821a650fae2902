use thiserror::Error;

pub type Result<T> = std::result::Result<T, PrepError>;

#[derive(Error, Debug)]
pub enum PrepError {
    #[error("配置错误: {0}")]
    Config(#[from] toml::de::Error),

    #[error("配置序列化错误: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV 读取错误: {0}")]
    Csv(#[from] csv::Error),

    #[error("外键引用格式错误: 列 '{column}' 的引用 '{reference}' 必须是 '表名.列名'")]
    InvalidForeignKey { column: String, reference: String },

    #[error("主键 '{key}' 不在表 '{table}' 的列定义中")]
    UnknownPrimaryKey { table: String, key: String },

    #[error("表 '{table}' 中的列名 '{column}' 重复（规范化后）")]
    DuplicateColumn { table: String, column: String },

    #[error("输入无效: {0}")]
    InvalidInput(String),

    #[error("配置文件未找到")]
    ConfigNotFound,
}

impl PrepError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_foreign_key(column: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::InvalidForeignKey {
            column: column.into(),
            reference: reference.into(),
        }
    }
}
