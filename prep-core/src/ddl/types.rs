use crate::constants::{identifier, sql};
use crate::error::{PrepError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// 列的语义类型，与具体 SQL 方言无关
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SemanticType {
    Text,
    Integer,
    Float,
    DateTime,
    /// 无法识别的类型名，映射为默认文本类型
    Other(String),
}

impl SemanticType {
    /// 映射为 MySQL 列类型
    pub fn sql_type(&self) -> &'static str {
        match self {
            SemanticType::Text => sql::VARCHAR_TYPE,
            SemanticType::Integer => sql::BIGINT_TYPE,
            SemanticType::Float => sql::DOUBLE_TYPE,
            SemanticType::DateTime => sql::DATETIME_TYPE,
            SemanticType::Other(_) => sql::VARCHAR_TYPE,
        }
    }
}

impl FromStr for SemanticType {
    type Err = std::convert::Infallible;

    // 同时接受 pandas 的 dtype 名称（object、int64、float64、datetime64[ns]）
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let parsed = match lowered.as_str() {
            "text" | "string" | "str" | "object" | "varchar" => SemanticType::Text,
            "integer" | "int" | "int64" | "bigint" => SemanticType::Integer,
            "float" | "float64" | "double" => SemanticType::Float,
            "datetime" | "datetime64[ns]" | "timestamp" | "date" => SemanticType::DateTime,
            _ => SemanticType::Other(s.trim().to_string()),
        };
        Ok(parsed)
    }
}

impl From<String> for SemanticType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(parsed) => parsed,
            Err(never) => match never {},
        }
    }
}

impl From<SemanticType> for String {
    fn from(value: SemanticType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::Text => write!(f, "text"),
            SemanticType::Integer => write!(f, "integer"),
            SemanticType::Float => write!(f, "float"),
            SemanticType::DateTime => write!(f, "datetime"),
            SemanticType::Other(name) => write!(f, "{name}"),
        }
    }
}

/// 列定义
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: String,
    pub semantic_type: SemanticType,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
        }
    }
}

/// 表定义
///
/// 列的顺序即生成的列顺序；主键按调用方给出的名称保存，
/// 生成时按列的声明顺序输出。
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
    pub primary_keys: Vec<String>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_keys: Vec::new(),
        }
    }

    pub fn with_column(mut self, name: impl Into<String>, semantic_type: SemanticType) -> Self {
        self.columns.push(ColumnSpec::new(name, semantic_type));
        self
    }

    pub fn with_primary_key(mut self, name: impl Into<String>) -> Self {
        self.primary_keys.push(name.into());
        self
    }

    /// 返回列名与主键名规范化后的副本，不修改调用方的数据
    pub fn normalized(&self) -> TableSchema {
        TableSchema {
            name: self.name.clone(),
            columns: self
                .columns
                .iter()
                .map(|c| ColumnSpec::new(normalize_identifier(&c.name), c.semantic_type.clone()))
                .collect(),
            primary_keys: self
                .primary_keys
                .iter()
                .map(|k| normalize_identifier(k))
                .collect(),
        }
    }

    /// 列是否为主键（按原样比较，调用前应先规范化）
    pub fn is_primary_key(&self, column: &str) -> bool {
        self.primary_keys.iter().any(|k| k == column)
    }

    /// 按列的声明顺序返回主键列
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| self.is_primary_key(&c.name))
    }

    /// 校验列名唯一以及主键均在列定义中
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(PrepError::DuplicateColumn {
                    table: self.name.clone(),
                    column: column.name.clone(),
                });
            }
        }

        if let Some(key) = self.primary_keys.iter().find(|k| !seen.contains(k.as_str())) {
            return Err(PrepError::UnknownPrimaryKey {
                table: self.name.clone(),
                key: key.clone(),
            });
        }

        Ok(())
    }
}

/// 外键定义
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRef {
    pub column: String,
    pub target_table: String,
    pub target_column: String,
}

impl ForeignKeyRef {
    pub fn new(
        column: impl Into<String>,
        target_table: impl Into<String>,
        target_column: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            target_table: target_table.into(),
            target_column: target_column.into(),
        }
    }

    /// 解析 "表名.列名" 形式的外键引用
    ///
    /// 分隔符必须恰好出现一次，且两侧都不能为空。
    pub fn parse(column: &str, reference: &str) -> Result<Self> {
        let mut parts = reference.split(sql::REFERENCE_SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(table), Some(target), None) if !table.is_empty() && !target.is_empty() => {
                Ok(Self::new(column, table, target))
            }
            _ => Err(PrepError::invalid_foreign_key(column, reference)),
        }
    }
}

/// 外键分组：列名 -> "表名.列名"，按书写顺序保存
pub type ForeignKeyGroup = IndexMap<String, String>;

/// 将旧的分组形式（每组若干 列 -> "表名.列名"）展开为外键列表
///
/// 保持外层分组顺序以及组内的书写顺序；遇到第一个格式错误的引用即失败。
pub fn foreign_keys_from_groups(groups: &[ForeignKeyGroup]) -> Result<Vec<ForeignKeyRef>> {
    let mut refs = Vec::new();
    for group in groups {
        for (column, reference) in group {
            refs.push(ForeignKeyRef::parse(column, reference)?);
        }
    }
    Ok(refs)
}

/// 标识符规范化：将连字符替换为下划线
pub fn normalize_identifier(name: &str) -> String {
    name.replace(identifier::ILLEGAL_CHAR, &identifier::REPLACEMENT_CHAR.to_string())
}
