use crate::constants;
use crate::ddl::{ColumnSpec, SemanticType, TableSchema};
use crate::error::{PrepError, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// CSV 读取选项
#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub separator: char,
    /// 需要排除的列，不存在的列名会被忽略
    pub exclude_columns: Vec<String>,
    /// 列类型覆盖，优先于推断结果
    pub type_overrides: HashMap<String, SemanticType>,
    /// 最多读取的行数，None 表示全部
    pub max_rows: Option<usize>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            separator: constants::csv::DEFAULT_SEPARATOR,
            exclude_columns: Vec::new(),
            type_overrides: HashMap::new(),
            max_rows: None,
        }
    }
}

/// 已加载的表格数据
#[derive(Debug, Clone)]
pub struct Dataset {
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    /// (行数, 列数)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// 转换为表定义，列名原样保留，规范化在生成SQL时进行
    pub fn to_table_schema(&self, table_name: &str, primary_keys: &[String]) -> TableSchema {
        TableSchema {
            name: table_name.to_string(),
            columns: self.columns.clone(),
            primary_keys: primary_keys.to_vec(),
        }
    }

    /// 输出数据集概要：规模、列名以及前几行
    pub fn summary(&self, title: &str) {
        let (rows, cols) = self.shape();
        info!("数据集规模: ({}, {})", rows, cols);
        info!("{} 数据预览:", title);
        info!("  {}", self.column_names().join(" | "));
        for row in self.rows.iter().take(constants::csv::PREVIEW_ROWS) {
            info!("  {}", row.join(" | "));
        }
        for column in &self.columns {
            debug!("  列 {}: {}", column.name, column.semantic_type);
        }
    }
}

/// 读取 CSV 文件并推断每列的语义类型
pub fn read_csv<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Dataset> {
    let path = path.as_ref();
    if !options.separator.is_ascii() {
        return Err(PrepError::invalid_input(format!(
            "CSV 分隔符必须是 ASCII 字符: {:?}",
            options.separator
        )));
    }
    let delimiter = options.separator as u8;

    info!("读取CSV文件: {}", path.display());
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    // 计算保留的列下标
    let kept: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| !options.exclude_columns.iter().any(|e| e == *name))
        .map(|(i, _)| i)
        .collect();

    if kept.len() < headers.len() {
        debug!("排除 {} 列", headers.len() - kept.len());
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        if options.max_rows.is_some_and(|max| rows.len() >= max) {
            break;
        }
        let record = record?;
        let row: Vec<String> = kept
            .iter()
            .map(|&i| record.get(i).unwrap_or_default().to_string())
            .collect();
        rows.push(row);
    }

    let columns = kept
        .iter()
        .enumerate()
        .map(|(position, &i)| {
            let name = &headers[i];
            let semantic_type = match options.type_overrides.get(name) {
                Some(overridden) => overridden.clone(),
                None => infer_type(rows.iter().map(|row| row[position].as_str())),
            };
            ColumnSpec::new(name.clone(), semantic_type)
        })
        .collect();

    let dataset = Dataset { columns, rows };
    info!(
        "读取完成: {} 行, {} 列",
        dataset.rows.len(),
        dataset.columns.len()
    );
    Ok(dataset)
}

/// 根据列值推断语义类型
///
/// 全部非空且均为整数时为 Integer；非空值均为数字时为 Float；
/// 有行但全部为空的列视为 Float（缺失值列），没有任何行的列为 Text；其余为 Text。
pub fn infer_type<'a, I>(values: I) -> SemanticType
where
    I: IntoIterator<Item = &'a str>,
{
    let mut has_missing = false;
    let mut has_value = false;
    let mut all_integer = true;
    let mut all_numeric = true;

    for value in values {
        let value = value.trim();
        if value.is_empty() {
            has_missing = true;
            continue;
        }
        has_value = true;
        if value.parse::<i64>().is_err() {
            all_integer = false;
            if value.parse::<f64>().is_err() {
                all_numeric = false;
                break;
            }
        }
    }

    if !has_value {
        return if has_missing {
            SemanticType::Float
        } else {
            SemanticType::Text
        };
    }
    if all_integer && !has_missing {
        SemanticType::Integer
    } else if all_numeric {
        SemanticType::Float
    } else {
        SemanticType::Text
    }
}
