use crate::constants::{config, csv};
use crate::dataset::CsvOptions;
use crate::ddl::{ForeignKeyGroup, SemanticType};
use crate::error::{PrepError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// 应用配置结构
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub output: OutputConfig,
    pub input: InputConfig,
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

/// 数据库相关配置
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub name: String,
    #[serde(default)]
    pub drop_existing: bool,
}

/// 输出相关配置
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    pub dir: String,
    #[serde(default)]
    pub header: bool,
}

/// 输入数据相关配置
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InputConfig {
    pub data_dir: String,
    #[serde(default = "default_separator")]
    pub csv_separator: char,
    #[serde(default)]
    pub strict_primary_keys: bool,
}

/// 单个表的配置
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TableConfig {
    pub name: String,
    pub file: String,
    #[serde(default)]
    pub primary_keys: Vec<String>,
    #[serde(default)]
    pub exclude_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<usize>,
    #[serde(default = "default_true")]
    pub drop_existing: bool,
    /// 外键分组：列名 -> "表名.列名"
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyGroup>,
    #[serde(default)]
    pub column_types: BTreeMap<String, SemanticType>,
}

fn default_separator() -> char {
    csv::DEFAULT_SEPARATOR
}

fn default_true() -> bool {
    true
}

/// 将字符串渲染为带引号和转义的 TOML 字面量
fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

/// 仅用于序列化表定义部分
#[derive(Serialize)]
struct TablesSection<'a> {
    tables: &'a [TableConfig],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                name: config::DEFAULT_DATABASE_NAME.to_string(),
                drop_existing: true,
            },
            output: OutputConfig {
                dir: config::OUTPUT_DIR_NAME.to_string(),
                header: true,
            },
            input: InputConfig {
                data_dir: config::DATA_DIR_NAME.to_string(),
                csv_separator: csv::DEFAULT_SEPARATOR,
                strict_primary_keys: false,
            },
            tables: Vec::new(),
        }
    }
}

impl AppConfig {
    /// 在指定目录中按优先级查找配置文件：prep.toml -> .prep.toml
    pub fn find_config<P: AsRef<Path>>(base_dir: P) -> Option<PathBuf> {
        let base_dir = base_dir.as_ref();
        config::CONFIG_FILE_CANDIDATES
            .iter()
            .map(|name| base_dir.join(name))
            .find(|p| p.exists())
    }

    /// 加载指定路径的配置；路径不存在时在其所在目录按默认候选查找
    pub fn find_and_load_config<P: AsRef<Path>>(preferred: P) -> Result<Self> {
        let preferred = preferred.as_ref();
        if preferred.exists() {
            tracing::info!("找到配置文件: {}", preferred.display());
            return Self::load_from_file(preferred);
        }

        let base_dir = preferred.parent().unwrap_or(Path::new(""));
        match Self::find_config(base_dir) {
            Some(path) => {
                tracing::info!("找到配置文件: {}", path.display());
                Self::load_from_file(path)
            }
            None => Err(PrepError::ConfigNotFound),
        }
    }

    /// 从指定文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let config: AppConfig = toml::from_str(&content)?;

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_with_comments()?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// 生成带注释的TOML配置
    fn to_toml_with_comments(&self) -> Result<String> {
        const TEMPLATE: &str = include_str!("../templates/prep.toml.template");

        let mut content = TEMPLATE
            .replace("{database_name}", &toml_string(&self.database.name))
            .replace("{drop_database}", &self.database.drop_existing.to_string())
            .replace("{output_dir}", &toml_string(&self.output.dir))
            .replace("{header}", &self.output.header.to_string())
            .replace("{data_dir}", &toml_string(&self.input.data_dir))
            .replace(
                "{csv_separator}",
                &toml_string(&self.input.csv_separator.to_string()),
            )
            .replace(
                "{strict_primary_keys}",
                &self.input.strict_primary_keys.to_string(),
            );

        if !self.tables.is_empty() {
            content.push('\n');
            content.push_str(&toml::to_string(&TablesSection {
                tables: &self.tables,
            })?);
        }

        Ok(content)
    }

    /// 确保输出目录存在
    pub fn ensure_output_dir(&self) -> Result<PathBuf> {
        let dir = self.get_output_dir();
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// 获取输出目录路径
    pub fn get_output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output.dir)
    }

    /// 获取表数据文件路径
    pub fn get_table_file_path(&self, table: &TableConfig) -> PathBuf {
        PathBuf::from(&self.input.data_dir).join(&table.file)
    }

    /// 构建指定表的 CSV 读取选项
    pub fn csv_options_for(&self, table: &TableConfig) -> CsvOptions {
        CsvOptions {
            separator: self.input.csv_separator,
            exclude_columns: table.exclude_columns.clone(),
            type_overrides: table
                .column_types
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            max_rows: table.max_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[database]
name = "shop"
drop_existing = true

[output]
dir = "out"

[input]
data_dir = "data"
csv_separator = ","

[[tables]]
name = "orders"
file = "orders.csv"
primary_keys = ["order-id"]
max_rows = 10
foreign_keys = [{ user_id = "users.id" }, { shop_id = "shops.id" }]

[tables.column_types]
created_at = "datetime"
weird = "decimal(10,2)"
"#;

    #[test]
    fn test_parse_config() {
        let config: AppConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.database.name, "shop");
        assert!(!config.output.header);
        assert_eq!(config.input.csv_separator, ',');
        assert!(!config.input.strict_primary_keys);

        let table = &config.tables[0];
        assert!(table.drop_existing);
        assert_eq!(table.max_rows, Some(10));
        assert_eq!(table.foreign_keys.len(), 2);
        assert_eq!(table.column_types["created_at"], SemanticType::DateTime);
        assert_eq!(
            table.column_types["weird"],
            SemanticType::Other("decimal(10,2)".to_string())
        );

        let options = config.csv_options_for(table);
        assert_eq!(options.separator, ',');
        assert_eq!(options.max_rows, Some(10));
        assert_eq!(
            config.get_table_file_path(table),
            PathBuf::from("data").join("orders.csv")
        );
    }

    #[test]
    fn test_save_and_reload_default_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prep.toml");

        let mut app_config = AppConfig::default();
        app_config.tables.push(TableConfig {
            name: "users".to_string(),
            file: "users.csv".to_string(),
            primary_keys: vec!["id".to_string()],
            exclude_columns: Vec::new(),
            max_rows: None,
            drop_existing: false,
            foreign_keys: Vec::new(),
            column_types: BTreeMap::from([("born".to_string(), SemanticType::DateTime)]),
        });
        app_config.save_to_file(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# 数据准备工具配置文件"));

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.database.name, config::DEFAULT_DATABASE_NAME);
        assert_eq!(loaded.input.csv_separator, ';');
        assert_eq!(loaded.tables.len(), 1);
        assert!(!loaded.tables[0].drop_existing);
        assert_eq!(loaded.tables[0].column_types["born"], SemanticType::DateTime);
    }

    #[test]
    fn test_missing_explicit_path_falls_back_to_candidate() {
        let dir = TempDir::new().unwrap();
        let mut app_config = AppConfig::default();
        app_config.database.name = "hidden".to_string();
        app_config
            .save_to_file(dir.path().join(".prep.toml"))
            .unwrap();

        assert_eq!(
            AppConfig::find_config(dir.path()),
            Some(dir.path().join(".prep.toml"))
        );
        let loaded = AppConfig::find_and_load_config(dir.path().join("nope.toml")).unwrap();
        assert_eq!(loaded.database.name, "hidden");
    }

    #[test]
    fn test_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(AppConfig::find_config(dir.path()).is_none());
        assert!(matches!(
            AppConfig::find_and_load_config(dir.path().join("nope.toml")),
            Err(PrepError::ConfigNotFound)
        ));
    }

    #[test]
    fn test_save_escapes_special_characters() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prep.toml");

        let mut app_config = AppConfig::default();
        app_config.database.name = r#"shop"db\x"#.to_string();
        app_config.output.dir = r"C:\sql\out".to_string();
        app_config.input.csv_separator = '"';
        app_config.save_to_file(&path).unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.database.name, r#"shop"db\x"#);
        assert_eq!(loaded.output.dir, r"C:\sql\out");
        assert_eq!(loaded.input.csv_separator, '"');
    }

    #[test]
    fn test_foreign_key_groups_keep_file_order() {
        let content = r#"
[database]
name = "shop"

[output]
dir = "out"

[input]
data_dir = "data"

[[tables]]
name = "sales"
file = "sales.csv"
foreign_keys = [{ seller_id = "users.id", buyer_id = "users.id" }]
"#;
        let config: AppConfig = toml::from_str(content).unwrap();
        let group = &config.tables[0].foreign_keys[0];
        let columns: Vec<&str> = group.keys().map(String::as_str).collect();
        assert_eq!(columns, vec!["seller_id", "buyer_id"]);

        let sql =
            crate::ddl::sql_generate_foreign_keys("sales", &config.tables[0].foreign_keys).unwrap();
        assert!(sql.starts_with("ALTER TABLE sales ADD CONSTRAINT fk_sales_seller_id "));
    }
}
