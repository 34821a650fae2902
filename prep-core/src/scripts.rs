use crate::config::{AppConfig, TableConfig};
use crate::constants::output;
use crate::dataset;
use crate::ddl::{self, TableSchema};
use crate::error::Result;
use crate::files;
use std::path::PathBuf;
use tracing::{debug, info};

/// 按配置生成的全部脚本
#[derive(Debug, Default)]
pub struct GeneratedScripts {
    pub database: PathBuf,
    pub tables: Vec<PathBuf>,
    pub foreign_keys: Option<PathBuf>,
}

impl GeneratedScripts {
    pub fn all(&self) -> impl Iterator<Item = &PathBuf> {
        std::iter::once(&self.database)
            .chain(self.tables.iter())
            .chain(self.foreign_keys.iter())
    }
}

/// 根据配置读取数据文件并生成建库、建表和外键脚本
///
/// 外键脚本在所有表脚本之后生成，任何一个外键引用格式错误都会中止生成。
pub fn generate_scripts(config: &AppConfig) -> Result<GeneratedScripts> {
    let output_dir = config.ensure_output_dir()?;
    info!("📋 生成SQL脚本到目录: {}", output_dir.display());

    let database_sql = ddl::sql_create_database(&config.database.name, config.database.drop_existing);
    let database = files::write_sql_file(
        &output_dir,
        output::DATABASE_SCRIPT,
        &with_header(config, &format!("数据库 {}", config.database.name), &database_sql),
    )?;

    let mut tables = Vec::new();
    for (position, table) in config.tables.iter().enumerate() {
        let schema = load_table_schema(config, table)?;
        let table_sql = if config.input.strict_primary_keys {
            ddl::try_sql_create_table(&schema, table.drop_existing)?
        } else {
            ddl::sql_create_table(&schema, table.drop_existing)
        };

        let file_name = output::table_script_name(position, &table.name);
        tables.push(files::write_sql_file(
            &output_dir,
            &file_name,
            &with_header(config, &format!("表 {}", table.name), &table_sql),
        )?);
    }

    // 先解析全部外键，避免写出不完整的脚本
    let mut foreign_key_sql = String::new();
    for table in config.tables.iter().filter(|t| !t.foreign_keys.is_empty()) {
        foreign_key_sql.push_str(&ddl::sql_generate_foreign_keys(&table.name, &table.foreign_keys)?);
    }

    let foreign_keys = if foreign_key_sql.is_empty() {
        debug!("没有配置外键，跳过外键脚本");
        None
    } else {
        Some(files::write_sql_file(
            &output_dir,
            output::FOREIGN_KEYS_SCRIPT,
            &with_header(config, "外键约束", &foreign_key_sql),
        )?)
    };

    let scripts = GeneratedScripts {
        database,
        tables,
        foreign_keys,
    };
    info!("🎉 共生成 {} 个SQL脚本", scripts.all().count());
    Ok(scripts)
}

/// 读取表的数据文件并构建表定义
pub fn load_table_schema(config: &AppConfig, table: &TableConfig) -> Result<TableSchema> {
    let path = config.get_table_file_path(table);
    let data = dataset::read_csv(&path, &config.csv_options_for(table))?;
    data.summary(&table.name);
    Ok(data.to_table_schema(&table.name, &table.primary_keys))
}

fn with_header(config: &AppConfig, title: &str, sql: &str) -> String {
    if config.output.header {
        files::sql_header(title) + sql
    } else {
        sql.to_string()
    }
}
