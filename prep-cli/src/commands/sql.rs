use prep_core::dataset::{self, CsvOptions};
use prep_core::ddl::{self, ForeignKeyRef, SemanticType};
use prep_core::error::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::utils::emit_sql;

/// table 命令参数
#[derive(Debug, Clone)]
pub struct TableArgs {
    pub csv: PathBuf,
    pub name: String,
    pub primary_keys: Vec<String>,
    pub exclude_columns: Vec<String>,
    pub column_types: Vec<(String, String)>,
    pub separator: char,
    pub max_rows: Option<usize>,
    pub drop: bool,
    pub strict: bool,
    pub preview: bool,
}

impl TableArgs {
    fn csv_options(&self) -> CsvOptions {
        CsvOptions {
            separator: self.separator,
            exclude_columns: self.exclude_columns.clone(),
            type_overrides: self
                .column_types
                .iter()
                .map(|(column, type_name)| (column.clone(), SemanticType::from(type_name.clone())))
                .collect(),
            max_rows: self.max_rows,
        }
    }
}

/// 生成建库脚本
pub fn run_database(name: &str, drop: bool, out: Option<&Path>) -> Result<()> {
    info!("🗄️  生成建库脚本: {}", name);
    emit_sql(&ddl::sql_create_database(name, drop), out)
}

/// 读取 CSV 并生成建表脚本
pub fn run_table(args: &TableArgs, out: Option<&Path>) -> Result<()> {
    info!("📋 生成建表脚本: {} <- {}", args.name, args.csv.display());

    let data = dataset::read_csv(&args.csv, &args.csv_options())?;
    if args.preview {
        data.summary(&args.name);
    }

    let schema = data.to_table_schema(&args.name, &args.primary_keys);
    let sql = if args.strict {
        ddl::try_sql_create_table(&schema, args.drop)?
    } else {
        ddl::sql_create_table(&schema, args.drop)
    };
    emit_sql(&sql, out)
}

/// 生成外键约束脚本，引用按给出的顺序输出
pub fn run_foreign_keys(table: &str, references: &[(String, String)], out: Option<&Path>) -> Result<()> {
    info!("🔗 生成外键脚本: {} ({} 个外键)", table, references.len());

    let foreign_keys = references
        .iter()
        .map(|(column, reference)| ForeignKeyRef::parse(column, reference))
        .collect::<Result<Vec<_>>>()?;
    emit_sql(&ddl::sql_foreign_keys(table, &foreign_keys), out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::error::PrepError;
    use std::fs;
    use tempfile::TempDir;

    fn table_args(csv: PathBuf) -> TableArgs {
        TableArgs {
            csv,
            name: "users".to_string(),
            primary_keys: vec!["id".to_string()],
            exclude_columns: Vec::new(),
            column_types: vec![("email".to_string(), "object".to_string())],
            separator: ';',
            max_rows: None,
            drop: true,
            strict: false,
            preview: false,
        }
    }

    #[test]
    fn test_run_table_writes_users_example() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("users.csv");
        fs::write(&csv, "id;email\n1;a@example.com\n").unwrap();
        let out = dir.path().join("users.sql");

        run_table(&table_args(csv), Some(&out)).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "DROP TABLE IF EXISTS users;\nCREATE TABLE users (\n  `id` BIGINT NOT NULL,\n  `email` VARCHAR(255) NULL,\n  PRIMARY KEY (`id`),\n  INDEX `id_idx` (`id`)\n);\n"
        );
    }

    #[test]
    fn test_run_table_strict_unknown_key() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("users.csv");
        fs::write(&csv, "id;email\n1;a@example.com\n").unwrap();

        let mut args = table_args(csv);
        args.strict = true;
        args.primary_keys = vec!["uid".to_string()];
        let out = dir.path().join("users.sql");

        let err = run_table(&args, Some(&out)).unwrap_err();
        assert!(matches!(err, PrepError::UnknownPrimaryKey { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn test_run_foreign_keys_malformed_produces_no_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("fk.sql");
        let references = vec![
            ("user_id".to_string(), "users.id".to_string()),
            ("shop_id".to_string(), "shops".to_string()),
        ];

        let err = run_foreign_keys("orders", &references, Some(&out)).unwrap_err();
        assert!(matches!(err, PrepError::InvalidForeignKey { ref reference, .. } if reference == "shops"));
        assert!(!out.exists());
    }

    #[test]
    fn test_run_database_to_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("db.sql");
        run_database("shop", true, Some(&out)).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "DROP DATABASE IF EXISTS shop;\nCREATE DATABASE shop;\nUSE shop;\n\n"
        );
    }
}
