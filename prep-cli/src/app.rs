use prep_core::{config::AppConfig, error::Result};
use std::path::PathBuf;

use crate::cli::Commands;
use crate::commands::{self, TableArgs};
use tracing::debug;

pub struct CliApp {
    pub config_path: PathBuf,
}

impl CliApp {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// 加载配置：优先使用指定路径，其次在同一目录按默认文件名查找
    pub fn load_config(&self) -> Result<AppConfig> {
        AppConfig::find_and_load_config(&self.config_path)
    }

    /// 运行应用命令
    pub fn run_command(&self, command: Commands) -> Result<()> {
        debug!("执行命令: {:?}", command);
        match command {
            Commands::Init { force } => crate::init::run_init(&self.config_path, force),
            Commands::Database { name, drop, out } => {
                commands::run_database(&name, drop, out.as_deref())
            }
            Commands::Table {
                csv,
                name,
                primary_keys,
                exclude_columns,
                column_types,
                separator,
                max_rows,
                drop,
                strict,
                preview,
                out,
            } => {
                let args = TableArgs {
                    csv,
                    name,
                    primary_keys,
                    exclude_columns,
                    column_types,
                    separator,
                    max_rows,
                    drop,
                    strict,
                    preview,
                };
                commands::run_table(&args, out.as_deref())
            }
            Commands::ForeignKeys {
                table,
                references,
                out,
            } => commands::run_foreign_keys(&table, &references, out.as_deref()),
            Commands::Generate => {
                let config = self.load_config()?;
                commands::run_generate(&config)
            }
            Commands::ListFiles { dir, extension } => commands::run_list_files(&dir, &extension),
            Commands::Mkdir { name, parent } => commands::run_mkdir(&name, parent.as_deref()),
        }
    }
}
