use crate::project_info::{metadata, version_info};
use crate::utils::parse_key_value;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Prep CLI - 数据准备与 SQL 建表脚本生成工具
#[derive(Parser, Debug)]
#[command(name = "prep-cli")]
#[command(about = metadata::PROJECT_DESCRIPTION)]
#[command(version = version_info::CLI_VERSION)]
#[command(long_about = metadata::display::DESCRIPTION_LONG)]
#[command(author = metadata::PROJECT_AUTHORS)]
pub struct Cli {
    /// 配置文件路径
    #[arg(short, long, default_value = prep_core::constants::config::CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// 详细输出
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 创建默认配置文件和目录结构
    Init {
        /// 如果配置文件已存在，强制覆盖
        #[arg(long)]
        force: bool,
    },
    /// 生成建库脚本
    Database {
        /// 数据库名称
        name: String,
        /// 先删除已存在的数据库
        #[arg(long)]
        drop: bool,
        /// 输出文件（默认输出到终端）
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// 读取 CSV 文件并生成建表脚本
    Table {
        /// CSV 文件路径
        csv: PathBuf,
        /// 表名
        #[arg(long)]
        name: String,
        /// 主键列，可重复指定
        #[arg(long = "primary-key", short = 'k')]
        primary_keys: Vec<String>,
        /// 排除的列，可重复指定
        #[arg(long = "exclude")]
        exclude_columns: Vec<String>,
        /// 列类型覆盖，格式 COL=TYPE，例如 created_at=datetime
        #[arg(long = "type", value_parser = parse_key_value)]
        column_types: Vec<(String, String)>,
        /// CSV 字段分隔符
        #[arg(long, default_value_t = prep_core::constants::csv::DEFAULT_SEPARATOR)]
        separator: char,
        /// 最多读取的行数
        #[arg(long)]
        max_rows: Option<usize>,
        /// 先删除已存在的表
        #[arg(long)]
        drop: bool,
        /// 主键必须在列定义中，否则报错
        #[arg(long)]
        strict: bool,
        /// 输出数据预览
        #[arg(long)]
        preview: bool,
        /// 输出文件（默认输出到终端）
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// 生成外键约束脚本
    ForeignKeys {
        /// 表名
        table: String,
        /// 外键定义，格式 COL=表名.列名，按给出的顺序生成
        #[arg(required = true, value_parser = parse_key_value)]
        references: Vec<(String, String)>,
        /// 输出文件（默认输出到终端）
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// 按配置文件生成全部脚本
    Generate,
    /// 列出目录中指定扩展名的文件
    ListFiles {
        /// 目录
        dir: PathBuf,
        /// 扩展名，包含前导点，例如 .csv
        extension: String,
    },
    /// 检查并创建目录
    Mkdir {
        /// 目录名
        name: String,
        /// 父目录
        #[arg(long)]
        parent: Option<PathBuf>,
    },
}
