/// SQL 方言相关常量（MySQL）
pub mod sql {
    /// 文本列类型，同时也是未知语义类型的默认映射
    pub const VARCHAR_TYPE: &str = "VARCHAR(255)";

    /// 64位整数列类型
    pub const BIGINT_TYPE: &str = "BIGINT";

    /// 双精度浮点列类型
    pub const DOUBLE_TYPE: &str = "DOUBLE";

    /// 日期时间列类型
    pub const DATETIME_TYPE: &str = "DATETIME";

    /// 列定义缩进
    pub const COLUMN_INDENT: &str = "  ";

    /// 索引名后缀
    pub const INDEX_SUFFIX: &str = "_idx";

    /// 外键约束名前缀
    pub const FOREIGN_KEY_PREFIX: &str = "fk";

    /// 外键引用中表名与列名的分隔符
    pub const REFERENCE_SEPARATOR: char = '.';
}

/// 标识符规范化相关常量
pub mod identifier {
    /// 目标方言中非法的字符
    pub const ILLEGAL_CHAR: char = '-';

    /// 替换字符
    pub const REPLACEMENT_CHAR: char = '_';
}

/// CSV 读取相关常量
pub mod csv {
    /// 默认字段分隔符
    pub const DEFAULT_SEPARATOR: char = ';';

    /// 数据集预览行数
    pub const PREVIEW_ROWS: usize = 5;
}

/// 配置文件相关常量
pub mod config {
    /// 默认配置文件名
    pub const CONFIG_FILE_NAME: &str = "prep.toml";

    /// 按优先级查找的配置文件列表
    pub const CONFIG_FILE_CANDIDATES: &[&str] = &["prep.toml", ".prep.toml"];

    /// 默认数据目录名
    pub const DATA_DIR_NAME: &str = "data";

    /// 默认SQL输出目录名
    pub const OUTPUT_DIR_NAME: &str = "sql";

    /// 默认数据库名
    pub const DEFAULT_DATABASE_NAME: &str = "prep_db";
}

/// 输出文件相关常量
pub mod output {
    /// SQL 文件扩展名
    pub const SQL_EXTENSION: &str = ".sql";

    /// 数据库脚本文件名
    pub const DATABASE_SCRIPT: &str = "00_database.sql";

    /// 外键脚本文件名
    pub const FOREIGN_KEYS_SCRIPT: &str = "99_foreign_keys.sql";

    /// 生成表脚本文件名，按配置顺序编号
    pub fn table_script_name(position: usize, table: &str) -> String {
        format!("{:02}_{table}{SQL_EXTENSION}", position + 1)
    }
}

/// 文件系统相关常量
pub mod file_system {
    /// macOS 临时文件前缀
    pub const MACOS_TEMP_PREFIX: &str = "._";
}
