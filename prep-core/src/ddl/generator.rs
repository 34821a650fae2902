use super::types::{
    ColumnSpec, ForeignKeyGroup, ForeignKeyRef, TableSchema, foreign_keys_from_groups,
};
use crate::constants::sql;
use crate::error::Result;
use tracing::debug;

/// 生成建库SQL
/// 名称按原样拼接，不做转义，调用方需保证名称合法
pub fn sql_create_database(db_name: &str, drop_db: bool) -> String {
    let mut sql_commands = Vec::new();

    if drop_db {
        sql_commands.push(format!("DROP DATABASE IF EXISTS {db_name};"));
    }

    sql_commands.push(format!("CREATE DATABASE {db_name};"));
    sql_commands.push(format!("USE {db_name};\n"));

    sql_commands.join("\n") + "\n"
}

/// 生成CREATE TABLE SQL
///
/// 列名与主键名先规范化（连字符替换为下划线），再按列的声明顺序输出。
/// 主键列输出 `NOT NULL`，其余列输出 `NULL`；每个主键列额外生成一个
/// `INDEX`。不在列定义中的主键被忽略，需要校验时使用 [`try_sql_create_table`]。
pub fn sql_create_table(schema: &TableSchema, drop_table: bool) -> String {
    let table = schema.normalized();
    render_create_table(&table, drop_table)
}

/// 严格模式的CREATE TABLE SQL
/// 主键不在列定义中或规范化后列名重复时返回错误
pub fn try_sql_create_table(schema: &TableSchema, drop_table: bool) -> Result<String> {
    let table = schema.normalized();
    table.validate()?;
    Ok(render_create_table(&table, drop_table))
}

fn render_create_table(table: &TableSchema, drop_table: bool) -> String {
    debug!(
        "生成表 {} 的建表语句: {} 列, {} 个主键",
        table.name,
        table.columns.len(),
        table.primary_keys.len()
    );

    let mut sql = String::new();
    if drop_table {
        sql.push_str(&format!("DROP TABLE IF EXISTS {};\n", table.name));
    }
    sql.push_str(&format!("CREATE TABLE {} (\n", table.name));

    // 添加列定义
    let column_definitions: Vec<String> = table
        .columns
        .iter()
        .map(|column| generate_column_sql(column, table.is_primary_key(&column.name)))
        .collect();
    sql.push_str(&column_definitions.join(",\n"));

    let primary_columns: Vec<&ColumnSpec> = table.primary_key_columns().collect();

    // 添加主键
    if !primary_columns.is_empty() {
        let keys = primary_columns
            .iter()
            .map(|c| format!("`{}`", c.name))
            .collect::<Vec<_>>()
            .join(", ");
        sql.push_str(&format!(",\n{}PRIMARY KEY ({keys})", sql::COLUMN_INDENT));
    }

    // 添加索引，每个主键列一个
    for column in &primary_columns {
        sql.push_str(&format!(",\n{}{}", sql::COLUMN_INDENT, generate_index_sql(&column.name)));
    }

    sql.push_str("\n);\n");
    sql
}

/// 生成列定义SQL
pub fn generate_column_sql(column: &ColumnSpec, primary: bool) -> String {
    let nullability = if primary { "NOT NULL" } else { "NULL" };
    format!(
        "{}`{}` {} {nullability}",
        sql::COLUMN_INDENT,
        column.name,
        column.semantic_type.sql_type()
    )
}

/// 生成索引定义SQL
pub fn generate_index_sql(column: &str) -> String {
    format!("INDEX `{column}{}` (`{column}`)", sql::INDEX_SUFFIX)
}

/// 生成外键约束SQL
pub fn sql_foreign_keys(table_name: &str, foreign_keys: &[ForeignKeyRef]) -> String {
    let statements: Vec<String> = foreign_keys
        .iter()
        .map(|fk| {
            format!(
                "ALTER TABLE {table_name} ADD CONSTRAINT {}_{table_name}_{} FOREIGN KEY ({}) REFERENCES {}({});",
                sql::FOREIGN_KEY_PREFIX,
                fk.column,
                fk.column,
                fk.target_table,
                fk.target_column
            )
        })
        .collect();

    statements.join("\n") + "\n"
}

/// 从分组形式的外键映射生成外键约束SQL
/// 任何一个引用格式错误都会使整个调用失败，不返回部分SQL
pub fn sql_generate_foreign_keys(
    table_name: &str,
    groups: &[ForeignKeyGroup],
) -> Result<String> {
    let foreign_keys = foreign_keys_from_groups(groups)?;
    Ok(sql_foreign_keys(table_name, &foreign_keys))
}
