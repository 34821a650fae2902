mod generator;
mod types;


// 重新导出公共接口
pub use generator::{
    generate_column_sql, generate_index_sql, sql_create_database, sql_create_table,
    sql_foreign_keys, sql_generate_foreign_keys, try_sql_create_table,
};
pub use types::{
    ColumnSpec, ForeignKeyGroup, ForeignKeyRef, SemanticType, TableSchema,
    foreign_keys_from_groups,
    normalize_identifier,
};
