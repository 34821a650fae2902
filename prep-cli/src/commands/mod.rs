mod files;
mod generate;
mod sql;

// SQL script commands
pub use sql::{TableArgs, run_database, run_foreign_keys, run_table};

// Config driven generation
pub use generate::run_generate;

// File helper commands
pub use files::{run_list_files, run_mkdir};
