use prep_core::error::Result;
use prep_core::files;
use std::path::Path;
use tracing::info;

/// 列出目录中指定扩展名的文件，文件名输出到终端
pub fn run_list_files(dir: &Path, extension: &str) -> Result<()> {
    let found = files::list_files_by_type(dir, extension)?;
    info!("📂 {} 中共有 {} 个 {} 文件", dir.display(), found.len(), extension);
    for name in found {
        println!("{name}");
    }
    Ok(())
}

/// 检查并创建目录
pub fn run_mkdir(name: &str, parent: Option<&Path>) -> Result<()> {
    files::check_and_create_directory(name, parent)?;
    Ok(())
}
