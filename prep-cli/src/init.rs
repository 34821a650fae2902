use prep_core::{config::AppConfig, error::Result, files};
use std::path::Path;
use tracing::{info, warn};

/// 运行独立的初始化流程
pub fn run_init(config_path: &Path, force: bool) -> Result<()> {
    info!("🧰 Prep CLI 初始化");
    info!("======================");

    // 检查是否已经初始化过
    if !force && config_path.exists() {
        warn!("⚠️  检测到已存在的配置文件: {}", config_path.display());
        info!("如果您要重新初始化，请使用 --force 参数");
        info!("示例: prep-cli init --force");
        return Ok(());
    }

    info!("📋 步骤 1: 创建配置文件");

    let config = AppConfig::default();
    config.save_to_file(config_path)?;
    info!("   ✅ 创建配置文件: {}", config_path.display());

    info!("📋 步骤 2: 创建目录结构");

    files::check_and_create_directory(&config.input.data_dir, None)?;
    config.ensure_output_dir()?;
    info!("   ✅ 创建目录结构:");
    info!("      - {}  (CSV 数据目录)", config.input.data_dir);
    info!("      - {}   (SQL 输出目录)", config.output.dir);

    info!("🎉 初始化完成！");
    info!("👉 在 {} 中添加 [[tables]] 后运行 'prep-cli generate'", config_path.display());
    Ok(())
}
