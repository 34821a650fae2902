use prep_core::config::AppConfig;
use prep_core::error::Result;
use prep_core::scripts;
use tracing::info;

/// 按配置生成全部脚本
pub fn run_generate(config: &AppConfig) -> Result<()> {
    info!("🚀 开始生成SQL脚本");
    info!("   数据库: {}", config.database.name);
    info!("   表数量: {}", config.tables.len());

    let generated = scripts::generate_scripts(config)?;
    for path in generated.all() {
        info!("   - {}", path.display());
    }
    Ok(())
}
