use anyhow::Context;
use clap::Parser;
use prep_cli::{Cli, CliApp, project_info, setup_logging};
use prep_core::PrepError;
use tracing::{debug, error};

fn main() {
    // 解析命令行参数
    let cli = Cli::parse();

    // 设置日志记录
    setup_logging(cli.verbose);
    debug!("{}", project_info::get_version_string());

    // 只有 generate 命令需要加载配置，其余命令直接执行
    let app = CliApp::new(cli.config.clone());
    let result = app
        .run_command(cli.command)
        .context("操作失败");

    if let Err(e) = result {
        if let Some(PrepError::ConfigNotFound) = e.downcast_ref::<PrepError>() {
            error!("❌ 配置文件 '{}' 未找到。", cli.config.display());
            error!("👉 请先运行 'prep-cli init' 命令来创建配置文件。");
        } else {
            error!("❌ {:#}", e);
        }
        std::process::exit(1);
    }
}
