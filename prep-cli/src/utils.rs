use prep_core::error::Result;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// 设置日志记录系统
///
/// - 库代码只使用 tracing 宏记录日志
/// - 支持 RUST_LOG 环境变量控制日志级别
/// - 默认输出到stderr，生成的SQL输出到stdout，两者互不混淆
/// - 设置 PREP_LOG_FILE 时日志写入文件，使用详细格式
pub fn setup_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // 根据verbose参数和环境变量确定日志级别
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 检查环境变量，决定是否输出到文件
    let log_file = std::env::var("PREP_LOG_FILE").ok().and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| eprintln!("无法打开日志文件 {path}: {e}，改为输出到终端"))
            .ok()
    });

    match log_file {
        Some(file) => {
            // 输出到文件 - 使用详细格式便于调试
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .init();
        }
        None => {
            // 输出到终端 - 使用简洁格式
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_line_number(false)
                .without_time()
                .compact()
                .init();
        }
    }
}

/// 输出生成的SQL：指定文件时写入文件，否则打印到终端
pub fn emit_sql(sql: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, sql)?;
            info!("✅ 已写入: {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(sql.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// 解析 KEY=VALUE 形式的命令行参数
pub fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("格式错误 '{s}'，应为 KEY=VALUE"))?;
    if key.is_empty() {
        return Err(format!("格式错误 '{s}'，KEY 不能为空"));
    }
    Ok((key.to_string(), value.to_string()))
}
