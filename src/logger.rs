use chrono::Local;
use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use std::io::Write;

/// 图形界面相关依赖只保留警告以上的日志
const QUIET_MODULES: [&str; 4] = ["eframe", "egui_glow", "winit", "arboard"];

fn level_color(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[31m\x1b[1m", // 红色
        Level::Warn => "\x1b[33m\x1b[1m",  // 黄色
        Level::Info => "\x1b[32m\x1b[1m",  // 绿色
        Level::Debug => "\x1b[36m\x1b[1m", // 青色
        Level::Trace => "\x1b[90m\x1b[1m", // 灰色
    }
}

/// 初始化日志，RUST_LOG 优先，否则使用配置中的级别
///
/// 日志写到 stderr，stdout 只输出报告（便于 `--json` 重定向）。
pub fn init_logger(default_level: &str) {
    let mut builder = Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    for module in QUIET_MODULES {
        builder.filter_module(module, LevelFilter::Warn);
    }

    let result = builder
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "{}{} {:<5}\x1b[0m [{}:{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                level_color(record.level()),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args(),
            )
        })
        .try_init();

    if result.is_err() {
        // 已初始化则保留原有 logger
        log::debug!("Logger already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init_logger("debug");
        init_logger("info");
        log::info!("logger initialized twice");
    }

    #[test]
    fn test_level_colors_are_distinct() {
        let levels = [Level::Error, Level::Warn, Level::Info, Level::Debug, Level::Trace];
        let mut colors: Vec<&str> = levels.iter().map(|l| level_color(*l)).collect();
        colors.dedup();
        assert_eq!(colors.len(), levels.len());
    }
}
