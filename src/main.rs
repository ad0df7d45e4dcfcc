mod analysis;
mod app;
mod batch;
mod config;
mod logger;
mod plotter;
mod preprocess;
mod types;
mod utils;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use dotenv::dotenv;
use log::{error, info, warn};

use config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "RecoveryScore")]
#[command(version, about = "Recovery scores from accelerometer recordings")]
struct Cli {
    /// 案例名称，读取 `<CASE>.csv`
    #[arg(required_unless_present = "write_config")]
    cases: Vec<String>,

    /// TOML 配置文件
    #[arg(short, long, env = "RECOVERY_CONFIG")]
    config: Option<PathBuf>,

    /// 写出默认配置后退出
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,

    /// 打开第一个成功分析的案例的图形窗口
    #[arg(long)]
    plot: bool,

    /// 以 JSON 输出报告
    #[arg(long)]
    json: bool,

    /// 合并重叠或相邻的 ROI 区间
    #[arg(long)]
    coalesce: bool,
}

fn load_config(cli: &Cli) -> Result<AppConfig, config::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::default(),
    };
    if cli.coalesce {
        config.detection.coalesce_ranges = true;
    }
    config.validate()?;
    Ok(config)
}

fn main() {
    dotenv().ok(); // 加载 .env 文件
    let cli = Cli::parse();

    if let Some(path) = &cli.write_config {
        logger::init_logger("info");
        match AppConfig::default().save_to_file(path) {
            Ok(()) => info!("Default configuration written to {}", path.display()),
            Err(e) => {
                error!("Failed to write configuration: {}", e);
                std::process::exit(2);
            }
        }
        return;
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            logger::init_logger("info");
            error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    logger::init_logger(&config.logging.level);
    info!("Analyzing {} case(s)", cli.cases.len());

    let config = Arc::new(config);
    let results = batch::analyze_cases(&cli.cases, Arc::clone(&config));

    let mut failures = 0;
    for (case, result) in &results {
        match result {
            Ok(analysis) => {
                if cli.json {
                    match serde_json::to_string_pretty(&analysis.report) {
                        Ok(json) => println!("{}", json),
                        Err(e) => {
                            error!("Failed to serialize report for {}: {}", case, e);
                            failures += 1;
                        }
                    }
                } else {
                    println!("{}", analysis.report);
                }
            }
            Err(e) => {
                error!("Case {} failed: {}", case, e);
                failures += 1;
            }
        }
    }

    let scored = results
        .iter()
        .filter(|(_, result)| result.as_ref().is_ok_and(|a| a.report.outcome.is_scored()))
        .count();
    info!("{} of {} case(s) scored", scored, results.len());

    if cli.plot || config.plot.enabled {
        match results.iter().find_map(|(_, result)| result.as_ref().ok()) {
            Some(analysis) => {
                if let Err(e) = app::run_viewer(analysis, config.detection.axis, &config.plot) {
                    error!("GUI failed: {}", e);
                    failures += 1;
                }
            }
            None => warn!("No case was analyzed successfully, nothing to plot"),
        }
    }

    if failures > 0 {
        error!("{} of {} case(s) failed", failures, results.len());
        std::process::exit(1);
    }
}
