//! 日志初始化
//!
//! 控制台输出 + 可选的按天滚动文件输出

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// 初始化全局日志
///
/// `log_dir` 为 `Some` 时额外写入按天滚动的日志文件，
/// 返回的 guard 必须保存在 main 中，否则文件日志会丢失。
pub fn init_logger(log_dir: Option<&Path>, json_output: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,partner_server=debug,surrealdb=warn"));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(false);

    match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "partner-server.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            if json_output {
                let file_layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                tracing_subscriber::registry()
                    .with(filter)
                    .with(console_layer)
                    .with(file_layer)
                    .init();
            } else {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                tracing_subscriber::registry()
                    .with(filter)
                    .with(console_layer)
                    .with(file_layer)
                    .init();
            }
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console_layer)
                .init();
            None
        }
    }
}
