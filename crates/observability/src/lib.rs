//! # Observability
//!
//! 可观测性模块：诊断日志流初始化。
//!
//! ## 功能
//!
//! - Tracing 初始化 (JSON/Pretty/Compact 格式)
//! - 每条日志携带插件名 (`plugin` 字段)
//! - 构建期开关 `debug-log`：未启用时 debug 级别日志一律丢弃
//!
//! ## 使用示例
//!
//! ```ignore
//! observability::init()?;
//!
//! let _guard = observability::plugin_span().entered();
//! tracing::info!("registering plugin");
//! ```

use anyhow::{Context, Result};
use contracts::PLUGIN_NAME;
use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 初始化诊断日志流
///
/// - 默认 Compact 格式，支持 RUST_LOG 环境变量
pub fn init() -> Result<()> {
    init_with_config(ObservabilityConfig::default())
}

/// 可观测性配置
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// 日志格式
    pub log_format: LogFormat,
    /// 默认日志级别 (RUST_LOG 未设置时生效)
    pub default_log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Compact,
            default_log_level: "info".to_string(),
        }
    }
}

/// 日志格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON 结构化日志
    Json,
    /// 人类可读格式
    Pretty,
    /// 紧凑单行格式
    #[default]
    Compact,
}

/// 构建期允许的最高日志级别
///
/// 未启用 `debug-log` 特性时上限为 INFO，无论 RUST_LOG 如何设置。
pub fn max_level() -> LevelFilter {
    if cfg!(feature = "debug-log") {
        LevelFilter::TRACE
    } else {
        LevelFilter::INFO
    }
}

/// 按配置构建订阅者，输出写入 `writer`
///
/// 构建期上限 [`max_level`] 先于 `RUST_LOG` 生效。JSON 格式保留完整 span 链，
/// 嵌套 span 中的日志同样带有 `plugin` 字段。
pub fn subscriber<W>(
    config: &ObservabilityConfig,
    writer: W,
) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_log_level));

    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_writer(writer).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(writer).boxed(),
    };

    tracing_subscriber::registry()
        .with(max_level())
        .with(filter)
        .with(fmt_layer)
}

/// 插件级 span，所有生命周期日志都在其中输出
pub fn plugin_span() -> tracing::Span {
    tracing::info_span!("plugin", plugin = PLUGIN_NAME)
}

/// 使用自定义配置初始化
pub fn init_with_config(config: ObservabilityConfig) -> Result<()> {
    subscriber(&config, std::io::stdout)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::info!(
        plugin = PLUGIN_NAME,
        log_format = ?config.log_format,
        max_level = %max_level(),
        "Observability initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture(log_format: LogFormat, f: impl FnOnce()) -> String {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let config = ObservabilityConfig {
            log_format,
            default_log_level: "trace".to_string(),
        };
        tracing::subscriber::with_default(subscriber(&config, move || writer.clone()), f);
        buffer.contents()
    }

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.log_format, LogFormat::Compact);
        assert_eq!(config.default_log_level, "info");
    }

    #[cfg(not(feature = "debug-log"))]
    #[test]
    fn test_debug_suppressed_without_feature() {
        assert_eq!(max_level(), LevelFilter::INFO);

        let output = capture(LogFormat::Compact, || {
            let _guard = plugin_span().entered();
            tracing::debug!("unable to identify recipient");
            tracing::warn!("failed to retrieve id for recipient");
        });

        assert!(!output.contains("unable to identify recipient"), "got: {output}");
        assert!(output.contains("failed to retrieve id for recipient"), "got: {output}");
    }

    #[test]
    fn test_json_lines_carry_plugin_from_outer_span() {
        let output = capture(LogFormat::Json, || {
            let _plugin = plugin_span().entered();
            let _inner = tracing::warn_span!("notify", notifier = "log").entered();
            tracing::warn!("dry run, message not sent");
        });

        let line: serde_json::Value = serde_json::from_str(output.lines().next().unwrap()).unwrap();
        assert_eq!(line["span"]["name"], "notify");
        assert_eq!(line["spans"][0]["plugin"], PLUGIN_NAME);
    }

    #[cfg(feature = "debug-log")]
    #[test]
    fn test_debug_allowed_with_feature() {
        assert_eq!(max_level(), LevelFilter::TRACE);

        let output = capture(LogFormat::Compact, || {
            tracing::debug!("unable to identify recipient");
        });
        assert!(output.contains("unable to identify recipient"), "got: {output}");
    }
}
