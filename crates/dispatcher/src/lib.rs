//! # Dispatcher
//!
//! 通知分发模块。
//!
//! 负责：
//! - 从记录中解析收件人并查询收件人目录
//! - 将记录渲染为确定性的单行文本
//! - 按到达顺序逐条发送，汇总为批次结果 (成功 / 部分跳过 / 请求重试)

pub mod controller;
pub mod error;
pub mod formatter;
pub mod metrics;
pub mod notifiers;
pub mod resolver;
pub mod timestamp;

#[cfg(test)]
mod test_support;

pub use contracts::{BatchOutcome, LogEvent, Notifier};
pub use controller::{BatchReport, DispatchController};
pub use error::{DispatcherError, ResolveError};
pub use formatter::format_message;
pub use metrics::{DispatchMetrics, MetricsSnapshot};
pub use notifiers::{LogNotifier, MockNotifier, SentMessage, SlackNotifier};
pub use resolver::{extract_recipient, resolve_recipient, ResolvedRecipient};
pub use timestamp::normalize_timestamp;
