//! 配置校验模块
//!
//! 校验规则：
//! - token / users / user_key 必填且非空
//! - 收件人名或频道 ID 为空的条目被丢弃 (记录 warn)，不阻止启动
//! - api_url 为 http(s) 地址
//! - timeout > 0 (秒)
//! - as_user 为合法布尔值

use std::time::Duration;

use contracts::{ContractError, NotifierConfig, RecipientDirectory};
use tracing::warn;

use crate::parser::parse_bool;
use crate::source::ConfigSource;

/// 读取必填配置项
///
/// 缺失或仅含空白时返回 `ConfigMissing`。
pub fn require(source: &impl ConfigSource, key: &str) -> Result<String, ContractError> {
    optional(source, key).ok_or_else(|| ContractError::config_missing(key))
}

/// 读取可选配置项
///
/// 仅含空白的值视为缺失；其余值原样返回，不做 trim。
pub fn optional(source: &impl ConfigSource, key: &str) -> Option<String> {
    source.get(key).filter(|v| !v.trim().is_empty())
}

/// 解析超时秒数
pub fn parse_timeout(value: &str) -> Result<Duration, ContractError> {
    let secs: u64 = value.trim().parse().map_err(|e| {
        ContractError::config_validation(
            "timeout",
            format!("'{value}' is not a whole number of seconds: {e}"),
        )
    })?;
    if secs == 0 {
        return Err(ContractError::config_validation("timeout", "timeout must be > 0"));
    }
    Ok(Duration::from_secs(secs))
}

/// 解析 as_user 布尔值
pub fn parse_as_user(value: &str) -> Result<bool, ContractError> {
    parse_bool(value).ok_or_else(|| {
        ContractError::config_validation("as_user", format!("'{value}' is not a boolean"))
    })
}

/// 校验完整配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(config: &NotifierConfig) -> Result<(), ContractError> {
    validate_api_url(config)?;
    Ok(())
}

/// 丢弃无法投递的收件人条目
///
/// 名称或频道 ID 为空白的条目永远不会产生有效私信，逐条 warn 后移除。
pub fn usable_recipients(directory: RecipientDirectory) -> RecipientDirectory {
    directory
        .iter()
        .filter(|(name, channel_id)| {
            let usable = !name.trim().is_empty() && !channel_id.trim().is_empty();
            if !usable {
                warn!(
                    recipient = %name,
                    channel_id = %channel_id,
                    "ignoring users entry with a blank name or channel id"
                );
            }
            usable
        })
        .collect()
}

/// 校验 API 地址
fn validate_api_url(config: &NotifierConfig) -> Result<(), ContractError> {
    let url = config.api_url.as_str();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ContractError::config_validation(
            "api_url",
            format!("'{url}' must start with http:// or https://"),
        ));
    }
    Ok(())
}
