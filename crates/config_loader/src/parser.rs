//! 配置解析模块
//!
//! 支持 TOML (主要) 和 JSON (可选) 格式的扁平设置文件，
//! 以及 `users` 字段内嵌的 JSON 收件人目录。

use std::collections::{BTreeMap, HashMap};

use contracts::{ContractError, RecipientDirectory};

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML 格式 (推荐)
    Toml,
    /// JSON 格式
    Json,
}

impl ConfigFormat {
    /// 从文件扩展名推断格式
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// 扁平化后的设置：键 -> 宿主风格的字符串值
pub type Settings = BTreeMap<String, String>;

/// 解析 TOML 格式设置文件
///
/// 表/数组值 (例如原生写法的 `[users]`) 会被重新编码为 JSON 字符串。
pub fn parse_toml(content: &str) -> Result<Settings, ContractError> {
    let table: toml::Table = toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })?;

    table
        .into_iter()
        .map(|(key, value)| -> Result<(String, String), ContractError> {
            let flat = match value {
                toml::Value::String(s) => s,
                v @ (toml::Value::Table(_) | toml::Value::Array(_)) => serde_json::to_string(&v)
                    .map_err(|e| ContractError::ConfigParse {
                        message: format!("cannot re-encode '{key}' as JSON: {e}"),
                        source: Some(Box::new(e)),
                    })?,
                other => other.to_string(),
            };
            Ok((key, flat))
        })
        .collect()
}

/// 解析 JSON 格式设置文件
pub fn parse_json(content: &str) -> Result<Settings, ContractError> {
    let object: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
            message: format!("JSON parse error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(object
        .into_iter()
        .map(|(key, value)| {
            let flat = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, flat)
        })
        .collect())
}

/// 根据格式解析设置文件
pub fn parse(content: &str, format: ConfigFormat) -> Result<Settings, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

/// 解析 `users` 设置：JSON 对象，收件人名 -> 频道 ID
pub fn parse_directory(users: &str) -> Result<RecipientDirectory, ContractError> {
    let entries: HashMap<String, String> =
        serde_json::from_str(users).map_err(|e| ContractError::ConfigParse {
            message: format!("setting 'users' is not a JSON object of strings: {e}"),
            source: Some(Box::new(e)),
        })?;
    Ok(RecipientDirectory::new(entries))
}

/// 解析宿主风格的布尔值
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}
