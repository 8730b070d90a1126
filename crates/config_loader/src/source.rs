//! 配置来源抽象
//!
//! 宿主以字符串键值对的形式提供插件配置。

use std::collections::{BTreeMap, HashMap};

/// 配置键值来源
///
/// 对应宿主的按键查询接口；缺失的键返回 `None`。
pub trait ConfigSource {
    /// 查询配置键
    fn get(&self, key: &str) -> Option<String>;
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl ConfigSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}
