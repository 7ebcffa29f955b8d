//! 与宿主通信的消息通道
//!
//! 传输层本身是外部协作者，这里只定义消息形态、通道寻址和发送接口。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Mutex;

/// 插件级通道名
pub const PLUGIN_CHANNEL: &str = "native_menu";
/// 视图工厂注册的视图类型
pub const VIEW_TYPE: &str = "app.digizorg/native_menu";

const VIEW_CHANNEL_PREFIX: &str = "app.digizorg/native_menu_channel_";

/// 通道名
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelName(String);

impl ChannelName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 视图 id -> 通道名，纯函数，宿主和引擎各自计算即可对上
pub fn channel_for(view_id: i64) -> ChannelName {
    ChannelName(format!("{}{}", VIEW_CHANNEL_PREFIX, view_id))
}

/// 一次方法调用，双向通用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Value>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Option<Value>) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// 入站调用的应答
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResult {
    /// 成功，可带数据
    Success(Option<Value>),
    /// 不支持的方法；宿主应视为能力缺失而不是错误
    NotImplemented,
}

/// 出站发送接口
pub trait BinaryMessenger: Send + Sync {
    fn invoke_method(&self, channel: &ChannelName, call: MethodCall);
}

/// 记录所有出站消息的 messenger，供预览和测试使用
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<(ChannelName, MethodCall)>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取出并清空已发送的消息
    pub fn drain(&self) -> Vec<(ChannelName, MethodCall)> {
        self.sent
            .lock()
            .map(|mut sent| std::mem::take(&mut *sent))
            .unwrap_or_default()
    }
}

impl BinaryMessenger for RecordingMessenger {
    fn invoke_method(&self, channel: &ChannelName, call: MethodCall) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((channel.clone(), call));
        }
    }
}

/// 插件级通道：目前没有任何方法
pub fn handle_plugin_call(call: &MethodCall) -> MethodResult {
    log::debug!("plugin channel received {}", call.method);
    MethodResult::NotImplemented
}
