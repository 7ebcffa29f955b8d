//! 事件路由：把原生交互转发成出站消息

use crate::channel::{BinaryMessenger, ChannelName, MethodCall};
use serde::Serialize;
use std::sync::Arc;

/// 出站事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutboundEvent {
    ButtonTapped,
    ActionSelected { id: String },
}

impl OutboundEvent {
    pub fn method(&self) -> &'static str {
        match self {
            OutboundEvent::ButtonTapped => "buttonTapped",
            OutboundEvent::ActionSelected { .. } => "actionSelected",
        }
    }

    pub fn into_call(self) -> MethodCall {
        let method = self.method();
        let arguments = match self {
            OutboundEvent::ButtonTapped => None,
            event @ OutboundEvent::ActionSelected { .. } => serde_json::to_value(event).ok(),
        };
        MethodCall::new(method, arguments)
    }
}

/// 每个视图实例一个路由器，持有该实例唯一的出站通道
pub struct EventRouter {
    channel: ChannelName,
    messenger: Arc<dyn BinaryMessenger>,
}

impl EventRouter {
    pub fn new(channel: ChannelName, messenger: Arc<dyn BinaryMessenger>) -> Self {
        Self { channel, messenger }
    }

    pub fn channel(&self) -> &ChannelName {
        &self.channel
    }

    pub fn emit(&self, event: OutboundEvent) {
        log::debug!("{} -> {}", self.channel, event.method());
        self.messenger.invoke_method(&self.channel, event.into_call());
    }

    /// 普通点击
    pub fn tapped(&self) {
        self.emit(OutboundEvent::ButtonTapped);
    }

    /// 菜单叶子被选中
    pub fn action_selected(&self, id: &str) {
        self.emit(OutboundEvent::ActionSelected { id: id.to_string() });
    }
}
