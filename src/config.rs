//! 引擎配置
//!
//! 所有字段都有默认值，配置文件里只需写要覆盖的部分。

use crate::error::{MenuError, Result};
use crate::Color;
use serde::Deserialize;

/// 平台能力，启动时确定一次，之后作为配置传入，不在各处判断系统版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Capabilities {
    /// 菜单项副标题
    pub subtitles: bool,
    /// 菜单项勾选状态
    pub checked_state: bool,
    /// 内联分组
    pub inline_groups: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            subtitles: true,
            checked_state: true,
            inline_groups: true,
        }
    }
}

impl Capabilities {
    /// 最低平台：只有基础菜单
    pub const fn minimal() -> Self {
        Self {
            subtitles: false,
            checked_state: false,
            inline_groups: false,
        }
    }
}

/// 同步器配置
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncConfig {
    /// 没有内容时显示的文字
    pub fallback_label: String,
    /// 模板图标与标题的着色，0xRRGGBB
    pub tint_color: u32,
    pub corner_radius: f32,
    pub capabilities: Capabilities,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            fallback_label: "Default Native Title".to_string(),
            tint_color: 0x007AFF,
            corner_radius: 8.0,
            capabilities: Capabilities::default(),
        }
    }
}

impl SyncConfig {
    pub fn tint(&self) -> Color {
        Color::from_hex(self.tint_color)
    }
}

/// 顶层配置
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub sync: SyncConfig,
    /// 启动时加载的图标字体
    pub fonts: Vec<FontEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontEntry {
    pub family: String,
    pub path: String,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MenuError::Config(e.to_string()))
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
