//! Native Menu - 声明式描述到原生下拉菜单按钮的同步引擎
//! 解析属性表、构建菜单树、渲染图标字形、转发交互事件

mod canvas;
mod color;
mod geometry;

pub use canvas::Canvas;
pub use color::{Color, ColorSpec};
pub use geometry::{Point, Rect, Size};

// 错误与配置
pub mod error;
pub mod config;

// 图标字体与字形渲染
pub mod font;
pub mod icon;

// 属性表解析
pub mod descriptor;

// 菜单树
pub mod menu;

// 原生控件与同步
pub mod control;
pub mod sync;

// 通道与事件
pub mod channel;
pub mod router;

// 视图实例
pub mod view;

pub use config::{Capabilities, EngineConfig, SyncConfig};
pub use descriptor::{parse, ControlDescriptor, ContentSpec, IconSpec, MenuItemSpec};
pub use error::{MenuError, Result};
pub use icon::{IconImage, IconRenderer, RenderingMode};
pub use menu::{Menu, MenuElement, MenuTreeBuilder};
pub use sync::ControlSynchronizer;
pub use view::{MenuView, MenuViewFactory, ViewRegistry};

// 单元测试
#[cfg(test)]
mod tests;
