//! 错误类型
//!
//! 绝大多数异常输入只会降级（默认值、丢弃菜单项、无图标），
//! 这里只收录真正需要向调用方报告的错误。

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    /// 构造视图实例时没有可用的消息通道，实例不能创建
    #[error("binary messenger is missing for view {view_id}")]
    MissingMessenger { view_id: i64 },

    #[error("font error: {0}")]
    Font(String),

    /// 画布尺寸超出上限
    #[error("canvas {width}x{height} exceeds the size limit")]
    CanvasTooLarge { width: u32, height: u32 },

    #[error("image error: {0}")]
    Image(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MenuError>;
