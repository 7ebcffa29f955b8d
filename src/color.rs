//! 颜色模块

use serde::Deserialize;

/// RGBA 颜色
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
            a: 255,
        }
    }

    /// 从 [0,1] 浮点通道构造，越界值会被截断
    pub fn from_unit(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        fn channel(v: f64) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        Self::new(channel(red), channel(green), channel(blue), channel(alpha))
    }

    /// 保留 alpha，替换 RGB（模板图着色用）
    pub const fn with_rgb_of(&self, tint: &Color) -> Self {
        Self::new(tint.r, tint.g, tint.b, self.a)
    }

    /// 按比例缩放 alpha
    pub fn scale_alpha(&self, factor: f32) -> Self {
        let a = (self.a as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        Self::new(self.r, self.g, self.b, a)
    }

    /// Alpha 混合 (使用整数运算优化)
    #[inline]
    pub fn blend(&self, dst: &Color) -> Color {
        // 如果源完全透明，返回目标色
        if self.a == 0 { return *dst; }

        // 针对目标是完全不透明的常见情况（如背景）进行优化
        if dst.a == 255 {
            if self.a == 255 { return *self; }

            let alpha = self.a as u32;
            let inv_alpha = 255 - alpha;

            return Color {
                r: ((self.r as u32 * alpha + dst.r as u32 * inv_alpha) / 255) as u8,
                g: ((self.g as u32 * alpha + dst.g as u32 * inv_alpha) / 255) as u8,
                b: ((self.b as u32 * alpha + dst.b as u32 * inv_alpha) / 255) as u8,
                a: 255,
            };
        }

        // 通用混合模式 (支持半透明目标)
        let src_a = self.a as u32;
        let dst_a = dst.a as u32;
        let inv_src_a = 255 - src_a;

        let out_a = src_a + (dst_a * inv_src_a) / 255;
        if out_a == 0 { return Color::TRANSPARENT; }

        let dst_factor = (dst_a * inv_src_a) / 255;

        Color {
            r: ((self.r as u32 * src_a + dst.r as u32 * dst_factor) / out_a) as u8,
            g: ((self.g as u32 * src_a + dst.g as u32 * dst_factor) / out_a) as u8,
            b: ((self.b as u32 * src_a + dst.b as u32 * dst_factor) / out_a) as u8,
            a: out_a as u8,
        }
    }

    // 预定义颜色
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    /// 系统蓝（按钮默认 tint）
    pub const SYSTEM_BLUE: Color = Color::from_hex(0x007AFF);
    /// 系统红（危险操作图标）
    pub const SYSTEM_RED: Color = Color::from_hex(0xFF3B30);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// 宿主传来的颜色描述，四个通道都是 [0,1] 浮点
///
/// 四个通道缺一不可：缺少任意通道时整个字段反序列化失败，
/// 由调用方回退到默认值，而不是应用一个残缺的颜色。
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ColorSpec {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl ColorSpec {
    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self { red, green, blue, alpha }
    }

    pub fn to_color(&self) -> Color {
        Color::from_unit(self.red, self.green, self.blue, self.alpha)
    }
}

impl From<ColorSpec> for Color {
    fn from(spec: ColorSpec) -> Self {
        spec.to_color()
    }
}
