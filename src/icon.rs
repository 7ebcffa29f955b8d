//! 图标字形渲染
//!
//! 把图标字体里的一个码位画成位图。两种模式必须严格区分：
//! - 未指定颜色：黑色绘制，标记为 Template，显示时只取形状，由环境 tint 着色
//! - 指定颜色：按该颜色绘制，标记为 Fixed，显示时原样使用，不再着色

use crate::canvas::Canvas;
use crate::descriptor::IconSpec;
use crate::font::{FontRegistry, GlyphBitmap};
use crate::Color;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// 控件内容图标的默认尺寸
pub const DEFAULT_CONTENT_ICON_SIZE: f32 = 24.0;
/// 菜单项图标尺寸
pub const MENU_ICON_SIZE: f32 = 20.0;
/// 图标尺寸上限，超过按渲染失败处理
pub const MAX_ICON_SIZE: f32 = 512.0;
/// 字形缓存容量，满了整体清空
pub const GLYPH_CACHE_CAPACITY: usize = 256;

/// 渲染模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderingMode {
    /// 只有形状，使用环境 tint
    Template,
    /// 颜色已固定
    Fixed,
}

/// 渲染好的图标
#[derive(Debug, Clone, PartialEq)]
pub struct IconImage {
    bitmap: Canvas,
    mode: RenderingMode,
}

impl IconImage {
    pub fn mode(&self) -> RenderingMode {
        self.mode
    }

    pub fn is_template(&self) -> bool {
        self.mode == RenderingMode::Template
    }

    /// 原始位图（Template 模式下是黑色形状）
    pub fn bitmap(&self) -> &Canvas {
        &self.bitmap
    }

    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    /// 得到实际显示的像素：Template 用 tint 替换颜色并保留覆盖率，Fixed 原样返回
    pub fn resolve(&self, tint: Color) -> Cow<'_, Canvas> {
        match self.mode {
            RenderingMode::Fixed => Cow::Borrowed(&self.bitmap),
            RenderingMode::Template => Cow::Owned(
                self.bitmap
                    .map_pixels(|c| c.with_rgb_of(&tint).scale_alpha(tint.a as f32 / 255.0)),
            ),
        }
    }
}

/// 图标渲染器
///
/// 字形缓存以 (规范字体族, 字符, 尺寸*10) 为键，render 是 &self，
/// 所以用 Mutex 提供内部可变性。尺寸由宿主决定，缓存条数有上限。
pub struct IconRenderer {
    fonts: Arc<FontRegistry>,
    cache: Mutex<HashMap<(String, char, u32), GlyphBitmap>>,
}

impl IconRenderer {
    pub fn new(fonts: Arc<FontRegistry>) -> Self {
        Self {
            fonts,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn fonts(&self) -> &Arc<FontRegistry> {
        &self.fonts
    }

    /// 当前缓存的字形数
    pub fn cached_glyphs(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    /// 渲染一个码位
    ///
    /// 字体找不到、码位不是合法字符、字体里没有该字形时返回 None，
    /// 调用方按"无图标"处理。
    pub fn render(
        &self,
        code_point: u32,
        font_family: &str,
        size: f32,
        color: Option<Color>,
    ) -> Option<IconImage> {
        let Some(source) = self.fonts.resolve(font_family) else {
            log::warn!("icon font {} is not registered", font_family);
            return None;
        };
        let Some(ch) = char::from_u32(code_point) else {
            log::warn!("invalid icon code point {:#x}", code_point);
            return None;
        };
        if !source.has_glyph(ch) {
            log::warn!("font {} has no glyph for {:#x}", font_family, code_point);
            return None;
        }

        if !(size > 0.0 && size <= MAX_ICON_SIZE) {
            log::warn!("icon size {} is out of range", size);
            return None;
        }

        let size_key = (size * 10.0) as u32;
        let family = FontRegistry::canonical_family(font_family);
        let key = (family.to_string(), ch, size_key);

        // 先查缓存，光栅化放在锁外
        let cached = self
            .cache
            .lock()
            .ok()
            .and_then(|cache| cache.get(&key).cloned());
        let glyph = match cached {
            Some(glyph) => glyph,
            None => {
                let glyph = source.rasterize(ch, size);
                if let Ok(mut cache) = self.cache.lock() {
                    if cache.len() >= GLYPH_CACHE_CAPACITY {
                        log::debug!("glyph cache full, clearing {} entries", cache.len());
                        cache.clear();
                    }
                    cache.insert(key, glyph.clone());
                }
                glyph
            }
        };

        if glyph.is_empty() {
            log::debug!("glyph {:#x} in {} rasterized to an empty bitmap", code_point, font_family);
            return None;
        }

        let (ink, mode) = match color {
            Some(c) => (c, RenderingMode::Fixed),
            None => (Color::BLACK, RenderingMode::Template),
        };

        let mut bitmap = match Canvas::new(glyph.width as u32, glyph.height as u32) {
            Ok(bitmap) => bitmap,
            Err(e) => {
                log::warn!("glyph {:#x} in {}: {}", code_point, font_family, e);
                return None;
            }
        };
        for gy in 0..glyph.height {
            for gx in 0..glyph.width {
                let coverage = glyph.coverage[gy * glyph.width + gx] as f32 / 255.0;
                if coverage > 0.0 {
                    bitmap.set_pixel_direct(gx as i32, gy as i32, ink.scale_alpha(coverage));
                }
            }
        }

        Some(IconImage { bitmap, mode })
    }

    /// 按 IconSpec 渲染；`forced` 覆盖 spec 里的颜色（危险操作用）
    pub fn render_spec(
        &self,
        spec: &IconSpec,
        default_size: f32,
        forced: Option<Color>,
    ) -> Option<IconImage> {
        let color = forced.or_else(|| spec.color.map(|c| c.to_color()));
        self.render(
            spec.code_point,
            &spec.font_family,
            spec.size.unwrap_or(default_size),
            color,
        )
    }
}
