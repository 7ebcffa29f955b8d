//! 图标字体注册表
//!
//! 按字体族名查找字形来源。注册表在启动时构建，之后只读，
//! 通过 `Arc` 在所有视图实例间共享。

use crate::config::FontEntry;
use crate::error::{MenuError, Result};
use fontdue::{Font, FontSettings};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

/// 宿主侧字体族名 -> 实际注册名
static FONT_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("MaterialIcons", "MaterialIcons-Regular");
    m
});

/// 单个字形的光栅化结果：coverage 位图，每像素一个字节
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphBitmap {
    pub width: usize,
    pub height: usize,
    pub coverage: Vec<u8>,
}

impl GlyphBitmap {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// 字形来源
pub trait GlyphSource: Send + Sync {
    /// 字体里是否有这个字符
    fn has_glyph(&self, ch: char) -> bool;

    /// 光栅化一个字符，`size` 为像素高度
    fn rasterize(&self, ch: char, size: f32) -> GlyphBitmap;
}

impl GlyphSource for Font {
    fn has_glyph(&self, ch: char) -> bool {
        self.lookup_glyph_index(ch) != 0
    }

    fn rasterize(&self, ch: char, size: f32) -> GlyphBitmap {
        let (metrics, coverage) = Font::rasterize(self, ch, size);
        GlyphBitmap {
            width: metrics.width,
            height: metrics.height,
            coverage,
        }
    }
}

/// 字体注册表
#[derive(Default, Clone)]
pub struct FontRegistry {
    fonts: HashMap<String, Arc<dyn GlyphSource>>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册任意字形来源
    pub fn register(&mut self, family: impl Into<String>, source: Arc<dyn GlyphSource>) {
        self.fonts.insert(family.into(), source);
    }

    /// 按配置批量加载
    pub fn from_entries(entries: &[FontEntry]) -> Result<Self> {
        let mut registry = Self::new();
        for entry in entries {
            registry.register_file(entry.family.clone(), &entry.path)?;
        }
        Ok(registry)
    }

    /// 从字体数据注册
    pub fn register_bytes(&mut self, family: impl Into<String>, font_data: &[u8]) -> Result<()> {
        let settings = FontSettings {
            scale: 40.0,
            ..Default::default()
        };
        let font = Font::from_bytes(font_data, settings)
            .map_err(|e| MenuError::Font(e.to_string()))?;
        let family = family.into();
        log::debug!("registered font family {}", family);
        self.register(family, Arc::new(font));
        Ok(())
    }

    /// 从文件路径注册
    pub fn register_file(&mut self, family: impl Into<String>, path: &str) -> Result<()> {
        let font_data = std::fs::read(path)
            .map_err(|e| MenuError::Font(format!("Failed to read font file {}: {}", path, e)))?;
        self.register_bytes(family, &font_data)
    }

    /// 解析字体族别名
    pub fn canonical_family(family: &str) -> &str {
        FONT_ALIASES.get(family).copied().unwrap_or(family)
    }

    /// 查找字体，先按别名再按原名
    pub fn resolve(&self, family: &str) -> Option<&Arc<dyn GlyphSource>> {
        self.fonts
            .get(Self::canonical_family(family))
            .or_else(|| self.fonts.get(family))
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}
