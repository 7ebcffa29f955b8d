//! 单元测试模块
//! 覆盖属性表解析、图标渲染、菜单构建、同步与事件路由

pub mod descriptor_tests;
pub mod sync_tests;

use crate::font::{FontRegistry, GlyphBitmap, GlyphSource};
use crate::icon::IconRenderer;
use std::collections::HashSet;
use std::sync::Arc;

/// 测试用图标码位
pub const GLYPH_SHARE: u32 = 0xE80D;
pub const GLYPH_TRASH: u32 = 0xE872;
/// 测试字体里没有的码位
pub const GLYPH_MISSING: u32 = 0xF000;

/// 确定性的假字形：size x size 的方块，覆盖率按坐标变化
pub struct StubGlyphs {
    glyphs: HashSet<char>,
}

impl StubGlyphs {
    pub fn new(code_points: &[u32]) -> Self {
        Self {
            glyphs: code_points.iter().filter_map(|cp| char::from_u32(*cp)).collect(),
        }
    }
}

impl GlyphSource for StubGlyphs {
    fn has_glyph(&self, ch: char) -> bool {
        self.glyphs.contains(&ch)
    }

    fn rasterize(&self, _ch: char, size: f32) -> GlyphBitmap {
        let side = size.round() as usize;
        let mut coverage = Vec::with_capacity(side * side);
        for y in 0..side {
            for x in 0..side {
                coverage.push((((x + y) * 16) % 255) as u8);
            }
        }
        GlyphBitmap { width: side, height: side, coverage }
    }
}

/// 注册了 TestIcons 和 MaterialIcons-Regular 的字体表
pub fn test_fonts() -> Arc<FontRegistry> {
    let mut fonts = FontRegistry::new();
    fonts.register("TestIcons", Arc::new(StubGlyphs::new(&[GLYPH_SHARE, GLYPH_TRASH])));
    fonts.register("MaterialIcons-Regular", Arc::new(StubGlyphs::new(&[GLYPH_SHARE])));
    Arc::new(fonts)
}

pub fn test_renderer() -> IconRenderer {
    IconRenderer::new(test_fonts())
}
