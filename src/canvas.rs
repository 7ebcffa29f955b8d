//! Canvas 画布模块 - 图标位图与控件快照共用的像素缓冲

use crate::{Color, Rect};
use crate::error::{MenuError, Result};

/// 画布 - RGBA 像素缓冲
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

/// 画布单边上限（像素）
pub const MAX_CANVAS_DIMENSION: u32 = 4096;

impl Canvas {
    /// 创建透明画布；任一边超过上限时返回错误
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let too_large = MenuError::CanvasTooLarge { width, height };
        if width > MAX_CANVAS_DIMENSION || height > MAX_CANVAS_DIMENSION {
            return Err(too_large);
        }
        let len = width.checked_mul(height).ok_or(too_large)?;
        Ok(Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; len as usize],
        })
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }

    /// 获取像素数据引用
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// 逐像素映射出一张新画布
    pub fn map_pixels<F>(&self, f: F) -> Canvas
    where
        F: Fn(Color) -> Color,
    {
        Canvas {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|c| f(*c)).collect(),
        }
    }

    /// 清空画布
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// 获取像素
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize]
        } else {
            Color::TRANSPARENT
        }
    }

    /// 设置像素（带 alpha 混合）
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }

        let idx = (y as u32 * self.width + x as u32) as usize;
        if color.a == 255 {
            self.pixels[idx] = color;
        } else if color.a > 0 {
            self.pixels[idx] = color.blend(&self.pixels[idx]);
        }
    }

    /// 直接设置像素（不混合，供字形光栅化使用）
    pub fn set_pixel_direct(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32 {
            let idx = (y as u32 * self.width + x as u32) as usize;
            self.pixels[idx] = color;
        }
    }

    /// 填充矩形
    pub fn fill_rect(&mut self, rect: &Rect, color: Color) {
        let x0 = rect.x.max(0.0) as i32;
        let y0 = rect.y.max(0.0) as i32;
        let x1 = rect.right().min(self.width as f32) as i32;
        let y1 = rect.bottom().min(self.height as f32) as i32;

        for y in y0..y1 {
            for x in x0..x1 {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// 填充圆角矩形（角上做简单的覆盖率抗锯齿）
    pub fn fill_round_rect(&mut self, rect: &Rect, radius: f32, color: Color) {
        let radius = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
        if radius <= 0.0 {
            self.fill_rect(rect, color);
            return;
        }

        let x0 = rect.x.max(0.0) as i32;
        let y0 = rect.y.max(0.0) as i32;
        let x1 = rect.right().min(self.width as f32) as i32;
        let y1 = rect.bottom().min(self.height as f32) as i32;

        for y in y0..y1 {
            for x in x0..x1 {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                // 离最近圆角圆心的距离，不在角区时为 0
                let cx = px.clamp(rect.x + radius, rect.right() - radius);
                let cy = py.clamp(rect.y + radius, rect.bottom() - radius);
                let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
                let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.set_pixel(x, y, color.scale_alpha(coverage));
                }
            }
        }
    }

    /// 把另一张画布合成到 (x, y)
    pub fn draw_canvas(&mut self, src: &Canvas, x: i32, y: i32) {
        for sy in 0..src.height {
            for sx in 0..src.width {
                let color = src.get_pixel(sx, sy);
                if color.a > 0 {
                    self.set_pixel(x + sx as i32, y + sy as i32, color);
                }
            }
        }
    }

    /// 导出 RGBA 字节
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.pixels.len() * 4);
        for c in &self.pixels {
            data.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
        data
    }

    /// 保存为 PNG
    pub fn save_png(&self, path: &str) -> Result<()> {
        use image::{ImageBuffer, Rgba};

        let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_raw(
            self.width,
            self.height,
            self.to_rgba(),
        ).ok_or_else(|| MenuError::Image("Failed to create image buffer".to_string()))?;

        img.save(path).map_err(|e| MenuError::Image(e.to_string()))
    }
}
