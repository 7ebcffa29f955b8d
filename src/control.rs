//! 原生控件抽象
//!
//! `NativeControl` 是同步器操作的控件接口；`Button` 是软件实现，
//! 状态可直接观察，并能把当前状态画成快照。

use crate::canvas::Canvas;
use crate::error::Result;
use crate::font::FontRegistry;
use crate::icon::IconImage;
use crate::menu::Menu;
use crate::{Color, Point, Rect};

/// 同步器需要的控件操作
pub trait NativeControl {
    fn set_title(&mut self, title: Option<String>);
    fn set_title_color(&mut self, color: Color);
    fn set_image(&mut self, image: Option<IconImage>);
    fn set_background_color(&mut self, color: Color);
    fn set_tint_color(&mut self, color: Color);
    fn set_corner_radius(&mut self, radius: f32);
    fn set_frame(&mut self, frame: Rect);
    fn set_menu(&mut self, menu: Option<Menu>);
    fn set_shows_menu_as_primary_action(&mut self, enabled: bool);

    /// 容器视图当前的 bounds
    fn container_bounds(&self) -> Rect;
    fn set_container_frame(&mut self, frame: Rect);
    /// 强制立即布局
    fn layout_if_needed(&mut self);
}

/// 按钮的可观察状态
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonState {
    pub title: Option<String>,
    pub title_color: Color,
    pub image: Option<IconImage>,
    pub background_color: Color,
    pub tint_color: Color,
    pub corner_radius: f32,
    pub frame: Rect,
    pub menu: Option<Menu>,
    pub shows_menu_as_primary_action: bool,
}

impl Default for ButtonState {
    fn default() -> Self {
        Self {
            title: None,
            title_color: Color::SYSTEM_BLUE,
            image: None,
            background_color: Color::TRANSPARENT,
            tint_color: Color::SYSTEM_BLUE,
            corner_radius: 0.0,
            frame: Rect::default(),
            menu: None,
            shows_menu_as_primary_action: false,
        }
    }
}

/// 一次点击在原生侧产生的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// 普通点击，需要通知宿主
    Tapped,
    /// 点击直接弹出了菜单
    MenuPresented,
    /// 点在控件外
    Missed,
}

/// 软件按钮，放在一个容器视图里
#[derive(Debug, Clone)]
pub struct Button {
    state: ButtonState,
    container: Rect,
    container_background: Color,
    layout_passes: u32,
}

impl Button {
    pub fn new(container: Rect) -> Self {
        Self {
            state: ButtonState {
                frame: Rect::from_size(container.size()),
                ..Default::default()
            },
            container,
            container_background: Color::TRANSPARENT,
            layout_passes: 0,
        }
    }

    pub fn state(&self) -> &ButtonState {
        &self.state
    }

    pub fn container(&self) -> Rect {
        self.container
    }

    pub fn layout_passes(&self) -> u32 {
        self.layout_passes
    }

    pub fn has_menu(&self) -> bool {
        self.state.menu.is_some()
    }

    /// 点击命中测试（容器坐标）
    pub fn hit_test(&self, point: &Point) -> bool {
        self.state.frame.contains(point)
    }

    /// 点击：挂了菜单且菜单是主操作时弹出菜单，否则是普通点击
    pub fn tap(&self, point: &Point) -> TapOutcome {
        if !self.hit_test(point) {
            return TapOutcome::Missed;
        }
        if self.state.menu.is_some() && self.state.shows_menu_as_primary_action {
            TapOutcome::MenuPresented
        } else {
            TapOutcome::Tapped
        }
    }

    /// 长按：有菜单就弹出
    pub fn long_press(&self) -> Option<&Menu> {
        self.state.menu.as_ref()
    }

    /// 把容器与按钮画成快照；`label_font` 用于绘制标题
    ///
    /// 尺寸来自宿主，超过画布上限时返回错误。
    pub fn render(&self, fonts: &FontRegistry, label_font: Option<&str>) -> Result<Canvas> {
        let width = self.container.width.max(self.state.frame.right()).ceil().max(1.0) as u32;
        let height = self.container.height.max(self.state.frame.bottom()).ceil().max(1.0) as u32;
        let mut canvas = Canvas::new(width, height)?;
        canvas.clear(self.container_background);

        let frame = self.state.frame;
        canvas.fill_round_rect(&frame, self.state.corner_radius, self.state.background_color);

        if let Some(image) = &self.state.image {
            let pixels = image.resolve(self.state.tint_color);
            let x = frame.x + (frame.width - pixels.width() as f32) / 2.0;
            let y = frame.y + (frame.height - pixels.height() as f32) / 2.0;
            canvas.draw_canvas(&pixels, x.round() as i32, y.round() as i32);
        }

        if let (Some(title), Some(source)) = (&self.state.title, label_font.and_then(|f| fonts.resolve(f))) {
            let size = (frame.height * 0.4).clamp(10.0, 17.0);
            let glyphs: Vec<_> = title.chars().map(|ch| source.rasterize(ch, size)).collect();
            let advance = |g: &crate::font::GlyphBitmap| g.width as f32 + size * 0.1;
            let total: f32 = glyphs.iter().map(advance).sum();
            let mut cursor_x = frame.x + (frame.width - total) / 2.0;
            let baseline = frame.y + (frame.height + size * 0.7) / 2.0;

            for glyph in &glyphs {
                let top = baseline - glyph.height as f32;
                for gy in 0..glyph.height {
                    for gx in 0..glyph.width {
                        let coverage = glyph.coverage[gy * glyph.width + gx] as f32 / 255.0;
                        if coverage > 0.001 {
                            let px = (cursor_x + gx as f32).round() as i32;
                            let py = (top + gy as f32).round() as i32;
                            canvas.set_pixel(px, py, self.state.title_color.scale_alpha(coverage));
                        }
                    }
                }
                cursor_x += advance(glyph);
            }
        }

        Ok(canvas)
    }
}

impl NativeControl for Button {
    fn set_title(&mut self, title: Option<String>) {
        self.state.title = title;
    }

    fn set_title_color(&mut self, color: Color) {
        self.state.title_color = color;
    }

    fn set_image(&mut self, image: Option<IconImage>) {
        self.state.image = image;
    }

    fn set_background_color(&mut self, color: Color) {
        self.state.background_color = color;
    }

    fn set_tint_color(&mut self, color: Color) {
        self.state.tint_color = color;
    }

    fn set_corner_radius(&mut self, radius: f32) {
        self.state.corner_radius = radius;
    }

    fn set_frame(&mut self, frame: Rect) {
        self.state.frame = frame;
    }

    fn set_menu(&mut self, menu: Option<Menu>) {
        self.state.menu = menu;
    }

    fn set_shows_menu_as_primary_action(&mut self, enabled: bool) {
        self.state.shows_menu_as_primary_action = enabled;
    }

    fn container_bounds(&self) -> Rect {
        Rect::from_size(self.container.size())
    }

    fn set_container_frame(&mut self, frame: Rect) {
        self.container = frame;
    }

    fn layout_if_needed(&mut self) {
        self.layout_passes += 1;
    }
}
