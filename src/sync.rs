//! 控件同步器
//!
//! 把 `ControlDescriptor` 整体应用到原生控件上。每次都是全量替换，
//! 各步骤互相独立：前一步降级不会影响后一步的默认值。

use crate::config::SyncConfig;
use crate::control::NativeControl;
use crate::descriptor::{ContentSpec, ControlDescriptor, SizeSpec};
use crate::icon::{IconRenderer, DEFAULT_CONTENT_ICON_SIZE};
use crate::menu::{Menu, MenuTreeBuilder};
use crate::{Color, Rect};

pub struct ControlSynchronizer<'a> {
    icons: &'a IconRenderer,
    config: &'a SyncConfig,
}

impl<'a> ControlSynchronizer<'a> {
    pub fn new(icons: &'a IconRenderer, config: &'a SyncConfig) -> Self {
        Self { icons, config }
    }

    /// 全量应用描述
    pub fn apply(&self, descriptor: &ControlDescriptor, control: &mut dyn NativeControl) {
        // 1. 清空旧内容
        control.set_title(None);
        control.set_image(None);

        // 2. 内容
        self.apply_content(descriptor.content.as_ref(), control);

        // 3. 背景色
        let background = descriptor
            .background_color
            .map(|c| c.to_color())
            .unwrap_or(Color::TRANSPARENT);
        control.set_background_color(background);

        // 4. frame
        let frame = match descriptor.size {
            Some(size) => Rect::from_size(size),
            None => control.container_bounds(),
        };
        control.set_frame(frame);

        // 5. 菜单
        let menu = if descriptor.items.is_empty() {
            None
        } else {
            let builder = MenuTreeBuilder::new(self.icons, self.config.capabilities);
            Some(Menu::root(builder.build(&descriptor.items)))
        };
        control.set_menu(menu);

        // 6. 主操作模式
        control.set_shows_menu_as_primary_action(descriptor.shows_menu_as_primary_action);

        // 固定外观
        let tint = self.config.tint();
        control.set_title_color(tint);
        control.set_tint_color(tint);
        control.set_corner_radius(self.config.corner_radius);
    }

    fn apply_content(&self, content: Option<&ContentSpec>, control: &mut dyn NativeControl) {
        match content {
            Some(ContentSpec::Text(text)) => control.set_title(Some(text.clone())),
            Some(ContentSpec::Icon(spec)) => {
                match self.icons.render_spec(spec, DEFAULT_CONTENT_ICON_SIZE, None) {
                    Some(image) => control.set_image(Some(image)),
                    None => log::warn!(
                        "content icon {:#x} in {} could not be rendered",
                        spec.code_point,
                        spec.font_family
                    ),
                }
            }
            None => control.set_title(Some(self.config.fallback_label.clone())),
        }
    }

    /// 只调整尺寸：同时调整控件和容器，然后强制布局；内容、背景、菜单不动
    pub fn update_size(&self, size: SizeSpec, control: &mut dyn NativeControl) {
        let frame = Rect::from_size(size);
        control.set_container_frame(frame);
        control.set_frame(frame);
        control.layout_if_needed();
    }
}
