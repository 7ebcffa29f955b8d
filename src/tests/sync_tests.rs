//! 控件同步单元测试

use super::*;
use crate::config::SyncConfig;
use crate::control::{Button, NativeControl};
use crate::descriptor::parse;
use crate::menu::MenuElement;
use crate::sync::ControlSynchronizer;
use crate::{Color, Rect, Size};
use serde_json::{json, Value};

fn container() -> Rect {
    Rect::new(0.0, 0.0, 200.0, 50.0)
}

fn apply(button: &mut Button, args: Value) {
    let renderer = test_renderer();
    let config = SyncConfig::default();
    ControlSynchronizer::new(&renderer, &config).apply(&parse(Some(&args)), button);
}

/// 测试背景色精确应用
#[test]
fn test_background_matches_channels() {
    let cases = [
        (0.0, 0.0, 0.0, 0.0),
        (1.0, 1.0, 1.0, 1.0),
        (1.0, 0.5, 0.0, 1.0),
        (0.2, 0.4, 0.6, 0.8),
    ];

    for (r, g, b, a) in cases {
        let mut button = Button::new(container());
        apply(&mut button, json!({ "backgroundColor": { "red": r, "green": g, "blue": b, "alpha": a } }));
        assert_eq!(button.state().background_color, Color::from_unit(r, g, b, a));
    }

    let mut button = Button::new(container());
    apply(&mut button, json!({ "backgroundColor": { "red": 1.0, "green": 0.5, "blue": 0.0, "alpha": 1.0 } }));
    assert_eq!(button.state().background_color, Color::new(255, 128, 0, 255));
}

/// 测试颜色通道缺失时回退为透明
#[test]
fn test_background_missing_channel() {
    let mut button = Button::new(container());
    apply(&mut button, json!({ "backgroundColor": { "red": 1.0, "green": 0.0, "blue": 0.0, "alpha": 1.0 } }));
    assert_eq!(button.state().background_color, Color::rgb(255, 0, 0));

    apply(&mut button, json!({ "backgroundColor": { "red": 1.0, "green": 0.0, "blue": 0.0 } }));
    assert_eq!(button.state().background_color, Color::TRANSPARENT);
}

/// 测试内容：文字、图标、默认文字
#[test]
fn test_apply_content() {
    let mut button = Button::new(container());

    apply(&mut button, json!({ "child": { "type": "text", "text": "Sort" } }));
    assert_eq!(button.state().title.as_deref(), Some("Sort"));
    assert!(button.state().image.is_none());

    // 新内容会清掉旧标题
    apply(&mut button, json!({ "child": { "type": "icon", "icon": { "codePoint": GLYPH_SHARE, "fontFamily": "TestIcons" } } }));
    assert!(button.state().title.is_none());
    let image = button.state().image.as_ref().unwrap();
    assert!(image.is_template());
    assert_eq!(image.width(), 24);

    apply(&mut button, json!({}));
    assert_eq!(button.state().title.as_deref(), Some("Default Native Title"));
    assert!(button.state().image.is_none());
}

/// 测试图标带颜色时是固定颜色图
#[test]
fn test_apply_fixed_icon() {
    let mut button = Button::new(container());
    apply(&mut button, json!({ "child": {
        "type": "icon",
        "icon": { "codePoint": GLYPH_SHARE, "fontFamily": "TestIcons" },
        "size": 32,
        "color": { "red": 0.0, "green": 0.0, "blue": 0.0, "alpha": 1.0 }
    } }));

    let image = button.state().image.as_ref().unwrap();
    assert!(!image.is_template());
    assert_eq!(image.width(), 32);
}

/// 测试图标渲染失败时既无标题也无图片
#[test]
fn test_apply_icon_render_miss() {
    let mut button = Button::new(container());
    apply(&mut button, json!({ "child": { "type": "icon", "icon": { "codePoint": GLYPH_SHARE, "fontFamily": "Unknown" } } }));
    assert!(button.state().title.is_none());
    assert!(button.state().image.is_none());
}

/// 测试 frame：显式尺寸或继承容器
#[test]
fn test_apply_frame() {
    let mut button = Button::new(container());
    apply(&mut button, json!({ "size": { "width": 80, "height": 30 } }));
    assert_eq!(button.state().frame, Rect::new(0.0, 0.0, 80.0, 30.0));

    apply(&mut button, json!({ "size": { "width": 80 } }));
    assert_eq!(button.state().frame, container());
}

/// 测试菜单挂载与移除
#[test]
fn test_apply_menu() {
    let mut button = Button::new(container());
    apply(&mut button, json!({ "items": [ { "type": "action", "id": "a", "title": "A" } ] }));

    let menu = button.state().menu.as_ref().unwrap();
    assert_eq!(menu.title, "");
    assert_eq!(menu.children.len(), 1);
    assert!(matches!(&menu.children[0], MenuElement::Action(a) if a.id == "a"));
    assert!(button.state().shows_menu_as_primary_action);

    apply(&mut button, json!({ "items": [] }));
    assert!(button.state().menu.is_none());
    assert!(!button.state().shows_menu_as_primary_action);
}

/// 测试固定外观
#[test]
fn test_apply_appearance() {
    let mut button = Button::new(container());
    let renderer = test_renderer();
    let config = SyncConfig {
        tint_color: 0x34C759,
        corner_radius: 12.0,
        ..Default::default()
    };
    ControlSynchronizer::new(&renderer, &config).apply(&parse(None), &mut button);

    assert_eq!(button.state().tint_color, Color::from_hex(0x34C759));
    assert_eq!(button.state().title_color, Color::from_hex(0x34C759));
    assert_eq!(button.state().corner_radius, 12.0);
}

/// 测试应用两次与应用一次结果相同
#[test]
fn test_apply_is_idempotent() {
    let args = json!({
        "child": { "type": "icon", "icon": { "codePoint": GLYPH_SHARE, "fontFamily": "TestIcons" } },
        "backgroundColor": { "red": 0.1, "green": 0.2, "blue": 0.3, "alpha": 1.0 },
        "size": { "width": 64, "height": 64 },
        "items": [
            { "type": "action", "id": "a", "title": "A", "checked": true },
            { "type": "group", "title": "G", "style": "inline", "items": [
                { "type": "action", "id": "b", "title": "B", "style": "destructive",
                  "icon": { "codePoint": GLYPH_TRASH, "fontFamily": "TestIcons" } }
            ] }
        ]
    });

    let mut once = Button::new(container());
    apply(&mut once, args.clone());

    let mut twice = Button::new(container());
    apply(&mut twice, args.clone());
    apply(&mut twice, args);

    assert_eq!(once.state(), twice.state());
}

/// 测试只改尺寸
#[test]
fn test_update_size_only_touches_frame() {
    let mut button = Button::new(container());
    apply(&mut button, json!({
        "child": { "type": "text", "text": "Menu" },
        "backgroundColor": { "red": 1.0, "green": 0.0, "blue": 0.0, "alpha": 1.0 },
        "items": [ { "type": "action", "id": "a", "title": "A" } ]
    }));
    let before = button.state().clone();

    let renderer = test_renderer();
    let config = SyncConfig::default();
    ControlSynchronizer::new(&renderer, &config).update_size(Size::new(100.0, 40.0), &mut button);

    let after = button.state();
    assert_eq!(after.frame, Rect::new(0.0, 0.0, 100.0, 40.0));
    assert_eq!(button.container_bounds(), Rect::new(0.0, 0.0, 100.0, 40.0));
    assert_eq!(button.layout_passes(), 1);
    assert_eq!(after.title, before.title);
    assert_eq!(after.background_color, before.background_color);
    assert_eq!(after.menu, before.menu);
    assert_eq!(after.shows_menu_as_primary_action, before.shows_menu_as_primary_action);
}
