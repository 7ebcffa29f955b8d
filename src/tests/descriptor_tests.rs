//! 属性表解析单元测试

use crate::descriptor::*;
use crate::{ColorSpec, Size};
use serde_json::json;

/// 测试没有参数时全部取默认值
#[test]
fn test_parse_absent() {
    let descriptor = parse(None);
    assert_eq!(descriptor, ControlDescriptor::default());
    assert!(descriptor.content.is_none());
    assert!(descriptor.background_color.is_none());
    assert!(descriptor.size.is_none());
    assert!(descriptor.items.is_empty());
    assert!(!descriptor.shows_menu_as_primary_action);
}

/// 测试参数不是 map
#[test]
fn test_parse_not_a_map() {
    assert_eq!(parse(Some(&json!("hello"))), ControlDescriptor::default());
    assert_eq!(parse(Some(&json!(null))), ControlDescriptor::default());
    assert_eq!(parse(Some(&json!([1, 2]))), ControlDescriptor::default());
}

/// 测试 child 文本内容
#[test]
fn test_parse_child_text() {
    let args = json!({ "child": { "type": "text", "text": "Options" } });
    let descriptor = parse(Some(&args));
    assert_eq!(descriptor.content, Some(ContentSpec::Text("Options".to_string())));
}

/// 测试 child 图标，size / color 与 icon 并列
#[test]
fn test_parse_child_icon() {
    let args = json!({
        "child": {
            "type": "icon",
            "icon": { "codePoint": 0xE80D, "fontFamily": "MaterialIcons" },
            "size": 30,
            "color": { "red": 1.0, "green": 0.0, "blue": 0.0, "alpha": 1.0 }
        }
    });

    let descriptor = parse(Some(&args));
    let Some(ContentSpec::Icon(icon)) = descriptor.content else {
        panic!("expected icon content");
    };
    assert_eq!(icon.code_point, 0xE80D);
    assert_eq!(icon.font_family, "MaterialIcons");
    assert_eq!(icon.size, Some(30.0));
    assert_eq!(icon.color, Some(ColorSpec::new(1.0, 0.0, 0.0, 1.0)));
}

/// 测试图标颜色残缺时只丢弃颜色
#[test]
fn test_parse_icon_bad_color_is_field_local() {
    let args = json!({
        "child": {
            "type": "icon",
            "icon": { "codePoint": 0xE80D, "fontFamily": "MaterialIcons" },
            "color": { "red": 1.0, "green": 0.0, "blue": 0.0 }
        }
    });

    let Some(ContentSpec::Icon(icon)) = parse(Some(&args)).content else {
        panic!("expected icon content");
    };
    assert!(icon.color.is_none());
    assert!(icon.size.is_none());
}

/// 测试缺少 codePoint / fontFamily 或码位越界的图标无效
#[test]
fn test_parse_invalid_icon() {
    assert!(parse_icon(&json!({ "fontFamily": "MaterialIcons" })).is_none());
    assert!(parse_icon(&json!({ "codePoint": 0xE80D })).is_none());
    assert!(parse_icon(&json!({ "codePoint": -1, "fontFamily": "MaterialIcons" })).is_none());
    assert!(parse_icon(&json!({ "codePoint": 0x1_0000_0000u64, "fontFamily": "MaterialIcons" })).is_none());

    let args = json!({ "child": { "type": "icon", "icon": { "codePoint": "x" } } });
    assert!(parse(Some(&args)).content.is_none());
}

/// 测试未知 child 类型
#[test]
fn test_parse_unknown_child_type() {
    let args = json!({ "child": { "type": "image", "src": "a.png" } });
    assert!(parse(Some(&args)).content.is_none());

    let args = json!({ "child": { "text": "no type" } });
    assert!(parse(Some(&args)).content.is_none());
}

/// 测试顶层 text / icon 写法
#[test]
fn test_parse_top_level_content() {
    let descriptor = parse(Some(&json!({ "text": "Share" })));
    assert_eq!(descriptor.content, Some(ContentSpec::Text("Share".to_string())));

    let descriptor = parse(Some(&json!({
        "icon": { "codePoint": 0xE872, "fontFamily": "TestIcons", "size": 18 }
    })));
    let Some(ContentSpec::Icon(icon)) = descriptor.content else {
        panic!("expected icon content");
    };
    assert_eq!(icon.code_point, 0xE872);
    assert_eq!(icon.size, Some(18.0));
    assert!(icon.color.is_none());
}

/// 测试背景色和尺寸
#[test]
fn test_parse_color_and_size() {
    let args = json!({
        "backgroundColor": { "red": 0.2, "green": 0.4, "blue": 0.6, "alpha": 0.8 },
        "size": { "width": 120, "height": 44.5 }
    });

    let descriptor = parse(Some(&args));
    assert_eq!(descriptor.background_color, Some(ColorSpec::new(0.2, 0.4, 0.6, 0.8)));
    assert_eq!(descriptor.size, Some(Size::new(120.0, 44.5)));
}

/// 测试字段错误互不影响
#[test]
fn test_parse_failures_are_field_local() {
    let args = json!({
        "child": { "type": "text", "text": "Keep" },
        "backgroundColor": { "red": 0.2, "green": 0.4, "blue": 0.6 },
        "size": { "width": 120 },
        "unknownKey": { "anything": true }
    });

    let descriptor = parse(Some(&args));
    assert_eq!(descriptor.content, Some(ContentSpec::Text("Keep".to_string())));
    assert!(descriptor.background_color.is_none());
    assert!(descriptor.size.is_none());
}

/// 测试颜色通道类型错误
#[test]
fn test_parse_color_wrong_type() {
    assert!(parse_color(&json!({ "red": "1", "green": 0, "blue": 0, "alpha": 1 })).is_none());
    assert!(parse_color(&json!([1, 0, 0, 1])).is_none());
    assert_eq!(
        parse_color(&json!({ "red": 1, "green": 0, "blue": 0, "alpha": 1 })),
        Some(ColorSpec::new(1.0, 0.0, 0.0, 1.0))
    );
}

/// 测试数组形态的颜色和尺寸一律无效
#[test]
fn test_parse_array_shapes_rejected() {
    assert!(parse_size(&json!([100, 40])).is_none());
    assert_eq!(parse_size(&json!({ "width": 100, "height": 40 })), Some(Size::new(100.0, 40.0)));

    let args = json!({
        "text": "Keep",
        "backgroundColor": [1, 0, 0, 1],
        "size": [100, 40]
    });
    let descriptor = parse(Some(&args));
    assert_eq!(descriptor.content, Some(ContentSpec::Text("Keep".to_string())));
    assert!(descriptor.background_color.is_none());
    assert!(descriptor.size.is_none());
}

/// 测试 child 上的 size / color 无效时退回图标自身的值
#[test]
fn test_parse_child_icon_falls_back_to_icon_fields() {
    let args = json!({
        "child": {
            "type": "icon",
            "icon": {
                "codePoint": 0xE80D,
                "fontFamily": "MaterialIcons",
                "size": 18,
                "color": { "red": 0.0, "green": 0.0, "blue": 1.0, "alpha": 1.0 }
            },
            "size": "big",
            "color": { "red": 1.0 }
        }
    });

    let Some(ContentSpec::Icon(icon)) = parse(Some(&args)).content else {
        panic!("expected icon content");
    };
    assert_eq!(icon.size, Some(18.0));
    assert_eq!(icon.color, Some(ColorSpec::new(0.0, 0.0, 1.0, 1.0)));
}

/// 测试菜单项默认值
#[test]
fn test_parse_action_defaults() {
    let args = json!({ "items": [ { "type": "action" } ] });
    let descriptor = parse(Some(&args));

    assert_eq!(
        descriptor.items,
        vec![MenuItemSpec::Action {
            id: String::new(),
            title: "Action".to_string(),
            description: None,
            icon: None,
            style: ActionStyle::Normal,
            checked: None,
        }]
    );
}

/// 测试菜单项完整字段
#[test]
fn test_parse_action_fields() {
    let args = json!({ "items": [ {
        "type": "action",
        "id": "delete",
        "title": "Delete",
        "description": "Cannot be undone",
        "style": "destructive",
        "checked": true,
        "icon": { "codePoint": 0xE872, "fontFamily": "TestIcons" }
    } ] });

    let descriptor = parse(Some(&args));
    let MenuItemSpec::Action { id, title, description, icon, style, checked } = &descriptor.items[0] else {
        panic!("expected action");
    };
    assert_eq!(id, "delete");
    assert_eq!(title, "Delete");
    assert_eq!(description.as_deref(), Some("Cannot be undone"));
    assert_eq!(icon.as_ref().map(|i| i.code_point), Some(0xE872));
    assert_eq!(*style, ActionStyle::Destructive);
    assert_eq!(*checked, Some(true));
}

/// 测试未知样式与非布尔 checked
#[test]
fn test_parse_action_lenient_fields() {
    let args = json!({ "items": [
        { "type": "action", "id": "a", "style": "loud", "checked": "yes" },
        { "type": "group", "style": "grid" }
    ] });

    let descriptor = parse(Some(&args));
    match &descriptor.items[0] {
        MenuItemSpec::Action { style, checked, .. } => {
            assert_eq!(*style, ActionStyle::Normal);
            assert_eq!(*checked, None);
        }
        other => panic!("unexpected {:?}", other),
    }
    match &descriptor.items[1] {
        MenuItemSpec::Group { title, items, style, .. } => {
            assert_eq!(title, "");
            assert!(items.is_empty());
            assert_eq!(*style, GroupStyle::Normal);
        }
        other => panic!("unexpected {:?}", other),
    }
}

/// 测试分组递归解析
#[test]
fn test_parse_nested_groups() {
    let args = json!({ "items": [ {
        "type": "group",
        "title": "More",
        "style": "inline",
        "items": [
            { "type": "action", "id": "copy", "title": "Copy" },
            { "type": "group", "title": "Deeper", "items": [
                { "type": "action", "id": "paste", "title": "Paste" }
            ] }
        ]
    } ] });

    let descriptor = parse(Some(&args));
    let MenuItemSpec::Group { title, items, style, .. } = &descriptor.items[0] else {
        panic!("expected group");
    };
    assert_eq!(title, "More");
    assert_eq!(*style, GroupStyle::Inline);
    assert_eq!(items.len(), 2);
    let MenuItemSpec::Group { items: deeper, .. } = &items[1] else {
        panic!("expected nested group");
    };
    assert!(matches!(&deeper[0], MenuItemSpec::Action { id, .. } if id == "paste"));
}

/// 测试缺失或未知 type 的菜单项
#[test]
fn test_parse_unsupported_items() {
    let args = json!({ "items": [
        { "title": "no type" },
        { "type": "separator" },
        42,
        { "type": "action", "id": "ok" }
    ] });

    let descriptor = parse(Some(&args));
    assert_eq!(descriptor.items.len(), 4);
    assert_eq!(descriptor.items[0], MenuItemSpec::Unsupported { kind: None });
    assert_eq!(descriptor.items[1], MenuItemSpec::Unsupported { kind: Some("separator".to_string()) });
    assert_eq!(descriptor.items[2], MenuItemSpec::Unsupported { kind: None });
    assert!(matches!(&descriptor.items[3], MenuItemSpec::Action { id, .. } if id == "ok"));
}

/// 测试主操作模式的默认策略
#[test]
fn test_primary_action_policy() {
    let one_item = json!([{ "type": "action", "id": "a" }]);

    // 缺省：有菜单项才为 true
    assert!(parse(Some(&json!({ "items": one_item }))).shows_menu_as_primary_action);
    assert!(!parse(Some(&json!({ "items": [] }))).shows_menu_as_primary_action);
    assert!(!parse(Some(&json!({}))).shows_menu_as_primary_action);

    // 显式值优先
    let args = json!({ "items": one_item, "showsMenuAsPrimaryAction": false });
    assert!(!parse(Some(&args)).shows_menu_as_primary_action);
    let args = json!({ "showsMenuAsPrimaryAction": true });
    assert!(parse(Some(&args)).shows_menu_as_primary_action);

    // 类型错误按缺省处理
    let args = json!({ "items": one_item, "showsMenuAsPrimaryAction": "no" });
    assert!(parse(Some(&args)).shows_menu_as_primary_action);
}
