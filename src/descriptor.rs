//! 控件描述解析
//!
//! 把宿主传来的无类型属性表（`serde_json::Value`）解析成带类型的
//! `ControlDescriptor`。解析永不失败：缺失或格式错误的字段各自回退
//! 到默认值，不影响其他字段；未知键忽略。

use crate::color::ColorSpec;
use crate::geometry::Size;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// 尺寸描述（逻辑单位）
pub type SizeSpec = Size;

/// 图标描述
#[derive(Debug, Clone, PartialEq)]
pub struct IconSpec {
    pub code_point: u32,
    pub font_family: String,
    pub size: Option<f32>,
    /// None 表示按模板图渲染
    pub color: Option<ColorSpec>,
}

/// 控件内容：文字或图标
#[derive(Debug, Clone, PartialEq)]
pub enum ContentSpec {
    Text(String),
    Icon(IconSpec),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionStyle {
    #[default]
    Normal,
    Destructive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupStyle {
    #[default]
    Normal,
    Inline,
}

/// 菜单项描述，按 `type` 区分
#[derive(Debug, Clone, PartialEq)]
pub enum MenuItemSpec {
    Action {
        id: String,
        title: String,
        description: Option<String>,
        icon: Option<IconSpec>,
        style: ActionStyle,
        checked: Option<bool>,
    },
    Group {
        title: String,
        items: Vec<MenuItemSpec>,
        icon: Option<IconSpec>,
        style: GroupStyle,
    },
    /// `type` 缺失或不认识，构建菜单时丢弃
    Unsupported { kind: Option<String> },
}

/// 一个控件实例的完整目标状态
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ControlDescriptor {
    pub content: Option<ContentSpec>,
    pub background_color: Option<ColorSpec>,
    pub size: Option<SizeSpec>,
    pub items: Vec<MenuItemSpec>,
    pub shows_menu_as_primary_action: bool,
}

const DEFAULT_ACTION_TITLE: &str = "Action";

/// 解析属性表
pub fn parse(raw: Option<&Value>) -> ControlDescriptor {
    let Some(args) = raw.and_then(Value::as_object) else {
        if raw.is_some_and(|v| !v.is_null()) {
            log::debug!("update arguments are not a map, using defaults");
        }
        return ControlDescriptor::default();
    };

    let items = args
        .get("items")
        .and_then(Value::as_array)
        .map(|list| parse_items(list))
        .unwrap_or_default();

    // 显式值优先；缺省时有菜单项才直接弹出菜单
    let shows_menu_as_primary_action = args
        .get("showsMenuAsPrimaryAction")
        .and_then(Value::as_bool)
        .unwrap_or(!items.is_empty());

    ControlDescriptor {
        content: parse_content(args),
        background_color: args.get("backgroundColor").and_then(parse_color),
        size: args.get("size").and_then(parse_size),
        items,
        shows_menu_as_primary_action,
    }
}

/// 解析颜色，必须是键值表；任意通道缺失或类型不对都返回 None
pub fn parse_color(value: &Value) -> Option<ColorSpec> {
    from_map(value)
}

/// 解析尺寸，必须是键值表；宽高缺一返回 None
pub fn parse_size(value: &Value) -> Option<SizeSpec> {
    from_map(value)
}

// 派生的反序列化也接受数组形态，这里只放行对象
fn from_map<T: DeserializeOwned>(value: &Value) -> Option<T> {
    let map = value.as_object()?;
    serde_json::from_value(Value::Object(map.clone())).ok()
}

fn parse_content(args: &Map<String, Value>) -> Option<ContentSpec> {
    if let Some(child) = args.get("child").and_then(Value::as_object) {
        return match child.get("type").and_then(Value::as_str) {
            Some("text") => Some(ContentSpec::Text(
                child.get("text").and_then(Value::as_str).unwrap_or_default().to_string(),
            )),
            // child 形态下 size / color 和 icon 并列
            Some("icon") => child
                .get("icon")
                .and_then(|icon| parse_icon_with(icon, child.get("size"), child.get("color")))
                .map(ContentSpec::Icon),
            other => {
                log::debug!("unsupported child type {:?}", other);
                None
            }
        };
    }

    if let Some(text) = args.get("text").and_then(Value::as_str) {
        return Some(ContentSpec::Text(text.to_string()));
    }

    args.get("icon").and_then(parse_icon).map(ContentSpec::Icon)
}

/// 解析图标；codePoint 与 fontFamily 必填，size / color 可选且各自容错
pub fn parse_icon(value: &Value) -> Option<IconSpec> {
    parse_icon_with(value, None, None)
}

fn parse_icon_with(value: &Value, size: Option<&Value>, color: Option<&Value>) -> Option<IconSpec> {
    let map = value.as_object()?;
    let code_point = map
        .get("codePoint")
        .and_then(Value::as_u64)
        .and_then(|cp| u32::try_from(cp).ok())?;
    let font_family = map.get("fontFamily").and_then(Value::as_str)?.to_string();

    // 外层值无效时退回图标自身的值
    let positive = |v: &Value| v.as_f64().map(|s| s as f32).filter(|s| *s > 0.0);
    let size = size
        .and_then(positive)
        .or_else(|| map.get("size").and_then(positive));
    let color = color
        .and_then(parse_color)
        .or_else(|| map.get("color").and_then(parse_color));

    Some(IconSpec { code_point, font_family, size, color })
}

/// 解析菜单项列表，保持原有顺序
pub fn parse_items(list: &[Value]) -> Vec<MenuItemSpec> {
    list.iter().map(parse_item).collect()
}

fn parse_item(value: &Value) -> MenuItemSpec {
    let Some(map) = value.as_object() else {
        return MenuItemSpec::Unsupported { kind: None };
    };
    let string = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
    let icon = map.get("icon").and_then(parse_icon);

    match map.get("type").and_then(Value::as_str) {
        Some("action") => MenuItemSpec::Action {
            id: string("id").unwrap_or_default(),
            title: string("title").unwrap_or_else(|| DEFAULT_ACTION_TITLE.to_string()),
            description: string("description"),
            icon,
            style: match map.get("style").and_then(Value::as_str) {
                Some("destructive") => ActionStyle::Destructive,
                _ => ActionStyle::Normal,
            },
            checked: map.get("checked").and_then(Value::as_bool),
        },
        Some("group") => MenuItemSpec::Group {
            title: string("title").unwrap_or_default(),
            items: map
                .get("items")
                .and_then(Value::as_array)
                .map(|list| parse_items(list))
                .unwrap_or_default(),
            icon,
            style: match map.get("style").and_then(Value::as_str) {
                Some("inline") => GroupStyle::Inline,
                _ => GroupStyle::Normal,
            },
        },
        other => MenuItemSpec::Unsupported { kind: other.map(str::to_string) },
    }
}
