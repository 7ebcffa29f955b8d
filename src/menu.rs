//! 菜单树构建
//!
//! 把 `MenuItemSpec` 列表递归转换成原生菜单元素。分组先构建子项，
//! 再包装成容器；顺序保持输入顺序，不排序。

use crate::config::Capabilities;
use crate::descriptor::{ActionStyle, GroupStyle, MenuItemSpec};
use crate::icon::{IconImage, IconRenderer, MENU_ICON_SIZE};
use crate::Color;

/// 勾选状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    On,
    Off,
}

/// 分组的显示方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuDisplay {
    /// 子菜单
    Nested,
    /// 子项平铺在当前层级
    Inline,
}

/// 叶子菜单项，携带自己的 id，选中时按 id 派发
#[derive(Debug, Clone, PartialEq)]
pub struct MenuAction {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub image: Option<IconImage>,
    pub destructive: bool,
    pub state: Option<MenuState>,
}

/// 分组（子菜单或内联分组）
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    pub title: String,
    pub image: Option<IconImage>,
    pub display: MenuDisplay,
    pub children: Vec<MenuElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuElement {
    Action(MenuAction),
    Menu(Menu),
}

impl Menu {
    /// 挂在控件上的根菜单（无标题）
    pub fn root(children: Vec<MenuElement>) -> Self {
        Self {
            title: String::new(),
            image: None,
            display: MenuDisplay::Nested,
            children,
        }
    }

    /// 深度优先查找 id 对应的叶子；id 重复时返回第一个
    pub fn find_action(&self, id: &str) -> Option<&MenuAction> {
        self.children.iter().find_map(|element| match element {
            MenuElement::Action(action) if action.id == id => Some(action),
            MenuElement::Action(_) => None,
            MenuElement::Menu(menu) => menu.find_action(id),
        })
    }

    /// 按深度优先顺序列出所有叶子
    pub fn actions(&self) -> Vec<&MenuAction> {
        let mut out = Vec::new();
        collect_actions(&self.children, &mut out);
        out
    }
}

fn collect_actions<'a>(elements: &'a [MenuElement], out: &mut Vec<&'a MenuAction>) {
    for element in elements {
        match element {
            MenuElement::Action(action) => out.push(action),
            MenuElement::Menu(menu) => collect_actions(&menu.children, out),
        }
    }
}

/// 菜单树构建器
pub struct MenuTreeBuilder<'a> {
    icons: &'a IconRenderer,
    capabilities: Capabilities,
}

impl<'a> MenuTreeBuilder<'a> {
    pub fn new(icons: &'a IconRenderer, capabilities: Capabilities) -> Self {
        Self { icons, capabilities }
    }

    /// 构建元素列表；格式错误的项被丢弃，其余照常构建
    pub fn build(&self, items: &[MenuItemSpec]) -> Vec<MenuElement> {
        items.iter().filter_map(|item| self.build_item(item)).collect()
    }

    fn build_item(&self, item: &MenuItemSpec) -> Option<MenuElement> {
        match item {
            MenuItemSpec::Action { id, title, description, icon, style, checked } => {
                let destructive = *style == ActionStyle::Destructive;
                // 危险操作的图标固定用警示色
                let forced = destructive.then_some(Color::SYSTEM_RED);
                let image = icon
                    .as_ref()
                    .and_then(|spec| self.icons.render_spec(spec, MENU_ICON_SIZE, forced));

                Some(MenuElement::Action(MenuAction {
                    id: id.clone(),
                    title: title.clone(),
                    subtitle: description.clone().filter(|_| self.capabilities.subtitles),
                    image,
                    destructive,
                    state: checked
                        .filter(|_| self.capabilities.checked_state)
                        .map(|on| if on { MenuState::On } else { MenuState::Off }),
                }))
            }
            MenuItemSpec::Group { title, items, icon, style } => {
                // 子项必须先于分组本身构建
                let children = self.build(items);
                let image = icon
                    .as_ref()
                    .and_then(|spec| self.icons.render_spec(spec, MENU_ICON_SIZE, None));
                let display = match style {
                    GroupStyle::Inline if self.capabilities.inline_groups => MenuDisplay::Inline,
                    _ => MenuDisplay::Nested,
                };

                Some(MenuElement::Menu(Menu {
                    title: title.clone(),
                    image,
                    display,
                    children,
                }))
            }
            MenuItemSpec::Unsupported { kind } => {
                log::debug!("dropping menu item with type {:?}", kind);
                None
            }
        }
    }
}
