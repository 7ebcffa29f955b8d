//! 视图实例
//!
//! 每个逻辑视图 id 对应一个 `MenuView`：一个按钮、一个出站通道。
//! 入站消息在同一线程上同步处理，`update` 返回前状态已全部替换完毕。

use crate::channel::{channel_for, BinaryMessenger, MethodCall, MethodResult};
use crate::config::{EngineConfig, SyncConfig};
use crate::control::{Button, TapOutcome};
use crate::descriptor::{self, ControlDescriptor};
use crate::error::{MenuError, Result};
use crate::font::FontRegistry;
use crate::icon::IconRenderer;
use crate::router::EventRouter;
use crate::sync::ControlSynchronizer;
use crate::{Canvas, Point, Rect};
use serde_json::Value;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

pub struct MenuView {
    view_id: i64,
    button: Button,
    router: EventRouter,
    icons: Arc<IconRenderer>,
    config: Arc<SyncConfig>,
    descriptor: ControlDescriptor,
}

impl MenuView {
    /// 创建实例并应用初始参数；没有 messenger 时实例不能创建
    pub fn new(
        view_id: i64,
        frame: Rect,
        args: Option<&Value>,
        messenger: Option<Arc<dyn BinaryMessenger>>,
        icons: Arc<IconRenderer>,
        config: Arc<SyncConfig>,
    ) -> Result<Self> {
        let messenger = messenger.ok_or(MenuError::MissingMessenger { view_id })?;
        let router = EventRouter::new(channel_for(view_id), messenger);

        let mut view = Self {
            view_id,
            button: Button::new(frame),
            router,
            icons,
            config,
            descriptor: ControlDescriptor::default(),
        };
        view.update(args);
        log::info!("created menu view {} on {}", view_id, view.router.channel());
        Ok(view)
    }

    pub fn view_id(&self) -> i64 {
        self.view_id
    }

    pub fn button(&self) -> &Button {
        &self.button
    }

    pub fn descriptor(&self) -> &ControlDescriptor {
        &self.descriptor
    }

    pub fn router(&self) -> &EventRouter {
        &self.router
    }

    /// 处理入站方法调用
    pub fn handle(&mut self, call: &MethodCall) -> MethodResult {
        match call.method.as_str() {
            "update" => {
                self.update(call.arguments.as_ref());
                MethodResult::Success(None)
            }
            "updateSize" => {
                self.update_size(call.arguments.as_ref());
                MethodResult::Success(None)
            }
            other => {
                log::debug!("view {}: method {} not implemented", self.view_id, other);
                MethodResult::NotImplemented
            }
        }
    }

    /// 全量更新
    pub fn update(&mut self, args: Option<&Value>) {
        let descriptor = descriptor::parse(args);
        ControlSynchronizer::new(&self.icons, &self.config).apply(&descriptor, &mut self.button);
        self.descriptor = descriptor;
    }

    /// 只更新尺寸；参数缺失或格式错误时什么也不做
    pub fn update_size(&mut self, args: Option<&Value>) {
        let Some(size) = args
            .and_then(|a| a.get("size"))
            .and_then(descriptor::parse_size)
        else {
            log::debug!("view {}: ignoring malformed updateSize", self.view_id);
            return;
        };
        ControlSynchronizer::new(&self.icons, &self.config).update_size(size, &mut self.button);
    }

    /// 点击按钮中心
    pub fn tap(&self) -> TapOutcome {
        let frame = self.button.state().frame;
        self.tap_at(Point::new(frame.x + frame.width / 2.0, frame.y + frame.height / 2.0))
    }

    /// 点击某个位置；普通点击会通知宿主
    pub fn tap_at(&self, point: Point) -> TapOutcome {
        let outcome = self.button.tap(&point);
        if outcome == TapOutcome::Tapped {
            self.router.tapped();
        }
        outcome
    }

    /// 选中菜单叶子：唯一的派发入口，按叶子携带的 id 转发
    pub fn select_action(&self, id: &str) -> bool {
        let Some(action) = self.button.state().menu.as_ref().and_then(|m| m.find_action(id)) else {
            log::warn!("view {}: no menu action with id {:?}", self.view_id, id);
            return false;
        };
        self.router.action_selected(&action.id);
        true
    }

    /// 当前状态快照
    pub fn snapshot(&self, label_font: Option<&str>) -> Result<Canvas> {
        self.button.render(self.icons.fonts(), label_font)
    }
}

/// 视图工厂：持有共享资源，为每个视图 id 创建实例
pub struct MenuViewFactory {
    messenger: Option<Arc<dyn BinaryMessenger>>,
    icons: Arc<IconRenderer>,
    config: Arc<SyncConfig>,
}

impl MenuViewFactory {
    pub fn new(
        messenger: Option<Arc<dyn BinaryMessenger>>,
        fonts: Arc<FontRegistry>,
        config: SyncConfig,
    ) -> Self {
        Self {
            messenger,
            icons: Arc::new(IconRenderer::new(fonts)),
            config: Arc::new(config),
        }
    }

    /// 按配置加载字体并创建工厂
    pub fn from_config(config: &EngineConfig, messenger: Option<Arc<dyn BinaryMessenger>>) -> Result<Self> {
        let fonts = FontRegistry::from_entries(&config.fonts)?;
        Ok(Self::new(messenger, Arc::new(fonts), config.sync.clone()))
    }

    pub fn create(&self, view_id: i64, frame: Rect, args: Option<&Value>) -> Result<MenuView> {
        MenuView::new(
            view_id,
            frame,
            args,
            self.messenger.clone(),
            self.icons.clone(),
            self.config.clone(),
        )
    }
}

/// 视图实例表
pub struct ViewRegistry {
    factory: MenuViewFactory,
    views: HashMap<i64, MenuView>,
}

impl ViewRegistry {
    pub fn new(factory: MenuViewFactory) -> Self {
        Self {
            factory,
            views: HashMap::new(),
        }
    }

    pub fn create(&mut self, view_id: i64, frame: Rect, args: Option<&Value>) -> Result<&mut MenuView> {
        let view = self.factory.create(view_id, frame, args)?;
        let slot = match self.views.entry(view_id) {
            Entry::Occupied(mut entry) => {
                log::warn!("view {} already exists, replacing it", view_id);
                entry.insert(view);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(view),
        };
        Ok(slot)
    }

    pub fn get(&self, view_id: i64) -> Option<&MenuView> {
        self.views.get(&view_id)
    }

    pub fn dispose(&mut self, view_id: i64) -> Option<MenuView> {
        self.views.remove(&view_id)
    }

    /// 把入站调用转给对应实例；实例不存在时按不支持处理
    pub fn dispatch(&mut self, view_id: i64, call: &MethodCall) -> MethodResult {
        match self.views.get_mut(&view_id) {
            Some(view) => view.handle(call),
            None => MethodResult::NotImplemented,
        }
    }
}
