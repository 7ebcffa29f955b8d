//! 预览程序：应用一份属性表，输出快照并模拟交互
//!
//! 用法: native-menu-preview <props.json> [--config engine.json] [--font 名称=路径]...
//!       [--label 名称] [--out preview.png]

use clap::Parser;
use native_menu::channel::{channel_for, BinaryMessenger, MethodCall, RecordingMessenger, VIEW_TYPE};
use native_menu::font::FontRegistry;
use native_menu::{EngineConfig, MenuViewFactory, Rect, ViewRegistry};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

/// 参数 `--font` 的值：`名称=路径`
fn parse_font(value: &str) -> Result<(String, String), String> {
    value
        .split_once('=')
        .map(|(family, path)| (family.to_string(), path.to_string()))
        .ok_or_else(|| format!("expected 名称=路径, got {:?}", value))
}

#[derive(Parser, Debug)]
#[command(name = "native-menu-preview", version, about = "Apply a property bag and render a snapshot")]
struct Cli {
    /// 属性表 JSON 文件
    props: PathBuf,

    /// 引擎配置 JSON 文件
    #[arg(long)]
    config: Option<String>,

    /// 额外注册的字体，可重复
    #[arg(long = "font", value_name = "名称=路径", value_parser = parse_font)]
    fonts: Vec<(String, String)>,

    /// 绘制标题用的字体族
    #[arg(long)]
    label: Option<String>,

    /// 快照输出路径
    #[arg(long, default_value = "native_menu_preview.png")]
    out: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Cli::parse();
    let config = match &options.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    let mut fonts = FontRegistry::from_entries(&config.fonts)?;
    for (family, path) in &options.fonts {
        fonts.register_file(family.clone(), path)?;
    }
    if fonts.is_empty() {
        log::warn!("no fonts registered, icons will not render");
    } else {
        log::info!("{} font(s) registered", fonts.len());
    }

    let raw = std::fs::read_to_string(&options.props)
        .map_err(|e| format!("failed to read {}: {}", options.props.display(), e))?;
    let props: serde_json::Value = serde_json::from_str(&raw)?;

    let messenger = Arc::new(RecordingMessenger::new());
    let outbound: Arc<dyn BinaryMessenger> = messenger.clone();
    let factory = MenuViewFactory::new(Some(outbound), Arc::new(fonts), config.sync.clone());
    let mut registry = ViewRegistry::new(factory);

    let view_id = 0;
    let view = registry.create(view_id, Rect::new(0.0, 0.0, 200.0, 50.0), Some(&props))?;
    println!("🚀 {} #{} -> {}", VIEW_TYPE, view.view_id(), channel_for(view.view_id()));

    let canvas = view.snapshot(options.label.as_deref())?;
    canvas.save_png(&options.out)?;
    println!("✅ Snapshot written to {}", options.out);

    // 模拟交互
    println!("\n--- Simulating interactions ---");
    println!("tap -> {:?}", view.tap());
    if let Some(menu) = view.button().state().menu.as_ref() {
        for action in menu.actions() {
            println!("select {} ({})", action.id, action.title);
            view.select_action(&action.id);
        }
    }

    // 只改尺寸
    let resize = MethodCall::new("updateSize", Some(json!({ "size": { "width": 120, "height": 40 } })));
    println!("updateSize -> {:?}", registry.dispatch(view_id, &resize));

    println!("\n📤 Outbound messages:");
    for (channel, call) in messenger.drain() {
        println!("   {} {}", channel, serde_json::to_string(&call)?);
    }

    Ok(())
}
