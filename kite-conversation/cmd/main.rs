//! 会话列表演示程序
//!
//! 跑在内存后端上：先模拟服务端推送事件，再依次演示菜单操作。

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use kite_client_core::config::load_config_or_default;
use kite_client_core::telemetry::init_telemetry_from_config;
use kite_conversation::domain::model::Conversation;
use kite_conversation::interface::screen::UserFeedback;
use kite_conversation::service::wire;

/// 演示用反馈实现：提示框走日志，确认框一律同意
struct LoggingFeedback;

impl UserFeedback for LoggingFeedback {
    fn show_alert(&self, title: &str, detail: &str) {
        info!(title, detail, "ALERT");
    }

    fn confirm(&self, prompt: &str) -> bool {
        info!(prompt, "CONFIRM -> yes");
        true
    }

    fn show_progress(&self, label: &str) {
        info!(label, "PROGRESS shown");
    }

    fn dismiss_progress(&self) {
        info!("PROGRESS dismissed");
    }

    fn navigate_to_login(&self) {
        info!("NAVIGATE -> login");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "kite.toml".to_string());
    let config = load_config_or_default(&config_path)
        .with_context(|| format!("Failed to load configuration from {config_path}"))?;
    init_telemetry_from_config(Some(&config.logging));

    let feedback = Arc::new(LoggingFeedback);
    let (backend, mut context) = wire::initialize_in_memory(&config, feedback)?;

    backend.seed(vec![
        Conversation::new(uuid::Uuid::new_v4().to_string(), "General"),
        Conversation::new(uuid::Uuid::new_v4().to_string(), "Random"),
    ]);

    let screen = &mut context.screen;
    screen.activate().await;
    info!(count = screen.conversations().len(), "Initial list loaded");

    // 模拟其他客户端新建会话并推送事件
    let pushed = Conversation::new(uuid::Uuid::new_v4().to_string(), "Announcements");
    backend.insert_remote(pushed.clone());
    screen.pump_events();
    info!(count = screen.conversations().len(), "After create event");

    // 菜单操作演示
    screen.rename_requested(&pushed.id, "Broadcast").await;
    screen
        .admins_edited(&pushed.id, vec!["alice".into(), "bob".into()])
        .await;
    screen.delete_requested(&pushed.id).await;

    let snapshot = serde_json::to_string_pretty(&screen.conversations())
        .context("Failed to serialize conversation snapshot")?;
    println!("{snapshot}");

    screen.logout_requested().await;
    Ok(())
}
