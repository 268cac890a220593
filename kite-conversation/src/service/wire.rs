//! Wire 风格的依赖注入模块
//!
//! 按依赖顺序组装会话列表界面所需的全部组件

use std::sync::Arc;

use anyhow::Result;

use kite_client_core::config::AppConfig;

use crate::application::handlers::{ConversationCommandHandler, ConversationQueryHandler};
use crate::domain::repository::{AuthBackend, ConversationBackend};
use crate::domain::service::ConversationListService;
use crate::infrastructure::memory::InMemoryChatBackend;
use crate::interface::screen::{ConversationListScreen, UserFeedback};

/// 应用上下文 - 包含组装完成的界面
pub struct ApplicationContext {
    pub screen: ConversationListScreen,
}

/// 基于给定后端构建应用上下文
pub fn initialize(
    app_config: &AppConfig,
    backend: Arc<dyn ConversationBackend>,
    auth: Arc<dyn AuthBackend>,
    feedback: Arc<dyn UserFeedback>,
) -> Result<ApplicationContext> {
    let service = Arc::new(ConversationListService::new(backend.clone()));
    let commands = ConversationCommandHandler::new(service.clone(), auth);
    let queries = ConversationQueryHandler::new(service.clone());
    let screen = ConversationListScreen::new(
        service,
        commands,
        queries,
        backend,
        feedback,
        &app_config.conversation,
    );

    Ok(ApplicationContext { screen })
}

/// 构建内存后端版的应用上下文（演示与本地开发用）
pub fn initialize_in_memory(
    app_config: &AppConfig,
    feedback: Arc<dyn UserFeedback>,
) -> Result<(Arc<InMemoryChatBackend>, ApplicationContext)> {
    let backend = Arc::new(InMemoryChatBackend::new(app_config.conversation.event_buffer));
    let context = initialize(app_config, backend.clone(), backend.clone(), feedback)?;
    Ok((backend, context))
}
