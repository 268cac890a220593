//! 会话列表界面胶水层
//!
//! 把用户交互事件翻译成应用层命令，并按错误策略决定反馈方式：
//! 破坏性操作失败弹一次可关闭的提示框（带服务端 detail），被动操作
//! 失败只记日志。订阅随界面激活/失活建立与丢弃，失活期间的事件不做
//! 缓冲，靠下一次激活时的刷新对账。

use std::sync::Arc;

use kite_client_core::config::ConversationConfig;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{debug, info, warn};

use crate::application::commands::{
    DeleteConversationCommand, LeaveConversationCommand, LogoutCommand, RenameConversationCommand,
    UpdateAdminsCommand, UpdateParticipantsCommand,
};
use crate::application::handlers::{ConversationCommandHandler, ConversationQueryHandler};
use crate::domain::model::{Conversation, ConversationEvent};
use crate::domain::repository::ConversationBackend;
use crate::domain::service::ConversationListService;

const ALERT_TITLE: &str = "Oops";

/// 平台弹窗/导航接口，由宿主界面实现
pub trait UserFeedback: Send + Sync {
    /// 可关闭的提示框
    fn show_alert(&self, title: &str, detail: &str);
    /// 确认框，返回用户是否确认
    fn confirm(&self, prompt: &str) -> bool;
    fn show_progress(&self, label: &str);
    fn dismiss_progress(&self);
    /// 登出成功后跳转到登录界面
    fn navigate_to_login(&self);
}

/// 会话列表界面
pub struct ConversationListScreen {
    service: Arc<ConversationListService>,
    commands: ConversationCommandHandler,
    queries: ConversationQueryHandler,
    backend: Arc<dyn ConversationBackend>,
    feedback: Arc<dyn UserFeedback>,
    refresh_on_activate: bool,
    subscription: Option<broadcast::Receiver<ConversationEvent>>,
}

impl ConversationListScreen {
    pub fn new(
        service: Arc<ConversationListService>,
        commands: ConversationCommandHandler,
        queries: ConversationQueryHandler,
        backend: Arc<dyn ConversationBackend>,
        feedback: Arc<dyn UserFeedback>,
        config: &ConversationConfig,
    ) -> Self {
        Self {
            service,
            commands,
            queries,
            backend,
            feedback,
            refresh_on_activate: config.refresh_on_activate,
            subscription: None,
        }
    }

    /// 界面进入前台：建立订阅，然后刷新列表
    ///
    /// 先订阅后刷新，保证刷新期间产生的事件不会丢失；刷新失败静默
    /// （被动失败策略），界面继续展示旧状态。配置关闭自动刷新时只建立
    /// 订阅，由宿主自行决定何时刷新。
    pub async fn activate(&mut self) {
        self.subscription = Some(self.backend.subscribe());
        info!("Conversation screen activated");

        if !self.refresh_on_activate {
            debug!("Refresh on activate disabled by config");
            return;
        }
        if let Err(err) = self.service.refresh().await {
            warn!(error = %err, "Initial refresh failed, keeping previous list");
        }
    }

    /// 界面退到后台：丢弃订阅，期间事件不缓冲
    pub fn deactivate(&mut self) {
        self.subscription = None;
        info!("Conversation screen deactivated");
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    /// 把已到达的订阅事件应用到缓存（由宿主事件循环周期性调用）
    pub fn pump_events(&mut self) {
        let Some(rx) = self.subscription.as_mut() else {
            return;
        };
        loop {
            match rx.try_recv() {
                Ok(event) => self.service.apply_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Lagged(missed)) => {
                    // 滞后丢弃的事件由下一次刷新对账
                    warn!(missed, "Subscription lagged, events dropped");
                }
                Err(TryRecvError::Closed) => {
                    warn!("Subscription channel closed");
                    self.subscription = None;
                    break;
                }
            }
        }
    }

    /// 当前展示的会话列表
    pub fn conversations(&self) -> Vec<Conversation> {
        self.queries.handle_list_conversations()
    }

    pub fn conversation(&self, conversation_id: &str) -> Option<Conversation> {
        self.queries.handle_get_conversation(conversation_id)
    }

    /// 菜单操作：改名
    pub async fn rename_requested(&self, conversation_id: &str, new_title: &str) {
        let command = RenameConversationCommand {
            conversation_id: conversation_id.to_string(),
            new_title: new_title.to_string(),
        };
        if let Err(err) = self.commands.handle_rename(command).await {
            self.feedback.show_alert(
                ALERT_TITLE,
                &format!("Fail to update the conversation: {}", err.detail()),
            );
        }
    }

    /// 菜单操作：退出会话（需确认）
    pub async fn leave_requested(&self, conversation_id: &str) {
        if !self
            .feedback
            .confirm("Are you sure to leave the conversation?")
        {
            debug!(conversation_id, "Leave cancelled by user");
            return;
        }
        let command = LeaveConversationCommand {
            conversation_id: conversation_id.to_string(),
        };
        if let Err(err) = self.commands.handle_leave(command).await {
            self.feedback.show_alert(
                ALERT_TITLE,
                &format!("Fail to leave the conversation: {}", err.detail()),
            );
        }
    }

    /// 菜单操作：删除会话（需确认）
    pub async fn delete_requested(&self, conversation_id: &str) {
        if !self
            .feedback
            .confirm("Are you sure to delete the conversation?")
        {
            debug!(conversation_id, "Delete cancelled by user");
            return;
        }
        let command = DeleteConversationCommand {
            conversation_id: conversation_id.to_string(),
        };
        if let Err(err) = self.commands.handle_delete(command).await {
            self.feedback.show_alert(
                ALERT_TITLE,
                &format!("Fail to delete the conversation: {}", err.detail()),
            );
        }
    }

    /// 子表单提交：管理员集合（失败静默）
    pub async fn admins_edited(&self, conversation_id: &str, user_ids: Vec<String>) {
        let command = UpdateAdminsCommand {
            conversation_id: conversation_id.to_string(),
            user_ids,
        };
        self.commands.handle_update_admins(command).await;
    }

    /// 子表单提交：参与者集合（失败静默）
    pub async fn participants_edited(&self, conversation_id: &str, user_ids: Vec<String>) {
        let command = UpdateParticipantsCommand {
            conversation_id: conversation_id.to_string(),
            user_ids,
        };
        self.commands.handle_update_participants(command).await;
    }

    /// 菜单操作：登出（需确认，带进度提示）
    pub async fn logout_requested(&mut self) {
        if !self.feedback.confirm("Are you sure to log out?") {
            debug!("Logout cancelled by user");
            return;
        }

        self.feedback.show_progress("Logging out...");
        match self.commands.handle_logout(LogoutCommand::default()).await {
            Ok(()) => {
                self.feedback.dismiss_progress();
                self.deactivate();
                self.feedback.navigate_to_login();
            }
            Err(err) => {
                self.feedback.dismiss_progress();
                self.feedback
                    .show_alert("Logout failed", &err.detail());
            }
        }
    }
}
