use std::sync::Arc;

use kite_client_core::Result;
use tracing::{debug, info, warn};

use crate::application::commands::{
    DeleteConversationCommand, LeaveConversationCommand, LogoutCommand, RenameConversationCommand,
    UpdateAdminsCommand, UpdateParticipantsCommand,
};
use crate::domain::model::Conversation;
use crate::domain::repository::AuthBackend;
use crate::domain::service::ConversationListService;

/// 会话命令处理器
///
/// 破坏性操作（改名、退出、删除、登出）把错误原样抛给界面层弹窗；
/// 被动操作（管理员/参与者更新）失败只记 warn 日志（被动失败策略）。
pub struct ConversationCommandHandler {
    service: Arc<ConversationListService>,
    auth: Arc<dyn AuthBackend>,
}

impl ConversationCommandHandler {
    pub fn new(service: Arc<ConversationListService>, auth: Arc<dyn AuthBackend>) -> Self {
        Self { service, auth }
    }

    /// 处理改名命令
    pub async fn handle_rename(
        &self,
        command: RenameConversationCommand,
    ) -> Result<Conversation> {
        debug!(
            conversation_id = %command.conversation_id,
            new_title = %command.new_title,
            "Handling rename conversation command"
        );

        let updated = self
            .service
            .rename(&command.conversation_id, &command.new_title)
            .await?;

        info!(conversation_id = %updated.id, "Conversation renamed");
        Ok(updated)
    }

    /// 处理退出会话命令
    pub async fn handle_leave(&self, command: LeaveConversationCommand) -> Result<()> {
        debug!(
            conversation_id = %command.conversation_id,
            "Handling leave conversation command"
        );

        self.service.leave(&command.conversation_id).await?;

        info!(conversation_id = %command.conversation_id, "Conversation left");
        Ok(())
    }

    /// 处理删除会话命令
    pub async fn handle_delete(&self, command: DeleteConversationCommand) -> Result<()> {
        debug!(
            conversation_id = %command.conversation_id,
            "Handling delete conversation command"
        );

        self.service.delete(&command.conversation_id).await?;

        info!(conversation_id = %command.conversation_id, "Conversation deleted");
        Ok(())
    }

    /// 处理更新管理员命令（失败静默，仅记日志）
    pub async fn handle_update_admins(&self, command: UpdateAdminsCommand) {
        debug!(
            conversation_id = %command.conversation_id,
            count = command.user_ids.len(),
            "Handling update admins command"
        );

        match self
            .service
            .update_admins(&command.conversation_id, command.user_ids)
            .await
        {
            Ok(updated) => {
                info!(conversation_id = %updated.id, "Conversation admins updated");
            }
            Err(err) => {
                warn!(
                    conversation_id = %command.conversation_id,
                    error = %err,
                    "Update admins failed"
                );
            }
        }
    }

    /// 处理更新参与者命令（失败静默，仅记日志）
    pub async fn handle_update_participants(&self, command: UpdateParticipantsCommand) {
        debug!(
            conversation_id = %command.conversation_id,
            count = command.user_ids.len(),
            "Handling update participants command"
        );

        match self
            .service
            .update_participants(&command.conversation_id, command.user_ids)
            .await
        {
            Ok(updated) => {
                info!(conversation_id = %updated.id, "Conversation participants updated");
            }
            Err(err) => {
                warn!(
                    conversation_id = %command.conversation_id,
                    error = %err,
                    "Update participants failed"
                );
            }
        }
    }

    /// 处理登出命令：成功后丢弃本地缓存
    pub async fn handle_logout(&self, _command: LogoutCommand) -> Result<()> {
        debug!("Handling logout command");

        self.auth.logout().await?;
        self.service.clear();

        info!("Logged out");
        Ok(())
    }
}

/// 会话查询处理器
pub struct ConversationQueryHandler {
    service: Arc<ConversationListService>,
}

impl ConversationQueryHandler {
    pub fn new(service: Arc<ConversationListService>) -> Self {
        Self { service }
    }

    /// 当前缓存快照
    pub fn handle_list_conversations(&self) -> Vec<Conversation> {
        self.service.conversations()
    }

    pub fn handle_get_conversation(&self, conversation_id: &str) -> Option<Conversation> {
        self.service.get(conversation_id)
    }
}
