/// 改名命令
#[derive(Debug, Clone)]
pub struct RenameConversationCommand {
    pub conversation_id: String,
    pub new_title: String,
}

/// 退出会话命令
#[derive(Debug, Clone)]
pub struct LeaveConversationCommand {
    pub conversation_id: String,
}

/// 删除会话命令
#[derive(Debug, Clone)]
pub struct DeleteConversationCommand {
    pub conversation_id: String,
}

/// 更新管理员集合命令（子表单编辑结果）
#[derive(Debug, Clone)]
pub struct UpdateAdminsCommand {
    pub conversation_id: String,
    pub user_ids: Vec<String>,
}

/// 更新参与者集合命令（子表单编辑结果）
#[derive(Debug, Clone)]
pub struct UpdateParticipantsCommand {
    pub conversation_id: String,
    pub user_ids: Vec<String>,
}

/// 登出命令
#[derive(Debug, Clone, Default)]
pub struct LogoutCommand {}
