use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 会话模型
///
/// 服务端拥有数据所有权，客户端只持有用于展示的只读副本；
/// 副本只会被操作成功后服务端返回的新副本整体替换。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    /// 参与者 ID（去重，保持加入顺序）
    pub participant_ids: Vec<String>,
    /// 管理员 ID（子集约束由服务端保证）
    pub admin_ids: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            participant_ids: Vec::new(),
            admin_ids: Vec::new(),
            updated_at: Utc::now(),
        }
    }
}

/// 服务端推送的会话订阅事件
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ConversationEvent {
    /// 新建会话
    Create { conversation: Conversation },
    /// 会话内容变更（标题、成员等）
    Update { conversation: Conversation },
    /// 会话被删除（或当前用户被移出）
    Delete { conversation_id: String },
}

impl ConversationEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            ConversationEvent::Create { .. } => "create",
            ConversationEvent::Update { .. } => "update",
            ConversationEvent::Delete { .. } => "delete",
        }
    }

    /// 事件指向的会话 ID
    pub fn conversation_id(&self) -> &str {
        match self {
            ConversationEvent::Create { conversation }
            | ConversationEvent::Update { conversation } => &conversation.id,
            ConversationEvent::Delete { conversation_id } => conversation_id,
        }
    }
}

/// 归一化子表单提交的用户 ID 集合：去重并保持首次出现顺序
pub fn normalize_user_ids<I, S>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for id in ids {
        let id = id.into();
        if id.is_empty() {
            continue;
        }
        if seen.insert(id.clone()) {
            out.push(id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_strings_match_sdk_wire_names() {
        let conv = Conversation::new("c1", "General");
        assert_eq!(
            ConversationEvent::Create {
                conversation: conv.clone()
            }
            .event_type(),
            "create"
        );
        assert_eq!(
            ConversationEvent::Update { conversation: conv }.event_type(),
            "update"
        );
        assert_eq!(
            ConversationEvent::Delete {
                conversation_id: "c1".into()
            }
            .event_type(),
            "delete"
        );
    }

    #[test]
    fn normalize_user_ids_dedups_and_keeps_order() {
        let ids = normalize_user_ids(["bob", "alice", "bob", "", "carol", "alice"]);
        assert_eq!(ids, vec!["bob", "alice", "carol"]);
    }
}
