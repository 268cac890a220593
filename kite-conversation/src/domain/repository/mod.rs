use async_trait::async_trait;
use kite_client_core::Result;
use tokio::sync::broadcast;

use crate::domain::model::{Conversation, ConversationEvent};

/// 会话后端接口（外部聊天 SDK 的抽象，作为 trait 对象使用）
///
/// 所有网络、序列化与存储细节都在实现内部完成；失败时错误中携带
/// 服务端返回的 detail 文案。
#[async_trait]
pub trait ConversationBackend: Send + Sync {
    /// 拉取当前用户的全部会话
    async fn fetch_all(&self) -> Result<Vec<Conversation>>;

    /// 修改会话标题，成功时返回更新后的会话副本
    async fn set_title(&self, conversation_id: &str, title: &str) -> Result<Conversation>;

    /// 追加管理员，成功时返回更新后的会话副本
    async fn add_admins(&self, conversation_id: &str, user_ids: &[String])
    -> Result<Conversation>;

    /// 追加参与者，成功时返回更新后的会话副本
    async fn add_participants(
        &self,
        conversation_id: &str,
        user_ids: &[String],
    ) -> Result<Conversation>;

    /// 当前用户退出会话
    async fn leave(&self, conversation_id: &str) -> Result<()>;

    /// 删除会话
    async fn delete(&self, conversation_id: &str) -> Result<()>;

    /// 订阅会话的 create/update/delete 推送事件
    ///
    /// 返回一个新的接收端；丢弃接收端即取消订阅，期间错过的事件
    /// 由下一次 `fetch_all` 对账。
    fn subscribe(&self) -> broadcast::Receiver<ConversationEvent>;
}

/// 会话鉴权接口（登出）
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn logout(&self) -> Result<()>;
}
