//! 会话列表领域服务 - 列表缓存与全部业务规则

use std::sync::{Arc, Mutex};

use kite_client_core::Result;
use tracing::{debug, warn};

use crate::domain::model::{Conversation, ConversationEvent, normalize_user_ids};
use crate::domain::repository::ConversationBackend;

/// 会话列表领域服务
///
/// 持有一份镜像服务端状态的有序会话缓存。缓存只通过两条途径变化：
/// 操作成功后用服务端返回的副本整体替换对应条目，或应用服务端推送的
/// 订阅事件。刷新失败时保持现状（被动失败策略，仅记录日志）。
pub struct ConversationListService {
    backend: Arc<dyn ConversationBackend>,
    cache: Mutex<Vec<Conversation>>,
}

impl ConversationListService {
    pub fn new(backend: Arc<dyn ConversationBackend>) -> Self {
        Self {
            backend,
            cache: Mutex::new(Vec::new()),
        }
    }

    /// 当前缓存快照（按服务端返回顺序）
    pub fn conversations(&self) -> Vec<Conversation> {
        self.cache.lock().expect("cache lock poisoned").clone()
    }

    pub fn get(&self, conversation_id: &str) -> Option<Conversation> {
        self.cache
            .lock()
            .expect("cache lock poisoned")
            .iter()
            .find(|c| c.id == conversation_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.cache.lock().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 丢弃本地缓存（登出时调用）
    pub fn clear(&self) {
        self.cache.lock().expect("cache lock poisoned").clear();
    }

    /// 应用服务端推送的订阅事件
    ///
    /// create 与 update 都做按 ID 覆盖写（未知 ID 则追加），保证事件与
    /// `refresh` 以任意顺序到达时缓存都收敛到同一结果；未知 ID 的 delete
    /// 是空操作。
    pub fn apply_event(&self, event: ConversationEvent) {
        debug!(
            event_type = event.event_type(),
            conversation_id = event.conversation_id(),
            "Applying conversation event"
        );
        match event {
            ConversationEvent::Create { conversation }
            | ConversationEvent::Update { conversation } => self.upsert(conversation),
            ConversationEvent::Delete { conversation_id } => {
                self.cache
                    .lock()
                    .expect("cache lock poisoned")
                    .retain(|c| c.id != conversation_id);
            }
        }
    }

    /// 拉取全量会话并整体替换缓存
    ///
    /// 失败时缓存保持不变，由调用方决定是否吞掉错误（被动失败策略）。
    pub async fn refresh(&self) -> Result<()> {
        let fresh = self.backend.fetch_all().await?;
        debug!(count = fresh.len(), "Conversation list refreshed");
        *self.cache.lock().expect("cache lock poisoned") = fresh;
        Ok(())
    }

    /// 改名：成功后用服务端返回的副本替换缓存条目
    pub async fn rename(&self, conversation_id: &str, new_title: &str) -> Result<Conversation> {
        let updated = self.backend.set_title(conversation_id, new_title).await?;
        self.upsert(updated.clone());
        Ok(updated)
    }

    /// 退出会话：成功后触发一次全量刷新
    pub async fn leave(&self, conversation_id: &str) -> Result<()> {
        self.backend.leave(conversation_id).await?;
        if let Err(err) = self.refresh().await {
            warn!(error = %err, "Refresh after leave failed, keeping stale list");
        }
        Ok(())
    }

    /// 删除会话：成功后触发一次全量刷新
    pub async fn delete(&self, conversation_id: &str) -> Result<()> {
        self.backend.delete(conversation_id).await?;
        if let Err(err) = self.refresh().await {
            warn!(error = %err, "Refresh after delete failed, keeping stale list");
        }
        Ok(())
    }

    /// 提交子表单编辑后的管理员集合
    pub async fn update_admins(
        &self,
        conversation_id: &str,
        user_ids: Vec<String>,
    ) -> Result<Conversation> {
        let user_ids = normalize_user_ids(user_ids);
        let updated = self.backend.add_admins(conversation_id, &user_ids).await?;
        self.upsert(updated.clone());
        Ok(updated)
    }

    /// 提交子表单编辑后的参与者集合
    pub async fn update_participants(
        &self,
        conversation_id: &str,
        user_ids: Vec<String>,
    ) -> Result<Conversation> {
        let user_ids = normalize_user_ids(user_ids);
        let updated = self
            .backend
            .add_participants(conversation_id, &user_ids)
            .await?;
        self.upsert(updated.clone());
        Ok(updated)
    }

    /// 按 ID 覆盖写：已存在则替换（保持位置），否则追加
    fn upsert(&self, conversation: Conversation) {
        let mut cache = self.cache.lock().expect("cache lock poisoned");
        match cache.iter_mut().find(|c| c.id == conversation.id) {
            Some(slot) => *slot = conversation,
            None => cache.push(conversation),
        }
    }
}
