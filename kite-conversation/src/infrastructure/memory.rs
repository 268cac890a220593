//! 内存版聊天后端
//!
//! 外部聊天 SDK 的进程内替身：持有会话状态、广播订阅事件，并支持
//! 按操作注入一次性失败，供演示程序与测试驱动界面/应用层。

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use kite_client_core::{ClientError, Result};
use tokio::sync::broadcast;

use crate::domain::model::{Conversation, ConversationEvent, normalize_user_ids};
use crate::domain::repository::{AuthBackend, ConversationBackend};

/// 可注入失败的后端操作
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BackendOp {
    FetchAll,
    SetTitle,
    AddAdmins,
    AddParticipants,
    Leave,
    Delete,
    Logout,
}

pub struct InMemoryChatBackend {
    state: Mutex<Vec<Conversation>>,
    failures: Mutex<HashMap<BackendOp, String>>,
    events: broadcast::Sender<ConversationEvent>,
}

impl InMemoryChatBackend {
    pub fn new(event_buffer: usize) -> Self {
        let (events, _) = broadcast::channel(event_buffer);
        Self {
            state: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            events,
        }
    }

    /// 整体替换服务端状态（不产生事件）
    pub fn seed(&self, conversations: Vec<Conversation>) {
        *self.state.lock().expect("state lock poisoned") = conversations;
    }

    /// 指定操作的下一次调用返回携带 detail 的失败
    pub fn fail_next(&self, op: BackendOp, detail: impl Into<String>) {
        self.failures
            .lock()
            .expect("failures lock poisoned")
            .insert(op, detail.into());
    }

    /// 模拟其他客户端新建会话：写入状态并广播 create 事件
    pub fn insert_remote(&self, conversation: Conversation) {
        self.state
            .lock()
            .expect("state lock poisoned")
            .push(conversation.clone());
        let _ = self.events.send(ConversationEvent::Create { conversation });
    }

    /// 模拟服务端推送的会话变更：覆盖状态并广播 update 事件
    pub fn update_remote(&self, conversation: Conversation) {
        {
            let mut state = self.state.lock().expect("state lock poisoned");
            match state.iter_mut().find(|c| c.id == conversation.id) {
                Some(slot) => *slot = conversation.clone(),
                None => state.push(conversation.clone()),
            }
        }
        let _ = self.events.send(ConversationEvent::Update { conversation });
    }

    /// 模拟服务端删除会话：移除状态并广播 delete 事件
    pub fn remove_remote(&self, conversation_id: &str) {
        self.state
            .lock()
            .expect("state lock poisoned")
            .retain(|c| c.id != conversation_id);
        let _ = self.events.send(ConversationEvent::Delete {
            conversation_id: conversation_id.to_string(),
        });
    }

    fn take_failure(&self, op: BackendOp) -> Result<()> {
        if let Some(detail) = self
            .failures
            .lock()
            .expect("failures lock poisoned")
            .remove(&op)
        {
            return Err(ClientError::backend(detail));
        }
        Ok(())
    }

    fn get_required(&self, conversation_id: &str) -> Result<Conversation> {
        self.state
            .lock()
            .expect("state lock poisoned")
            .iter()
            .find(|c| c.id == conversation_id)
            .cloned()
            .ok_or_else(|| ClientError::backend(format!("conversation {conversation_id} not found")))
    }
}

#[async_trait]
impl ConversationBackend for InMemoryChatBackend {
    async fn fetch_all(&self) -> Result<Vec<Conversation>> {
        self.take_failure(BackendOp::FetchAll)?;
        Ok(self.state.lock().expect("state lock poisoned").clone())
    }

    async fn set_title(&self, conversation_id: &str, title: &str) -> Result<Conversation> {
        self.take_failure(BackendOp::SetTitle)?;
        let updated = {
            let mut state = self.state.lock().expect("state lock poisoned");
            let slot = state
                .iter_mut()
                .find(|c| c.id == conversation_id)
                .ok_or_else(|| {
                    ClientError::backend(format!("conversation {conversation_id} not found"))
                })?;
            slot.title = title.to_string();
            slot.updated_at = Utc::now();
            slot.clone()
        };
        let _ = self.events.send(ConversationEvent::Update {
            conversation: updated.clone(),
        });
        Ok(updated)
    }

    async fn add_admins(
        &self,
        conversation_id: &str,
        user_ids: &[String],
    ) -> Result<Conversation> {
        self.take_failure(BackendOp::AddAdmins)?;
        let updated = {
            let mut state = self.state.lock().expect("state lock poisoned");
            let slot = state
                .iter_mut()
                .find(|c| c.id == conversation_id)
                .ok_or_else(|| {
                    ClientError::backend(format!("conversation {conversation_id} not found"))
                })?;
            let mut merged = slot.admin_ids.clone();
            merged.extend(user_ids.iter().cloned());
            slot.admin_ids = normalize_user_ids(merged);
            slot.updated_at = Utc::now();
            slot.clone()
        };
        let _ = self.events.send(ConversationEvent::Update {
            conversation: updated.clone(),
        });
        Ok(updated)
    }

    async fn add_participants(
        &self,
        conversation_id: &str,
        user_ids: &[String],
    ) -> Result<Conversation> {
        self.take_failure(BackendOp::AddParticipants)?;
        let updated = {
            let mut state = self.state.lock().expect("state lock poisoned");
            let slot = state
                .iter_mut()
                .find(|c| c.id == conversation_id)
                .ok_or_else(|| {
                    ClientError::backend(format!("conversation {conversation_id} not found"))
                })?;
            let mut merged = slot.participant_ids.clone();
            merged.extend(user_ids.iter().cloned());
            slot.participant_ids = normalize_user_ids(merged);
            slot.updated_at = Utc::now();
            slot.clone()
        };
        let _ = self.events.send(ConversationEvent::Update {
            conversation: updated.clone(),
        });
        Ok(updated)
    }

    async fn leave(&self, conversation_id: &str) -> Result<()> {
        self.take_failure(BackendOp::Leave)?;
        self.get_required(conversation_id)?;
        self.state
            .lock()
            .expect("state lock poisoned")
            .retain(|c| c.id != conversation_id);
        let _ = self.events.send(ConversationEvent::Delete {
            conversation_id: conversation_id.to_string(),
        });
        Ok(())
    }

    async fn delete(&self, conversation_id: &str) -> Result<()> {
        self.take_failure(BackendOp::Delete)?;
        self.get_required(conversation_id)?;
        self.state
            .lock()
            .expect("state lock poisoned")
            .retain(|c| c.id != conversation_id);
        let _ = self.events.send(ConversationEvent::Delete {
            conversation_id: conversation_id.to_string(),
        });
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.events.subscribe()
    }
}

#[async_trait]
impl AuthBackend for InMemoryChatBackend {
    async fn logout(&self) -> Result<()> {
        self.take_failure(BackendOp::Logout)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn injected_failure_is_one_shot() {
        let backend = InMemoryChatBackend::new(4);
        backend.fail_next(BackendOp::FetchAll, "boom");

        assert!(backend.fetch_all().await.is_err());
        assert!(backend.fetch_all().await.is_ok());
    }

    #[tokio::test]
    async fn remote_mutations_broadcast_events() {
        let backend = InMemoryChatBackend::new(4);
        let mut rx = backend.subscribe();

        backend.insert_remote(Conversation::new("c1", "General"));
        backend.remove_remote("c1");

        assert_eq!(rx.recv().await.unwrap().event_type(), "create");
        assert_eq!(rx.recv().await.unwrap().event_type(), "delete");
    }
}
