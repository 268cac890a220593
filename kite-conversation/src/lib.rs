//! 会话列表核心
//!
//! 维护一份镜像服务端状态的会话列表缓存，消费服务端推送的
//! create/update/delete 订阅事件，并将菜单操作（改名、退出、删除、
//! 管理员/参与者管理、登出）转发给外部聊天 SDK。

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod service;

pub use domain::model::{Conversation, ConversationEvent};
pub use domain::repository::{AuthBackend, ConversationBackend};
pub use domain::service::ConversationListService;
pub use interface::screen::{ConversationListScreen, UserFeedback};
