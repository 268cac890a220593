pub mod conversation_list_service;

pub use conversation_list_service::ConversationListService;
