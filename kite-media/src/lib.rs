//! 消息渲染核心
//!
//! 文本/图片消息的展示模型，以及把消息字段确定性地灌进展示控件的
//! 行绑定器。图片的网络加载与解码都委托给平台实现，失败不重试、
//! 不提示，图片槽位留空。

pub mod application;
pub mod domain;
pub mod interface;

pub use application::binder::MessageRowBinder;
pub use domain::models::{
    DeliveryState, ImageAttachment, ImageOrientation, Message, MessageBody, SenderProfile,
};
pub use interface::widgets::{ImageSlot, MessageWidgets, RemoteImageRequest};
