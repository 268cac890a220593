//! 展示控件接口
//!
//! 由宿主界面框架实现；行绑定器只通过这两个接口写控件。

use bytes::Bytes;
use url::Url;

use crate::domain::models::ImageOrientation;

/// 消息行的通用控件槽位
pub trait MessageWidgets {
    fn set_username(&mut self, username: &str);
    fn set_avatar(&mut self, avatar_url: Option<&Url>);
    fn set_timestamp(&mut self, text: &str);
    fn set_body_text(&mut self, text: &str);
    /// 清空图片槽位（行复用时避免残影）
    fn clear_image(&mut self);
}

/// 远程图片加载请求
///
/// 缩略图作为占位，宽高与方向用于提前确定布局尺寸。
#[derive(Clone, Copy, Debug)]
pub struct RemoteImageRequest<'a> {
    pub url: &'a Url,
    pub thumbnail_url: Option<&'a Url>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub orientation: ImageOrientation,
}

/// 图片槽位：异步加载与解码都在平台实现内部完成
///
/// 加载或解码失败时槽位留空，不重试也不向用户提示。
pub trait ImageSlot {
    fn load_remote(&mut self, request: RemoteImageRequest<'_>);
    fn show_inline(&mut self, data: &Bytes);
}
