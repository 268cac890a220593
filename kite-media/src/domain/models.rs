use std::str::FromStr;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use url::Url;

/// 发送者展示信息
#[derive(Clone, Debug, PartialEq)]
pub struct SenderProfile {
    pub username: String,
    pub avatar_url: Option<Url>,
}

/// 图片方向（SDK 透传的 EXIF 语义）
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ImageOrientation {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl ImageOrientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageOrientation::Up => "up",
            ImageOrientation::Down => "down",
            ImageOrientation::Left => "left",
            ImageOrientation::Right => "right",
        }
    }
}

impl FromStr for ImageOrientation {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "up" => Ok(ImageOrientation::Up),
            "down" => Ok(ImageOrientation::Down),
            "left" => Ok(ImageOrientation::Left),
            "right" => Ok(ImageOrientation::Right),
            _ => Err(()),
        }
    }
}

/// 消息投递状态
///
/// 未落地的外发消息停留在 Sending，落地失败标记 Failed。
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DeliveryState {
    Sending,
    #[default]
    Delivered,
    Failed,
}

impl DeliveryState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryState::Sending => "sending",
            DeliveryState::Delivered => "delivered",
            DeliveryState::Failed => "failed",
        }
    }
}

/// 图片附件
///
/// 远程 URL 与内联字节可能同时存在（发送方本地回显场景），
/// 绑定时优先走 URL 路径。
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageAttachment {
    pub url: Option<Url>,
    pub thumbnail_url: Option<Url>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub orientation: ImageOrientation,
    pub inline_data: Option<Bytes>,
}

/// 消息体（文本/图片二选一）
#[derive(Clone, Debug, PartialEq)]
pub enum MessageBody {
    Text { text: String },
    Image(ImageAttachment),
}

/// 展示用消息对象，构造后不可变，一次展示周期绑定一次
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub id: String,
    pub sender: SenderProfile,
    pub sent_at: DateTime<Utc>,
    pub delivery_state: DeliveryState,
    pub body: MessageBody,
}

impl Message {
    pub fn kind(&self) -> &'static str {
        match self.body {
            MessageBody::Text { .. } => "text",
            MessageBody::Image(_) => "image",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_round_trips_through_str() {
        for orientation in [
            ImageOrientation::Up,
            ImageOrientation::Down,
            ImageOrientation::Left,
            ImageOrientation::Right,
        ] {
            assert_eq!(orientation.as_str().parse(), Ok(orientation));
        }
        assert!("sideways".parse::<ImageOrientation>().is_err());
    }

    #[test]
    fn message_kind_follows_body_variant() {
        let sender = SenderProfile {
            username: "alice".into(),
            avatar_url: None,
        };
        let text = Message {
            id: "m1".into(),
            sender: sender.clone(),
            sent_at: Utc::now(),
            delivery_state: DeliveryState::Delivered,
            body: MessageBody::Text {
                text: "hi".into(),
            },
        };
        let image = Message {
            id: "m2".into(),
            sender,
            sent_at: Utc::now(),
            delivery_state: DeliveryState::Delivered,
            body: MessageBody::Image(ImageAttachment::default()),
        };
        assert_eq!(text.kind(), "text");
        assert_eq!(image.kind(), "image");
    }
}
