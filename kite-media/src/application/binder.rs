//! 消息行绑定器
//!
//! 给定一条消息和一组展示控件，把消息字段确定性地灌进控件。
//! 发送者、头像、时间戳与消息类型无关，始终绑定。

use tracing::debug;

use crate::domain::models::{DeliveryState, Message, MessageBody};
use crate::interface::widgets::{ImageSlot, MessageWidgets, RemoteImageRequest};

pub struct MessageRowBinder;

impl MessageRowBinder {
    /// 一次展示周期绑定一次
    pub fn bind(message: &Message, widgets: &mut dyn MessageWidgets, image: &mut dyn ImageSlot) {
        widgets.set_username(&message.sender.username);
        widgets.set_avatar(message.sender.avatar_url.as_ref());
        widgets.set_timestamp(&format_timestamp(message));

        match &message.body {
            MessageBody::Text { text } => {
                widgets.set_body_text(text);
                widgets.clear_image();
            }
            MessageBody::Image(attachment) => {
                // URL 与内联字节同时存在时优先走 URL 路径
                if let Some(url) = &attachment.url {
                    image.load_remote(RemoteImageRequest {
                        url,
                        thumbnail_url: attachment.thumbnail_url.as_ref(),
                        width: attachment.width,
                        height: attachment.height,
                        orientation: attachment.orientation,
                    });
                } else if let Some(data) = &attachment.inline_data {
                    image.show_inline(data);
                } else {
                    debug!(message_id = %message.id, "Image message without url or inline data");
                    widgets.clear_image();
                }
            }
        }
    }
}

/// 时间戳格式化：HH:MM，未投递成功的消息追加状态符号
fn format_timestamp(message: &Message) -> String {
    let time = message.sent_at.format("%H:%M");
    match message.delivery_state {
        DeliveryState::Delivered => time.to_string(),
        DeliveryState::Sending => format!("{time} …"),
        DeliveryState::Failed => format!("{time} !"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ImageAttachment, ImageOrientation, SenderProfile};
    use bytes::Bytes;
    use chrono::{TimeZone, Utc};
    use url::Url;

    /// 录制控件：记录每次 setter 调用
    #[derive(Default)]
    struct RecordingWidgets {
        username: Option<String>,
        avatar: Option<Option<Url>>,
        timestamp: Option<String>,
        body_text: Option<String>,
        image_cleared: bool,
    }

    impl MessageWidgets for RecordingWidgets {
        fn set_username(&mut self, username: &str) {
            self.username = Some(username.to_string());
        }

        fn set_avatar(&mut self, avatar_url: Option<&Url>) {
            self.avatar = Some(avatar_url.cloned());
        }

        fn set_timestamp(&mut self, text: &str) {
            self.timestamp = Some(text.to_string());
        }

        fn set_body_text(&mut self, text: &str) {
            self.body_text = Some(text.to_string());
        }

        fn clear_image(&mut self) {
            self.image_cleared = true;
        }
    }

    #[derive(Debug, PartialEq)]
    enum SlotCall {
        Remote { url: Url, thumbnail: Option<Url> },
        Inline { len: usize },
    }

    #[derive(Default)]
    struct RecordingSlot {
        calls: Vec<SlotCall>,
    }

    impl ImageSlot for RecordingSlot {
        fn load_remote(&mut self, request: RemoteImageRequest<'_>) {
            self.calls.push(SlotCall::Remote {
                url: request.url.clone(),
                thumbnail: request.thumbnail_url.cloned(),
            });
        }

        fn show_inline(&mut self, data: &Bytes) {
            self.calls.push(SlotCall::Inline { len: data.len() });
        }
    }

    fn sender() -> SenderProfile {
        SenderProfile {
            username: "alice".into(),
            avatar_url: Some(Url::parse("https://cdn.example.com/a.png").unwrap()),
        }
    }

    fn message(body: MessageBody) -> Message {
        Message {
            id: "m1".into(),
            sender: sender(),
            sent_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
            delivery_state: DeliveryState::Delivered,
            body,
        }
    }

    #[test]
    fn text_message_binds_sender_time_and_body() {
        let msg = message(MessageBody::Text {
            text: "hello".into(),
        });
        let mut widgets = RecordingWidgets::default();
        let mut slot = RecordingSlot::default();

        MessageRowBinder::bind(&msg, &mut widgets, &mut slot);

        assert_eq!(widgets.username.as_deref(), Some("alice"));
        assert_eq!(
            widgets.avatar,
            Some(Some(Url::parse("https://cdn.example.com/a.png").unwrap()))
        );
        assert_eq!(widgets.timestamp.as_deref(), Some("09:30"));
        assert_eq!(widgets.body_text.as_deref(), Some("hello"));
        assert!(widgets.image_cleared);
        assert!(slot.calls.is_empty());
    }

    #[test]
    fn image_with_url_and_inline_bytes_prefers_url() {
        let url = Url::parse("https://cdn.example.com/full.jpg").unwrap();
        let thumbnail = Url::parse("https://cdn.example.com/thumb.jpg").unwrap();
        let msg = message(MessageBody::Image(ImageAttachment {
            url: Some(url.clone()),
            thumbnail_url: Some(thumbnail.clone()),
            width: Some(800),
            height: Some(600),
            orientation: ImageOrientation::Right,
            inline_data: Some(Bytes::from_static(b"raw-bytes")),
        }));
        let mut widgets = RecordingWidgets::default();
        let mut slot = RecordingSlot::default();

        MessageRowBinder::bind(&msg, &mut widgets, &mut slot);

        assert_eq!(
            slot.calls,
            vec![SlotCall::Remote {
                url,
                thumbnail: Some(thumbnail),
            }]
        );
    }

    #[test]
    fn image_without_url_falls_back_to_inline_bytes() {
        let msg = message(MessageBody::Image(ImageAttachment {
            inline_data: Some(Bytes::from_static(b"raw-bytes")),
            ..ImageAttachment::default()
        }));
        let mut widgets = RecordingWidgets::default();
        let mut slot = RecordingSlot::default();

        MessageRowBinder::bind(&msg, &mut widgets, &mut slot);

        assert_eq!(slot.calls, vec![SlotCall::Inline { len: 9 }]);
        assert!(!widgets.image_cleared);
    }

    #[test]
    fn image_with_neither_source_leaves_slot_empty() {
        let msg = message(MessageBody::Image(ImageAttachment::default()));
        let mut widgets = RecordingWidgets::default();
        let mut slot = RecordingSlot::default();

        MessageRowBinder::bind(&msg, &mut widgets, &mut slot);

        assert!(slot.calls.is_empty());
        assert!(widgets.image_cleared);
        // 发送者字段照常绑定
        assert_eq!(widgets.username.as_deref(), Some("alice"));
    }

    #[test]
    fn undelivered_states_suffix_the_timestamp() {
        let mut msg = message(MessageBody::Text {
            text: "hi".into(),
        });
        msg.delivery_state = DeliveryState::Sending;

        let mut widgets = RecordingWidgets::default();
        let mut slot = RecordingSlot::default();
        MessageRowBinder::bind(&msg, &mut widgets, &mut slot);
        assert_eq!(widgets.timestamp.as_deref(), Some("09:30 …"));

        msg.delivery_state = DeliveryState::Failed;
        let mut widgets = RecordingWidgets::default();
        MessageRowBinder::bind(&msg, &mut widgets, &mut slot);
        assert_eq!(widgets.timestamp.as_deref(), Some("09:30 !"));
    }

    #[test]
    fn binding_is_deterministic_across_cycles() {
        let msg = message(MessageBody::Text {
            text: "same".into(),
        });

        let mut first = RecordingWidgets::default();
        let mut second = RecordingWidgets::default();
        let mut slot = RecordingSlot::default();
        MessageRowBinder::bind(&msg, &mut first, &mut slot);
        MessageRowBinder::bind(&msg, &mut second, &mut slot);

        assert_eq!(first.username, second.username);
        assert_eq!(first.timestamp, second.timestamp);
        assert_eq!(first.body_text, second.body_text);
    }
}
