//! 条目详情消息处理

use crate::backend::Command;
use crate::message::RecordMessage;
use crate::model::{App, View};

pub fn update(app: &mut App, msg: RecordMessage) -> Vec<Command> {
    let record = &mut app.record;
    match msg {
        RecordMessage::ScrollUp => record.scroll_up(),
        RecordMessage::ScrollDown => record.scroll_down(),
        RecordMessage::PageUp => record.page_up(),
        RecordMessage::PageDown => record.page_down(),
        RecordMessage::First => record.first(),
        RecordMessage::Last => record.last(),
        RecordMessage::Select(index) => record.select(index),
        RecordMessage::Back => {
            let target = record.return_to;
            app.view = if app.can_enter(target) {
                target
            } else {
                View::Start
            };
        }
    }
    Vec::new()
}
