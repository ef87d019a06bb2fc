//! 目录树消息处理

use crate::backend::Command;
use crate::message::TreeMessage;
use crate::model::{App, View};

pub fn update(app: &mut App, msg: TreeMessage) -> Vec<Command> {
    let Some(generation) = app.session_generation() else {
        return Vec::new();
    };
    let tree = &mut app.tree;

    let load = match msg {
        TreeMessage::CursorUp => {
            tree.cursor_up();
            None
        }
        TreeMessage::CursorDown => {
            tree.cursor_down();
            None
        }
        TreeMessage::PageUp => {
            tree.page_up();
            None
        }
        TreeMessage::PageDown => {
            tree.page_down();
            None
        }
        TreeMessage::First => {
            tree.first();
            None
        }
        TreeMessage::Last => {
            tree.last();
            None
        }
        TreeMessage::Toggle => tree.toggle_selected(),
        TreeMessage::Expand => tree.expand_selected(),
        TreeMessage::Collapse => {
            tree.collapse_selected();
            None
        }
        TreeMessage::Refresh => tree.refresh_selected(),
        TreeMessage::Activate(index) => {
            tree.select(index);
            tree.toggle_selected()
        }
        TreeMessage::OpenRecord => return open_record(app, generation),
    };

    load.map(|dn| Command::LoadChildren { generation, dn })
        .into_iter()
        .collect()
}

/// 获取选中条目，完成后进入 Record
fn open_record(app: &mut App, generation: u64) -> Vec<Command> {
    let Some(dn) = app.tree.selected().map(|row| row.dn.clone()) else {
        return Vec::new();
    };
    app.record.begin(&dn, View::Tree);
    app.set_status(format!("Loading {dn}..."));
    vec![Command::FetchEntry { generation, dn }]
}
