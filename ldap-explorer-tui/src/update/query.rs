//! 自定义查询消息处理

use crate::backend::Command;
use crate::message::QueryMessage;
use crate::model::{App, PageFetch, View};

pub fn update(app: &mut App, msg: QueryMessage) -> Vec<Command> {
    let Some(generation) = app.session_generation() else {
        return Vec::new();
    };
    let query = &mut app.query;

    match msg {
        QueryMessage::Input(c) => query.insert_char(c),
        QueryMessage::Backspace => query.backspace(),
        QueryMessage::Clear => query.clear_filter(),

        QueryMessage::Submit => match query.submit() {
            Ok(fetch) => {
                app.set_status(format!("Searching {}...", fetch.filter));
                return vec![fetch_page(generation, fetch)];
            }
            Err(e) => app.set_error(e.to_string()),
        },

        QueryMessage::LoadMore => {
            if let Some(fetch) = query.load_more() {
                app.set_status("Loading more...");
                return vec![fetch_page(generation, fetch)];
            }
        }

        QueryMessage::Cancel => {
            query.cancel();
            app.clear_status();
        }

        QueryMessage::CursorUp => query.cursor_up(),
        QueryMessage::CursorDown => query.cursor_down(),
        QueryMessage::PageUp => query.page_up(),
        QueryMessage::PageDown => query.page_down(),
        QueryMessage::First => query.first(),
        QueryMessage::Last => query.last(),

        QueryMessage::OpenRecord => return open_record(app, generation),
        QueryMessage::Activate(index) => {
            query.select(index);
            return open_record(app, generation);
        }
    }
    Vec::new()
}

fn fetch_page(generation: u64, fetch: PageFetch) -> Command {
    Command::FetchQueryPage { generation, fetch }
}

fn open_record(app: &mut App, generation: u64) -> Vec<Command> {
    let Some(dn) = app.query.selected().map(|entry| entry.dn.clone()) else {
        return Vec::new();
    };
    app.record.begin(&dn, View::Query);
    app.set_status(format!("Loading {dn}..."));
    vec![Command::FetchEntry { generation, dn }]
}
