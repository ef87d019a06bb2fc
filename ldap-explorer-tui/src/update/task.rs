//! 后台任务结果处理

use crate::backend::Command;
use crate::message::TaskMessage;
use crate::model::{App, SessionInfo, TreeState, View};

pub fn update(app: &mut App, msg: TaskMessage) -> Vec<Command> {
    match msg {
        TaskMessage::Connected {
            generation,
            session,
        } => return connected(app, generation, session),

        TaskMessage::ConnectFailed { generation, error } => {
            if app.connecting != Some(generation) {
                log::debug!("Discarding failure of abandoned connect {generation}");
                return Vec::new();
            }
            app.fail_connect(error);
        }

        TaskMessage::ChildrenLoaded {
            generation,
            dn,
            children,
        } => {
            if is_current(app, generation) && !app.tree.apply_children(&dn, children) {
                log::debug!("Children of {dn} arrived after the node went away");
            }
        }

        TaskMessage::ChildrenFailed {
            generation,
            dn,
            error,
        } => {
            if is_current(app, generation) {
                app.tree.apply_failure(&dn);
                app.set_error(format!("Failed to load children of {dn}: {error}"));
            }
        }

        TaskMessage::EntryLoaded { generation, entry } => {
            if is_current(app, generation) && app.record.is_loading(&entry.dn) {
                app.record.set_entry(entry);
                app.view = View::Record;
                app.clear_status();
            }
        }

        TaskMessage::EntryFailed {
            generation,
            dn,
            error,
        } => {
            if is_current(app, generation) && app.record.is_loading(&dn) {
                app.record.fail();
                app.set_error(format!("Failed to load {dn}: {error}"));
            }
        }

        TaskMessage::QueryPage {
            generation,
            request_id,
            first,
            page,
        } => {
            if is_current(app, generation) && app.query.apply_page(request_id, first, page) {
                let count = app.query.results().len();
                let more = if app.query.has_more() {
                    ", more available"
                } else {
                    ""
                };
                app.set_status(format!("{count} entries{more}"));
            }
        }

        TaskMessage::QueryFailed {
            generation,
            request_id,
            error,
        } => {
            if is_current(app, generation) && app.query.apply_error(request_id, error.clone()) {
                app.set_error(format!("Query failed: {error}"));
            }
        }
    }
    Vec::new()
}

/// 连接建立：替换会话并加载根节点
///
/// 已被取消或被更新的连接取代时，关掉这条迟到的连接。
fn connected(app: &mut App, generation: u64, session: SessionInfo) -> Vec<Command> {
    if app.connecting != Some(generation) {
        log::info!("Closing late connection {generation}");
        return vec![Command::Disconnect { generation }];
    }

    app.end_connect();
    app.start.error = None;

    let viewport = app.tree.viewport;
    app.tree = TreeState::new(&session.base_dn);
    app.tree.viewport.set_height(viewport.height());
    app.record.clear();
    app.query.cancel();

    app.set_status(format!("Connected to {} as {}", session.url, session.identity()));
    app.session = Some(session);
    app.view = View::Tree;

    app.tree
        .expand_root()
        .map(|dn| Command::LoadChildren { generation, dn })
        .into_iter()
        .collect()
}

fn is_current(app: &App, generation: u64) -> bool {
    let current = app.session_generation() == Some(generation);
    if !current {
        log::debug!("Discarding result from stale generation {generation}");
    }
    current
}
