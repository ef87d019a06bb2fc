//! 连接表单消息处理

use std::time::Instant;

use crate::backend::Command;
use crate::message::StartMessage;
use crate::model::App;

pub fn update(app: &mut App, msg: StartMessage) -> Vec<Command> {
    // 连接中只接受取消
    if app.connecting.is_some() {
        if matches!(msg, StartMessage::Cancel) {
            cancel_connect(app);
        }
        return Vec::new();
    }

    let form = &mut app.start;
    match msg {
        StartMessage::FocusNext => form.focus_next(),
        StartMessage::FocusPrev => form.focus_prev(),
        StartMessage::FocusField(field) => form.focus_field(field),
        StartMessage::Input(c) => form.insert_char(c),
        StartMessage::Backspace => form.backspace(),
        StartMessage::CycleTls(forward) => form.cycle_tls(forward),
        StartMessage::TogglePassword => form.toggle_password(),
        StartMessage::Submit => return submit(app),
        StartMessage::Cancel => form.error = None,
        StartMessage::Disconnect => return disconnect(app),
    }
    Vec::new()
}

/// 提交表单
///
/// 校验失败时不发出任何命令；否则先断开当前连接，再以新代次发起连接。
fn submit(app: &mut App) -> Vec<Command> {
    let params = match app.start.to_params(&app.config) {
        Ok(params) => params,
        Err(e) => {
            let error = e.to_string();
            app.set_error(error.clone());
            app.start.error = Some(error);
            return Vec::new();
        }
    };

    let mut commands: Vec<Command> = super::drop_session(app).into_iter().collect();

    let timeout = app.config.connection.connect_timeout();
    let generation = app.begin_connect(Instant::now(), timeout);
    app.set_status(format!("Connecting to {}...", params.url()));
    log::info!("Connecting to {} (generation {generation})", params.url());

    commands.push(Command::Connect {
        generation,
        params,
        timeout,
    });
    commands
}

/// 放弃正在进行的连接；其迟到的结果会因代次不符被丢弃
fn cancel_connect(app: &mut App) {
    if let Some(generation) = app.end_connect() {
        log::info!("Connection attempt {generation} cancelled");
    }
    app.set_status("Connection attempt cancelled");
}

fn disconnect(app: &mut App) -> Vec<Command> {
    match super::drop_session(app) {
        Some(command) => {
            app.set_status("Disconnected");
            vec![command]
        }
        None => {
            app.set_error("Not connected");
            Vec::new()
        }
    }
}
