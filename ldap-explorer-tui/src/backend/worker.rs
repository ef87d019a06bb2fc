//! 后台客户端 worker
//!
//! 唯一持有 `DirectoryClient` 的 tokio 任务。
//! Update 层产生的 `Command` 经 mpsc 通道按顺序送达，
//! 每条命令的结果都包装成 `AppMessage::Task` 发回主循环。
//!
//! 重试与退避的 sleep 只发生在这个任务里，主循环永远不会被阻塞。

use std::sync::Arc;
use std::time::Duration;

use ldap_explorer_client::{ConnectionParams, Connector, DirectoryClient, DirectoryError};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::message::{AppMessage, TaskMessage};
use crate::model::{PageFetch, SessionInfo};

/// 交给 worker 执行的命令
#[derive(Debug, Clone)]
pub enum Command {
    /// 建立新连接；成功后替换（并关闭）当前客户端
    Connect {
        generation: u64,
        params: ConnectionParams,
        timeout: Duration,
    },
    /// 加载某个节点的子节点
    LoadChildren { generation: u64, dn: String },
    /// 获取单个条目
    FetchEntry { generation: u64, dn: String },
    /// 自定义查询的一页
    FetchQueryPage { generation: u64, fetch: PageFetch },
    /// 关闭指定代次的客户端
    Disconnect { generation: u64 },
}

/// 建立连接失败
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("Connection timed out after {}s", .0.as_secs_f32())]
    TimedOut(Duration),
}

/// 在超时限制内建立连接
///
/// 超时后连接的 future 被直接丢弃，不会再通知传输层。
pub async fn open_client(
    params: ConnectionParams,
    connector: Arc<dyn Connector>,
    timeout: Duration,
) -> Result<DirectoryClient, ConnectError> {
    match tokio::time::timeout(timeout, DirectoryClient::connect_with(params, connector)).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(ConnectError::TimedOut(timeout)),
    }
}

/// worker 句柄
pub struct ClientWorker {
    commands: UnboundedSender<Command>,
    task: JoinHandle<()>,
}

impl ClientWorker {
    /// 在运行时上启动 worker
    ///
    /// `initial` 为启动前已经建立好的连接（命令行 `--connect`）。
    pub fn spawn(
        handle: &Handle,
        connector: Arc<dyn Connector>,
        initial: Option<(u64, DirectoryClient)>,
        messages: UnboundedSender<AppMessage>,
    ) -> Self {
        let (commands, receiver) = mpsc::unbounded_channel();
        let state = WorkerState {
            connector,
            current: initial,
            messages,
        };
        let task = handle.spawn(state.run(receiver));
        Self { commands, task }
    }

    /// 发送一条命令
    pub fn send(&self, command: Command) {
        if let Err(e) = self.commands.send(command) {
            log::warn!("Worker is gone, dropping command: {:?}", e.0);
        }
    }

    /// 按顺序发送多条命令
    pub fn dispatch(&self, commands: Vec<Command>) {
        for command in commands {
            self.send(command);
        }
    }

    /// 关闭通道并等待 worker 断开连接后退出
    pub async fn shutdown(self, grace: Duration) {
        let Self { commands, task } = self;
        drop(commands);
        match tokio::time::timeout(grace, task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::error!("Worker task failed: {e}"),
            Err(_) => log::warn!("Worker did not stop within {}ms", grace.as_millis()),
        }
    }
}

struct WorkerState {
    connector: Arc<dyn Connector>,
    current: Option<(u64, DirectoryClient)>,
    messages: UnboundedSender<AppMessage>,
}

impl WorkerState {
    async fn run(mut self, mut commands: UnboundedReceiver<Command>) {
        while let Some(command) = commands.recv().await {
            self.handle(command).await;
        }
        if let Some((_, mut client)) = self.current.take() {
            client.close().await;
        }
        log::debug!("Worker stopped");
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Connect {
                generation,
                params,
                timeout,
            } => self.connect(generation, params, timeout).await,

            Command::LoadChildren { generation, dn } => {
                let message = match self.client(generation) {
                    Ok(client) => match client.get_children(&dn).await {
                        Ok(children) => TaskMessage::ChildrenLoaded {
                            generation,
                            dn,
                            children,
                        },
                        Err(e) => TaskMessage::ChildrenFailed {
                            generation,
                            dn,
                            error: e.to_string(),
                        },
                    },
                    Err(e) => TaskMessage::ChildrenFailed {
                        generation,
                        dn,
                        error: e.to_string(),
                    },
                };
                self.reply(message);
            }

            Command::FetchEntry { generation, dn } => {
                let result = match self.client(generation) {
                    Ok(client) => client.get_entry(&dn).await,
                    Err(e) => Err(e),
                };
                self.reply(match result {
                    Ok(entry) => TaskMessage::EntryLoaded { generation, entry },
                    Err(e) => TaskMessage::EntryFailed {
                        generation,
                        dn,
                        error: e.to_string(),
                    },
                });
            }

            Command::FetchQueryPage { generation, fetch } => {
                let result = match self.client(generation) {
                    Ok(client) => {
                        client
                            .custom_search_paged(&fetch.filter, fetch.page_size, fetch.cookie.as_ref())
                            .await
                    }
                    Err(e) => Err(e),
                };
                self.reply(match result {
                    Ok(page) => TaskMessage::QueryPage {
                        generation,
                        request_id: fetch.request_id,
                        first: fetch.first,
                        page,
                    },
                    Err(e) => TaskMessage::QueryFailed {
                        generation,
                        request_id: fetch.request_id,
                        error: e.to_string(),
                    },
                });
            }

            Command::Disconnect { generation } => {
                if self.current.as_ref().is_some_and(|(g, _)| *g == generation)
                    && let Some((_, mut client)) = self.current.take()
                {
                    client.close().await;
                }
            }
        }
    }

    async fn connect(&mut self, generation: u64, params: ConnectionParams, timeout: Duration) {
        let url = params.url();
        match open_client(params, self.connector.clone(), timeout).await {
            Ok(client) => {
                // 新连接可用之后立即关闭旧连接
                if let Some((_, mut old)) = self.current.take() {
                    old.close().await;
                }
                let session = SessionInfo::from_client(generation, &client);
                self.current = Some((generation, client));
                self.reply(TaskMessage::Connected {
                    generation,
                    session,
                });
            }
            Err(e) => {
                log::warn!("Connect to {url} failed: {e}");
                self.reply(TaskMessage::ConnectFailed {
                    generation,
                    error: e.to_string(),
                });
            }
        }
    }

    /// 指定代次的客户端；代次不符视为未连接
    fn client(&mut self, generation: u64) -> Result<&mut DirectoryClient, DirectoryError> {
        match &mut self.current {
            Some((g, client)) if *g == generation => Ok(client),
            _ => Err(DirectoryError::ConnectionLost {
                detail: "not connected".to_string(),
            }),
        }
    }

    fn reply(&self, message: TaskMessage) {
        if self.messages.send(AppMessage::Task(message)).is_err() {
            log::debug!("App loop is gone, dropping task result");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use ldap_explorer_client::{
        Entry, PageRequest, RawSearchResult, RetryPolicy, SearchRequest, Session,
    };

    use super::*;

    /// 只认识一个条目的内存目录
    #[derive(Default)]
    struct StubConnector {
        /// 连接前等待的时间（模拟慢服务器）
        delay: Duration,
        refuse: bool,
        closes: Arc<Mutex<u32>>,
    }

    struct StubSession {
        closes: Arc<Mutex<u32>>,
    }

    #[async_trait]
    impl Connector for StubConnector {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn connect(
            &self,
            _params: &ConnectionParams,
        ) -> ldap_explorer_client::Result<Box<dyn Session>> {
            tokio::time::sleep(self.delay).await;
            if self.refuse {
                return Err(DirectoryError::InvalidCredentials {
                    message: "bad password".into(),
                });
            }
            Ok(Box::new(StubSession {
                closes: self.closes.clone(),
            }))
        }
    }

    #[async_trait]
    impl Session for StubSession {
        async fn search(
            &mut self,
            request: &SearchRequest,
            _page: Option<&PageRequest>,
        ) -> ldap_explorer_client::Result<RawSearchResult> {
            Ok(RawSearchResult {
                entries: vec![Entry::new(request.base_dn.clone()).with_value("cn", "root")],
                cookie: Vec::new(),
            })
        }

        async fn close(&mut self) {
            *self.closes.lock().unwrap_or_else(std::sync::PoisonError::into_inner) += 1;
        }
    }

    fn params() -> ConnectionParams {
        ConnectionParams::new("localhost", "dc=example,dc=com").with_retry(RetryPolicy::disabled())
    }

    fn connect(generation: u64) -> Command {
        Command::Connect {
            generation,
            params: params(),
            timeout: Duration::from_secs(5),
        }
    }

    async fn next_task(rx: &mut UnboundedReceiver<AppMessage>) -> Option<TaskMessage> {
        match rx.recv().await? {
            AppMessage::Task(task) => Some(task),
            _ => None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_connect_times_out() {
        let connector = StubConnector {
            delay: Duration::from_secs(10),
            ..StubConnector::default()
        };
        let result = open_client(params(), Arc::new(connector), Duration::from_secs(5)).await;
        assert!(matches!(result, Err(ConnectError::TimedOut(_))));
    }

    #[tokio::test]
    async fn terminal_connect_error_is_passed_through() {
        let connector = StubConnector {
            refuse: true,
            ..StubConnector::default()
        };
        let result = open_client(params(), Arc::new(connector), Duration::from_secs(5)).await;
        assert!(matches!(
            result,
            Err(ConnectError::Directory(DirectoryError::InvalidCredentials { .. }))
        ));
    }

    #[tokio::test]
    async fn connect_then_fetch_entry() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let worker = ClientWorker::spawn(
            &Handle::current(),
            Arc::new(StubConnector::default()),
            None,
            tx,
        );

        worker.dispatch(vec![
            connect(1),
            Command::FetchEntry {
                generation: 1,
                dn: "dc=example,dc=com".into(),
            },
        ]);

        let connected = next_task(&mut rx).await;
        assert!(matches!(
            connected,
            Some(TaskMessage::Connected { generation: 1, ref session }) if session.base_dn == "dc=example,dc=com"
        ));
        let entry = next_task(&mut rx).await;
        assert!(matches!(
            entry,
            Some(TaskMessage::EntryLoaded { generation: 1, ref entry }) if entry.first_value("cn") == Some("root")
        ));

        worker.shutdown(Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn stale_generation_reports_not_connected() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let worker = ClientWorker::spawn(
            &Handle::current(),
            Arc::new(StubConnector::default()),
            None,
            tx,
        );

        worker.dispatch(vec![
            connect(2),
            Command::LoadChildren {
                generation: 1,
                dn: String::new(),
            },
        ]);

        assert!(matches!(next_task(&mut rx).await, Some(TaskMessage::Connected { .. })));
        assert!(matches!(
            next_task(&mut rx).await,
            Some(TaskMessage::ChildrenFailed { generation: 1, .. })
        ));

        worker.shutdown(Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn reconnect_closes_previous_client_and_shutdown_closes_current() {
        let closes = Arc::new(Mutex::new(0));
        let connector = StubConnector {
            closes: closes.clone(),
            ..StubConnector::default()
        };
        let (tx, mut rx) = mpsc::unbounded_channel();
        let worker = ClientWorker::spawn(&Handle::current(), Arc::new(connector), None, tx);

        worker.dispatch(vec![connect(1), connect(2)]);
        next_task(&mut rx).await;
        next_task(&mut rx).await;
        assert_eq!(*closes.lock().unwrap_or_else(std::sync::PoisonError::into_inner), 1);

        // 旧代次的断开请求不影响当前连接
        worker.send(Command::Disconnect { generation: 1 });
        worker.shutdown(Duration::from_secs(1)).await;
        assert_eq!(*closes.lock().unwrap_or_else(std::sync::PoisonError::into_inner), 2);
    }
}
