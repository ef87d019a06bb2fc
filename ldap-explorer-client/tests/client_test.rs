//! DirectoryClient 重试、重连与分页测试（脚本化传输，虚拟时间）

mod common;

use std::time::Duration;

use common::{BASE_DN, FakeDirectory, PEOPLE_DN, params, timeout};
use ldap_explorer_client::{
    ConnectionParams, DirectoryClient, DirectoryError, RetryPolicy, SearchScope, TreeNode,
};
use tokio::time::Instant;

async fn connect(dir: &FakeDirectory, params: ConnectionParams) -> ldap_explorer_client::Result<DirectoryClient> {
    DirectoryClient::connect_with(params, dir.connector()).await
}

// ============ 重试 ============

#[tokio::test(start_paused = true)]
async fn test_retry_stops_after_max_attempts() {
    let dir = FakeDirectory::sample(1);
    let mut client = require_ok!(connect(&dir, params()).await);
    for _ in 0..3 {
        dir.fail_search(timeout());
    }

    let result = client.search(BASE_DN, "(objectClass=*)", SearchScope::Subtree, &[]).await;

    assert_eq!(result, Err(timeout()));
    assert_eq!(dir.searches(), 3);
    // 初次连接 + 两次重连
    assert_eq!(dir.connects(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_retry_recovers_with_doubling_backoff() {
    let dir = FakeDirectory::sample(2);
    let mut client = require_ok!(connect(&dir, params()).await);
    dir.fail_search(timeout());
    dir.fail_search(timeout());

    let started = Instant::now();
    let entries = require_ok!(
        client
            .search(PEOPLE_DN, "(objectClass=person)", SearchScope::OneLevel, &[])
            .await
    );

    assert_eq!(entries.len(), 2);
    assert_eq!(dir.searches(), 3);
    // 100ms + 200ms
    assert_eq!(started.elapsed(), Duration::from_millis(300));
}

#[tokio::test(start_paused = true)]
async fn test_backoff_is_capped() {
    let dir = FakeDirectory::sample(0);
    let retry = RetryPolicy {
        enabled: true,
        max_attempts: 4,
        initial_backoff: Duration::from_millis(400),
        max_backoff: Duration::from_millis(500),
    };
    let mut client = require_ok!(connect(&dir, params().with_retry(retry)).await);
    for _ in 0..3 {
        dir.fail_search(DirectoryError::ConnectionLost {
            detail: "connection reset by peer".to_string(),
        });
    }

    let started = Instant::now();
    require_ok!(client.get_entry(BASE_DN).await);

    // 400 + 500 + 500
    assert_eq!(started.elapsed(), Duration::from_millis(1400));
}

#[tokio::test(start_paused = true)]
async fn test_disabled_retry_makes_one_attempt() {
    let dir = FakeDirectory::sample(1);
    let mut client = require_ok!(connect(&dir, params().with_retry(RetryPolicy::disabled())).await);
    dir.fail_search(timeout());

    let result = client.get_entry(BASE_DN).await;

    assert_eq!(result, Err(timeout()));
    assert_eq!(dir.searches(), 1);
    assert_eq!(dir.connects(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_terminal_error_is_not_retried() {
    let dir = FakeDirectory::sample(1);
    let mut client = require_ok!(connect(&dir, params()).await);
    dir.fail_search(DirectoryError::PermissionDenied {
        message: "insufficient access".to_string(),
    });

    let started = Instant::now();
    let result = client.get_children("").await;

    assert!(matches!(result, Err(DirectoryError::PermissionDenied { .. })));
    assert_eq!(dir.searches(), 1);
    assert_eq!(dir.connects(), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_reconnect_failure_returns_original_error() {
    let dir = FakeDirectory::sample(1);
    let mut client = require_ok!(connect(&dir, params()).await);
    let original = DirectoryError::ConnectionLost {
        detail: "broken pipe".to_string(),
    };
    dir.fail_search(original.clone());
    dir.fail_connect(DirectoryError::Connect {
        detail: "connection refused".to_string(),
    });

    let result = client.get_entry(BASE_DN).await;

    assert_eq!(result, Err(original));
    assert_eq!(dir.searches(), 1);
    assert_eq!(dir.connects(), 2);
    assert_eq!(dir.closes(), 1);
}

// ============ 连接 ============

#[tokio::test(start_paused = true)]
async fn test_connect_retries_transient_failure() {
    let dir = FakeDirectory::sample(0);
    dir.fail_connect(timeout());

    let client = require_ok!(connect(&dir, params()).await);

    assert!(client.is_connected());
    assert_eq!(dir.connects(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_connect_bad_credentials_is_terminal() {
    let dir = FakeDirectory::sample(0);
    dir.fail_connect(DirectoryError::InvalidCredentials {
        message: "invalid credentials".to_string(),
    });

    let result = connect(&dir, params()).await;

    assert!(matches!(result, Err(DirectoryError::InvalidCredentials { .. })));
    assert_eq!(dir.connects(), 1);
}

#[tokio::test]
async fn test_invalid_params_rejected_before_network() {
    let dir = FakeDirectory::sample(0);

    let result = connect(&dir, ConnectionParams::new("  ", BASE_DN)).await;

    assert!(matches!(result, Err(DirectoryError::InvalidInput(_))));
    assert_eq!(dir.connects(), 0);
}

#[tokio::test]
async fn test_anonymous_connect() {
    let dir = FakeDirectory::sample(0);
    let params = ConnectionParams::new("ldap.test", BASE_DN);
    assert!(params.bind.is_none());

    let mut client = require_ok!(connect(&dir, params).await);
    require_ok!(client.get_entry(BASE_DN).await);
}

#[tokio::test]
async fn test_close_is_idempotent() {
    let dir = FakeDirectory::sample(0);
    let mut client = require_ok!(connect(&dir, params()).await);

    client.close().await;
    client.close().await;

    assert!(!client.is_connected());
    assert_eq!(dir.closes(), 1);
}

// ============ 树 ============

#[tokio::test]
async fn test_children_of_empty_dn_are_under_base() {
    let dir = FakeDirectory::sample(0);
    let mut client = require_ok!(connect(&dir, params()).await);

    let children = require_ok!(client.get_children("").await);

    let names: Vec<&str> = children.iter().map(|c| c.display_name.as_str()).collect();
    assert_eq!(names, ["ou=people", "ou=groups"]);
    assert!(children.iter().all(|c| !c.is_loaded()));
}

#[tokio::test]
async fn test_load_children_populates_node() {
    let dir = FakeDirectory::sample(3);
    let mut client = require_ok!(connect(&dir, params()).await);
    let mut people = TreeNode::new(PEOPLE_DN, BASE_DN);

    require_ok!(client.load_children(&mut people).await);

    assert!(people.is_loaded());
    let children = people.children().unwrap_or_default();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0].display_name, "uid=user0");
}

#[tokio::test]
async fn test_load_children_is_noop_when_loaded() {
    let dir = FakeDirectory::sample(3);
    let mut client = require_ok!(connect(&dir, params()).await);
    let mut people = TreeNode::new(PEOPLE_DN, BASE_DN);
    people.set_children(Vec::new());

    require_ok!(client.load_children(&mut people).await);

    assert_eq!(dir.searches(), 0);
    assert_eq!(people.children().map(<[TreeNode]>::len), Some(0));
}

// ============ 条目 ============

#[tokio::test]
async fn test_get_entry_returns_attributes() {
    let dir = FakeDirectory::sample(1);
    let mut client = require_ok!(connect(&dir, params()).await);

    let entry = require_ok!(client.get_entry(&format!("uid=user0,{PEOPLE_DN}")).await);

    assert_eq!(entry.first_value("cn"), Some("User 0"));
}

#[tokio::test]
async fn test_get_missing_entry_is_no_such_object() {
    let dir = FakeDirectory::sample(0);
    let mut client = require_ok!(connect(&dir, params()).await);

    let result = client.get_entry("uid=ghost,dc=example,dc=com").await;

    assert_eq!(
        result,
        Err(DirectoryError::NoSuchObject {
            dn: "uid=ghost,dc=example,dc=com".to_string()
        })
    );
}

// ============ 分页 ============

#[tokio::test]
async fn test_paged_search_drains_in_pages() {
    let dir = FakeDirectory::sample(5);
    let mut client = require_ok!(connect(&dir, params()).await);

    let first = require_ok!(client.custom_search_paged("(objectClass=person)", 2, None).await);
    assert_eq!(first.entries.len(), 2);
    assert!(first.has_more);

    let second = require_ok!(
        client
            .custom_search_paged("(objectClass=person)", 2, first.cookie.as_ref())
            .await
    );
    assert_eq!(second.entries.len(), 2);
    assert!(second.has_more);

    let third = require_ok!(
        client
            .custom_search_paged("(objectClass=person)", 2, second.cookie.as_ref())
            .await
    );
    assert_eq!(third.entries.len(), 1);
    assert!(!third.has_more);
    assert!(third.cookie.is_none());

    let cookies = dir.cookies();
    assert!(cookies[0].is_empty(), "first page must not send a cookie");
    assert!(cookies[1..].iter().all(|c| !c.is_empty()));
}

#[tokio::test]
async fn test_bare_filter_is_accepted() {
    let dir = FakeDirectory::sample(3);
    let mut client = require_ok!(connect(&dir, params()).await);

    let page = require_ok!(client.custom_search_paged("uid=user1", 10, None).await);

    assert_eq!(page.entries.len(), 1);
    assert!(!page.has_more);
}

#[tokio::test]
async fn test_blank_filter_and_zero_page_size_rejected_before_network() {
    let dir = FakeDirectory::sample(3);
    let mut client = require_ok!(connect(&dir, params()).await);

    let blank = client.custom_search_paged("   ", 10, None).await;
    let zero = client.custom_search_paged("(uid=*)", 0, None).await;

    assert!(matches!(blank, Err(DirectoryError::InvalidInput(_))));
    assert!(matches!(zero, Err(DirectoryError::InvalidInput(_))));
    assert_eq!(dir.searches(), 0);
}
