use std::time::Duration;

use gitdeps_util::cancel::CancelToken;
use gitdeps_util::errors::GitdepsError;
use gitdeps_util::process::CommandBuilder;

#[tokio::test]
async fn test_builder_simple_command() {
    let output = CommandBuilder::new("echo")
        .arg("hello")
        .exec(&CancelToken::new())
        .await
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "hello");
}

#[tokio::test]
async fn test_builder_multiple_args() {
    let output = CommandBuilder::new("echo")
        .args(["one", "two", "three"])
        .exec(&CancelToken::new())
        .await
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "one two three");
}

#[tokio::test]
async fn test_builder_with_cwd() {
    let tmp = tempfile::TempDir::new().unwrap();

    // Write a marker file and verify the command can see it from the cwd.
    let marker = tmp.path().join("gitdeps_cwd_test.marker");
    std::fs::write(&marker, "ok").unwrap();

    #[cfg(unix)]
    let output = CommandBuilder::new("ls")
        .arg("gitdeps_cwd_test.marker")
        .cwd(tmp.path())
        .exec(&CancelToken::new())
        .await
        .unwrap();

    #[cfg(windows)]
    let output = CommandBuilder::new("cmd")
        .args(["/C", "dir", "/b", "gitdeps_cwd_test.marker"])
        .cwd(tmp.path())
        .exec(&CancelToken::new())
        .await
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim().contains("gitdeps_cwd_test.marker"));
}

#[tokio::test]
async fn test_builder_nonexistent_program() {
    let result = CommandBuilder::new("nonexistent_program_xyz_123")
        .exec(&CancelToken::new())
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_builder_cancelled_before_spawn() {
    let token = CancelToken::new();
    token.cancel();
    let result = CommandBuilder::new("echo").arg("hi").exec(&token).await;
    assert!(matches!(result, Err(GitdepsError::Cancelled)));
}

#[cfg(unix)]
#[tokio::test]
async fn test_builder_timeout() {
    let result = CommandBuilder::new("sleep")
        .arg("5")
        .timeout(Duration::from_millis(100))
        .exec(&CancelToken::new())
        .await;
    assert!(matches!(result, Err(GitdepsError::Timeout { .. })));
}
