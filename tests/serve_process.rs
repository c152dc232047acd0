//! End-to-end tests against a `kvbridge serve` child process.

use std::path::Path;
use std::process::Stdio;

use kvbridge_client::{Client, ErrorKind, LineTransport};
use tokio::io::BufReader;
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

type ProcessClient = Client<LineTransport<BufReader<ChildStdout>, ChildStdin>>;

fn spawn(data_dir: &Path, extra_args: &[&str]) -> (Child, ProcessClient) {
  let mut child = Command::new(env!("CARGO_BIN_EXE_kvbridge"))
    .arg("--data-dir")
    .arg(data_dir)
    .args(extra_args)
    .arg("serve")
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .stderr(Stdio::null())
    .kill_on_drop(true)
    .spawn()
    .expect("failed to spawn kvbridge");

  let stdin = child.stdin.take().expect("stdin should be piped");
  let stdout = child.stdout.take().expect("stdout should be piped");
  let client = Client::new(LineTransport::new(BufReader::new(stdout), stdin));

  (child, client)
}

#[tokio::test]
async fn test_end_to_end_over_process() {
  let dir = tempfile::tempdir().unwrap();
  let (_child, client) = spawn(dir.path(), &[]);

  client.local().clear().await.unwrap();
  client.local().put("testKey", "testValue").await.unwrap();
  assert_eq!(
    client.local().list_keys().await.unwrap(),
    vec!["testKey".to_string()]
  );
  assert_eq!(
    client.local().get("testKey").await.unwrap(),
    Some("testValue".to_string())
  );
  client.local().remove("testKey").await.unwrap();
  assert!(client.local().list_keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_local_survives_restart_session_does_not() {
  let dir = tempfile::tempdir().unwrap();

  {
    let (mut child, client) = spawn(dir.path(), &[]);
    client.local().put("persistent", "yes").await.unwrap();
    client.session().put("ephemeral", "yes").await.unwrap();

    // Closing stdin ends the serve loop.
    drop(client);
    child.wait().await.unwrap();
  }

  let (_child, client) = spawn(dir.path(), &[]);
  assert_eq!(
    client.local().get("persistent").await.unwrap(),
    Some("yes".to_string())
  );
  assert_eq!(client.session().get("ephemeral").await.unwrap(), None);
  assert!(client.session().list_keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_disabled_area_from_config() {
  let dir = tempfile::tempdir().unwrap();
  let config = dir.path().join("kvbridge.json");
  std::fs::write(&config, r#"{ "session": { "backend": "disabled" } }"#).unwrap();

  let (_child, client) = spawn(dir.path(), &["--config", config.to_str().unwrap()]);

  let err = client.session().put("k", "v").await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Host);

  client.local().put("k", "v").await.unwrap();
}
