use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::info;

use kvbridge_config::{AreaConfig, Backend, BridgeConfig};
use kvbridge_host::{Areas, Registry, serve_lines};
use kvbridge_protocol::{DEFAULT_NAMESPACE, Namespace, Reply};
use kvbridge_store::{DisabledArea, FsArea, InMemoryArea, StorageArea};

/// kvbridge - key-value storage areas exposed as versioned remote operations
#[derive(Parser)]
#[command(name = "kvbridge")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to the data directory (default: ~/.kvbridge)
  #[arg(long, global = true)]
  data_dir: Option<PathBuf>,

  /// Path to a JSON configuration file
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Serve calls as JSON lines on stdin/stdout until end of input
  Serve,

  /// Run a single call and print its reply
  Call {
    /// Function name, e.g. "local.get"
    function: String,

    /// Argument as JSON, e.g. '"theme"' or '{"key": "k", "value": "v"}'
    arg: Option<String>,
  },

  /// List the registered functions
  Functions,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let config = match &cli.config {
    Some(path) => BridgeConfig::from_path(path)?,
    None => BridgeConfig::default(),
  };

  let data_dir = match cli.data_dir.or_else(|| config.data_dir.clone()) {
    Some(dir) => dir,
    None => dirs::home_dir()
      .context("could not determine home directory")?
      .join(".kvbridge"),
  };

  match cli.command {
    Some(Commands::Serve) => {
      let registry = build_registry(&config, &data_dir)?;
      serve(registry)?;
    }
    Some(Commands::Call { function, arg }) => {
      let registry = build_registry(&config, &data_dir)?;
      run_call(&registry, function, arg)?;
    }
    Some(Commands::Functions) => {
      let registry = build_registry(&config, &data_dir)?;
      for name in registry.functions() {
        println!("{}", name);
      }
    }
    None => {
      println!("kvbridge - use --help to see available commands");
    }
  }

  Ok(())
}

fn build_registry(config: &BridgeConfig, data_dir: &Path) -> Result<Registry> {
  let namespace = Namespace::named(
    config
      .namespace
      .clone()
      .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
  );

  let areas = Areas::new(
    build_area("local", &config.local, data_dir)?,
    build_area("session", &config.session, data_dir)?,
  );

  info!(namespace = %namespace, data_dir = %data_dir.display(), "registry ready");
  Ok(Registry::new(namespace, areas))
}

fn build_area(name: &str, config: &AreaConfig, data_dir: &Path) -> Result<Arc<dyn StorageArea>> {
  let area: Arc<dyn StorageArea> = match config.backend {
    Backend::Memory => match config.quota_bytes {
      Some(quota) => Arc::new(InMemoryArea::with_quota(quota)),
      None => Arc::new(InMemoryArea::new()),
    },
    Backend::File => {
      let path = data_dir.join(format!("{}.json", name));
      let area = FsArea::open(&path)
        .with_context(|| format!("failed to open {} area at {}", name, path.display()))?;
      match config.quota_bytes {
        Some(quota) => Arc::new(area.with_quota(quota)),
        None => Arc::new(area),
      }
    }
    Backend::Disabled => Arc::new(DisabledArea),
  };

  Ok(area)
}

fn serve(registry: Registry) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { serve_async(registry).await })
}

async fn serve_async(registry: Registry) -> Result<()> {
  let cancel = CancellationToken::new();

  {
    let cancel = cancel.clone();
    tokio::spawn(async move {
      if tokio::signal::ctrl_c().await.is_ok() {
        cancel.cancel();
      }
    });
  }

  let stdin = BufReader::new(tokio::io::stdin());
  let stdout = tokio::io::stdout();

  serve_lines(Arc::new(registry), stdin, stdout, cancel)
    .await
    .context("serve loop failed")?;

  Ok(())
}

fn run_call(registry: &Registry, function: String, arg: Option<String>) -> Result<()> {
  let arg = match arg {
    Some(raw) => serde_json::from_str(&raw).context("failed to parse argument JSON")?,
    None => serde_json::Value::Null,
  };

  let namespace = registry.namespace();
  let call = kvbridge_protocol::Call {
    namespace: namespace.name.clone(),
    version: namespace.version.clone(),
    function,
    arg,
  };

  let reply = registry.dispatch(call);
  println!("{}", serde_json::to_string_pretty(&reply)?);

  if let Reply::Err(e) = reply {
    bail!("call failed: {}", e);
  }

  Ok(())
}
