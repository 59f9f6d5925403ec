use clap::{Parser, Subcommand};
use folio::site::{Route, Site, Status};
use folio::store::ContentStore;
use folio::{config, output, serve};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Portfolio website for a visual artist")]
#[command(long_about = "\
Portfolio website for a visual artist

Serves biography, works, exhibitions, collections, and publications from a
directory of JSON documents exported by the content store.

Content structure:

  content/
  ├── config.toml          # Site config (optional)
  ├── home.json            # Title, marquee, gallery, biography modules
  ├── works.json           # Array, or {\"years\": {...}, \"classifications\": {...}}
  ├── exhibitions.json
  ├── collections.json
  └── publications.json

Listing pages filter through the URL:

  /works?year=2023&classification=paintings&view=list
  /exhibitions?status=current&format=solo
  /publications?classification=catalogue

Run 'folio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    content: PathBuf,

    /// Directory holding config.toml (defaults to the content directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log as JSON lines instead of human-readable text
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the site over HTTP
    Serve {
        /// Address to listen on (overrides server.bind)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Load every document and print a content inventory
    Check,
    /// Render one page (path with optional ?query) to stdout
    Render {
        /// e.g. "/works?year=2023"
        path: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("folio=info,tower_http=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load config and open the content directory.
async fn open_site(
    content: &Path,
    config_dir: Option<&Path>,
) -> Result<Site, Box<dyn std::error::Error>> {
    let site_config = config::load_config(config_dir.unwrap_or(content))?;
    let store = ContentStore::open(content).await?;
    Ok(Site::new(store, site_config))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Command::Serve { bind } => {
            let site = open_site(&cli.content, cli.config.as_deref()).await?;
            tracing::info!(content = %cli.content.display(), "serving");
            serve::run(site, bind).await?;
        }
        Command::Check => {
            println!("==> Checking {}", cli.content.display());
            let site = open_site(&cli.content, cli.config.as_deref()).await?;
            output::print_check_output(&site.inventory().await);
            println!("==> Content is readable");
        }
        Command::Render { path } => {
            let site = open_site(&cli.content, cli.config.as_deref()).await?;
            let (path, query) = match path.split_once('?') {
                Some((path, query)) => (path, Some(query)),
                None => (path.as_str(), None),
            };
            let rendered = site.render(&Route::parse(path), query).await;
            if rendered.status == Status::NotFound {
                tracing::warn!(path, "page not found");
            }
            println!("{}", rendered.html);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
