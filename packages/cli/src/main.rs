use clap::Parser;

use https_requests::{ExecutorConfig, Request, ReqwestExecutor, ResponseBody};

/// Issue one HTTPS request and print the response body
#[derive(Parser, Debug)]
#[command(name = "requests")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// HTTP method, case-insensitive
    method: String,

    /// Absolute https URL
    url: String,

    /// Request header as `Name: value`, may be repeated
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// JSON request body
    #[arg(short, long, value_parser = parse_json)]
    data: Option<serde_json::Value>,

    /// Send the body as application/x-www-form-urlencoded
    #[arg(long)]
    form: bool,

    /// Print the response as received instead of parsing it as JSON
    #[arg(long)]
    raw: bool,

    /// User-Agent for requests that do not set one
    #[arg(long)]
    user_agent: Option<String>,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Request(#[from] https_requests::Error),

    #[error("cannot print response: {0}")]
    Output(#[from] serde_json::Error),
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected `Name: value`, got `{}`", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in `{}`", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn parse_json(raw: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(raw).map_err(|e| e.to_string())
}

fn build_request(args: &Args) -> Result<Request, https_requests::Error> {
    let mut request = Request::new(&args.method, &args.url)?.set_headers(args.headers.clone());
    if let Some(data) = &args.data {
        request = request.set_json(data.clone());
    }
    if args.form {
        request = request.url_encode_data();
    }
    if args.raw {
        request = request.stringify_result();
    }
    Ok(request)
}

async fn run(args: Args) -> Result<String, CliError> {
    let mut config = ExecutorConfig::default();
    if let Some(user_agent) = &args.user_agent {
        config = config.with_user_agent(user_agent.as_str());
    }
    let executor = ReqwestExecutor::with_config(&config)?;

    let request = build_request(&args)?;
    log::info!("{} {}", request.descriptor().method(), args.url);

    let output = match request.send_with(&executor).await? {
        ResponseBody::Text(text) => text,
        ResponseBody::Json(value) => serde_json::to_string_pretty(&value)?,
    };
    Ok(output)
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    match run(args).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
