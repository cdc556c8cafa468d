use clap::Parser;
use console_session::DecodeFailurePolicy;

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

fn parse_decode_failure_policy(value: &str) -> Result<DecodeFailurePolicy, String> {
    DecodeFailurePolicy::parse(value)
        .ok_or_else(|| format!("unknown decode failure policy '{value}' (expected retain or clear)"))
}

#[derive(Debug, Parser)]
#[command(
    name = "console-shell",
    about = "Bootstrap the proxy console shell against a proxy and print the result",
    version
)]
pub struct Cli {
    #[arg(
        long = "proxy-base-url",
        env = "CONSOLE_PROXY_BASE_URL",
        help = "Proxy base URL used for the UI config load and as the fallback proxy base"
    )]
    pub proxy_base_url: String,

    #[arg(
        long = "location-search",
        env = "CONSOLE_LOCATION_SEARCH",
        default_value = "",
        help = "Browser location.search to bootstrap from, e.g. '?page=teams'"
    )]
    pub location_search: String,

    #[arg(
        long,
        env = "CONSOLE_COOKIE",
        help = "Cookie header carrying the session token, e.g. 'token=<jwt>'"
    )]
    pub cookie: Option<String>,

    #[arg(
        long = "decode-failure-policy",
        env = "CONSOLE_DECODE_FAILURE_POLICY",
        default_value = "retain",
        value_parser = parse_decode_failure_policy,
        help = "What an undecodable token does to the previous session fields: retain or clear"
    )]
    pub decode_failure_policy: DecodeFailurePolicy,

    #[arg(
        long = "request-timeout-ms",
        env = "CONSOLE_REQUEST_TIMEOUT_MS",
        default_value_t = console_client::DEFAULT_REQUEST_TIMEOUT_MS,
        value_parser = parse_positive_u64,
        help = "Per-request HTTP timeout in milliseconds"
    )]
    pub request_timeout_ms: u64,

    #[arg(
        long = "ui-config-path",
        env = "CONSOLE_UI_CONFIG_PATH",
        default_value = console_client::DEFAULT_UI_CONFIG_PATH,
        help = "Path of the proxy's UI bootstrap config document"
    )]
    pub ui_config_path: String,
}
