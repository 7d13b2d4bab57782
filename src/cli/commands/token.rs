use clap::Args;
use serde_json::{Map, Value};

use crate::auth::{generate_token, Claims};
use crate::cli::{utils, OutputFormat};
use crate::config::AppConfig;

#[derive(Args)]
pub struct TokenArgs {
    #[arg(long, help = "Subject (user id) the token is issued for")]
    pub uid: String,

    #[arg(long, default_value = "", help = "Email claim")]
    pub email: String,

    #[arg(long, help = "Signing secret (defaults to SECRET_KEY from the environment)")]
    pub secret: Option<String>,

    #[arg(long, help = "Lifetime in hours (defaults to LOCAL_TOKEN_TTL_HOURS)")]
    pub ttl_hours: Option<u64>,
}

pub fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    let secret = args.secret.unwrap_or_else(|| config.security.secret_key.clone());
    if secret.is_empty() {
        anyhow::bail!("no signing secret: pass --secret or set SECRET_KEY");
    }
    let ttl_hours = args.ttl_hours.unwrap_or(config.security.local_token_ttl_hours);

    let claims = Claims::new(&args.uid, &args.email, ttl_hours)?;
    let token = generate_token(&claims, &secret)?;

    match output_format {
        OutputFormat::Text => println!("{}", token),
        OutputFormat::Json => {
            let mut data = Map::new();
            data.insert("token".to_string(), Value::String(token));
            data.insert("uid".to_string(), Value::String(args.uid));
            data.insert("expiresAt".to_string(), Value::from(claims.exp));
            utils::output_success(output_format, "Token generated", Some(data))?;
        }
    }
    Ok(())
}
