use clap::Parser;
use hubspot_middleware::auth::{generate_jwt, Claims};
use hubspot_middleware::config;

/// Sign a portal bearer token with the configured JWT_SECRET.
#[derive(Parser)]
#[command(name = "mint_token")]
#[command(about = "Issue a signed bearer token for the HubSpot middleware API")]
#[command(version)]
struct Args {
    #[arg(help = "Subject email the token is issued to")]
    email: String,

    #[arg(long, default_value = "sales_rep", help = "Role claim")]
    role: String,

    #[arg(long, help = "Lifetime in hours (defaults to JWT_EXPIRY_HOURS)")]
    hours: Option<u64>,

    #[arg(long, env = "JWT_SECRET", hide_env_values = true, help = "Signing secret")]
    secret: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let hours = args.hours.unwrap_or(config::config().security.jwt_expiry_hours);

    let claims = Claims::new(args.email, Some(args.role), hours)?;
    let token = generate_jwt(&claims, args.secret.as_deref())?;

    tracing::info!("Token for {} expires at {}", claims.sub, claims.exp);
    println!("{}", token);
    Ok(())
}
