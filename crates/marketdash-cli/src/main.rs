use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use marketdash_config::{DatabaseConfig, PasswordConfig};
use marketdash_core::PasswordHasher;
use marketdash_db::{DbError, PgUserRepository, UserRepository, init_db_pool};
use marketdash_models::{NewUser, RegisterRequest, UserRole, normalize_email};
use tracing_subscriber::EnvFilter;
use validator::Validate;

#[derive(Parser)]
#[command(name = "marketdash-cli")]
#[command(about = "marketdash CLI - administrative tools for marketdash", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// Full name of the admin
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Give an existing account the admin role
    Promote {
        /// Email address of the account
        #[arg(short = 'e', long)]
        email: String,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::CreateAdmin {
            full_name,
            email,
            password,
        } => handle_create_admin(full_name, email, password).await,
        Commands::Promote { email } => handle_promote(&email).await,
    };

    if let Err(e) = result {
        eprintln!("\n❌ {e:#}");
        std::process::exit(1);
    }
}

async fn connect() -> anyhow::Result<PgUserRepository> {
    let lookup = |key: &str| std::env::var(key).ok();
    let config = DatabaseConfig::from_lookup(&lookup)?;
    let pool = init_db_pool(&config)
        .await
        .context("failed to connect to database")?;
    Ok(PgUserRepository::new(pool))
}

fn prompt_text(prompt: &str) -> anyhow::Result<String> {
    Input::new()
        .with_prompt(prompt)
        .interact_text()
        .with_context(|| format!("failed to read {}", prompt.to_lowercase()))
}

async fn handle_create_admin(
    full_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let full_name = match full_name {
        Some(name) => name,
        None => prompt_text("Full name")?,
    };
    let email = match email {
        Some(email) => email,
        None => prompt_text("Email address")?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("failed to read password")?,
    };

    let request = RegisterRequest {
        full_name: full_name.trim().to_string(),
        email: normalize_email(&email),
        password,
    };
    if let Err(errors) = request.validate() {
        bail!("invalid admin details: {errors}");
    }

    let lookup = |key: &str| std::env::var(key).ok();
    let hasher = PasswordHasher::new(PasswordConfig::from_lookup(&lookup)?.bcrypt_cost);
    let password_hash = hasher.hash(&request.password)?;

    let users = connect().await?;
    let admin = users
        .create_user(NewUser {
            full_name: request.full_name,
            email: request.email,
            password_hash,
            role: UserRole::Admin,
        })
        .await
        .map_err(|e| match e {
            DbError::UniqueViolation => anyhow::anyhow!("an account with this email already exists"),
            other => anyhow::Error::new(other).context("failed to create admin"),
        })?;

    println!("\n✅ Admin created successfully!");
    println!("   Email: {}", admin.email);
    println!("   Name: {}", admin.full_name);
    Ok(())
}

async fn handle_promote(email: &str) -> anyhow::Result<()> {
    let users = connect().await?;
    let user = users
        .set_role(&normalize_email(email), UserRole::Admin)
        .await
        .map_err(|e| match e {
            DbError::NotFound => anyhow::anyhow!("no account with email {email}"),
            other => anyhow::Error::new(other).context("failed to promote account"),
        })?;

    println!("\n✅ {} is now an admin", user.email);
    Ok(())
}
