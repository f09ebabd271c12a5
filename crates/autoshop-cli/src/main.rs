use anyhow::Context;
use autoshop_cli::{AccountInput, create_organization, create_super_admin};
use autoshop_core::PermissionTable;
use autoshop_db::postgres::{PgOrganizationRepository, PgUserRepository};
use autoshop_db::{PgPool, init_db_pool, run_migrations};
use autoshop_models::CreateOrganizationDto;
use clap::{Args, Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "autoshop-cli")]
#[command(about = "Autoshop CLI - Administrative tools for Autoshop", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct AccountArgs {
    /// First name
    #[arg(short = 'f', long)]
    first_name: Option<String>,

    /// Last name
    #[arg(short = 'l', long)]
    last_name: Option<String>,

    /// Email address
    #[arg(short = 'e', long)]
    email: Option<String>,

    /// Password (will be prompted securely if not provided)
    #[arg(short = 'p', long)]
    password: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a super admin account
    CreateSuperAdmin {
        #[command(flatten)]
        account: AccountArgs,
    },
    /// Create an organization together with its owner account
    CreateOrganization {
        /// Organization name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Organization contact email
        #[arg(long)]
        organization_email: Option<String>,

        #[command(flatten)]
        owner: AccountArgs,
    },
    /// Apply pending database migrations
    Migrate,
}

fn prompt(value: Option<String>, label: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Input::new()
            .with_prompt(label)
            .interact_text()
            .with_context(|| format!("Failed to read {}", label.to_lowercase())),
    }
}

fn read_account(args: AccountArgs) -> anyhow::Result<AccountInput> {
    let first_name = prompt(args.first_name, "First name")?;
    let last_name = prompt(args.last_name, "Last name")?;
    let email = prompt(args.email, "Email address")?;
    let password = match args.password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    Ok(AccountInput {
        first_name,
        last_name,
        email,
        password,
    })
}

async fn connect() -> anyhow::Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let permissions = PermissionTable::standard()?;

    match cli.command {
        Commands::CreateSuperAdmin { account } => {
            let account = read_account(account)?;
            let pool = connect().await?;
            let users = PgUserRepository::new(pool);

            let admin = create_super_admin(&users, &permissions, account).await?;
            println!("\n✅ Super admin created successfully!");
            println!("   Email: {}", admin.email);
            println!("   Name: {} {}", admin.first_name, admin.last_name);
        }
        Commands::CreateOrganization {
            name,
            organization_email,
            owner,
        } => {
            let name = prompt(name, "Organization name")?;
            let owner = read_account(owner)?;
            let pool = connect().await?;
            let organizations = PgOrganizationRepository::new(pool.clone());
            let users = PgUserRepository::new(pool);

            let dto = CreateOrganizationDto {
                name,
                email: organization_email,
                phone: None,
                address: None,
            };
            let (organization, owner) =
                create_organization(&organizations, &users, &permissions, dto, owner).await?;

            println!("\n✅ Organization created successfully!");
            println!("   Organization: {} ({})", organization.name, organization.id);
            println!("   Owner: {}", owner.email);
        }
        Commands::Migrate => {
            let pool = connect().await?;
            run_migrations(&pool).await.context("Failed to run migrations")?;
            println!("✅ Migrations applied");
        }
    }

    Ok(())
}
