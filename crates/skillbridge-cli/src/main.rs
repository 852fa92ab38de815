use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use skillbridge_cli::admin::create_super_admin;
use skillbridge_cli::seeder::{self, SeedConfig};
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "skillbridge-cli")]
#[command(about = "SkillBridge CLI - Administrative tools for SkillBridge", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new super administrator account
    CreateSuperAdmin {
        /// Full name of the super admin
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake categories, instructors, courses, students and applications
    Seed {
        /// Number of categories to create
        #[arg(short = 'c', long, default_value = "6")]
        categories: usize,

        /// Number of instructors to create
        #[arg(short = 'i', long, default_value = "5")]
        instructors: usize,

        /// Number of courses per category
        #[arg(long, default_value = "4")]
        courses: usize,

        /// Number of students to create
        #[arg(short = 's', long, default_value = "50")]
        students: usize,

        /// Number of applications per student
        #[arg(short = 'a', long, default_value = "1")]
        applications: usize,
    },
    /// Clear all seeded data (keeps accounts created outside the seeder)
    ClearSeed,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let cli = Cli::parse();
    let pool = skillbridge_db::init_db_pool(5).await?;

    match cli.command {
        Commands::CreateSuperAdmin {
            name,
            email,
            password,
        } => handle_create_super_admin(&pool, name, email, password).await,
        Commands::Seed {
            categories,
            instructors,
            courses,
            students,
            applications,
        } => {
            let config = SeedConfig::new(categories)
                .with_instructors(instructors)
                .with_courses_per_category(courses)
                .with_students(students, applications);
            exit_on_error(seeder::seed_all(&pool, config).await, "seeding database")
        }
        Commands::ClearSeed => exit_on_error(seeder::clear_all(&pool).await, "clearing seeded data"),
    }

    Ok(())
}

fn exit_on_error<T>(result: Result<T, Box<dyn std::error::Error>>, action: &str) {
    if let Err(e) = result {
        eprintln!("\n❌ Error {}: {}", action, e);
        std::process::exit(1);
    }
}

fn prompt_or(value: Option<String>, prompt: &str) -> Result<String, dialoguer::Error> {
    match value {
        Some(v) => Ok(v),
        None => Input::new().with_prompt(prompt).interact_text(),
    }
}

async fn handle_create_super_admin(
    pool: &PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let prompted = (|| -> Result<(String, String, String), dialoguer::Error> {
        let name = prompt_or(name, "Full name")?;
        let email = prompt_or(email, "Email address")?;
        let password = match password {
            Some(p) => p,
            None => Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords don't match")
                .interact()?,
        };
        Ok((name, email, password))
    })();

    let (name, email, password) = match prompted {
        Ok(values) => values,
        Err(e) => {
            eprintln!("\n❌ Failed to read input: {}", e);
            std::process::exit(1);
        }
    };

    match create_super_admin(pool, &name, &email, &password).await {
        Ok(_) => {
            println!("\n✅ Super admin created successfully!");
            println!("   Email: {}", email.trim().to_lowercase());
            println!("   Name: {}", name.trim());
        }
        Err(e) => {
            eprintln!("\n❌ Error creating super admin: {}", e);
            std::process::exit(1);
        }
    }
}
