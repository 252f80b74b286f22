use std::fs;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use cities_shared::application::import_service::ImportService;
use cities_shared::application::user_service::UserService;
use cities_shared::data::repositories::postgres::{
    PostgresOfferRepository, PostgresUserRepository,
};
use cities_shared::domain::user::UserType;
use cities_shared::infrastructure::database::{create_pool, run_migrations};
use cities_shared::infrastructure::logging::init_logging;
use cities_shared::infrastructure::settings::DatabaseSettings;
use cities_shared::tsv::factory::ImportUser;
use cities_shared::tsv::generator::{MockServerData, TsvOfferGenerator};
use cities_shared::tsv::reader::TsvOfferReader;

#[derive(Debug, Parser)]
#[command(name = "cities-cli", version, about = "Six cities data tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Import offers from a TSV file into the database.
    Import {
        /// Path to the TSV file with offers.
        filename: String,
        /// Database login.
        login: String,
        /// Database password.
        password: String,
        /// Database host, e.g. localhost:5432.
        host: String,
        /// Database name.
        dbname: String,
        /// Salt for password hashing.
        salt: String,
    },
    /// Generate synthetic offers into a TSV file.
    Generate {
        /// How many rows to generate.
        count: usize,
        /// Where to write the generated file.
        filepath: String,
        /// Mock server endpoint with the source lists.
        url: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(err) = init_logging() {
        eprintln!("Error: {err}");
        process::exit(1);
    }

    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Import {
            filename,
            login,
            password,
            host,
            dbname,
            salt,
        } => {
            let settings = DatabaseSettings {
                login,
                password,
                host,
                dbname,
            };
            import(&filename, &settings, &salt).await
        }
        Command::Generate {
            count,
            filepath,
            url,
        } => generate(count, &filepath, &url).await,
    }
}

async fn import(filename: &str, settings: &DatabaseSettings, salt: &str) -> Result<()> {
    let pool = create_pool(&settings.url()).await?;
    run_migrations(&pool).await?;

    let offers = PostgresOfferRepository::new(pool.clone());
    let users = UserService::new(PostgresUserRepository::new(pool.clone()), salt);
    let service = ImportService::new(offers, users);

    let reader = TsvOfferReader::new(filename);
    let report = service.import_file(&reader, &default_users()).await?;
    println!(
        "Imported {} offers from {filename} ({} rows skipped)",
        report.imported, report.skipped
    );

    pool.close().await;
    Ok(())
}

async fn generate(count: usize, filepath: &str, url: &str) -> Result<()> {
    let data = reqwest::get(url)
        .await
        .and_then(|resp| resp.error_for_status())
        .with_context(|| format!("can't load data from {url}"))?
        .json::<MockServerData>()
        .await
        .with_context(|| format!("can't load data from {url}"))?;

    let generator = TsvOfferGenerator::new(data)?;
    let content = render_rows(&generator, count);

    fs::write(filepath, content).with_context(|| format!("can't write file {filepath}"))?;
    println!("File {filepath} was created!");
    Ok(())
}

fn render_rows(generator: &TsvOfferGenerator, count: usize) -> String {
    let mut content = String::new();
    for _ in 0..count {
        content.push_str(&generator.generate());
        content.push('\n');
    }
    content
}

/// Identities the import file may reference in its user column.
fn default_users() -> Vec<ImportUser> {
    vec![
        ImportUser {
            name: "Kirill".to_string(),
            email: "kirill@gmail.com".to_string(),
            avatar_url: Some("kirill-avatar.png".to_string()),
            password: "qwerty".to_string(),
            user_type: UserType::Pro,
        },
        ImportUser {
            name: "Sergey".to_string(),
            email: "sergey@gmail.com".to_string(),
            avatar_url: None,
            password: "rtyqwe".to_string(),
            user_type: UserType::Regular,
        },
    ]
}
