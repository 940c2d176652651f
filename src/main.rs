mod commands;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lms_portal::api::{HttpApiClient, LmsApi};
use lms_portal::config::Config;
use lms_portal::models::{ClassFilter, Weekday};
use lms_portal::navigation::HistoryNavigator;
use lms_portal::session::SessionStore;
use lms_portal::storage::SqliteStorage;

use commands::App;

#[derive(Parser)]
#[command(name = "lms")]
#[command(about = "Admin and participant console for the LMS backend")]
#[command(version)]
struct Cli {
    /// Backend API base URL (overrides NEXT_PUBLIC_API_BASE_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session storage database URL (overrides LMS_STORAGE_URL)
    #[arg(long, global = true)]
    storage_url: Option<String>,

    /// Conference server domain (overrides LMS_MEETING_DOMAIN)
    #[arg(long, global = true)]
    meeting_domain: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Signin {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "LMS_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Signout,

    /// Show who is signed in
    Whoami,

    /// Show the home dashboard for the signed-in role
    Dashboard {
        /// Class filter (all, upcoming, completed)
        #[arg(short, long, default_value = "all")]
        filter: ClassFilter,
    },

    /// Manage course categories
    Categories {
        #[command(subcommand)]
        action: CategoryCommands,
    },

    /// Manage courses
    Courses {
        #[command(subcommand)]
        action: CourseCommands,
    },

    /// Manage instructors
    Instructors {
        #[command(subcommand)]
        action: PersonCommands,
    },

    /// Manage students
    Students {
        #[command(subcommand)]
        action: PersonCommands,
    },

    /// Manage the batches of a course
    Batches {
        #[command(subcommand)]
        action: BatchCommands,
    },

    /// Manage the class sessions of a course
    Sessions {
        #[command(subcommand)]
        action: SessionCommands,
    },

    /// Join a live class
    Meeting {
        #[command(subcommand)]
        action: MeetingCommands,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// List categories
    List,
    /// Show one category
    Show { id: i64 },
    /// Create a category
    Create {
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Edit a category
    Edit {
        id: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a category
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum CourseCommands {
    /// List courses
    List,
    /// Show one course
    Show { id: i64 },
    /// Create a course
    Create {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Instructor id
        #[arg(short, long)]
        instructor: i64,
        /// Category id
        #[arg(short, long)]
        category: Option<i64>,
        /// Duration in weeks
        #[arg(short, long)]
        weeks: u32,
        /// Syllabus entry, repeat for several
        #[arg(short, long)]
        syllabus: Vec<String>,
    },
    /// Edit a course; unset options keep their current value
    Edit {
        id: i64,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        instructor: Option<i64>,
        #[arg(short, long)]
        category: Option<i64>,
        #[arg(short, long)]
        weeks: Option<u32>,
        /// Replaces the whole syllabus when given
        #[arg(short, long)]
        syllabus: Vec<String>,
    },
}

#[derive(Subcommand)]
enum PersonCommands {
    /// List records
    List,
    /// Create a record
    Create {
        name: String,
        email: String,
        phone: String,
        #[arg(long)]
        secondary_phone: Option<String>,
    },
}

#[derive(Subcommand)]
enum BatchCommands {
    /// List the batches of a course
    List { course: i64 },
    /// Show one batch with its students and sessions
    Show { id: i64 },
    /// Create a batch
    Create {
        course: i64,
        name: String,
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        end: String,
        /// Session days, comma separated (mon,wed or Monday,Wednesday)
        #[arg(long, value_delimiter = ',')]
        days: Vec<Weekday>,
        /// Session start (HH:MM)
        #[arg(long)]
        from: String,
        /// Session end (HH:MM)
        #[arg(long)]
        to: String,
    },
}

#[derive(Subcommand)]
enum SessionCommands {
    /// List the class sessions of a course
    List { course: i64 },
    /// Generate recurring sessions for a course
    Generate {
        course: i64,
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        #[arg(long, value_delimiter = ',')]
        days: Vec<Weekday>,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        weeks: u32,
    },
    /// Generate the meeting link for a session
    StartMeeting { course: i64, session: i64 },
}

#[derive(Subcommand)]
enum MeetingCommands {
    /// Join by room identifier
    Join { room: String },
    /// Join by class-session id
    Session { id: i64 },
}

async fn build_app(cli: &Cli) -> Result<App> {
    let mut config = Config::new_from_env().context("Invalid configuration")?;
    if let Some(url) = &cli.api_url {
        config.api_base_url = url.clone();
    }
    if let Some(url) = &cli.storage_url {
        config.storage_url = url.clone();
    }
    if let Some(domain) = &cli.meeting_domain {
        config.meeting_domain = domain.clone();
    }
    config.validate().context("Invalid configuration")?;

    let storage = SqliteStorage::connect(&config.storage_url)
        .await
        .with_context(|| format!("Failed to open session storage at {}", config.storage_url))?;
    let store = SessionStore::new(Arc::new(storage));
    let client = HttpApiClient::new(&config.api_base_url)?.with_session(store.clone());
    let api = LmsApi::new(Arc::new(client));
    let session = store
        .load_context()
        .await
        .context("Failed to read the stored session")?;

    Ok(App {
        config,
        api,
        store,
        session,
        nav: HistoryNavigator::new(),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "lms_portal=info,lms=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let app = build_app(&cli).await?;

    let result = match cli.command {
        Commands::Signin { email, password } => commands::auth::signin(&app, &email, &password).await,
        Commands::Signout => commands::auth::signout(&app).await,
        Commands::Whoami => commands::auth::whoami(&app),
        Commands::Dashboard { filter } => commands::dashboard::run(&app, filter).await,

        Commands::Categories { action } => match action {
            CategoryCommands::List => commands::categories::list(&app).await,
            CategoryCommands::Show { id } => commands::categories::show(&app, id).await,
            CategoryCommands::Create { name, description } => {
                commands::categories::create(&app, &name, &description).await
            }
            CategoryCommands::Edit {
                id,
                name,
                description,
            } => commands::categories::edit(&app, id, name, description).await,
            CategoryCommands::Delete { id } => commands::categories::delete(&app, id).await,
        },

        Commands::Courses { action } => match action {
            CourseCommands::List => commands::courses::list(&app).await,
            CourseCommands::Show { id } => commands::courses::show(&app, id).await,
            CourseCommands::Create {
                title,
                description,
                instructor,
                category,
                weeks,
                syllabus,
            } => {
                let fields = commands::courses::CourseFields {
                    title: Some(title),
                    description: Some(description),
                    instructor: Some(instructor),
                    category,
                    weeks: Some(weeks),
                    syllabus,
                };
                commands::courses::create(&app, fields).await
            }
            CourseCommands::Edit {
                id,
                title,
                description,
                instructor,
                category,
                weeks,
                syllabus,
            } => {
                let fields = commands::courses::CourseFields {
                    title,
                    description,
                    instructor,
                    category,
                    weeks,
                    syllabus,
                };
                commands::courses::edit(&app, id, fields).await
            }
        },

        Commands::Instructors { action } => match action {
            PersonCommands::List => commands::people::list_instructors(&app).await,
            PersonCommands::Create {
                name,
                email,
                phone,
                secondary_phone,
            } => {
                let form = commands::people::form(name, email, phone, secondary_phone);
                commands::people::create_instructor(&app, &form).await
            }
        },

        Commands::Students { action } => match action {
            PersonCommands::List => commands::people::list_students(&app).await,
            PersonCommands::Create {
                name,
                email,
                phone,
                secondary_phone,
            } => {
                let form = commands::people::form(name, email, phone, secondary_phone);
                commands::people::create_student(&app, &form).await
            }
        },

        Commands::Batches { action } => match action {
            BatchCommands::List { course } => commands::batches::list(&app, course).await,
            BatchCommands::Show { id } => commands::batches::show(&app, id).await,
            BatchCommands::Create {
                course,
                name,
                start,
                end,
                days,
                from,
                to,
            } => {
                let form = lms_portal::pages::batches::BatchForm {
                    name,
                    start_date: start,
                    end_date: end,
                    session_days: days,
                    session_start_time: from,
                    session_end_time: to,
                };
                commands::batches::create(&app, course, &form).await
            }
        },

        Commands::Sessions { action } => match action {
            SessionCommands::List { course } => commands::sessions::list(&app, course).await,
            SessionCommands::Generate {
                course,
                start,
                days,
                from,
                to,
                weeks,
            } => {
                let form = lms_portal::pages::class_sessions::GenerateForm {
                    start_date: start,
                    days_of_week: days,
                    start_time: from,
                    end_time: to,
                    duration_weeks: weeks.to_string(),
                };
                commands::sessions::generate(&app, course, &form).await
            }
            SessionCommands::StartMeeting { course, session } => {
                commands::sessions::start_meeting(&app, course, session).await
            }
        },

        Commands::Meeting { action } => match action {
            MeetingCommands::Join { room } => commands::meeting::join(&app, &room).await,
            MeetingCommands::Session { id } => commands::meeting::join_session(&app, id).await,
        },
    };

    app.report_navigation();
    result
}
