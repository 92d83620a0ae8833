use std::fs;
use std::io;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use userhub_client::{
    ApiClientError, AuthResponse, Blog, Profile, Schedule, SessionInfo, SessionState,
    UserHubClient, UserUpdate,
};

const SESSION_FILE: &str = ".userhub_session";
const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";
const SERVER_ENV: &str = "USERHUB_SERVER";

#[derive(Debug, Parser)]
#[command(name = "userhub-cli", version, about = "CLI клиент для userhub-server")]
struct Cli {
    /// Адрес сервера (иначе USERHUB_SERVER или http://127.0.0.1:8080).
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Регистрация пользователя (сразу открывает сессию).
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Вход пользователя.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Состояние текущей сессии.
    Whoami,
    /// Выход.
    Logout,
    /// Операции с пользователями.
    #[command(subcommand)]
    User(UserCommand),
    /// Операции с профилями.
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Операции с блогами.
    #[command(subcommand)]
    Blog(BlogCommand),
    /// Операции с расписаниями.
    #[command(subcommand)]
    Schedule(ScheduleCommand),
}

#[derive(Debug, Subcommand)]
enum UserCommand {
    /// Список пользователей.
    List,
    /// Пользователь по id вместе с записями.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Перезапись данных пользователя; не указанные поля очищаются.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        avatar: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
    /// Удаление пользователя вместе с профилем, блогами и расписаниями.
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum ProfileCommand {
    /// Создание профиля.
    Add {
        #[arg(long)]
        user_id: i64,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
    /// Список профилей.
    List,
    /// Профиль по id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Перезапись профиля.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
    /// Удаление профиля.
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum BlogCommand {
    /// Создание блога.
    Add {
        #[arg(long)]
        user_id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Список блогов (всех или одного пользователя).
    List {
        #[arg(long)]
        user_id: Option<i64>,
    },
    /// Блог по id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Перезапись блога; не указанные поля очищаются.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Удаление блога.
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum ScheduleCommand {
    /// Создание расписания.
    Add {
        #[arg(long)]
        user_id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
    /// Список расписаний (всех или одного пользователя).
    List {
        #[arg(long)]
        user_id: Option<i64>,
    },
    /// Расписание по id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Перезапись расписания; не указанные поля очищаются.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Удаление расписания.
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server = resolve_server(cli.server, std::env::var(SERVER_ENV).ok());
    let mut client = UserHubClient::new(server).map_err(map_client_error)?;

    if let Some(session) = load_session().context("не удалось прочитать .userhub_session")? {
        client.set_session(session);
    }

    match cli.command {
        Command::Register {
            username,
            email,
            password,
        } => {
            let auth = client
                .register(&username, &email, &password)
                .await
                .map_err(map_client_error)?;
            persist_session(&client).context("не удалось сохранить сессию")?;
            print_auth("Регистрация успешна", &auth);
        }
        Command::Login { username, password } => {
            let auth = client
                .login(&username, &password)
                .await
                .map_err(map_client_error)?;
            persist_session(&client).context("не удалось сохранить сессию")?;
            print_auth("Вход выполнен", &auth);
        }
        Command::Whoami => {
            let info = client.logged_in().await.map_err(map_client_error)?;
            persist_session(&client).context("не удалось сохранить сессию")?;
            print_session(&info);
        }
        Command::Logout => {
            client.logout().await.map_err(map_client_error)?;
            persist_session(&client).context("не удалось удалить файл сессии")?;
            println!("Выход выполнен");
        }
        Command::User(command) => run_user(&client, command).await?,
        Command::Profile(command) => run_profile(&client, command).await?,
        Command::Blog(command) => run_blog(&client, command).await?,
        Command::Schedule(command) => run_schedule(&client, command).await?,
    }

    Ok(())
}

async fn run_user(client: &UserHubClient, command: UserCommand) -> Result<()> {
    match command {
        UserCommand::List => {
            let users = client.list_users().await.map_err(map_client_error)?;
            println!("Пользователей: {}", users.len());
            for user in &users {
                println!(
                    "- [{}] {} <{}> (блогов={}, расписаний={})",
                    user.id,
                    user.username,
                    user.email,
                    user.blogs.len(),
                    user.schedules.len()
                );
            }
        }
        UserCommand::Get { id } => {
            let user = client.get_user(id).await.map_err(map_client_error)?;
            print_json("Пользователь", &user)?;
        }
        UserCommand::Update {
            id,
            username,
            email,
            avatar,
            state,
            country,
        } => {
            let update = UserUpdate {
                username,
                email,
                avatar,
                state,
                country,
            };
            let user = client
                .update_user(id, &update)
                .await
                .map_err(map_client_error)?;
            print_json("Пользователь обновлён", &user)?;
        }
        UserCommand::Delete { id } => {
            let report = client.delete_user(id).await.map_err(map_client_error)?;
            println!(
                "Пользователь удалён: id={id} (блогов={}, расписаний={}, профилей={})",
                report.deleted_blogs, report.deleted_schedules, report.deleted_profiles
            );
        }
    }
    Ok(())
}

async fn run_profile(client: &UserHubClient, command: ProfileCommand) -> Result<()> {
    match command {
        ProfileCommand::Add {
            user_id,
            state,
            country,
        } => {
            let profile = client
                .create_profile(user_id, state.as_deref(), country.as_deref())
                .await
                .map_err(map_client_error)?;
            print_profile("Профиль создан", &profile);
        }
        ProfileCommand::List => {
            let profiles = client.list_profiles().await.map_err(map_client_error)?;
            println!("Профилей: {}", profiles.len());
            for profile in &profiles {
                println!(
                    "- [{}] user_id={} state={} country={}",
                    profile.id,
                    profile.user_id,
                    display_opt(&profile.state),
                    display_opt(&profile.country)
                );
            }
        }
        ProfileCommand::Get { id } => {
            let profile = client.get_profile(id).await.map_err(map_client_error)?;
            print_profile("Профиль", &profile);
        }
        ProfileCommand::Update { id, state, country } => {
            let profile = client
                .update_profile(id, state.as_deref(), country.as_deref())
                .await
                .map_err(map_client_error)?;
            print_profile("Профиль обновлён", &profile);
        }
        ProfileCommand::Delete { id } => {
            client.delete_profile(id).await.map_err(map_client_error)?;
            println!("Профиль удалён: id={id}");
        }
    }
    Ok(())
}

async fn run_blog(client: &UserHubClient, command: BlogCommand) -> Result<()> {
    match command {
        BlogCommand::Add {
            user_id,
            title,
            content,
        } => {
            let blog = client
                .create_blog(user_id, &title, &content)
                .await
                .map_err(map_client_error)?;
            print_blog("Блог создан", &blog);
        }
        BlogCommand::List { user_id } => {
            let blogs = match user_id {
                Some(user_id) => client.list_user_blogs(user_id).await,
                None => client.list_blogs().await,
            }
            .map_err(map_client_error)?;
            println!("Блогов: {}", blogs.len());
            for blog in &blogs {
                println!(
                    "- [{}] {} (user_id={})",
                    blog.id,
                    display_opt(&blog.title),
                    blog.user_id
                );
            }
        }
        BlogCommand::Get { id } => {
            let blog = client.get_blog(id).await.map_err(map_client_error)?;
            print_blog("Блог", &blog);
        }
        BlogCommand::Update { id, title, content } => {
            let blog = client
                .update_blog(id, title.as_deref(), content.as_deref())
                .await
                .map_err(map_client_error)?;
            print_blog("Блог обновлён", &blog);
        }
        BlogCommand::Delete { id } => {
            client.delete_blog(id).await.map_err(map_client_error)?;
            println!("Блог удалён: id={id}");
        }
    }
    Ok(())
}

async fn run_schedule(client: &UserHubClient, command: ScheduleCommand) -> Result<()> {
    match command {
        ScheduleCommand::Add {
            user_id,
            title,
            description,
        } => {
            let schedule = client
                .create_schedule(user_id, &title, &description)
                .await
                .map_err(map_client_error)?;
            print_schedule("Расписание создано", &schedule);
        }
        ScheduleCommand::List { user_id } => {
            let schedules = match user_id {
                Some(user_id) => client.list_user_schedules(user_id).await,
                None => client.list_schedules().await,
            }
            .map_err(map_client_error)?;
            println!("Расписаний: {}", schedules.len());
            for schedule in &schedules {
                println!(
                    "- [{}] {} (user_id={})",
                    schedule.id,
                    display_opt(&schedule.title),
                    schedule.user_id
                );
            }
        }
        ScheduleCommand::Get { id } => {
            let schedule = client.get_schedule(id).await.map_err(map_client_error)?;
            print_schedule("Расписание", &schedule);
        }
        ScheduleCommand::Update {
            id,
            title,
            description,
        } => {
            let schedule = client
                .update_schedule(id, title.as_deref(), description.as_deref())
                .await
                .map_err(map_client_error)?;
            print_schedule("Расписание обновлено", &schedule);
        }
        ScheduleCommand::Delete { id } => {
            client.delete_schedule(id).await.map_err(map_client_error)?;
            println!("Расписание удалено: id={id}");
        }
    }
    Ok(())
}

fn resolve_server(flag: Option<String>, env: Option<String>) -> String {
    let raw = flag
        .or(env)
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());
    normalize_server(raw)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_session_content(raw: &str) -> Option<String> {
    let session = raw.trim().to_string();
    if session.is_empty() {
        return None;
    }
    Some(session)
}

fn load_session() -> io::Result<Option<String>> {
    if !Path::new(SESSION_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(SESSION_FILE)?;
    Ok(parse_session_content(&raw))
}

/// Сохраняет cookie сессии; если её больше нет, удаляет файл.
fn persist_session(client: &UserHubClient) -> io::Result<()> {
    match client.session() {
        Some(session) => fs::write(SESSION_FILE, session),
        None if Path::new(SESSION_FILE).exists() => fs::remove_file(SESSION_FILE),
        None => Ok(()),
    }
}

fn map_client_error(err: ApiClientError) -> anyhow::Error {
    let message = match err {
        ApiClientError::NotFound(message) => format!("не найдено: {message}"),
        ApiClientError::Conflict(message) => format!("конфликт: {message}"),
        ApiClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        ApiClientError::Server(message) => format!("ошибка сервера: {message}"),
        ApiClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn display_opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn describe_session(info: &SessionInfo) -> String {
    let username = info.username.as_deref().unwrap_or("-");
    match info.status {
        SessionState::Anonymous => "Сессии нет".to_string(),
        SessionState::LoggedIn => format!("Вход выполнен как {username}"),
        SessionState::Orphaned => {
            format!("Сессия принадлежит удалённому пользователю {username}")
        }
    }
}

fn print_auth(title: &str, auth: &AuthResponse) {
    println!("{title}");
    println!("message: {}", auth.message);
    println!("user_id: {}", auth.user_id);
}

fn print_session(info: &SessionInfo) {
    println!("{}", describe_session(info));
    if let Some(user_id) = info.user_id {
        println!("user_id: {user_id}");
    }
}

fn print_json<T: Serialize>(title: &str, value: &T) -> Result<()> {
    println!("{title}");
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_profile(title: &str, profile: &Profile) {
    println!("{title}");
    println!("id: {}", profile.id);
    println!("user_id: {}", profile.user_id);
    println!("state: {}", display_opt(&profile.state));
    println!("country: {}", display_opt(&profile.country));
}

fn print_blog(title: &str, blog: &Blog) {
    println!("{title}");
    println!("id: {}", blog.id);
    println!("title: {}", display_opt(&blog.title));
    println!("content: {}", display_opt(&blog.content));
    println!("user_id: {}", blog.user_id);
    println!("created_at: {}", blog.created_at);
    println!("updated_at: {}", blog.updated_at);
}

fn print_schedule(title: &str, schedule: &Schedule) {
    println!("{title}");
    println!("id: {}", schedule.id);
    println!("title: {}", display_opt(&schedule.title));
    println!("description: {}", display_opt(&schedule.description));
    println!("user_id: {}", schedule.user_id);
    println!("created_at: {}", schedule.created_at);
    println!("updated_at: {}", schedule.updated_at);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8080".to_string());
        assert_eq!(s, "https://example.com:8080");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:9000".to_string());
        assert_eq!(s, "http://127.0.0.1:9000");
    }

    #[test]
    fn resolve_server_prefers_flag_then_env() {
        assert_eq!(resolve_server(None, None), DEFAULT_SERVER);
        assert_eq!(
            resolve_server(None, Some("localhost:7000".to_string())),
            "http://localhost:7000"
        );
        assert_eq!(
            resolve_server(
                Some("localhost:9999".to_string()),
                Some("localhost:7000".to_string())
            ),
            "http://localhost:9999"
        );
    }

    #[test]
    fn parse_session_content_trims_whitespace() {
        let session = parse_session_content("  abc.def.ghi\n");
        assert_eq!(session.as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn parse_session_content_rejects_blank() {
        assert!(parse_session_content("   ").is_none());
    }

    #[test]
    fn orphaned_session_is_described_with_username() {
        let info = SessionInfo {
            status: SessionState::Orphaned,
            user_id: Some(3),
            username: Some("alice".to_string()),
        };
        assert!(describe_session(&info).contains("alice"));
    }

    #[test]
    fn cli_parses_nested_blog_update() {
        let cli = Cli::try_parse_from([
            "userhub-cli",
            "blog",
            "update",
            "--id",
            "4",
            "--content",
            "text",
        ])
        .expect("arguments must parse");

        match cli.command {
            Command::Blog(BlogCommand::Update { id, title, content }) => {
                assert_eq!(id, 4);
                assert!(title.is_none());
                assert_eq!(content.as_deref(), Some("text"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
