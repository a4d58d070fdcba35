use std::fs;
use std::io;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use booklend_client::{AccountView, AuthResponse, LendClient, LendClientError, ListPostsResponse, Post};
use clap::{Parser, Subcommand};
use uuid::Uuid;

const TOKEN_FILE: &str = ".booklend_token";
const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "booklend-cli", version, about = "CLI клиент для booklend-server")]
struct Cli {
    /// Адрес сервера.
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Регистрация пользователя.
    Register {
        #[arg(long)]
        username: String,
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
    /// Выход: удаляет сохранённый токен.
    Logout,
    /// Создание объявления о книге (требует токен).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        description: String,
    },
    /// Получение поста по id (требует токен).
    Get {
        #[arg(long)]
        id: Uuid,
    },
    /// Отметить интерес к посту (требует токен).
    Like {
        #[arg(long)]
        id: Uuid,
    },
    /// Удаление своего поста (требует токен).
    Delete {
        #[arg(long)]
        id: Uuid,
    },
    /// Список постов с поиском по подстроке (требует токен).
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Страница аккаунта: свои и отмеченные посты (требует токен).
    Account,
    /// Установить email в аккаунте (требует токен).
    SetEmail {
        #[arg(long)]
        email: String,
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
    let cli = Cli::parse();

    let server = normalize_server(cli.server.unwrap_or_else(|| DEFAULT_SERVER.to_string()));
    let mut client = LendClient::new(server);

    if let Some(token) = load_token().context("не удалось прочитать .booklend_token")? {
        client.set_token(token);
    }

    match cli.command {
        Command::Register { username, password } => {
            let auth = client
                .register(&username, &password)
                .await
                .map_err(map_client_error)?;
            persist_token(&client).context("не удалось сохранить токен")?;
            print_auth("Регистрация успешна", &auth);
        }
        Command::Login { username, password } => {
            let auth = client
                .login(&username, &password)
                .await
                .map_err(map_client_error)?;
            persist_token(&client).context("не удалось сохранить токен")?;
            print_auth("Вход выполнен", &auth);
        }
        Command::Logout => {
            client.logout();
            remove_token().context("не удалось удалить токен")?;
            println!("Токен удалён");
        }
        Command::Create {
            title,
            author,
            description,
        } => {
            let post = client
                .create_post(&title, &author, &description)
                .await
                .map_err(map_client_error)?;
            print_post("Пост создан", &post);
        }
        Command::Get { id } => {
            let post = client.get_post(id).await.map_err(map_client_error)?;
            print_post("Пост", &post);
        }
        Command::Like { id } => {
            let wanted = client.like_post(id).await.map_err(map_client_error)?;
            println!("Интерес отмечен: id={id}, wanted={wanted}");
        }
        Command::Delete { id } => {
            client.delete_post(id).await.map_err(map_client_error)?;
            println!("Пост удалён: id={id}");
        }
        Command::List { search } => {
            let list = client
                .list_posts(search.as_deref())
                .await
                .map_err(map_client_error)?;
            print_list(&list);
        }
        Command::Account => {
            let account = client.account().await.map_err(map_client_error)?;
            print_account(&account);
        }
        Command::SetEmail { email } => {
            client.update_email(&email).await.map_err(map_client_error)?;
            println!("Email обновлён: {email}");
        }
    }

    Ok(())
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_token_content(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn load_token() -> io::Result<Option<String>> {
    if !Path::new(TOKEN_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(TOKEN_FILE)?;
    Ok(parse_token_content(&raw))
}

fn persist_token(client: &LendClient) -> io::Result<()> {
    if let Some(token) = client.get_token() {
        fs::write(TOKEN_FILE, token)?;
    }
    Ok(())
}

fn remove_token() -> io::Result<()> {
    if Path::new(TOKEN_FILE).exists() {
        fs::remove_file(TOKEN_FILE)?;
    }
    Ok(())
}

fn map_client_error(err: LendClientError) -> anyhow::Error {
    let message = match err {
        LendClientError::Unauthorized => {
            "требуется авторизация: выполните `booklend-cli login ...` или `booklend-cli register ...`"
                .to_string()
        }
        LendClientError::Forbidden => "операция запрещена: это не ваш пост".to_string(),
        LendClientError::NotFound => "ресурс не найден".to_string(),
        LendClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        LendClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_auth(title: &str, auth: &AuthResponse) {
    println!("{title}");
    println!("token: {}", auth.access_token);
    println!("user:");
    println!("  id: {}", auth.user.id);
    println!("  username: {}", auth.user.username);
    println!("  email: {}", auth.user.email.as_deref().unwrap_or("-"));
    println!("  created_at: {}", auth.user.created_at);
}

fn print_post(title: &str, post: &Post) {
    println!("{title}");
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("author: {}", post.author);
    println!("description: {}", post.description);
    println!("owner: {} ({})", post.owner_username, post.owner_id);
    println!("wanted: {}", post.wanted);
    println!("created_at: {}", post.created_at);
}

fn print_list(list: &ListPostsResponse) {
    println!("Постов: {}", list.total);

    for post in &list.posts {
        println!(
            "- [{}] {} — {} (владелец: {}, wanted: {})",
            post.id, post.title, post.author, post.owner_username, post.wanted
        );
    }
}

fn print_account(account: &AccountView) {
    println!("Аккаунт: {}", account.username);
    println!("email: {}", account.email.as_deref().unwrap_or("-"));

    println!("Мои объявления ({}):", account.sent_posts.len());
    for post in &account.sent_posts {
        println!("- [{}] {} — {} (wanted: {})", post.id, post.title, post.author, post.wanted);
    }

    println!("Отмеченные ({}):", account.liked_posts.len());
    for post in &account.liked_posts {
        println!(
            "- [{}] {} — {} (владелец: {})",
            post.id, post.title, post.author, post.owner_username
        );
    }
}
