//! Command-line surface of the `taskly` binary.

use anyhow::Context;
use api::auth::{validate_sign_in, SignUpForm};
use api::{ApiClient, Navigator, ProjectData, SignInData, TaskData};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use store::{Priority, SessionStore};

#[derive(Debug, Parser)]
#[command(name = "taskly", version, about = "Taskly command-line client")]
pub struct Cli {
    /// Backend base URL, overriding settings.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account and sign in.
    SignUp {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Password confirmation; must match --password.
        #[arg(long)]
        confirm: String,
        #[arg(long)]
        age: u32,
    },
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session.
    SignOut,
    /// Show the signed-in user.
    Whoami,
    #[command(subcommand)]
    Projects(ProjectsCommand),
    #[command(subcommand)]
    Tasks(TasksCommand),
}

#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    List,
    Show {
        id: u64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum TasksCommand {
    List,
    Show {
        id: u64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Due date, RFC 3339 (e.g. 2024-05-01T17:00:00Z).
        #[arg(long)]
        due: DateTime<Utc>,
        #[arg(long, default_value = "pending")]
        status: String,
    },
}

pub async fn run<S, N>(command: Command, client: &ApiClient<S, N>) -> anyhow::Result<()>
where
    S: SessionStore,
    N: Navigator,
{
    match command {
        Command::SignUp {
            name,
            email,
            password,
            confirm,
            age,
        } => {
            let form = SignUpForm {
                name,
                email,
                password,
                confirm_password: confirm,
                age,
            };
            let data = form.to_sign_up_data()?;
            let auth = client.sign_up(&data).await?;
            println!("Welcome, {}!", auth.display_name());
        }
        Command::SignIn { email, password } => {
            let data = SignInData { email, password };
            validate_sign_in(&data)?;
            let auth = client.sign_in(&data).await?;
            println!("Hello, {}!", auth.display_name());
        }
        Command::SignOut => {
            client.sign_out().await.context("failed to clear session")?;
            println!("Signed out.");
        }
        Command::Whoami => {
            let session = client.session();
            let user = session.user().await.context("failed to read session")?;
            let token = session.token().await.context("failed to read session")?;
            match (user, token) {
                (Some(user), Some(_)) => {
                    println!("{} <{}>", user.display_name(), user.email);
                    if let Some(role) = session.user_role().await? {
                        println!("role: {role}");
                    }
                }
                _ => println!("Not signed in."),
            }
        }
        Command::Projects(command) => projects(command, client).await?,
        Command::Tasks(command) => tasks(command, client).await?,
    }
    Ok(())
}

async fn projects<S, N>(command: ProjectsCommand, client: &ApiClient<S, N>) -> anyhow::Result<()>
where
    S: SessionStore,
    N: Navigator,
{
    match command {
        ProjectsCommand::List => {
            let list = client.list_projects().await?;
            if list.projects.is_empty() {
                println!("No projects.");
            }
            for project in list.projects {
                match project.description {
                    Some(description) => println!("{}  {}", project.name, description),
                    None => println!("{}", project.name),
                }
            }
        }
        ProjectsCommand::Show { id } => {
            let project = client.get_project(id).await?;
            println!("{}", serde_json::to_string_pretty(&project)?);
        }
        ProjectsCommand::Create { name, description } => {
            let project = client
                .create_project(&ProjectData { name, description })
                .await?;
            println!("Created project {} ({})", project.name, project.id);
        }
    }
    Ok(())
}

async fn tasks<S, N>(command: TasksCommand, client: &ApiClient<S, N>) -> anyhow::Result<()>
where
    S: SessionStore,
    N: Navigator,
{
    match command {
        TasksCommand::List => {
            let tasks = client.list_tasks().await?;
            if tasks.is_empty() {
                println!("No tasks.");
            }
            for task in tasks {
                println!(
                    "[{}] {} ({}, due {})",
                    task.status_task,
                    task.name_task,
                    task.priority,
                    task.due_date.format("%Y-%m-%d")
                );
            }
        }
        TasksCommand::Show { id } => {
            let task = client.get_task(id).await?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TasksCommand::Create {
            name,
            description,
            priority,
            due,
            status,
        } => {
            let response = client
                .create_task(&TaskData {
                    name_task: name,
                    description,
                    status_task: status,
                    priority,
                    due_date: due,
                    start_date: None,
                    completed_at: None,
                })
                .await?;
            if response.message.is_empty() {
                println!("Task created.");
            } else {
                println!("{}", response.message);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_task_create() {
        let cli = Cli::try_parse_from([
            "taskly",
            "--base-url",
            "http://example.com",
            "tasks",
            "create",
            "--name",
            "Ship",
            "--priority",
            "high",
            "--due",
            "2024-05-01T17:00:00Z",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("http://example.com"));
        let Command::Tasks(TasksCommand::Create { priority, status, .. }) = cli.command else {
            panic!("unexpected command");
        };
        assert_eq!(priority, Priority::High);
        assert_eq!(status, "pending");
    }

    #[test]
    fn test_parse_sign_up() {
        let cli = Cli::try_parse_from([
            "taskly", "sign-up", "--name", "Maria Lopez", "--email", "m@example.com",
            "--password", "pa$worD1", "--confirm", "pa$worD1", "--age", "30",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::SignUp { age: 30, .. }));
    }
}
