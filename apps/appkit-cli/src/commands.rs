use std::sync::Arc;

use anyhow::{Context, Result, bail};
use appkit_api::ApiClient;
use clap::Subcommand;
use help_center_sdk::{HelpCenterClientV1, ListHelpFaqsParams, SubmitFeedbackReq};
use notification_settings_sdk::{
    DndWindow, NotificationSettingsClientV1, UpdateNotificationSettingsReq,
};
use serde_json::{Value, json};
use user_profile::{FileStorage, UserStore};

use crate::config::AppConfig;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Help center: categories, FAQs and feedback
    #[command(subcommand)]
    Help(HelpCommand),
    /// Notification settings
    #[command(subcommand)]
    Notify(NotifyCommand),
    /// Locally stored user profile
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Debug, Subcommand)]
pub enum HelpCommand {
    /// List help categories
    Categories,
    /// List FAQs
    Faqs {
        #[arg(long)]
        category_id: Option<String>,
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long)]
        page: Option<i32>,
        #[arg(long)]
        page_size: Option<i32>,
    },
    /// Submit feedback
    Feedback {
        #[arg(long)]
        category: String,
        #[arg(long)]
        description: String,
        /// Image URL, repeatable
        #[arg(long = "image")]
        images: Vec<String>,
        #[arg(long)]
        contact: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum NotifyCommand {
    /// Show current settings
    Get,
    /// Update settings; omitted toggles keep their current value
    Update {
        #[arg(long)]
        system: Option<bool>,
        #[arg(long)]
        activity: Option<bool>,
        #[arg(long)]
        order: Option<bool>,
        /// Do-not-disturb start, HH:mm
        #[arg(long, requires = "dnd_end")]
        dnd_start: Option<String>,
        /// Do-not-disturb end, HH:mm
        #[arg(long, requires = "dnd_start")]
        dnd_end: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Load the profile from the server and store it
    Fetch,
    /// Print the stored profile
    Show,
    /// Forget the stored profile
    Clear,
    /// Change the stored avatar
    SetAvatar { url: String },
}

/// Run `command` and return what should be printed.
///
/// # Errors
/// Propagates configuration, transport, API and store failures.
pub async fn run(command: Commands, config: &AppConfig) -> Result<Value> {
    match command {
        Commands::Help(command) => help(command, &api_client(config)?).await,
        Commands::Notify(command) => notify(command, &api_client(config)?).await,
        Commands::Profile(command) => profile(command, config).await,
    }
}

fn api_client(config: &AppConfig) -> Result<ApiClient> {
    config
        .api
        .build_client()
        .context("failed to build API client")
}

async fn help(command: HelpCommand, api: &ApiClient) -> Result<Value> {
    let client = help_center::RestClient::new(api.clone());
    let reply = match command {
        HelpCommand::Categories => serde_json::to_value(client.list_help_categories(None).await?)?,
        HelpCommand::Faqs {
            category_id,
            keyword,
            page,
            page_size,
        } => {
            let params = ListHelpFaqsParams {
                category_id,
                keyword,
                page,
                page_size,
            };
            serde_json::to_value(client.list_help_faqs(&params, None).await?)?
        }
        HelpCommand::Feedback {
            category,
            description,
            images,
            contact,
        } => {
            let mut body = SubmitFeedbackReq::new(category, description).with_images(&images)?;
            body.contact = contact;
            serde_json::to_value(client.submit_feedback(&body, None).await?)?
        }
    };
    Ok(reply)
}

async fn notify(command: NotifyCommand, api: &ApiClient) -> Result<Value> {
    let client = notification_settings::RestClient::new(api.clone());
    match command {
        NotifyCommand::Get => Ok(serde_json::to_value(
            client.get_notification_settings(None).await?,
        )?),
        NotifyCommand::Update {
            system,
            activity,
            order,
            dnd_start,
            dnd_end,
        } => {
            let window = match (dnd_start, dnd_end) {
                (Some(start), Some(end)) => Some(DndWindow::parse(&start, &end)?),
                (None, None) => None,
                _ => bail!("--dnd-start and --dnd-end must be given together"),
            };

            // Omitted toggles would be stored as false; start from the current values.
            let current = client
                .get_notification_settings(None)
                .await?
                .settings
                .unwrap_or_default();
            let mut body = UpdateNotificationSettingsReq::from_current(&current);
            body.system_notification = system.or(body.system_notification);
            body.activity_notification = activity.or(body.activity_notification);
            body.order_notification = order.or(body.order_notification);
            if let Some(window) = &window {
                body = body.with_dnd_window(window);
            }

            client.update_notification_settings(&body, None).await?;
            tracing::info!(?window, "notification settings updated");
            Ok(serde_json::to_value(&body)?)
        }
    }
}

async fn profile(command: ProfileCommand, config: &AppConfig) -> Result<Value> {
    let dir = config.storage.resolved_dir()?;
    let storage = Arc::new(
        FileStorage::open(&dir)
            .with_context(|| format!("cannot open profile storage at {}", dir.display()))?,
    );

    let client = Arc::new(user_profile::RestClient::new(api_client(config)?));
    let store = UserStore::new(client, storage);
    match command {
        ProfileCommand::Fetch => {
            store.fetch(None).await?;
        }
        ProfileCommand::Show => {}
        ProfileCommand::Clear => store.clear(),
        ProfileCommand::SetAvatar { url } => store.set_avatar(url)?,
    }

    Ok(json!({ "userInfo": store.profile() }))
}
