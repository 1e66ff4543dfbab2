use std::net::TcpListener;
use std::sync::Arc;

use actix_web::{dev::Server, web, App, HttpServer};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing_actix_web::TracingLogger;

use crate::config::{DatabaseSettings, Settings, StorageBackend};
use crate::domain::ContactEmail;
use crate::email_client::EmailClient;
use crate::routes::{health_check, submit_contact, subscribe};
use crate::store::{InMemoryStore, PostgresStore, SubmissionStore};
use crate::utils::json_error_handler;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Builds the storage backend named in the configuration, then the server.
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let store: Arc<dyn SubmissionStore> = match config.database.backend {
            StorageBackend::Postgres => {
                let store = PostgresStore::new(get_connection_pool(&config.database));
                store.migrate().await?;
                Arc::new(store)
            }
            StorageBackend::Memory => {
                tracing::warn!("Using the in-memory store, submissions will not survive a restart");
                Arc::new(InMemoryStore::new())
            }
        };

        Self::build_with_store(config, store).await
    }

    pub async fn build_with_store(
        config: Settings,
        store: Arc<dyn SubmissionStore>,
    ) -> Result<Self, anyhow::Error> {
        let email_client = config.email_client.client()?;
        let mailbox = config.email_client.contact_mailbox()?;
        if config.email_client.authorization_token.is_none() {
            tracing::warn!("No mail transport credentials configured, notifications will fail");
        }

        let listener = TcpListener::bind(config.application.address())?;
        let port = listener.local_addr()?.port();
        let server = run(listener, store, email_client, mailbox)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

// Handlers retrieve app data by type, so the mailbox gets its own wrapper
// instead of travelling as a bare `ContactEmail`.
pub struct ContactMailbox(pub ContactEmail);

pub fn run(
    listener: TcpListener,
    store: Arc<dyn SubmissionStore>,
    email_client: EmailClient,
    mailbox: ContactEmail,
) -> std::io::Result<Server> {
    let store = web::Data::from(store);
    let email_client = web::Data::new(email_client);
    let mailbox = web::Data::new(ContactMailbox(mailbox));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(store.clone())
            .app_data(email_client.clone())
            .app_data(mailbox.clone())
            .route("/health_check", web::get().to(health_check))
            .route("/api/contact", web::post().to(submit_contact))
            .route("/api/newsletter", web::post().to(subscribe))
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn get_connection_pool(database: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(database.connection_with_db())
}
