pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod middleware;
pub mod schema;

use std::sync::Arc;

use actix_web::middleware::{from_fn, Logger};
use actix_web::{web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::invoice_service::InvoiceService;
use application::DynInvoiceService;
use config::AdminSeed;
use domain::errors::DomainError;
use domain::ports::{
    CustomerRepository, IdentityProvider, InvoiceRepository, SessionStore, UserRepository,
};
use infrastructure::credentials_provider::CredentialsProvider;
use infrastructure::customer_repo::DieselCustomerRepository;
use infrastructure::invoice_repo::DieselInvoiceRepository;
use infrastructure::session_repo::DieselSessionStore;
use infrastructure::user_repo::DieselUserRepository;
use infrastructure::view_cache::ViewCache;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::invoices::create_invoice,
        handlers::invoices::update_invoice,
        handlers::invoices::delete_invoice,
        handlers::invoices::get_invoice,
        handlers::invoices::list_invoices,
        handlers::customers::list_customers,
        handlers::auth::login,
        handlers::auth::logout,
    ),
    tags(
        (name = "invoices"),
        (name = "customers"),
        (name = "auth"),
    )
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/// Create the configured dashboard user unless the email is already taken.
pub fn seed_admin(pool: &DbPool, admin: &AdminSeed) -> Result<(), DomainError> {
    let hash = infrastructure::password::hash_password(&admin.password)?;
    DieselUserRepository::new(pool.clone()).ensure(&admin.name, &admin.email, &hash)
}

/// Everything the routes read from application data.
#[derive(Clone)]
pub struct AppComponents {
    pub invoices: web::Data<DynInvoiceService>,
    pub customers: web::Data<dyn CustomerRepository>,
    pub sessions: web::Data<dyn SessionStore>,
    pub identity: web::Data<dyn IdentityProvider>,
    pub views: web::Data<ViewCache>,
}

impl AppComponents {
    pub fn from_pool(pool: DbPool) -> Self {
        let invoices: Box<dyn InvoiceRepository> =
            Box::new(DieselInvoiceRepository::new(pool.clone()));
        let customers: Arc<dyn CustomerRepository> =
            Arc::new(DieselCustomerRepository::new(pool.clone()));
        let sessions: Arc<dyn SessionStore> = Arc::new(DieselSessionStore::new(pool.clone()));
        let identity: Arc<dyn IdentityProvider> = Arc::new(CredentialsProvider::new(
            Box::new(DieselUserRepository::new(pool)),
            sessions.clone(),
        ));

        Self {
            invoices: web::Data::new(InvoiceService::new(invoices)),
            customers: web::Data::from(customers),
            sessions: web::Data::from(sessions),
            identity: web::Data::from(identity),
            views: web::Data::new(ViewCache::new()),
        }
    }

    /// Registers application data and routes. The authorization gate is
    /// applied by the caller around the whole app.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        use handlers::{auth, customers, invoices};

        cfg.app_data(self.invoices.clone())
            .app_data(self.customers.clone())
            .app_data(self.sessions.clone())
            .app_data(self.identity.clone())
            .app_data(self.views.clone())
            .route("/login", web::post().to(auth::login))
            .service(
                web::scope("/dashboard")
                    .route("/logout", web::post().to(auth::logout))
                    .route("/customers", web::get().to(customers::list_customers))
                    .service(
                        web::scope("/invoices")
                            .route("", web::get().to(invoices::list_invoices))
                            .route("", web::post().to(invoices::create_invoice))
                            .route("/{id}", web::get().to(invoices::get_invoice))
                            .route("/{id}", web::post().to(invoices::update_invoice))
                            .route("/{id}", web::delete().to(invoices::delete_invoice)),
                    ),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            );
    }
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    components: AppComponents,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .configure(|cfg| components.configure(cfg))
            .wrap(from_fn(middleware::authorization::authorization_gate))
            .wrap(Logger::default())
    })
    .bind((host.to_string(), port))?
    .run())
}
