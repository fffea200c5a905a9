use std::io;

use dotenvy::dotenv;
use invoice_dashboard::config::Settings;
use invoice_dashboard::{build_server, create_pool, run_migrations, seed_admin, AppComponents};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = Settings::from_env().map_err(io::Error::other)?;

    let pool = create_pool(&settings.database_url).map_err(io::Error::other)?;
    run_migrations(&pool).map_err(io::Error::other)?;

    if let Some(admin) = &settings.admin {
        seed_admin(&pool, admin).map_err(io::Error::other)?;
        log::info!("Dashboard user {} is ready", admin.email);
    }

    log::info!("Starting server at http://{}:{}", settings.host, settings.port);

    build_server(AppComponents::from_pool(pool), &settings.host, settings.port)?.await
}
