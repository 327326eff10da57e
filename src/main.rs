use restaurant_pos::{
    configuration::Settings,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
    utils::{get_connection_pool, run_migrations}
};

#[actix_web::main]
async fn main() -> anyhow::Result<()>{
    let subscriber = get_subscriber("restaurant-pos".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    let settings = Settings::get()?;

    run_migrations(&get_connection_pool(&settings.database)).await?;

    let application = Application::build(settings)?;
    tracing::info!(host = %application.host, port = application.port, "Server listening");
    application.server.await?;

    Ok(())
}
