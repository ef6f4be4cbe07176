use pdf_sectioner::api::start_api_server;
use pdf_sectioner::config::ApiConfig;
use pdf_sectioner::monitoring::config::MonitoringConfig;
use pdf_sectioner::monitoring::tracing_config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let monitoring = MonitoringConfig::from_env();
    tracing_config::init_tracing(&monitoring);

    let config = ApiConfig::from_env().unwrap_or_else(|e| {
        eprintln!("❌ Configuration error: {}", e);
        std::process::exit(1);
    });

    println!("🚀 Starting API server on http://{} ...", config.bind_addr());
    start_api_server(&config).await
}
