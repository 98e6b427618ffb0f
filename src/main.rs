use survey_processor_lib::config::AppConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = survey_processor_lib::run(config).await {
        eprintln!("Error running survey processor: {:#}", e);
        std::process::exit(1);
    }
}
