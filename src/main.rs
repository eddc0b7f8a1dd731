#[tokio::main]
async fn main() -> std::io::Result<()> {
    restaurant_web::run_with_config().await
}
