use service_core::error::AppError;

pub const GREETING: &str = "Hello World!";

pub async fn index() -> &'static str {
    GREETING
}

pub async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("route not found"))
}
