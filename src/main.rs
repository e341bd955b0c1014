#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    diagnosis_gateway_lib::run().await
}
