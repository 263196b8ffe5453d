#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    electronic_bill_server::run().await
}
