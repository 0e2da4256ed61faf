use http_handlers::{handlers, serve};
use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    serve("get-todos", handlers::get_todos).await
}
