use http_handlers::{handlers, serve};
use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    serve("update-todo", handlers::update_todo).await
}
