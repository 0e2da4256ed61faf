use http_handlers::{handlers, serve};
use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    serve("delete-todo", handlers::delete_todo).await
}
