// assetpack - staleness-aware JS/CSS bundler
// Entry point; all behavior lives in the library

use assetpack::cli::CliHandler;

#[tokio::main]
async fn main() {
    let handler = CliHandler::new();

    match handler.run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
