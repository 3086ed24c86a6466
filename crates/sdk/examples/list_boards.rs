//! List boards, then the lists on the first board.
//!
//! Reads `TRELLO_API_KEY` and `TRELLO_API_TOKEN` from the environment.
//!
//! Run with: cargo run --example list_boards

use trello_sdk::{TrelloClient, TrelloResult};

#[tokio::main]
async fn main() -> TrelloResult<()> {
    tracing_subscriber::fmt::init();

    let client = TrelloClient::builder()
        .api_key(std::env::var("TRELLO_API_KEY").unwrap_or_default())
        .api_token(std::env::var("TRELLO_API_TOKEN").unwrap_or_default())
        .build()?;

    let boards = client.boards().list_mine().await?;
    let Some(boards) = boards.as_array() else {
        println!("Unexpected response: {}", boards);
        return Ok(());
    };

    println!("Found {} boards", boards.len());
    for board in boards {
        println!("  {} ({})", board["name"], board["id"]);
    }

    if let Some(board_id) = boards.first().and_then(|b| b["id"].as_str()) {
        let lists = client.boards().lists(board_id).await?;
        println!("\nLists on {}:", board_id);
        for list in lists.as_array().into_iter().flatten() {
            println!("  {} ({})", list["name"], list["id"]);
        }
    }

    Ok(())
}
