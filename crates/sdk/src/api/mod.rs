//! Typed Trello endpoints.
//!
//! Each module exposes request builders (pure functions returning a
//! [`RemoteRequest`](crate::RemoteRequest)) and a borrowed API handle that
//! executes them through the client.

pub mod boards;
pub mod cards;
pub mod labels;
pub mod lists;

pub use boards::BoardsApi;
pub use cards::CardsApi;
pub use labels::LabelsApi;
pub use lists::ListsApi;
