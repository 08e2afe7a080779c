mod activity;
mod category;
mod comment;
mod credential;
mod listing;
mod organizer;
mod slug;
mod user;

pub use activity::*;
pub use category::*;
pub use comment::*;
pub use credential::*;
pub use listing::*;
pub use organizer::*;
pub use slug::*;
pub use user::*;
