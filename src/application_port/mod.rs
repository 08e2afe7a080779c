mod activity_service;
mod auth_service;
mod category_service;
mod comment_service;
mod dashboard_service;
mod organizer_service;

pub use activity_service::*;
pub use auth_service::*;
pub use category_service::*;
pub use comment_service::*;
pub use dashboard_service::*;
pub use organizer_service::*;
