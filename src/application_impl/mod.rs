mod activity_service_impl;
mod auth_service_impl;
mod category_service_impl;
mod comment_service_impl;
mod dashboard_service_impl;
mod organizer_service_impl;

pub use activity_service_impl::*;
pub use auth_service_impl::*;
pub use category_service_impl::*;
pub use comment_service_impl::*;
pub use dashboard_service_impl::*;
pub use organizer_service_impl::*;
