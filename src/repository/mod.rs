//! Data access layer (Repository pattern)

pub mod employee;
pub mod menu;
pub mod restaurant;
pub mod user;
pub mod vote;

pub use employee::EmployeeRepository;
pub use menu::MenuRepository;
pub use restaurant::RestaurantRepository;
pub use user::UserRepository;
pub use vote::VoteRepository;
