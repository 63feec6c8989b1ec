//! Business logic layer

pub mod capability;
pub mod employee;
pub mod menu;
pub mod restaurant;
pub mod vote;

pub use capability::CapabilityService;
pub use employee::EmployeeService;
pub use menu::MenuService;
pub use restaurant::RestaurantService;
pub use vote::VoteService;
