//! Application state traits for dependency injection
//!
//! Handlers are generic over [`HasServices`] so the same code runs against
//! the production `AppState` and the in-memory state used by the HTTP tests.

use crate::config::Config;
use crate::jwt::JwtManager;
use crate::repository::{
    EmployeeRepository, MenuRepository, RestaurantRepository, UserRepository, VoteRepository,
};
use crate::service::{
    CapabilityService, EmployeeService, MenuService, RestaurantService, VoteService,
};
use metrics_exporter_prometheus::PrometheusHandle;

pub trait HasServices: Clone + Send + Sync + 'static {
    type UserRepo: UserRepository;
    type RestaurantRepo: RestaurantRepository;
    type MenuRepo: MenuRepository;
    type EmployeeRepo: EmployeeRepository;
    type VoteRepo: VoteRepository;

    fn config(&self) -> &Config;

    fn jwt_manager(&self) -> &JwtManager;

    /// Resolves the capabilities of the calling actor
    fn capability_service(
        &self,
    ) -> &CapabilityService<Self::UserRepo, Self::RestaurantRepo, Self::EmployeeRepo>;

    fn restaurant_service(&self) -> &RestaurantService<Self::RestaurantRepo>;

    fn menu_service(&self) -> &MenuService<Self::MenuRepo, Self::RestaurantRepo>;

    fn employee_service(&self) -> &EmployeeService<Self::EmployeeRepo, Self::UserRepo>;

    fn vote_service(&self) -> &VoteService<Self::VoteRepo, Self::MenuRepo>;

    /// Prometheus handle, present when metrics are enabled
    fn prometheus_handle(&self) -> Option<&PrometheusHandle>;

    /// Whether the backing store is reachable
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}
