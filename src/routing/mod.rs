//! Route table and the navigation guard that consults it.

pub mod guard;
pub mod table;

pub use guard::{Evaluation, GuardDecision, NavigationGuard};
pub use table::{Resolution, RouteDescriptor, RouteTable};
