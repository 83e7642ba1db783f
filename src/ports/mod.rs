//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! domain and the outside world. Adapters implement these ports.
//!
//! ## Trust-boundary Ports
//!
//! - `UserStore` - user lookup plus the atomic premium-grant write
//! - `ReceiptGateway` - outbound call to Apple's verification endpoints
//! - `PurchaseGateway` - outbound call to the Google Play purchase API
//! - `CheckoutGateway` - checkout session creation with the payment processor
//!
//! ## CRUD Ports
//!
//! - `TaskRepository`, `ProjectRepository`, `LabelRepository` - owner-scoped
//!   persistence for the task-tracking entities

mod checkout_gateway;
mod label_repository;
mod project_repository;
mod purchase_gateway;
mod receipt_gateway;
mod task_repository;
mod user_store;

pub use checkout_gateway::{CheckoutError, CheckoutGateway, CheckoutSession, CreateCheckoutRequest};
pub use label_repository::LabelRepository;
pub use project_repository::ProjectRepository;
pub use purchase_gateway::{PurchaseGateway, PurchaseRecord, PURCHASE_STATE_PURCHASED};
pub use receipt_gateway::{
    GatewayError, InAppPurchase, ReceiptBody, ReceiptGateway, ReceiptVerifyRequest,
    ReceiptVerifyResponse,
};
pub use task_repository::{TaskFilter, TaskRepository};
pub use user_store::{GrantOutcome, UserRecord, UserStore};
