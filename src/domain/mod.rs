pub mod auth;
pub mod booking;
pub mod datetime;
pub mod envelope;
pub mod menu;
pub mod ports;
pub mod session;
pub mod table;
pub mod validation;

// Re-export the domain boundary types and ports.
pub use auth::{AdministratorInfo, BearerToken, LoginRequest, TokenPair};
pub use booking::{Booking, BookingForm, CustomerSummary, TableSummary, UpdateBooking};
pub use envelope::ServiceResponse;
pub use menu::{CreateMenuItem, MenuItem, MenuItemForm, UpdateMenuItem};
pub use ports::{AuthApi, BookingApi, Clock, MenuApi, SessionStore, TableApi};
pub use session::{Flash, FlashKind, SessionChange, SessionData, SessionIdentity};
pub use table::{CreateTable, Table, TableForm, UpdateTable};
pub use validation::{FieldError, ValidationErrors};
