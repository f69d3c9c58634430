//! Authentication service models

pub mod user;

// Re-export for convenience
pub use user::{
    ChangePasswordRequest, LoginRequest, NewUser, RegisterRequest, TokenResponse, User, UserId,
    UserResponse,
};
