//! Authentication utilities

mod jwt;
mod passcode;

pub use jwt::{Claims, JwtService, TokenPair, TokenType};
pub use passcode::{hash_passcode, verify_passcode, PasscodeGate};
