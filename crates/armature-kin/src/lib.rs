//! Kinematics for serial-link manipulators: forward kinematics, the 6×N
//! body-frame Jacobian, and damped Jacobian-iteration inverse kinematics.

pub mod forward;
pub mod ik;
pub mod jacobian;

mod error;

pub use error::{KinError, Result};
pub use forward::{link_transforms, pose};
pub use ik::{solve_ik, IkConfig};
pub use jacobian::jacobian;
