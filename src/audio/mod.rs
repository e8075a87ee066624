//! Audio transcoding: inventory, transcoder invocation and the batch driver.

pub mod driver;
pub mod inventory;
pub mod transcoder;
