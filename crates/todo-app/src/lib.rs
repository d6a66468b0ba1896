// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod controller;
pub mod ids;
pub mod messages;
pub mod model;
pub mod patch;

pub use controller::*;
pub use ids::*;
pub use messages::*;
pub use model::*;
pub use patch::*;
